use crate::error::InvalidInput;
use serde::Serialize;

/// Output label reserved for noise points.
pub const NOISE: i32 = -1;

/// Borrowed, row-major point buffer: `n` rows of `dim` coordinates.
///
/// The clustering core only ever reads through this view; indexes store
/// point indices, never copies of the coordinates.
#[derive(Clone, Copy, Debug)]
pub struct PointSet<'a> {
    data: &'a [f32],
    n: usize,
    dim: usize,
}

impl<'a> PointSet<'a> {
    /// Wrap a flat buffer, checking shape and finiteness.
    pub fn new(data: &'a [f32], n: usize, dim: usize) -> Result<Self, InvalidInput> {
        if n == 0 {
            return Err(InvalidInput::EmptyPointSet);
        }
        if dim == 0 {
            return Err(InvalidInput::ZeroDimension);
        }
        if n.checked_mul(dim) != Some(data.len()) {
            return Err(InvalidInput::ShapeMismatch {
                len: data.len(),
                n,
                dim,
            });
        }
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(InvalidInput::NonFiniteCoordinate {
                point: pos / dim,
                axis: pos % dim,
            });
        }
        Ok(Self { data, n, dim })
    }

    /// Wrap a flat buffer whose row count is implied by `dim`.
    pub fn from_flat(data: &'a [f32], dim: usize) -> Result<Self, InvalidInput> {
        if dim == 0 {
            return Err(InvalidInput::ZeroDimension);
        }
        Self::new(data, data.len() / dim, dim)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn point(&self, i: usize) -> &'a [f32] {
        let start = i * self.dim;
        &self.data[start..start + self.dim]
    }

    #[inline]
    pub fn coord(&self, i: usize, axis: usize) -> f32 {
        self.data[i * self.dim + axis]
    }
}

/// Per-point state of a clustering run.
///
/// `Noise` is tentative: a later expansion may absorb the point as a border
/// point of some cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Label {
    #[default]
    Unvisited,
    Noise,
    Cluster(u32),
}

impl Label {
    #[inline]
    pub fn is_unvisited(self) -> bool {
        matches!(self, Label::Unvisited)
    }

    #[inline]
    pub fn cluster(self) -> Option<u32> {
        match self {
            Label::Cluster(id) => Some(id),
            _ => None,
        }
    }
}
