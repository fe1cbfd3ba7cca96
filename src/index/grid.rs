use super::{Metric, RadiusIndex};
use crate::types::PointSet;
use std::collections::HashMap;
use std::ops::{ControlFlow, Range};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Highest dimension the grid will accept; `3^D` neighbor cells beyond this
/// make the tree strictly better.
pub const GRID_MAX_DIM: usize = 6;

/// Maximum number of cells along one axis before cell coordinates risk
/// losing precision in the floor division.
const MAX_CELL_SPAN: f64 = 1e9;

/// Relative widening of the cell side over `eps`. Absorbs the rounding of
/// the distance predicate so a neighbor never lands two cells away.
const CELL_SLACK: f64 = 1e-5;

/// Uniform grid of cubic cells keyed by integer cell coordinates.
///
/// Only occupied cells are stored. Points are kept in `order`, sorted by
/// cell key, and each cell maps to a contiguous range of that vector.
#[derive(Debug)]
pub struct GridIndex<'a> {
    points: PointSet<'a>,
    eps: f32,
    metric: Metric,
    threshold: f64,
    origin: Vec<f64>,
    side: f64,
    order: Vec<usize>,
    cells: HashMap<Box<[i64]>, Range<usize>>,
    offsets: Vec<i64>,
}

impl<'a> GridIndex<'a> {
    /// Whether cell assignment is exact for this point set and radius.
    pub fn supports(points: PointSet<'_>, eps: f32) -> bool {
        if points.dim() > GRID_MAX_DIM {
            return false;
        }
        let side = cell_side(eps);
        let (lo, hi) = bounds(points);
        lo.iter()
            .zip(&hi)
            .all(|(l, h)| ((h - l) / side).is_finite() && (h - l) / side <= MAX_CELL_SPAN)
    }

    pub fn build(points: PointSet<'a>, eps: f32, metric: Metric, parallel: bool) -> Self {
        let dim = points.dim();
        let side = cell_side(eps);
        let (origin, _) = bounds(points);
        let keys = compute_keys(points, &origin, side, parallel);

        let key_of = |i: usize| &keys[i * dim..(i + 1) * dim];
        let mut order: Vec<usize> = (0..points.len()).collect();
        let by_cell = |a: &usize, b: &usize| key_of(*a).cmp(key_of(*b)).then(a.cmp(b));
        #[cfg(feature = "parallel")]
        {
            if parallel {
                order.par_sort_unstable_by(by_cell);
            } else {
                order.sort_unstable_by(by_cell);
            }
        }
        #[cfg(not(feature = "parallel"))]
        order.sort_unstable_by(by_cell);

        let mut cells = HashMap::new();
        let mut start = 0;
        while start < order.len() {
            let key = key_of(order[start]);
            let mut end = start + 1;
            while end < order.len() && key_of(order[end]) == key {
                end += 1;
            }
            cells.insert(key.to_vec().into_boxed_slice(), start..end);
            start = end;
        }

        Self {
            points,
            eps,
            metric,
            threshold: metric.threshold(eps),
            origin,
            side,
            order,
            cells,
            offsets: scan_offsets(eps, dim),
        }
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl RadiusIndex for GridIndex<'_> {
    fn points(&self) -> PointSet<'_> {
        self.points
    }

    fn eps(&self) -> f32 {
        self.eps
    }

    fn metric(&self) -> Metric {
        self.metric
    }

    fn visit_within<F>(&self, query: &[f32], mut visit: F)
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        let dim = self.points.dim();
        let mut home = vec![0i64; dim];
        cell_of(query, &self.origin, self.side, &mut home);
        let mut key = vec![0i64; dim];
        for offset in self.offsets.chunks_exact(dim) {
            for ((k, h), o) in key.iter_mut().zip(&home).zip(offset) {
                *k = h.saturating_add(*o);
            }
            let Some(range) = self.cells.get(key.as_slice()) else {
                continue;
            };
            for &j in &self.order[range.clone()] {
                if self.metric.within(query, self.points.point(j), self.threshold)
                    && visit(j).is_break()
                {
                    return;
                }
            }
        }
    }
}

fn cell_side(eps: f32) -> f64 {
    // eps == 0 only admits exact duplicates; any positive side keeps them together.
    if eps > 0.0 {
        eps as f64 * (1.0 + CELL_SLACK)
    } else {
        1.0
    }
}

fn bounds(points: PointSet<'_>) -> (Vec<f64>, Vec<f64>) {
    let dim = points.dim();
    let mut lo = vec![f64::INFINITY; dim];
    let mut hi = vec![f64::NEG_INFINITY; dim];
    for i in 0..points.len() {
        for (axis, &v) in points.point(i).iter().enumerate() {
            let v = v as f64;
            lo[axis] = lo[axis].min(v);
            hi[axis] = hi[axis].max(v);
        }
    }
    (lo, hi)
}

#[inline]
fn cell_of(p: &[f32], origin: &[f64], side: f64, out: &mut [i64]) {
    for ((c, &v), o) in out.iter_mut().zip(p).zip(origin) {
        *c = ((v as f64 - o) / side).floor() as i64;
    }
}

fn compute_keys(points: PointSet<'_>, origin: &[f64], side: f64, parallel: bool) -> Vec<i64> {
    let dim = points.dim();
    let mut keys = vec![0i64; points.len() * dim];
    #[cfg(feature = "parallel")]
    {
        if parallel {
            keys.par_chunks_mut(dim)
                .enumerate()
                .for_each(|(i, key)| cell_of(points.point(i), origin, side, key));
            return keys;
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;
    for (i, key) in keys.chunks_mut(dim).enumerate() {
        cell_of(points.point(i), origin, side, key);
    }
    keys
}

/// Offsets scanned by every query. With `eps == 0` only exact duplicates
/// qualify, and duplicates always share a cell.
fn scan_offsets(eps: f32, dim: usize) -> Vec<i64> {
    if eps > 0.0 {
        neighbor_offsets(dim)
    } else {
        vec![0; dim]
    }
}

/// All `3^dim` offsets in `{-1, 0, 1}^dim`, flattened row by row.
fn neighbor_offsets(dim: usize) -> Vec<i64> {
    let count = 3usize.pow(dim as u32);
    let mut out = Vec::with_capacity(count * dim);
    for mut code in 0..count {
        for _ in 0..dim {
            out.push((code % 3) as i64 - 1);
            code /= 3;
        }
    }
    out
}
