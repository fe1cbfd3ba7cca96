//! Exact eps-neighborhoods on top of a [`SpatialIndex`].
//!
//! Neighborhoods are inclusive of the query point and returned sorted by
//! point index, which makes them reproducible regardless of the index type
//! or traversal order underneath.

use crate::error::InvalidInput;
use crate::index::{IndexKind, Metric, RadiusIndex, SpatialIndex};
use crate::types::PointSet;
use std::ops::ControlFlow;

pub struct NeighborQuery<'a> {
    index: SpatialIndex<'a>,
}

impl<'a> NeighborQuery<'a> {
    pub fn new(index: SpatialIndex<'a>) -> Self {
        Self { index }
    }

    /// Convenience constructor building the index in place.
    pub fn build(
        points: PointSet<'a>,
        eps: f32,
        metric: Metric,
        kind: IndexKind,
        parallel: bool,
    ) -> Result<Self, InvalidInput> {
        Ok(Self::new(SpatialIndex::build(
            points, eps, metric, kind, parallel,
        )?))
    }

    pub fn points(&self) -> PointSet<'_> {
        self.index.points()
    }

    pub fn len(&self) -> usize {
        self.index.points().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn neighborhood(&self, i: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.neighborhood_into(i, &mut out);
        out
    }

    /// Writes the sorted neighborhood of point `i` into `out`, reusing its
    /// allocation.
    pub fn neighborhood_into(&self, i: usize, out: &mut Vec<usize>) {
        let points = self.index.points();
        collect_sorted(&self.index, points.point(i), out);
    }

    /// Neighborhood of an arbitrary point with the indexed dimension.
    pub fn neighborhood_of(&self, query: &[f32]) -> Result<Vec<usize>, InvalidInput> {
        let dim = self.index.points().dim();
        if query.len() != dim {
            return Err(InvalidInput::QueryDimensionMismatch {
                expected: dim,
                found: query.len(),
            });
        }
        let mut out = Vec::new();
        collect_sorted(&self.index, query, &mut out);
        Ok(out)
    }

    /// Counts neighbors of `i`, stopping as soon as `limit` is reached.
    pub fn count_within(&self, i: usize, limit: usize) -> usize {
        if limit == 0 {
            return 0;
        }
        let points = self.index.points();
        let mut count = 0;
        self.index.visit_within(points.point(i), |_| {
            count += 1;
            if count >= limit {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        count
    }

    pub fn is_core(&self, i: usize, min_samples: usize) -> bool {
        self.count_within(i, min_samples) >= min_samples
    }
}

fn collect_sorted(index: &SpatialIndex<'_>, query: &[f32], out: &mut Vec<usize>) {
    out.clear();
    index.visit_within(query, |j| {
        out.push(j);
        ControlFlow::Continue(())
    });
    out.sort_unstable();
}
