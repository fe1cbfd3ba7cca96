//! Spatial indexes answering exact radius-neighbor queries.
//!
//! Three structures share one membership predicate ([`Metric::within`]), so
//! they return identical neighbor sets and differ only in cost:
//!
//! - [`GridIndex`]: uniform grid with cell side `eps`, hashed by integer cell
//!   coordinates. A query scans the `3^D` cells around the query cell (only its
//!   own cell when `eps == 0`). Best for low-dimensional, roughly uniform
//!   data where cell lookup is O(1).
//! - [`KdTree`]: balanced median-split tree with small leaves. Handles skewed
//!   densities and higher dimensions where `3^D` cell scans explode.
//! - [`BruteForce`]: O(N) scan per query, kept as the reference oracle.
//!
//! [`IndexKind::Auto`] picks the grid for `D <= 3` when its cell coordinates
//! stay well inside floating-point precision, and the k-d tree otherwise.

mod brute;
mod grid;
mod kdtree;
mod metric;


pub use self::brute::BruteForce;
pub use self::grid::GridIndex;
pub use self::kdtree::{KdTree, LEAF_SIZE};
pub use self::metric::Metric;

use crate::error::InvalidInput;
use crate::params::validate_eps;
use crate::types::PointSet;
use log::{debug, log_enabled, Level};
use serde::{Deserialize, Serialize};
use std::ops::ControlFlow;

/// Largest dimension for which `Auto` selects the grid.
pub const AUTO_GRID_MAX_DIM: usize = 3;

/// Requested index structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    #[default]
    Auto,
    Grid,
    KdTree,
    BruteForce,
}

/// Exact radius queries over an indexed point set.
pub trait RadiusIndex {
    fn points(&self) -> PointSet<'_>;

    /// Radius in the metric's natural units.
    fn eps(&self) -> f32;

    fn metric(&self) -> Metric;

    /// Calls `visit` for every indexed point within `eps` of `query`, in no
    /// particular order, until it returns `ControlFlow::Break`.
    fn visit_within<F>(&self, query: &[f32], visit: F)
    where
        F: FnMut(usize) -> ControlFlow<()>;

    /// Collects the neighbors of an indexed point, itself included.
    fn query(&self, i: usize) -> Vec<usize> {
        let points = self.points();
        let mut out = Vec::new();
        self.visit_within(points.point(i), |j| {
            out.push(j);
            ControlFlow::Continue(())
        });
        out.sort_unstable();
        out
    }
}

/// Statically dispatched wrapper over the concrete index types.
#[derive(Debug)]
pub enum SpatialIndex<'a> {
    Grid(GridIndex<'a>),
    KdTree(KdTree<'a>),
    BruteForce(BruteForce<'a>),
}

impl<'a> SpatialIndex<'a> {
    /// Build the requested index over `points`.
    ///
    /// An explicit `Grid` request falls back to the k-d tree when the grid
    /// cannot guarantee exact cell assignment (see [`GridIndex::supports`]).
    pub fn build(
        points: PointSet<'a>,
        eps: f32,
        metric: Metric,
        kind: IndexKind,
        parallel: bool,
    ) -> Result<Self, InvalidInput> {
        validate_eps(eps)?;
        let resolved = resolve_kind(points, eps, kind);
        if resolved != kind && kind != IndexKind::Auto {
            debug!(
                "SpatialIndex::build requested={:?} unsupported for n={} dim={} eps={} -> {:?}",
                kind,
                points.len(),
                points.dim(),
                eps,
                resolved
            );
        }
        let index = match resolved {
            IndexKind::Grid => SpatialIndex::Grid(GridIndex::build(points, eps, metric, parallel)),
            IndexKind::BruteForce => SpatialIndex::BruteForce(BruteForce::new(points, eps, metric)),
            IndexKind::KdTree | IndexKind::Auto => {
                SpatialIndex::KdTree(KdTree::build(points, eps, metric, parallel))
            }
        };
        if log_enabled!(Level::Debug) {
            let shape = match &index {
                SpatialIndex::Grid(g) => format!("cells={}", g.cell_count()),
                SpatialIndex::KdTree(t) => format!("depth={}", t.depth()),
                SpatialIndex::BruteForce(_) => String::from("exhaustive"),
            };
            debug!(
                "SpatialIndex::build kind={:?} n={} dim={} eps={} {}",
                index.kind(),
                points.len(),
                points.dim(),
                eps,
                shape
            );
        }
        Ok(index)
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            SpatialIndex::Grid(_) => IndexKind::Grid,
            SpatialIndex::KdTree(_) => IndexKind::KdTree,
            SpatialIndex::BruteForce(_) => IndexKind::BruteForce,
        }
    }
}

fn resolve_kind(points: PointSet<'_>, eps: f32, kind: IndexKind) -> IndexKind {
    match kind {
        IndexKind::Auto => {
            if points.dim() <= AUTO_GRID_MAX_DIM && eps > 0.0 && GridIndex::supports(points, eps) {
                IndexKind::Grid
            } else {
                IndexKind::KdTree
            }
        }
        IndexKind::Grid if !GridIndex::supports(points, eps) => IndexKind::KdTree,
        other => other,
    }
}

impl RadiusIndex for SpatialIndex<'_> {
    fn points(&self) -> PointSet<'_> {
        match self {
            SpatialIndex::Grid(g) => g.points(),
            SpatialIndex::KdTree(t) => t.points(),
            SpatialIndex::BruteForce(b) => b.points(),
        }
    }

    fn eps(&self) -> f32 {
        match self {
            SpatialIndex::Grid(g) => g.eps(),
            SpatialIndex::KdTree(t) => t.eps(),
            SpatialIndex::BruteForce(b) => b.eps(),
        }
    }

    fn metric(&self) -> Metric {
        match self {
            SpatialIndex::Grid(g) => g.metric(),
            SpatialIndex::KdTree(t) => t.metric(),
            SpatialIndex::BruteForce(b) => b.metric(),
        }
    }

    fn visit_within<F>(&self, query: &[f32], visit: F)
    where
        F: FnMut(usize) -> ControlFlow<()>,
    {
        match self {
            SpatialIndex::Grid(g) => g.visit_within(query, visit),
            SpatialIndex::KdTree(t) => t.visit_within(query, visit),
            SpatialIndex::BruteForce(b) => b.visit_within(query, visit),
        }
    }
}
