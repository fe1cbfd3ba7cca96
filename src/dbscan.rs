//! DBSCAN driver tying validation, indexing, expansion and assembly together.
//!
//! Overview
//! - Validates the point buffer and parameters; any violation is returned as
//!   [`InvalidInput`] before work starts.
//! - Builds the spatial index selected by [`DbscanParams::index`].
//! - Runs the cluster expansion over the index.
//! - Compacts labels into a [`DbscanResult`].
//!
//! Usage
//! ```
//! use fast_dbscan::{Dbscan, DbscanParams};
//!
//! let data = [0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 10.0, 10.0];
//! let result = Dbscan::new(DbscanParams::new(1.5, 2)).fit_flat(&data, 2).unwrap();
//! assert_eq!(result.labels, vec![0, 0, 0, -1]);
//! ```

use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{InputDescriptor, RunReport, RunTimings, Stage};
use crate::error::InvalidInput;
use crate::expand::expand_clusters;
use crate::index::SpatialIndex;
use crate::neighbors::NeighborQuery;
use crate::params::DbscanParams;
use crate::result::{assemble, DbscanResult};
use crate::types::PointSet;
use log::debug;
use nalgebra::Point;
use std::time::Instant;

/// Reusable clusterer holding a parameter set.
#[derive(Clone, Debug, Default)]
pub struct Dbscan {
    params: DbscanParams,
}

impl Dbscan {
    pub fn new(params: DbscanParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DbscanParams {
        &self.params
    }

    pub fn fit(&self, points: PointSet<'_>) -> Result<DbscanResult, InvalidInput> {
        self.fit_with_report(points).map(|(result, _)| result)
    }

    /// Clusters a flat row-major buffer whose row count is implied by `dim`.
    pub fn fit_flat(&self, data: &[f32], dim: usize) -> Result<DbscanResult, InvalidInput> {
        self.fit(PointSet::from_flat(data, dim)?)
    }

    /// Clusters `points` and returns a diagnostics report alongside.
    pub fn fit_with_report(
        &self,
        points: PointSet<'_>,
    ) -> Result<(DbscanResult, RunReport), InvalidInput> {
        let params = self.params;
        params.validate()?;

        let total = Instant::now();
        let mut timings = RunTimings::default();

        let index = timings.measure(Stage::Index, || {
            SpatialIndex::build(
                points,
                params.eps,
                params.metric,
                params.index,
                params.parallel,
            )
        })?;
        let index_kind = index.kind();
        let neighbors = NeighborQuery::new(index);

        let expansion = timings.measure(Stage::Expand, || {
            expand_clusters(&neighbors, params.min_samples, params.parallel)
        });
        let result = timings.measure(Stage::Assemble, || {
            assemble(&expansion.labels, &expansion.core)
        });
        timings.total_ms = elapsed_ms(total);

        debug!(
            "Dbscan::fit n={} dim={} eps={} min_samples={} index={:?} clusters={} noise={} latency_ms={:.3}",
            points.len(),
            points.dim(),
            params.eps,
            params.min_samples,
            index_kind,
            result.n_clusters,
            result.noise_count(),
            timings.total_ms
        );

        let report = RunReport::describe(
            InputDescriptor {
                n_points: points.len(),
                dim: points.dim(),
                eps: params.eps,
                min_samples: params.min_samples,
                metric: params.metric,
            },
            index_kind,
            params.parallel,
            &result,
            expansion.stats.queries,
            expansion.stats.max_frontier,
            timings,
        );
        Ok((result, report))
    }
}

/// Boundary entry point: `n` points of `dim` coordinates in a row-major buffer.
///
/// Validation order: `min_samples`, `eps`, then the buffer shape, so that a
/// request with several problems reports the parameter error first.
pub fn dbscan(
    data: &[f32],
    n: usize,
    dim: usize,
    eps: f32,
    min_samples: i64,
) -> Result<DbscanResult, InvalidInput> {
    let params = DbscanParams::from_raw(eps, min_samples)?;
    let points = PointSet::new(data, n, dim)?;
    Dbscan::new(params).fit(points)
}

/// Clusters fixed-dimension points such as `Point2<f32>` or `Point3<f32>`.
pub fn dbscan_points<const D: usize>(
    points: &[Point<f32, D>],
    eps: f32,
    min_samples: i64,
) -> Result<DbscanResult, InvalidInput> {
    let flat: Vec<f32> = points.iter().flat_map(|p| p.coords.iter().copied()).collect();
    dbscan(&flat, points.len(), D, eps, min_samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexKind;
    use nalgebra::{Point2, Point3};

    #[test]
    fn fixed_dimension_points_match_flat_buffer() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(0.5, 0.0),
            Point2::new(9.0, 9.0),
            Point2::new(9.0, 9.5),
        ];
        let result = dbscan_points(&pts, 1.0, 2).unwrap();
        assert_eq!(result.labels, vec![0, 0, 1, 1]);

        let pts3 = [Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 0.0, 5.0)];
        let result = dbscan_points(&pts3, 1.0, 2).unwrap();
        assert_eq!(result.labels, vec![-1, -1]);
    }

    #[test]
    fn report_names_the_built_index() {
        let data = [0.0, 0.0, 0.1, 0.1, 0.2, 0.2];
        let points = PointSet::from_flat(&data, 2).unwrap();
        let params = DbscanParams::new(0.5, 2).with_index(IndexKind::BruteForce);
        let (result, report) = Dbscan::new(params).fit_with_report(points).unwrap();
        assert_eq!(report.index, IndexKind::BruteForce);
        assert_eq!(report.n_clusters, result.n_clusters);
        assert_eq!(report.neighbor_queries, 3);
        assert!(report.timings.stage_ms(Stage::Expand).is_some());
        assert!(report.summary().contains("expand="), "{}", report.summary());
    }

    #[test]
    fn boundary_rejects_non_positive_min_samples() {
        let err = dbscan(&[0.0, 0.0], 1, 2, 1.0, -3).unwrap_err();
        assert_eq!(err, InvalidInput::NonPositiveMinSamples { min_samples: -3 });
    }
}
