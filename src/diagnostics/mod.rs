//! Run diagnostics returned alongside clustering results.
//!
//! [`RunReport`] summarizes one call of [`Dbscan::fit_with_report`](crate::Dbscan):
//! input shape, the index that was actually built, expansion counters and a
//! per-stage timing trace. Everything serializes to camelCase JSON for the
//! command-line tool.

pub mod timing;

pub use timing::{RunTimings, Stage, StageTiming};

use crate::index::{IndexKind, Metric};
use crate::result::DbscanResult;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub n_points: usize,
    pub dim: usize,
    pub eps: f32,
    pub min_samples: usize,
    pub metric: Metric,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub input: InputDescriptor,
    /// Index structure actually built (never `Auto`).
    pub index: IndexKind,
    pub parallel: bool,
    pub n_clusters: usize,
    pub noise_points: usize,
    pub core_points: usize,
    pub cluster_sizes: Vec<usize>,
    pub neighbor_queries: usize,
    pub max_frontier: usize,
    pub timings: RunTimings,
}

impl RunReport {
    /// One-line human summary, used by the command-line tools.
    pub fn summary(&self) -> String {
        format!(
            "n={} dim={} eps={} min_samples={} index={:?} clusters={} noise={} total_ms={:.3} ({})",
            self.input.n_points,
            self.input.dim,
            self.input.eps,
            self.input.min_samples,
            self.index,
            self.n_clusters,
            self.noise_points,
            self.timings.total_ms,
            self.timings.stage_summary()
        )
    }

    pub(crate) fn describe(
        input: InputDescriptor,
        index: IndexKind,
        parallel: bool,
        result: &DbscanResult,
        neighbor_queries: usize,
        max_frontier: usize,
        timings: RunTimings,
    ) -> Self {
        Self {
            input,
            index,
            parallel,
            n_clusters: result.n_clusters,
            noise_points: result.noise_count(),
            core_points: result.core_sample_indices.len(),
            cluster_sizes: result.cluster_sizes(),
            neighbor_queries,
            max_frontier,
            timings,
        }
    }
}
