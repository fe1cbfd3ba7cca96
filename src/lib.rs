#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod dbscan;
pub mod diagnostics;
pub mod error;
pub mod params;
pub mod result;
pub mod types;

// Building blocks – public for tools and benchmarks, less stable.
pub mod config;
pub mod expand;
pub mod index;
pub mod io;
pub mod neighbors;

// --- High-level re-exports -------------------------------------------------

pub use crate::dbscan::{dbscan, dbscan_points, Dbscan};
pub use crate::diagnostics::RunReport;
pub use crate::error::InvalidInput;
pub use crate::index::{IndexKind, Metric};
pub use crate::params::DbscanParams;
pub use crate::result::DbscanResult;
pub use crate::types::{Label, PointSet, NOISE};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use fast_dbscan::prelude::*;
///
/// let data = [0.0f32, 0.0, 0.2, 0.0, 8.0, 8.0];
/// let points = PointSet::new(&data, 3, 2).unwrap();
/// let result = Dbscan::new(DbscanParams::new(0.5, 2)).fit(points).unwrap();
/// assert_eq!(result.n_clusters, 1);
/// assert_eq!(result.labels[2], NOISE);
/// ```
pub mod prelude {
    pub use crate::{Dbscan, DbscanParams, DbscanResult, IndexKind, Metric, PointSet, NOISE};
}
