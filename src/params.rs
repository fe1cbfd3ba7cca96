//! Parameter types configuring a clustering run.
//!
//! `eps` and `min_samples` are the two DBSCAN knobs. The metric and index
//! selection change how neighborhoods are computed but, for a fixed metric,
//! never which points end up in them.

use crate::error::InvalidInput;
use crate::index::{IndexKind, Metric};
use serde::{Deserialize, Serialize};

/// Clustering parameters, immutable for the duration of a run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbscanParams {
    /// Neighborhood radius (inclusive).
    pub eps: f32,
    /// Minimum neighborhood size, the point itself included, for a core point.
    pub min_samples: usize,
    pub metric: Metric,
    pub index: IndexKind,
    /// Evaluate frontier levels and build indexes with worker threads.
    /// Ignored without the `parallel` feature.
    pub parallel: bool,
}

impl Default for DbscanParams {
    fn default() -> Self {
        Self {
            eps: 0.5,
            min_samples: 5,
            metric: Metric::Euclidean,
            index: IndexKind::Auto,
            parallel: false,
        }
    }
}

impl DbscanParams {
    pub fn new(eps: f32, min_samples: usize) -> Self {
        Self {
            eps,
            min_samples,
            ..Default::default()
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.index = index;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build parameters from the signed boundary representation.
    pub fn from_raw(eps: f32, min_samples: i64) -> Result<Self, InvalidInput> {
        if min_samples <= 0 {
            return Err(InvalidInput::NonPositiveMinSamples { min_samples });
        }
        let params = Self::new(eps, min_samples as usize);
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), InvalidInput> {
        validate_eps(self.eps)?;
        if self.min_samples == 0 {
            return Err(InvalidInput::NonPositiveMinSamples { min_samples: 0 });
        }
        Ok(())
    }
}

pub(crate) fn validate_eps(eps: f32) -> Result<(), InvalidInput> {
    if eps.is_nan() || eps.is_infinite() {
        return Err(InvalidInput::NonFiniteEps);
    }
    if eps < 0.0 {
        return Err(InvalidInput::NegativeEps { eps });
    }
    Ok(())
}
