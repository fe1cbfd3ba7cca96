use serde::{Deserialize, Serialize};

/// Distance used to decide eps-neighborhood membership.
///
/// All comparisons happen in the metric's reduced space (squared distance for
/// Euclidean) so that every index type shares a single membership predicate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[default]
    Euclidean,
    Manhattan,
    Chebyshev,
}

impl Metric {
    /// Converts a radius into the metric's reduced units.
    ///
    /// Reduced values are f64: squaring any finite f32 stays finite and
    /// non-zero there, so the predicate neither overflows nor underflows.
    #[inline]
    pub fn threshold(self, eps: f32) -> f64 {
        let eps = f64::from(eps);
        match self {
            Metric::Euclidean => eps * eps,
            Metric::Manhattan | Metric::Chebyshev => eps,
        }
    }

    #[inline]
    pub fn reduced_distance(self, a: &[f32], b: &[f32]) -> f64 {
        debug_assert_eq!(a.len(), b.len());
        let deltas = a.iter().zip(b).map(|(&x, &y)| f64::from(x) - f64::from(y));
        match self {
            Metric::Euclidean => deltas.map(|d| d * d).sum(),
            Metric::Manhattan => deltas.map(f64::abs).sum(),
            Metric::Chebyshev => deltas.map(f64::abs).fold(0.0, f64::max),
        }
    }

    #[inline]
    pub fn within(self, a: &[f32], b: &[f32], threshold: f64) -> bool {
        self.reduced_distance(a, b) <= threshold
    }

    /// True when the offset between `query` and a split plane at `plane`
    /// already rules out membership.
    ///
    /// Each supported metric is bounded below by any one of its per-axis
    /// terms, so this is a safe pruning test for tree traversal.
    #[inline]
    pub fn axis_excludes(self, query: f32, plane: f32, threshold: f64) -> bool {
        let delta = f64::from(query) - f64::from(plane);
        match self {
            Metric::Euclidean => delta * delta > threshold,
            Metric::Manhattan | Metric::Chebyshev => delta.abs() > threshold,
        }
    }
}
