//! Input validation errors.
//!
//! Every precondition violation is reported as [`InvalidInput`] before any
//! index or clustering work starts. Once validation passes, clustering is
//! total and cannot fail.

/// Reasons why a clustering request was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InvalidInput {
    EmptyPointSet,
    ZeroDimension,
    /// The flat buffer does not hold exactly `n * dim` values.
    ShapeMismatch {
        len: usize,
        n: usize,
        dim: usize,
    },
    NonFiniteCoordinate {
        point: usize,
        axis: usize,
    },
    NegativeEps {
        eps: f32,
    },
    NonFiniteEps,
    NonPositiveMinSamples {
        min_samples: i64,
    },
    /// A query point does not match the dimension of the indexed set.
    QueryDimensionMismatch {
        expected: usize,
        found: usize,
    },
}

impl InvalidInput {
    /// Human-readable reason, as surfaced to callers at the boundary.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::EmptyPointSet => write!(f, "invalid input: point set is empty"),
            InvalidInput::ZeroDimension => write!(f, "invalid input: point dimension is zero"),
            InvalidInput::ShapeMismatch { len, n, dim } => write!(
                f,
                "invalid input: buffer holds {len} values, expected {n} points x {dim} dims"
            ),
            InvalidInput::NonFiniteCoordinate { point, axis } => write!(
                f,
                "invalid input: point {point} has a non-finite coordinate on axis {axis}"
            ),
            InvalidInput::NegativeEps { eps } => {
                write!(f, "invalid input: eps must be non-negative (got {eps})")
            }
            InvalidInput::NonFiniteEps => write!(f, "invalid input: eps must be finite"),
            InvalidInput::NonPositiveMinSamples { min_samples } => write!(
                f,
                "invalid input: min_samples must be positive (got {min_samples})"
            ),
            InvalidInput::QueryDimensionMismatch { expected, found } => write!(
                f,
                "invalid input: query has {found} dims, index expects {expected}"
            ),
        }
    }
}

impl std::error::Error for InvalidInput {}
