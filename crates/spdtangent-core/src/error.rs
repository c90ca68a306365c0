//! Error types for tangent-space operations.
//!
//! Every fallible operation in the workspace returns [`TangentError`].
//! Invalid arguments (shapes, packed widths, metric names) are reported
//! before any computation starts; numerical failures come from the matrix
//! functions and are propagated untouched.

use thiserror::Error;

/// Errors that can occur while mapping SPD matrices to and from tangent spaces.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TangentError {
    /// Dimension mismatch between matrices.
    ///
    /// Raised when a batch sample, a tangent vector or a second reference
    /// point does not share the dimension of the reference point.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// An argument is malformed independently of any other argument.
    ///
    /// For example a packed width that is not a triangular number.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the problem
        reason: String,
    },

    /// A metric name that is neither `riemann` nor `euclid`.
    #[error("Unknown metric '{name}' (expected 'riemann' or 'euclid')")]
    UnknownMetric {
        /// The name that failed to parse
        name: String,
    },

    /// Numerical failure inside a matrix function.
    ///
    /// Typically a non-positive eigenvalue reaching `sqrt`, `invsqrt` or
    /// `log`, or non-finite input.
    #[error("Numerical error: {reason}")]
    NumericalError {
        /// Description of the numerical issue
        reason: String,
    },

    /// Matrix is not symmetric positive definite.
    ///
    /// Only produced by the opt-in validation helpers.
    #[error("Matrix is not SPD: {reason}")]
    InvalidPoint {
        /// Description of why the matrix was rejected
        reason: String,
    },
}

impl TangentError {
    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an InvalidArgument error with a custom reason.
    pub fn invalid_argument<S: Into<String>>(reason: S) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Create an UnknownMetric error.
    pub fn unknown_metric<S: Into<String>>(name: S) -> Self {
        Self::UnknownMetric { name: name.into() }
    }

    /// Create a NumericalError with a custom reason.
    pub fn numerical_error<S: Into<String>>(reason: S) -> Self {
        Self::NumericalError {
            reason: reason.into(),
        }
    }

    /// Create an InvalidPoint error with a custom reason.
    pub fn invalid_point<S: Into<String>>(reason: S) -> Self {
        Self::InvalidPoint {
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by a malformed argument rather than by
    /// the numbers themselves.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. } | Self::InvalidArgument { .. } | Self::UnknownMetric { .. }
        )
    }
}

/// Result type alias for operations that can produce TangentError.
pub type Result<T> = std::result::Result<T, TangentError>;
