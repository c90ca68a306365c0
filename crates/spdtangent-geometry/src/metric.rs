//! Metric used to linearize the SPD manifold around a reference point.
//!
//! ```text
//! riemann: M = log(C^{-1/2} X C^{-1/2})       (affine-invariant)
//! euclid:  M = log(X) - log(C)                (log-Euclidean)
//! ```
//!
//! Only the affine-invariant map is inverted by
//! [`TangentSpace::unproject`](crate::TangentSpace::unproject). The
//! log-Euclidean vector is a difference of logarithms, not a whitened
//! logarithm, so feeding it to the inverter does not give back `X`.

use spdtangent_core::error::{Result, TangentError};
use std::{fmt, str::FromStr};

/// The two supported tangent-space metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    /// Affine-invariant Riemannian metric (default)
    #[default]
    Riemann,
    /// Log-Euclidean metric
    Euclid,
}

impl Metric {
    /// All supported metrics.
    pub const ALL: [Self; 2] = [Self::Riemann, Self::Euclid];

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Riemann => "riemann",
            Self::Euclid => "euclid",
        }
    }

    /// Whether `unproject` is the exact inverse of `project` under this metric.
    pub fn is_invertible(self) -> bool {
        match self {
            Self::Riemann => true,
            Self::Euclid => false,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = TangentError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| TangentError::unknown_metric(s))
    }
}

impl TryFrom<&str> for Metric {
    type Error = TangentError;

    fn try_from(s: &str) -> Result<Self> {
        s.parse()
    }
}
