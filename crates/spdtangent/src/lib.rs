//! # spdtangent
//!
//! Tangent-space mapping of symmetric positive-definite matrices.
//!
//! Covariance matrices of multichannel signals live on the SPD manifold,
//! where averages and distances are not Euclidean. Projecting them to the
//! tangent space at a reference point (typically their Riemannian mean)
//! turns each matrix into a flat feature vector that any linear learner
//! can consume, while [`unproject`] maps vectors back to matrices.
//!
//! ```rust
//! use spdtangent::prelude::*;
//!
//! let cref = DMatrix::from_row_slice(2, 2, &[2.0, 0.3, 0.3, 1.0]);
//! let covariances = vec![
//!     DMatrix::from_row_slice(2, 2, &[1.0, 0.1, 0.1, 1.5]),
//!     DMatrix::from_row_slice(2, 2, &[3.0, 0.0, 0.0, 0.5]),
//! ];
//!
//! let features = project(&covariances, &cref, Metric::Riemann)?;
//! assert_eq!(features.shape(), (2, 3));
//!
//! let recovered = unproject(&features, &cref)?;
//! assert!((&recovered[0] - &covariances[0]).norm() < 1e-9);
//! # Ok::<(), TangentError>(())
//! ```
//!
//! ## Crates
//!
//! - [`spdtangent_core`]: scalar trait, errors, matrix functions, configuration
//! - [`spdtangent_geometry`]: metrics, packing, projection and transport

pub use nalgebra;
pub use spdtangent_core;
pub use spdtangent_geometry;

pub use spdtangent_core::{
    config::{ParallelConfig, ParallelConfigBuilder},
    EigenMatrixFunctions, MatrixFunctions, Result, Scalar, TangentError,
};
pub use spdtangent_geometry::{
    matrix_dim, packed_len, parallel_transport, project, project_with_transport, unproject,
    Metric, Packing, ParallelTransport, TangentSpace,
};

/// Common imports.
pub mod prelude {
    pub use spdtangent_core::prelude::*;
    pub use spdtangent_geometry::{
        packed_len, parallel_transport, project, project_with_transport, unproject, Metric,
        ParallelTransport, TangentSpace,
    };
}
