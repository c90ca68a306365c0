//! Core traits and types for tangent-space mapping of SPD matrices.
//!
//! This crate provides the foundations the geometry crate is built on:
//! the scalar abstraction, the error type, and the elementary spectral
//! functions (square root, inverse square root, logarithm, exponential)
//! of symmetric positive-definite matrices.
//!
//! # Modules
//!
//! - [`config`]: Process-wide batch parallelism thresholds
//! - [`error`]: Error type shared by every operation
//! - [`matrix_functions`]: The `MatrixFunctions` contract and its eigen-based implementation
//! - [`types`]: Scalar trait, matrix aliases and numerical constants
//! - [`validation`]: Shape checks and opt-in SPD validation

pub mod config;
pub mod error;
pub mod matrix_functions;
pub mod types;
pub mod utils;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub use utils::test_helpers;

// Re-export commonly used items at the crate root
pub use error::{Result, TangentError};
pub use matrix_functions::{EigenMatrixFunctions, MatrixFunctions};
pub use types::Scalar;

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use spdtangent_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{
        get_parallel_config, set_parallel_config, ParallelConfig, ParallelConfigBuilder,
        ShouldParallelize,
    };
    pub use crate::error::{Result, TangentError};
    pub use crate::matrix_functions::{EigenMatrixFunctions, MatrixFunctions};
    pub use crate::types::{constants, Batch, DMatrix, DVector, PackedBatch, Scalar};
    pub use crate::validation::{check_spd, check_symmetric};
}
