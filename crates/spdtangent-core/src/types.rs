//! Type definitions and aliases for tangent-space computations.
//!
//! This module provides the scalar trait every operation is generic over,
//! the matrix aliases used for batches, and precision-dependent constants.

use nalgebra::{RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

pub use nalgebra::{DMatrix, DVector};

/// Trait for scalar types used in tangent-space mapping (f32 or f64).
///
/// This trait combines all the numeric traits required by the matrix
/// functions and the packing coefficients.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default tolerance for numerical comparisons.
    const DEFAULT_TOLERANCE: Self;

    /// Tolerance for checking that a matrix is symmetric.
    const SYMMETRY_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_from_f64` for a non-panicking version.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Try to convert from f64.
    fn try_from_f64(v: f64) -> Option<Self> {
        <Self as FromPrimitive>::from_f64(v)
    }

    /// Convert to f64 (for logging/display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails. Use `try_to_f64` for a non-panicking version.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }

    /// Try to convert to f64.
    fn try_to_f64(self) -> Option<f64> {
        num_traits::cast(self)
    }

    /// Convert from usize.
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_usize(v: usize) -> Self {
        <Self as FromPrimitive>::from_usize(v).expect("Failed to convert from usize")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-4;
    const SYMMETRY_TOLERANCE: Self = 1e-5;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-6;
    const SYMMETRY_TOLERANCE: Self = 1e-10;
}

/// An owned batch of square matrices, in sample order.
pub type Batch<T> = Vec<DMatrix<T>>;

/// A batch of packed tangent vectors, one sample per row (`Nt × n(n+1)/2`).
pub type PackedBatch<T> = DMatrix<T>;

/// Numerical constants for different precision levels.
pub mod constants {
    use super::Scalar;

    /// Get machine epsilon for the given scalar type.
    pub fn epsilon<T: Scalar>() -> T {
        T::EPSILON
    }

    /// Get default comparison tolerance.
    pub fn default_tolerance<T: Scalar>() -> T {
        T::DEFAULT_TOLERANCE
    }

    /// Get symmetry tolerance.
    pub fn symmetry_tolerance<T: Scalar>() -> T {
        T::SYMMETRY_TOLERANCE
    }

    /// `√2`, the off-diagonal packing coefficient.
    pub fn sqrt_two<T: Scalar>() -> T {
        <T as Scalar>::from_f64(std::f64::consts::SQRT_2)
    }
}
