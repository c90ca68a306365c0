//! # Spectral Matrix Functions
//!
//! Elementary functions of symmetric matrices computed through the
//! eigen-decomposition `A = U Λ Uᵀ`:
//!
//! ```text
//! √A      = U Λ^{1/2}  Uᵀ
//! A^{-1/2} = U Λ^{-1/2} Uᵀ
//! log(A)  = U log(Λ)   Uᵀ
//! exp(S)  = U exp(Λ)   Uᵀ
//! ```
//!
//! `sqrt`, `invsqrt` and `log` are only defined on the SPD cone; `exp`
//! accepts any symmetric matrix and always returns an SPD matrix. On the
//! cone `exp(log(A)) = A` up to rounding.
//!
//! The tangent-space code only talks to these functions through the
//! [`MatrixFunctions`] trait, so an alternative backend (for example a
//! LAPACK-based one) can be plugged in without touching the geometry.
//!
//! ## Example
//!
//! ```rust
//! use spdtangent_core::matrix_functions::{EigenMatrixFunctions, MatrixFunctions};
//! use nalgebra::DMatrix;
//!
//! let functions = EigenMatrixFunctions::<f64>::default();
//! let a = DMatrix::from_row_slice(2, 2, &[4.0, 0.0, 0.0, 9.0]);
//! let root = functions.sqrt(&a)?;
//! assert!((root[(1, 1)] - 3.0).abs() < 1e-12);
//! # Ok::<(), spdtangent_core::error::TangentError>(())
//! ```

use crate::{
    error::{Result, TangentError},
    types::{DMatrix, Scalar},
};
use num_traits::Float;

/// Elementary functions of symmetric / SPD matrices.
///
/// Implementations must be pure: same input, same output, no shared
/// mutable state, so that batches can be mapped from several threads.
pub trait MatrixFunctions<T: Scalar>: Send + Sync {
    /// Unique SPD square root of an SPD matrix.
    fn sqrt(&self, a: &DMatrix<T>) -> Result<DMatrix<T>>;

    /// Inverse of the SPD square root of an SPD matrix.
    fn invsqrt(&self, a: &DMatrix<T>) -> Result<DMatrix<T>>;

    /// Principal matrix logarithm of an SPD matrix (a symmetric matrix).
    fn log(&self, a: &DMatrix<T>) -> Result<DMatrix<T>>;

    /// Matrix exponential of a symmetric matrix (an SPD matrix).
    fn exp(&self, a: &DMatrix<T>) -> Result<DMatrix<T>>;
}

/// [`MatrixFunctions`] backed by nalgebra's symmetric eigen-decomposition.
///
/// Inputs are symmetrized as `(A + Aᵀ)/2` before decomposition, which
/// absorbs the rounding asymmetry of products like `C^{-1/2} X C^{-1/2}`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenMatrixFunctions<T = f64> {
    /// Eigenvalues at or below this floor are rejected by sqrt/invsqrt/log.
    min_eigenvalue: T,
}

impl<T: Scalar> Default for EigenMatrixFunctions<T> {
    fn default() -> Self {
        Self {
            min_eigenvalue: T::zero(),
        }
    }
}

impl<T: Scalar> EigenMatrixFunctions<T> {
    /// Creates the functions with strict positivity as the only requirement.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the functions with a custom eigenvalue floor.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the floor is negative or not finite.
    pub fn with_min_eigenvalue(min_eigenvalue: T) -> Result<Self> {
        if !Float::is_finite(min_eigenvalue) || min_eigenvalue < T::zero() {
            return Err(TangentError::invalid_argument(format!(
                "Minimum eigenvalue must be finite and non-negative, got {min_eigenvalue}"
            )));
        }
        Ok(Self { min_eigenvalue })
    }

    /// Returns the eigenvalue floor.
    #[inline]
    pub fn min_eigenvalue(&self) -> T {
        self.min_eigenvalue
    }

    /// Applies `f` to the spectrum of the symmetric part of `a`.
    fn spectral_map<F>(&self, a: &DMatrix<T>, name: &str, positive: bool, f: F) -> Result<DMatrix<T>>
    where
        F: Fn(T) -> T,
    {
        if !a.is_square() {
            return Err(TangentError::dimension_mismatch(
                "square matrix",
                format!("{}×{}", a.nrows(), a.ncols()),
            ));
        }
        if a.iter().any(|x| !Float::is_finite(*x)) {
            return Err(TangentError::numerical_error(format!(
                "{name}: matrix contains non-finite values"
            )));
        }

        let symmetric = (a + a.transpose()) * <T as Scalar>::from_f64(0.5);
        let eigen = symmetric.symmetric_eigen();

        if positive {
            if let Some(&bad) = eigen.eigenvalues.iter().find(|&&x| x <= self.min_eigenvalue) {
                return Err(TangentError::numerical_error(format!(
                    "{name}: eigenvalue {bad} is not above {} (matrix not positive definite)",
                    self.min_eigenvalue
                )));
            }
        }

        let values = eigen.eigenvalues.map(f);
        let diag = DMatrix::from_diagonal(&values);
        Ok(&eigen.eigenvectors * diag * eigen.eigenvectors.transpose())
    }
}

impl<T: Scalar> MatrixFunctions<T> for EigenMatrixFunctions<T> {
    fn sqrt(&self, a: &DMatrix<T>) -> Result<DMatrix<T>> {
        self.spectral_map(a, "sqrt", true, |x| <T as Float>::sqrt(x))
    }

    fn invsqrt(&self, a: &DMatrix<T>) -> Result<DMatrix<T>> {
        self.spectral_map(a, "invsqrt", true, |x| T::one() / <T as Float>::sqrt(x))
    }

    fn log(&self, a: &DMatrix<T>) -> Result<DMatrix<T>> {
        self.spectral_map(a, "log", true, |x| <T as Float>::ln(x))
    }

    fn exp(&self, a: &DMatrix<T>) -> Result<DMatrix<T>> {
        self.spectral_map(a, "exp", false, |x| <T as Float>::exp(x))
    }
}
