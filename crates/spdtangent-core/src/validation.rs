//! Shape checks and opt-in SPD validation.
//!
//! The shape checks run on every public tangent-space entry point. The
//! SPD checks are never run implicitly: callers guarantee SPD-ness, and
//! may use [`check_spd`] when they cannot.

use crate::{
    error::{Result, TangentError},
    types::{DMatrix, Scalar},
};
use num_traits::Float;

/// Returns the dimension of a square, non-empty matrix.
///
/// # Errors
///
/// - `DimensionMismatch`: if the matrix is not square
/// - `InvalidArgument`: if the matrix is 0×0
pub fn check_square<T: Scalar>(name: &str, m: &DMatrix<T>) -> Result<usize> {
    if !m.is_square() {
        return Err(TangentError::dimension_mismatch(
            format!("{name} to be square"),
            format!("{}×{}", m.nrows(), m.ncols()),
        ));
    }
    if m.nrows() == 0 {
        return Err(TangentError::invalid_argument(format!(
            "{name} must have at least one row"
        )));
    }
    Ok(m.nrows())
}

/// Checks that `m` is exactly `n×n`.
pub fn check_shape<T: Scalar>(name: &str, m: &DMatrix<T>, n: usize) -> Result<()> {
    if m.nrows() != n || m.ncols() != n {
        return Err(TangentError::dimension_mismatch(
            format!("{name} of shape {n}×{n}"),
            format!("{}×{}", m.nrows(), m.ncols()),
        ));
    }
    Ok(())
}

/// Checks that a square matrix is symmetric within `tol` (Frobenius norm of `M - Mᵀ`).
pub fn check_symmetric<T: Scalar>(m: &DMatrix<T>, tol: T) -> Result<()> {
    check_square("matrix", m)?;

    if m.iter().any(|x| !Float::is_finite(*x)) {
        return Err(TangentError::invalid_point("Matrix contains non-finite values"));
    }

    let symmetry_error = (m - m.transpose()).norm();
    if symmetry_error > tol {
        return Err(TangentError::invalid_point(format!(
            "Matrix not symmetric: ‖M - Mᵀ‖ = {symmetry_error} (tolerance: {tol})"
        )));
    }
    Ok(())
}

/// Validates that a matrix is symmetric positive definite.
///
/// # Mathematical Checks
///
/// 1. Symmetry: ‖P - Pᵀ‖ ≤ tol
/// 2. Positive definiteness: λᵢ(P) > 0 ∀i
pub fn check_spd<T: Scalar>(p: &DMatrix<T>, tol: T) -> Result<()> {
    check_symmetric(p, tol)?;

    let eigen = p.clone().symmetric_eigen();
    let min_eval = eigen
        .eigenvalues
        .iter()
        .fold(<T as Float>::infinity(), |min, &val| <T as Float>::min(min, val));

    if min_eval <= T::zero() {
        return Err(TangentError::invalid_point(format!(
            "Matrix not positive definite: min eigenvalue = {min_eval}"
        )));
    }
    Ok(())
}
