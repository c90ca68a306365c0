//! # Parallel Transport on S⁺⁺(n)
//!
//! Under the affine-invariant metric, transporting a tangent vector `W`
//! at `A` along the geodesic to `B` is a congruence:
//!
//! ```text
//! R = exp(½ log(A^{-1/2} B A^{-1/2}))      (= (A^{-1/2} B A^{-1/2})^{1/2})
//! C = A^{1/2} R
//! E = C A^{-1/2}                          (= (B A⁻¹)^{1/2})
//! Γ_{A→B}(W) = E W Eᵀ
//! ```
//!
//! `Γ` is the identity when `A = B` and preserves the metric:
//! `tr(B⁻¹ Γ(W) B⁻¹ Γ(W)) = tr(A⁻¹ W A⁻¹ W)`.
//!
//! Tangent vectors are often stored *whitened* at their base point,
//! `M = A^{-1/2} W A^{-1/2}` (this is what `log(A^{-1/2} X A^{-1/2})`
//! produces). For those the transport reads `C M Cᵀ`, which equals
//! `Γ(A^{1/2} M A^{1/2})`, so no un-whitening product is needed; see
//! [`ParallelTransport::apply_whitened`].
//!
//! Both operators depend only on the two end points, so
//! [`ParallelTransport`] is built once and applied to any number of vectors.
//!
//! ## Example
//!
//! ```rust
//! use spdtangent_geometry::parallel_transport;
//! use nalgebra::DMatrix;
//!
//! let a = DMatrix::<f64>::identity(2, 2);
//! let b = DMatrix::from_row_slice(2, 2, &[2.0, 0.0, 0.0, 8.0]);
//! let w = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 1.0]);
//! let t = parallel_transport(&a, &b, &w)?;
//! assert!((t[(1, 1)] - 8.0).abs() < 1e-10);
//! # Ok::<(), spdtangent_core::error::TangentError>(())
//! ```

use spdtangent_core::{
    error::Result,
    matrix_functions::{EigenMatrixFunctions, MatrixFunctions},
    types::{DMatrix, Scalar},
    validation::{check_shape, check_square},
};

/// Transport operators along the geodesic between two SPD matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelTransport<T> {
    /// `C = A^{1/2} · exp(½ log(A^{-1/2} B A^{-1/2}))`
    whitened: DMatrix<T>,
    /// `E = C · A^{-1/2}`
    operator: DMatrix<T>,
}

impl<T: Scalar> ParallelTransport<T> {
    /// Builds the transport from `start` to `end`.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch`/`InvalidArgument`: if the matrices are not square
    ///   or do not share a dimension
    /// - `NumericalError`: propagated from the matrix functions
    pub fn between<F>(start: &DMatrix<T>, end: &DMatrix<T>, functions: &F) -> Result<Self>
    where
        F: MatrixFunctions<T> + ?Sized,
    {
        let n = check_square("geodesic start", start)?;
        check_shape("geodesic end", end, n)?;

        let start_sqrt = functions.sqrt(start)?;
        let start_invsqrt = functions.invsqrt(start)?;
        Self::from_roots(&start_sqrt, &start_invsqrt, end, functions)
    }

    /// Builds the transport when `start^{1/2}` and `start^{-1/2}` are
    /// already known.
    pub(crate) fn from_roots<F>(
        start_sqrt: &DMatrix<T>,
        start_invsqrt: &DMatrix<T>,
        end: &DMatrix<T>,
        functions: &F,
    ) -> Result<Self>
    where
        F: MatrixFunctions<T> + ?Sized,
    {
        let e = start_invsqrt * end * start_invsqrt;
        let half = functions.log(&e)? * <T as Scalar>::from_f64(0.5);
        let r = functions.exp(&half)?;

        let whitened = start_sqrt * r;
        let operator = &whitened * start_invsqrt;
        Ok(Self { whitened, operator })
    }

    /// Dimension of the matrices this transport acts on.
    #[inline]
    pub fn dim(&self) -> usize {
        self.operator.nrows()
    }

    /// The congruence operator `E = (B A⁻¹)^{1/2}`.
    #[inline]
    pub fn operator(&self) -> &DMatrix<T> {
        &self.operator
    }

    /// The congruence operator `C = A^{1/2} R` for whitened inputs.
    #[inline]
    pub fn whitened_operator(&self) -> &DMatrix<T> {
        &self.whitened
    }

    /// Transports the tangent vector `w` at the start point: `E w Eᵀ`.
    pub fn apply(&self, w: &DMatrix<T>) -> Result<DMatrix<T>> {
        check_shape("tangent vector", w, self.dim())?;
        Ok(&self.operator * w * self.operator.transpose())
    }

    /// Transports a tangent vector given whitened at the start point,
    /// `m = A^{-1/2} W A^{-1/2}`: returns `C m Cᵀ = Γ(W)`.
    pub fn apply_whitened(&self, m: &DMatrix<T>) -> Result<DMatrix<T>> {
        check_shape("whitened tangent vector", m, self.dim())?;
        Ok(self.apply_whitened_unchecked(m))
    }

    #[inline]
    pub(crate) fn apply_whitened_unchecked(&self, m: &DMatrix<T>) -> DMatrix<T> {
        &self.whitened * m * self.whitened.transpose()
    }
}

/// Transports the tangent vector `w` at `a_start` to the tangent space at
/// `a_end` along their geodesic.
///
/// Returns `E w Eᵀ` with `E = (a_end a_start⁻¹)^{1/2}`, so `w` comes back
/// unchanged when `a_start == a_end`. pyRiemann's `transport` returns
/// `C w Cᵀ` with `C = a_start^{1/2} (a_start^{-1/2} a_end a_start^{-1/2})^{1/2}`
/// instead, which treats `w` as whitened at `a_start`; that form is
/// [`ParallelTransport::apply_whitened`].
pub fn parallel_transport<T: Scalar>(
    a_start: &DMatrix<T>,
    a_end: &DMatrix<T>,
    w: &DMatrix<T>,
) -> Result<DMatrix<T>> {
    parallel_transport_with(a_start, a_end, w, &EigenMatrixFunctions::default())
}

/// [`parallel_transport`] with explicit matrix functions.
pub fn parallel_transport_with<T, F>(
    a_start: &DMatrix<T>,
    a_end: &DMatrix<T>,
    w: &DMatrix<T>,
    functions: &F,
) -> Result<DMatrix<T>>
where
    T: Scalar,
    F: MatrixFunctions<T> + ?Sized,
{
    ParallelTransport::between(a_start, a_end, functions)?.apply(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use spdtangent_core::test_helpers::{random_spd, random_symmetric, seeded_rng};

    #[test]
    fn test_operators_on_trivial_geodesic() {
        let mut rng = seeded_rng(1);
        let a: DMatrix<f64> = random_spd(4, &mut rng);
        let functions = EigenMatrixFunctions::<f64>::new();
        let transport = ParallelTransport::between(&a, &a, &functions).unwrap();

        assert_relative_eq!(transport.operator().clone(), DMatrix::identity(4, 4), epsilon = 1e-10);
        let a_sqrt = functions.sqrt(&a).unwrap();
        assert_relative_eq!(transport.whitened_operator().clone(), a_sqrt, epsilon = 1e-10);
        assert_eq!(transport.dim(), 4);
    }

    #[test]
    fn test_transport_from_identity() {
        // From I to B: R = B^{1/2}, C = E = B^{1/2}, Γ(W) = B^{1/2} W B^{1/2}
        let a = DMatrix::<f64>::identity(2, 2);
        let b = DMatrix::from_row_slice(2, 2, &[4.0, 0.0, 0.0, 9.0]);
        let w = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let t = parallel_transport(&a, &b, &w).unwrap();
        let expected = DMatrix::from_row_slice(2, 2, &[4.0, 6.0, 6.0, 9.0]);
        assert_relative_eq!(t, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_operator_squares_to_b_a_inverse() {
        let mut rng = seeded_rng(5);
        let a: DMatrix<f64> = random_spd(3, &mut rng);
        let b: DMatrix<f64> = random_spd(3, &mut rng);
        let transport = ParallelTransport::between(&a, &b, &EigenMatrixFunctions::<f64>::new()).unwrap();

        let e = transport.operator();
        let a_inv = a.clone().try_inverse().unwrap();
        assert_relative_eq!(e * e, &b * a_inv, epsilon = 1e-9);
    }

    #[test]
    fn test_whitened_matches_unwhitened() {
        let mut rng = seeded_rng(3);
        let a: DMatrix<f64> = random_spd(3, &mut rng);
        let b: DMatrix<f64> = random_spd(3, &mut rng);
        let m: DMatrix<f64> = random_symmetric(3, &mut rng);
        let functions = EigenMatrixFunctions::<f64>::new();
        let transport = ParallelTransport::between(&a, &b, &functions).unwrap();

        let a_sqrt = functions.sqrt(&a).unwrap();
        let w = &a_sqrt * &m * &a_sqrt;
        assert_relative_eq!(
            transport.apply_whitened(&m).unwrap(),
            transport.apply(&w).unwrap(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_whitened_form_is_not_identity_on_trivial_geodesic() {
        // C w Cᵀ with A = B gives A^{1/2} w A^{1/2}, only E w Eᵀ returns w
        let a = DMatrix::from_row_slice(2, 2, &[4.0, 0.0, 0.0, 9.0]);
        let w = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, 1.0]);
        let transport = ParallelTransport::between(&a, &a, &EigenMatrixFunctions::<f64>::new()).unwrap();

        assert_relative_eq!(parallel_transport(&a, &a, &w).unwrap(), w.clone(), epsilon = 1e-12);
        let whitened = transport.apply_whitened(&w).unwrap();
        let expected = DMatrix::from_row_slice(2, 2, &[4.0, 6.0, 6.0, 9.0]);
        assert_relative_eq!(whitened, expected, epsilon = 1e-10);
    }

    #[test]
    fn test_result_is_symmetric() {
        let mut rng = seeded_rng(2);
        let a: DMatrix<f64> = random_spd(3, &mut rng);
        let b: DMatrix<f64> = random_spd(3, &mut rng);
        let w: DMatrix<f64> = random_symmetric(3, &mut rng);
        let t = parallel_transport(&a, &b, &w).unwrap();
        assert!((&t - t.transpose()).norm() < 1e-10);
    }

    #[test]
    fn test_dimension_errors() {
        let a = DMatrix::<f64>::identity(3, 3);
        let b = DMatrix::<f64>::identity(2, 2);
        assert!(parallel_transport(&a, &b, &a).unwrap_err().is_invalid_argument());
        assert!(parallel_transport(&a, &a, &b).unwrap_err().is_invalid_argument());
        let rect = DMatrix::<f64>::zeros(3, 2);
        assert!(parallel_transport(&rect, &a, &a).unwrap_err().is_invalid_argument());

        let transport = ParallelTransport::between(&a, &a, &EigenMatrixFunctions::<f64>::new()).unwrap();
        assert!(transport.apply_whitened(&b).is_err());
    }

    #[test]
    fn test_non_spd_start_is_numerical_error() {
        let bad = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
        let i = DMatrix::<f64>::identity(2, 2);
        let err = parallel_transport(&bad, &i, &i).unwrap_err();
        assert!(!err.is_invalid_argument());
    }
}
