//! # Packed Tangent Vectors
//!
//! A symmetric `n×n` matrix has `n(n+1)/2` free entries. The packed form
//! lists the upper triangle row by row (row ascending, then column
//! ascending, diagonal included) and scales every off-diagonal entry by
//! `√2`, so the Euclidean inner product of packed vectors equals the
//! Frobenius inner product of the matrices:
//!
//! ```text
//! ⟨pack(A), pack(B)⟩ = tr(A B)   for symmetric A, B
//! ```
//!
//! For `n = 3` the layout is
//!
//! ```text
//! [ m00, √2·m01, √2·m02, m11, √2·m12, m22 ]
//! ```
//!
//! [`UpperTriangle`] is the single source of that enumeration order; the
//! projector and the inverter both go through [`Packing`].

use spdtangent_core::{
    error::{Result, TangentError},
    types::{constants, DMatrix, DVector, Scalar},
    validation::check_shape,
};

/// Length of the packed vector of an `n×n` symmetric matrix.
#[inline]
pub const fn packed_len(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Recovers `n` from a packed length `nd = n(n+1)/2`.
///
/// # Errors
///
/// Returns `InvalidArgument` when `nd` is not a triangular number (or is 0).
pub fn matrix_dim(nd: usize) -> Result<usize> {
    // n = (√(1 + 8·nd) - 1) / 2, then verified exactly in integers
    let estimate = ((1.0 + 8.0 * nd as f64).sqrt() - 1.0) / 2.0;
    let rounded = estimate.round() as usize;

    (rounded.saturating_sub(1)..=rounded + 1)
        .find(|&n| n > 0 && packed_len(n) == nd)
        .ok_or_else(|| {
            TangentError::invalid_argument(format!(
                "packed length {nd} is not n(n+1)/2 for any n ≥ 1"
            ))
        })
}

/// Canonical upper-triangle enumeration of an `n×n` matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpperTriangle {
    n: usize,
}

impl UpperTriangle {
    /// Enumeration for `n×n` matrices.
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Matrix dimension.
    #[inline]
    pub fn dim(&self) -> usize {
        self.n
    }

    /// Number of positions, `n(n+1)/2`.
    #[inline]
    pub fn len(&self) -> usize {
        packed_len(self.n)
    }

    /// Whether the enumeration is empty (`n = 0`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Positions `(i, j)`, `i ≤ j`, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> {
        let n = self.n;
        (0..n).flat_map(move |i| (i..n).map(move |j| (i, j)))
    }
}

/// Packs symmetric matrices to vectors and back, for one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct Packing<T> {
    triangle: UpperTriangle,
    /// `1` on diagonal positions, `√2` elsewhere, in enumeration order
    coeffs: DVector<T>,
}

impl<T: Scalar> Packing<T> {
    /// Packing for `n×n` matrices.
    pub fn new(n: usize) -> Self {
        let triangle = UpperTriangle::new(n);
        let sqrt2 = constants::sqrt_two::<T>();
        let coeffs = DVector::from_iterator(
            triangle.len(),
            triangle.iter().map(|(i, j)| if i == j { T::one() } else { sqrt2 }),
        );
        Self { triangle, coeffs }
    }

    /// Matrix dimension `n`.
    #[inline]
    pub fn dim(&self) -> usize {
        self.triangle.dim()
    }

    /// Packed length `n(n+1)/2`.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangle.len()
    }

    /// Whether this packs 0×0 matrices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangle.is_empty()
    }

    /// The index enumeration.
    #[inline]
    pub fn triangle(&self) -> UpperTriangle {
        self.triangle
    }

    /// Scaling coefficients in enumeration order.
    #[inline]
    pub fn coefficients(&self) -> &DVector<T> {
        &self.coeffs
    }

    /// Upper triangle of `m`, off-diagonals scaled by `√2`.
    ///
    /// Only the upper triangle of `m` is read.
    pub fn pack(&self, m: &DMatrix<T>) -> Result<DVector<T>> {
        check_shape("matrix to pack", m, self.dim())?;
        Ok(DVector::from_iterator(
            self.len(),
            self.triangle
                .iter()
                .zip(self.coeffs.iter())
                .map(|((i, j), &c)| m[(i, j)] * c),
        ))
    }

    /// Symmetric matrix whose packed form is `v`.
    pub fn unpack(&self, v: &DVector<T>) -> Result<DMatrix<T>> {
        if v.len() != self.len() {
            return Err(TangentError::dimension_mismatch(
                format!("packed vector of length {}", self.len()),
                format!("length {}", v.len()),
            ));
        }

        let n = self.dim();
        let mut s = DMatrix::zeros(n, n);
        for (((i, j), &c), &x) in self.triangle.iter().zip(self.coeffs.iter()).zip(v.iter()) {
            let value = x / c;
            s[(i, j)] = value;
            s[(j, i)] = value;
        }
        Ok(s)
    }
}
