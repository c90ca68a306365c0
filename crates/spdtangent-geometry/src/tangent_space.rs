//! # Tangent Space at a Reference Point
//!
//! Maps batches of SPD matrices to flat vectors at a reference point
//! `C ∈ S⁺⁺(n)` and back:
//!
//! ```text
//! project (riemann):  X ↦ pack(log(C^{-1/2} X C^{-1/2}))
//! project (euclid):   X ↦ pack(log(X) - log(C))
//! unproject:          v ↦ C^{1/2} exp(unpack(v)) C^{1/2}
//! ```
//!
//! `unproject ∘ project = id` under `riemann`. The `euclid` vectors live in
//! log-coordinates around `log(C)` and are *not* inverted by `unproject`.
//!
//! Vectors projected at a source reference can be re-expressed at a target
//! reference by parallel transport along the geodesic joining the two,
//! see [`TangentSpace::project_with_transport`].
//!
//! ## Example
//!
//! ```rust
//! use spdtangent_geometry::{Metric, TangentSpace};
//! use nalgebra::DMatrix;
//!
//! let cref = DMatrix::from_row_slice(2, 2, &[2.0, 0.3, 0.3, 1.0]);
//! let space = TangentSpace::new(&cref)?;
//!
//! let batch = vec![
//!     DMatrix::from_row_slice(2, 2, &[1.0, 0.1, 0.1, 1.5]),
//!     DMatrix::from_row_slice(2, 2, &[3.0, 0.0, 0.0, 0.5]),
//! ];
//! let packed = space.project(&batch, Metric::Riemann)?;
//! assert_eq!(packed.shape(), (2, 3));
//!
//! let back = space.unproject(&packed)?;
//! assert!((&back[1] - &batch[1]).norm() < 1e-10);
//! # Ok::<(), spdtangent_core::error::TangentError>(())
//! ```

use crate::{
    batch::{map_samples, stack_rows},
    metric::Metric,
    packing::{matrix_dim, Packing},
    transport::ParallelTransport,
};
use spdtangent_core::{
    error::{Result, TangentError},
    matrix_functions::{EigenMatrixFunctions, MatrixFunctions},
    types::{Batch, DMatrix, DVector, PackedBatch, Scalar},
    validation::{check_shape, check_spd, check_square},
};
use std::fmt::{self, Debug};
use tracing::{debug, trace};

/// Tangent space of S⁺⁺(n) anchored at a fixed reference point.
///
/// The square root, inverse square root and logarithm of the reference are
/// computed once at construction and shared by every sample of every call.
///
/// # Type Parameters
///
/// * `T` - Scalar type (f32 or f64)
/// * `F` - Matrix function backend
#[derive(Clone)]
pub struct TangentSpace<T = f64, F = EigenMatrixFunctions<T>> {
    /// Reference point `C`
    reference: DMatrix<T>,
    /// `C^{1/2}`
    sqrt: DMatrix<T>,
    /// `C^{-1/2}`
    invsqrt: DMatrix<T>,
    /// `log(C)`
    log: DMatrix<T>,
    packing: Packing<T>,
    functions: F,
}

impl<T: Scalar, F> Debug for TangentSpace<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TangentSpace at {n}×{n} reference", n = self.reference.nrows())
    }
}

impl<T: Scalar> TangentSpace<T> {
    /// Tangent space at `reference` using eigen-decomposition matrix functions.
    ///
    /// The reference is trusted to be SPD; see [`TangentSpace::checked`].
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch`/`InvalidArgument`: if `reference` is not square or is empty
    /// - `NumericalError`: if a root or the logarithm of `reference` fails
    pub fn new(reference: &DMatrix<T>) -> Result<Self> {
        Self::with_functions(reference, EigenMatrixFunctions::default())
    }

    /// Like [`TangentSpace::new`], but first validates that `reference` is
    /// symmetric within `tol` and positive definite.
    pub fn checked(reference: &DMatrix<T>, tol: T) -> Result<Self> {
        check_spd(reference, tol)?;
        Self::new(reference)
    }
}

impl<T: Scalar, F: MatrixFunctions<T>> TangentSpace<T, F> {
    /// Tangent space at `reference` with a custom matrix function backend.
    pub fn with_functions(reference: &DMatrix<T>, functions: F) -> Result<Self> {
        let n = check_square("reference point", reference)?;

        let sqrt = functions.sqrt(reference)?;
        let invsqrt = functions.invsqrt(reference)?;
        let log = functions.log(reference)?;
        trace!(channels = n, "cached reference roots and logarithm");

        Ok(Self {
            reference: reference.clone(),
            sqrt,
            invsqrt,
            log,
            packing: Packing::new(n),
            functions,
        })
    }

    /// The reference point `C`.
    #[inline]
    pub fn reference(&self) -> &DMatrix<T> {
        &self.reference
    }

    /// Matrix dimension `n` (number of channels).
    #[inline]
    pub fn channels(&self) -> usize {
        self.reference.nrows()
    }

    /// Packed vector length `n(n+1)/2`.
    #[inline]
    pub fn packed_len(&self) -> usize {
        self.packing.len()
    }

    /// The packing used for this dimension.
    #[inline]
    pub fn packing(&self) -> &Packing<T> {
        &self.packing
    }

    /// The matrix function backend.
    #[inline]
    pub fn functions(&self) -> &F {
        &self.functions
    }

    /// Log-coordinates of `c` at the reference, before packing.
    fn log_coordinates(&self, c: &DMatrix<T>, metric: Metric) -> Result<DMatrix<T>> {
        match metric {
            Metric::Riemann => self.functions.log(&(&self.invsqrt * c * &self.invsqrt)),
            Metric::Euclid => Ok(self.functions.log(c)? - &self.log),
        }
    }

    /// Projects a single SPD matrix to its packed tangent vector.
    pub fn project_matrix(&self, c: &DMatrix<T>, metric: Metric) -> Result<DVector<T>> {
        check_shape("sample", c, self.channels())?;
        self.packing.pack(&self.log_coordinates(c, metric)?)
    }

    /// Projects a batch of SPD matrices: row `i` of the result is the
    /// packed tangent vector of `batch[i]`.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch`: if any sample is not `n×n` (checked before any work)
    /// - `NumericalError`: propagated from the matrix functions
    pub fn project(&self, batch: &[DMatrix<T>], metric: Metric) -> Result<PackedBatch<T>> {
        self.check_batch(batch)?;
        debug!(
            samples = batch.len(),
            channels = self.channels(),
            %metric,
            "projecting batch to tangent space"
        );

        let rows = map_samples(batch.len(), self.channels(), |i| {
            self.packing.pack(&self.log_coordinates(&batch[i], metric)?)
        })?;
        Ok(stack_rows(&rows, self.packed_len()))
    }

    /// Maps a single packed tangent vector back to an SPD matrix.
    pub fn unproject_vector(&self, v: &DVector<T>) -> Result<DMatrix<T>> {
        let s = self.packing.unpack(v)?;
        let m = self.functions.exp(&s)?;
        Ok(&self.sqrt * m * &self.sqrt)
    }

    /// Maps packed tangent vectors (one per row) back to SPD matrices.
    ///
    /// This is the exact inverse of [`TangentSpace::project`] with
    /// [`Metric::Riemann`] only.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument`: if the row length is not a triangular number
    /// - `DimensionMismatch`: if the row length does not match the reference
    /// - `NumericalError`: propagated from the matrix functions
    pub fn unproject(&self, packed: &PackedBatch<T>) -> Result<Batch<T>> {
        let n = matrix_dim(packed.ncols())?;
        if n != self.channels() {
            return Err(TangentError::dimension_mismatch(
                format!("packed rows of length {} for {}×{} reference", self.packed_len(), self.channels(), self.channels()),
                format!("length {} ({n}×{n} matrices)", packed.ncols()),
            ));
        }
        debug!(
            samples = packed.nrows(),
            channels = n,
            "mapping packed tangent vectors to the manifold"
        );

        map_samples(packed.nrows(), n, |i| {
            self.unproject_vector(&packed.row(i).transpose())
        })
    }

    /// Transport from this reference to the reference of `target`.
    pub fn transport_to<G>(&self, target: &TangentSpace<T, G>) -> Result<ParallelTransport<T>>
    where
        G: MatrixFunctions<T>,
    {
        check_shape("target reference", target.reference(), self.channels())?;
        ParallelTransport::from_roots(&self.sqrt, &self.invsqrt, target.reference(), &self.functions)
    }

    /// Projects `batch` at this reference and re-expresses the tangent
    /// vectors at the reference of `target`.
    ///
    /// Under `riemann`, each whitened log `M` is parallel transported along
    /// the geodesic between the two references and whitened again at the
    /// target:
    ///
    /// ```text
    /// M  = log(S^{-1/2} X S^{-1/2})
    /// M' = T^{-1/2} Γ_{S→T}(S^{1/2} M S^{1/2}) T^{-1/2}
    /// ```
    ///
    /// With `target == self` this is exactly [`TangentSpace::project`].
    ///
    /// Under `euclid` the vectors are `log(X) - log(S)` at this reference
    /// and no transport step is applied: the log-Euclidean metric is flat
    /// in log-coordinates, so its transport is the identity on
    /// log-differences. Note that the result is still anchored at
    /// `log(S)`, not re-centred at `log(T)`.
    pub fn project_with_transport<G>(
        &self,
        batch: &[DMatrix<T>],
        target: &TangentSpace<T, G>,
        metric: Metric,
    ) -> Result<PackedBatch<T>>
    where
        G: MatrixFunctions<T>,
    {
        self.check_batch(batch)?;
        check_shape("target reference", target.reference(), self.channels())?;
        debug!(
            samples = batch.len(),
            channels = self.channels(),
            %metric,
            "projecting batch with parallel transport"
        );

        let rows = match metric {
            Metric::Riemann => {
                let transport = self.transport_to(target)?;
                map_samples(batch.len(), self.channels(), |i| {
                    let m = self.log_coordinates(&batch[i], Metric::Riemann)?;
                    let moved = transport.apply_whitened_unchecked(&m);
                    let rewhitened = &target.invsqrt * moved * &target.invsqrt;
                    self.packing.pack(&rewhitened)
                })?
            }
            Metric::Euclid => map_samples(batch.len(), self.channels(), |i| {
                self.packing.pack(&self.log_coordinates(&batch[i], Metric::Euclid)?)
            })?,
        };
        Ok(stack_rows(&rows, self.packed_len()))
    }

    /// Rejects the whole batch if any sample has the wrong shape.
    fn check_batch(&self, batch: &[DMatrix<T>]) -> Result<()> {
        batch
            .iter()
            .try_for_each(|c| check_shape("batch sample", c, self.channels()))
    }
}

/// Projects `batch` to the tangent space at `cref` (one packed row per sample).
pub fn project<T: Scalar>(batch: &[DMatrix<T>], cref: &DMatrix<T>, metric: Metric) -> Result<PackedBatch<T>> {
    TangentSpace::new(cref)?.project(batch, metric)
}

/// Maps packed tangent vectors at `cref` back to SPD matrices.
pub fn unproject<T: Scalar>(packed: &PackedBatch<T>, cref: &DMatrix<T>) -> Result<Batch<T>> {
    // Shape errors take precedence over a failing reference decomposition
    matrix_dim(packed.ncols())?;
    TangentSpace::new(cref)?.unproject(packed)
}

/// Projects `batch` at `cref_source` and transports the vectors to the
/// tangent space at `cref_target`.
pub fn project_with_transport<T: Scalar>(
    batch: &[DMatrix<T>],
    cref_source: &DMatrix<T>,
    cref_target: &DMatrix<T>,
    metric: Metric,
) -> Result<PackedBatch<T>> {
    let source = TangentSpace::new(cref_source)?;
    check_shape("target reference", cref_target, source.channels())?;
    let target = TangentSpace::new(cref_target)?;
    source.project_with_transport(batch, &target, metric)
}
