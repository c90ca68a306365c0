//! Random SPD inputs shared by tests and benchmarks.

#![cfg(any(test, feature = "test-utils"))]

use crate::types::{Batch, DMatrix, Scalar};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Deterministic generator for reproducible tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random well-conditioned SPD matrix: `AᵀA / n + I / 2` with Gaussian `A`.
pub fn random_spd<T: Scalar, R: Rng + ?Sized>(n: usize, rng: &mut R) -> DMatrix<T> {
    let a = DMatrix::<T>::from_fn(n, n, |_, _| {
        let x: f64 = StandardNormal.sample(&mut *rng);
        <T as Scalar>::from_f64(x)
    });
    let ata = a.transpose() * &a / <T as Scalar>::from_usize(n.max(1));
    let shift = DMatrix::<T>::identity(n, n) * <T as Scalar>::from_f64(0.5);

    // Symmetrize away the rounding of the product
    let p = ata + shift;
    (&p + p.transpose()) * <T as Scalar>::from_f64(0.5)
}

/// Random symmetric matrix with standard normal entries (a tangent vector).
pub fn random_symmetric<T: Scalar, R: Rng + ?Sized>(n: usize, rng: &mut R) -> DMatrix<T> {
    let mut s = DMatrix::<T>::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let x: f64 = StandardNormal.sample(&mut *rng);
            let val = <T as Scalar>::from_f64(x);
            s[(i, j)] = val;
            if i != j {
                s[(j, i)] = val;
            }
        }
    }
    s
}

/// Batch of `count` independent random SPD matrices.
pub fn random_spd_batch<T: Scalar, R: Rng + ?Sized>(count: usize, n: usize, rng: &mut R) -> Batch<T> {
    (0..count).map(|_| random_spd(n, &mut *rng)).collect()
}
