//! Per-sample batch mapping.
//!
//! Samples are independent, so the map is either a plain loop or a rayon
//! `par_iter` depending on the global [`ParallelConfig`](spdtangent_core::config::ParallelConfig).
//! Both paths keep batch order and, when samples fail, report the error of
//! the lowest failing index.

use spdtangent_core::{
    config::{get_parallel_config, ShouldParallelize},
    error::Result,
    types::{DMatrix, DVector, Scalar},
};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Applies `f` to every index in `0..len`, collecting results in order.
///
/// `channels` is the matrix dimension, used only to estimate the work.
pub(crate) fn map_samples<U, F>(len: usize, channels: usize, f: F) -> Result<Vec<U>>
where
    U: Send,
    F: Fn(usize) -> Result<U> + Send + Sync,
{
    let parallel = cfg!(feature = "parallel")
        && get_parallel_config().should_parallelize_batch(len, channels);
    debug!(samples = len, channels, parallel, "mapping batch");

    #[cfg(feature = "parallel")]
    if parallel {
        // Collected per sample so the lowest failing index wins, not the first to finish
        let results: Vec<Result<U>> = (0..len).into_par_iter().map(&f).collect();
        return results.into_iter().collect();
    }

    (0..len).map(f).collect()
}

/// Stacks packed vectors as the rows of an `len × width` matrix.
pub(crate) fn stack_rows<T: Scalar>(rows: &[DVector<T>], width: usize) -> DMatrix<T> {
    let mut out = DMatrix::zeros(rows.len(), width);
    for (i, row) in rows.iter().enumerate() {
        out.set_row(i, &row.transpose());
    }
    out
}
