//! Tangent-space features from covariance matrices.
//!
//! Builds covariance matrices of synthetic multichannel recordings from two
//! sessions, maps them to the tangent space at the first session's
//! reference, realigns the second session with parallel transport and maps
//! a feature vector back to a covariance matrix.
//!
//! Run with: cargo run -p spdtangent --example covariance_features

use spdtangent::prelude::*;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Covariance of `channels × samples` data with a small ridge.
fn covariance(signal: &DMatrix<f64>) -> DMatrix<f64> {
    let c = signal * signal.transpose() / signal.ncols() as f64;
    let c = c + DMatrix::identity(signal.nrows(), signal.nrows()) * 1e-3;
    (&c + c.transpose()) * 0.5
}

/// Trials of a session: sinusoids whose mixing drifts with `session`.
fn session(trials: usize, channels: usize, session: usize) -> Vec<DMatrix<f64>> {
    (0..trials)
        .map(|t| {
            let signal = DMatrix::from_fn(channels, 256, |i, j| {
                let gain = 1.0 + 0.4 * session as f64 * i as f64;
                let phase = 0.3 * t as f64 + i as f64;
                gain * (0.07 * (i + 1) as f64 * j as f64 + phase).sin()
                    + 0.1 * ((i + 2 * j + t) % 5) as f64
            });
            covariance(&signal)
        })
        .collect()
}

/// Arithmetic mean of a batch, used as a cheap reference point.
fn mean(batch: &[DMatrix<f64>]) -> DMatrix<f64> {
    let n = batch[0].nrows();
    batch.iter().fold(DMatrix::zeros(n, n), |acc, c| acc + c) / batch.len() as f64
}

fn main() -> spdtangent::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    println!("=== Tangent-Space Covariance Features ===\n");

    let channels = 4;
    let first = session(8, channels, 0);
    let second = session(8, channels, 1);
    let first_ref = mean(&first);
    let second_ref = mean(&second);

    // 1. Plain projection
    let space = TangentSpace::checked(&first_ref, 1e-10)?;
    let features = space.project(&first, Metric::Riemann)?;
    println!(
        "1. {} trials of {}×{} covariances -> features of length {}",
        first.len(),
        channels,
        channels,
        space.packed_len()
    );
    println!("First feature vector:\n{:.4}", features.row(0));

    // 2. Log-Euclidean features for comparison
    let euclid = space.project(&first, "euclid".parse()?)?;
    println!("2. Log-Euclidean first feature vector:\n{:.4}", euclid.row(0));

    // 3. Realign the second session to the first session's reference
    let source = TangentSpace::new(&second_ref)?;
    let aligned = source.project_with_transport(&second, &space, Metric::Riemann)?;
    println!("3. Second session realigned; first row:\n{:.4}", aligned.row(0));

    // 4. Back to the manifold
    let recovered = space.unproject(&features.rows(0, 1).into_owned())?;
    let error = (&recovered[0] - &first[0]).norm();
    println!("4. Reconstruction error of trial 0: {error:.2e}");

    Ok(())
}
