//! End-to-end test through the facade: covariance matrices of synthetic
//! multichannel signals are mapped to feature vectors and back.

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use spdtangent::prelude::*;
use spdtangent_core::test_helpers::{random_spd, seeded_rng};

/// Sample covariance of `channels × samples` data with a small ridge.
fn covariance(signal: &DMatrix<f64>) -> DMatrix<f64> {
    let n = signal.ncols() as f64;
    let c = signal * signal.transpose() / n;
    let ridge = DMatrix::identity(signal.nrows(), signal.nrows()) * 1e-3;
    let c = c + ridge;
    (&c + c.transpose()) * 0.5
}

fn synthetic_trials(trials: usize, channels: usize, samples: usize) -> Vec<DMatrix<f64>> {
    (0..trials)
        .map(|t| {
            let signal = DMatrix::from_fn(channels, samples, |i, j| {
                let phase = (t + 1) as f64 * 0.37 + i as f64 * 1.3;
                (j as f64 * 0.11 * (i + 1) as f64 + phase).sin() + 0.05 * ((i * j + t) % 7) as f64
            });
            covariance(&signal)
        })
        .collect()
}

#[test]
fn test_features_from_covariances() {
    let trials = synthetic_trials(12, 6, 200);
    for c in &trials {
        assert!(check_spd(c, 1e-10).is_ok());
    }

    // Use the first trial as reference; its own features vanish
    let space = TangentSpace::checked(&trials[0], 1e-10).unwrap();
    let features = space.project(&trials, Metric::Riemann).unwrap();
    assert_eq!(features.shape(), (12, packed_len(6)));
    assert!(features.row(0).amax() < 1e-9);

    let recovered = space.unproject(&features).unwrap();
    for (original, back) in trials.iter().zip(&recovered) {
        assert_relative_eq!(back, original, epsilon = 1e-6, max_relative = 1e-6);
    }
}

#[test]
fn test_realigning_features_to_new_reference() {
    let mut rng = seeded_rng(3);
    let source: DMatrix<f64> = random_spd(4, &mut rng);
    let target: DMatrix<f64> = random_spd(4, &mut rng);
    let trials = synthetic_trials(5, 4, 120);

    let aligned = project_with_transport(&trials, &source, &target, Metric::Riemann).unwrap();
    assert_eq!(aligned.shape(), (5, 10));

    let source_space = TangentSpace::new(&source).unwrap();
    let target_space = TangentSpace::new(&target).unwrap();
    let same = source_space
        .project_with_transport(&trials, &target_space, Metric::Riemann)
        .unwrap();
    assert_relative_eq!(aligned, same, epsilon = 1e-12);

    // Distances between trials survive the transport
    let plain = source_space.project(&trials, Metric::Riemann).unwrap();
    let d_plain = (plain.row(1) - plain.row(3)).norm();
    let d_aligned = (aligned.row(1) - aligned.row(3)).norm();
    assert_relative_eq!(d_plain, d_aligned, epsilon = 1e-8);
}

#[test]
fn test_transport_operator_reuse() {
    let mut rng = seeded_rng(5);
    let a: DMatrix<f64> = random_spd(3, &mut rng);
    let b: DMatrix<f64> = random_spd(3, &mut rng);
    let w = DMatrix::from_row_slice(3, 3, &[1.0, 0.2, 0.0, 0.2, -0.5, 0.3, 0.0, 0.3, 0.8]);

    let transport = ParallelTransport::between(&a, &b, &EigenMatrixFunctions::<f64>::new()).unwrap();
    assert_relative_eq!(
        transport.apply(&w).unwrap(),
        parallel_transport(&a, &b, &w).unwrap(),
        epsilon = 1e-12
    );
}

#[test]
fn test_sequential_config_gives_same_features() {
    // A local config only drives the decision; results never depend on it
    let config = ParallelConfigBuilder::new().enabled(false).min_batch_size(1).build();
    assert!(!config.should_parallelize_batch(1000, 32));
    assert_eq!(ParallelConfig::sequential().enabled, config.enabled);

    let trials = synthetic_trials(40, 8, 64);
    let features = project(&trials, &trials[0], Metric::Euclid).unwrap();
    let again = project(&trials, &trials[0], Metric::Euclid).unwrap();
    assert_eq!(features, again);
}

#[test]
fn test_errors_surface_through_facade() {
    let cref = DMatrix::<f64>::identity(3, 3);
    let err = unproject(&DMatrix::zeros(1, 7), &cref).unwrap_err();
    assert!(matches!(err, TangentError::InvalidArgument { .. }));
    assert!(err.to_string().contains('7'));

    let metric: std::result::Result<Metric, _> = "wasserstein".parse();
    assert!(matches!(metric, Err(TangentError::UnknownMetric { .. })));
}

#[cfg(feature = "serde")]
#[test]
fn test_serde_round_trip_of_settings() {
    let json = serde_json::to_string(&Metric::Euclid).unwrap();
    assert_eq!(json, "\"euclid\"");

    let config = ParallelConfigBuilder::new().min_work(1 << 20).build();
    let restored: ParallelConfig = serde_json::from_str(&serde_json::to_string(&config).unwrap()).unwrap();
    assert_eq!(restored, config);
}
