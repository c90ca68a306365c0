//! Thresholds for mapping a batch on the rayon pool.
//!
//! Every sample of a batch costs a handful of `n×n` eigen-decompositions,
//! so the work of a batch is estimated as `Nt · n³`. Small batches of small
//! matrices stay on the calling thread where the pool overhead dominates.
//!
//! The configuration is process-wide: install it once with
//! [`set_parallel_config`] before the first batch call, otherwise the
//! defaults are used.

use std::sync::OnceLock;

/// Global configuration for batch parallelism
static GLOBAL_CONFIG: OnceLock<ParallelConfig> = OnceLock::new();

/// Configuration for parallel batch execution
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelConfig {
    /// Master switch; `false` keeps every batch sequential
    pub enabled: bool,

    /// Batches shorter than this are never split
    pub min_batch_size: usize,

    /// Minimum estimated work (`Nt · n³`) before going parallel
    pub min_work: usize,

    /// Number of available threads (cached)
    pub num_threads: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        let num_threads = rayon::current_num_threads();

        // More threads = more scheduling overhead = need larger batches
        let thread_scaling = (num_threads as f64).sqrt();
        let base_work = 16_384; // e.g. 32 samples of 8×8 covariances

        Self {
            enabled: true,
            min_batch_size: 4,
            min_work: (f64::from(base_work) * thread_scaling) as usize,
            num_threads,
        }
    }
}

impl ParallelConfig {
    /// A configuration that never parallelizes.
    pub fn sequential() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Builder for customizing parallel thresholds
#[derive(Debug, Clone, Default)]
pub struct ParallelConfigBuilder {
    config: ParallelConfig,
}

impl ParallelConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable parallel batches
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Set the minimum batch length
    pub fn min_batch_size(mut self, size: usize) -> Self {
        self.config.min_batch_size = size;
        self
    }

    /// Set the minimum estimated work
    pub fn min_work(mut self, work: usize) -> Self {
        self.config.min_work = work;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ParallelConfig {
        self.config
    }
}

/// Get the global parallel configuration
pub fn get_parallel_config() -> &'static ParallelConfig {
    GLOBAL_CONFIG.get_or_init(ParallelConfig::default)
}

/// Set the global parallel configuration.
///
/// Fails (returning the rejected config) if a configuration is already
/// installed, including the default one installed by a previous read.
pub fn set_parallel_config(config: ParallelConfig) -> Result<(), ParallelConfig> {
    GLOBAL_CONFIG.set(config)
}

/// Trait for deciding whether a batch should be mapped in parallel
pub trait ShouldParallelize {
    /// Check if a batch of `batch_size` samples of `channels × channels`
    /// matrices is worth splitting
    fn should_parallelize_batch(&self, batch_size: usize, channels: usize) -> bool;
}

impl ShouldParallelize for ParallelConfig {
    fn should_parallelize_batch(&self, batch_size: usize, channels: usize) -> bool {
        if !self.enabled || self.num_threads <= 1 || batch_size < self.min_batch_size {
            return false;
        }
        let work = batch_size.saturating_mul(channels.saturating_pow(3));
        work >= self.min_work
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn multi_threaded() -> ParallelConfig {
        ParallelConfig {
            num_threads: 8,
            ..ParallelConfig::default()
        }
    }

    #[test]
    fn test_default_thresholds() {
        let config = multi_threaded();

        // Tiny batches stay sequential
        assert!(!config.should_parallelize_batch(2, 64));
        assert!(!config.should_parallelize_batch(10, 2));

        // Large batches of moderate matrices go parallel
        assert!(config.should_parallelize_batch(1_000, 16));
    }

    #[test]
    fn test_single_thread_never_parallel() {
        let config = ParallelConfig {
            num_threads: 1,
            ..ParallelConfig::default()
        };
        assert!(!config.should_parallelize_batch(1_000_000, 64));
    }

    #[test]
    fn test_builder() {
        let config = ParallelConfigBuilder::new()
            .min_batch_size(1)
            .min_work(0)
            .build();
        assert_eq!(config.min_batch_size, 1);
        assert_eq!(config.min_work, 0);
        assert!(config.enabled);

        let off = ParallelConfigBuilder::new().enabled(false).build();
        assert!(!off.should_parallelize_batch(1_000_000, 64));
        assert!(!ParallelConfig::sequential().enabled);
    }

    #[test]
    fn test_work_estimate_saturates() {
        let config = multi_threaded();
        assert!(config.should_parallelize_batch(usize::MAX, usize::MAX));
    }
}
