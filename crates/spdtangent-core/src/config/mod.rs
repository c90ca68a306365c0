//! Configuration utilities for batch execution.

pub mod parallel;

// Re-export key items
pub use parallel::{
    get_parallel_config, set_parallel_config, ParallelConfig, ParallelConfigBuilder,
    ShouldParallelize,
};
