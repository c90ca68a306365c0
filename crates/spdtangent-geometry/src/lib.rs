//! SPD Tangent-Space Geometry - Projection, inversion and transport.
//!
//! This crate maps batches of symmetric positive-definite matrices to the
//! tangent space at a reference point, where they become flat vectors of
//! length `n(n+1)/2` suitable for any vector-space learner, and maps such
//! vectors back onto the manifold.
//!
//! # Modules
//!
//! - [`metric`]: Affine-invariant (`riemann`) and log-Euclidean (`euclid`) maps
//! - [`packing`]: Upper-triangle packing with `√2` off-diagonal scaling
//! - [`tangent_space`]: The projector/inverter anchored at a reference point
//! - [`transport`]: Parallel transport between two reference points
//!
//! # Parallelism
//!
//! With the `parallel` feature (on by default), large batches are mapped
//! with rayon according to
//! [`ParallelConfig`](spdtangent_core::config::ParallelConfig). Output row
//! order always matches input order.

pub mod metric;
pub mod packing;
pub mod tangent_space;
pub mod transport;

mod batch;

pub use metric::Metric;
pub use packing::{matrix_dim, packed_len, Packing, UpperTriangle};
pub use tangent_space::{project, project_with_transport, unproject, TangentSpace};
pub use transport::{parallel_transport, parallel_transport_with, ParallelTransport};
