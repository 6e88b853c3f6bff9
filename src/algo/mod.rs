//! Mesh partitioning algorithms.
//!
//! - **Partitioning**: split sub-meshes into edge-connected islands
//!   ([`partition`])
//! - **Validation**: check a partition for completeness, connectivity and
//!   maximality ([`validate`])
//! - **Progress**: callbacks for long-running work ([`Progress`])

pub mod partition;
pub mod progress;
pub mod validate;

pub use progress::Progress;
