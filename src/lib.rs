//! # Splinter
//!
//! Split triangle meshes into edge-connected islands.
//!
//! Splinter takes the raw buffers a mesh importer produces (a vertex buffer
//! and one triangle index buffer per material slot) and groups each
//! sub-mesh's triangles into islands connected through shared edges. No
//! topology metadata is required: connectivity is rebuilt from the indices,
//! and vertices duplicated at the same position (UV seams, split normals,
//! skinning splits) are welded for the adjacency test.
//!
//! ## Features
//!
//! - **Raw buffers in, raw buffers out**: islands keep the original vertex
//!   indices, so one drawable per island can be built directly
//! - **Flexible indexing**: `u16`, `u32` and `u64` index buffers
//! - **Two strategies**: greedy per-island flood-fill, or order-independent
//!   union-find components
//! - **Welding**: exact position equality by default, optional tolerance
//! - **Parallel**: independent sub-meshes are partitioned on the rayon pool
//!
//! ## Quick Start
//!
//! ```
//! use splinter::prelude::*;
//! use nalgebra::Point3;
//!
//! // A quad whose diagonal vertices are duplicated, plus a far-away triangle.
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(5.0, 0.0, 0.0),
//!     Point3::new(6.0, 0.0, 0.0),
//!     Point3::new(5.0, 1.0, 0.0),
//! ];
//! let mesh: IndexedMesh = IndexedMesh::new(vertices)
//!     .with_submesh(vec![0, 1, 2, 3, 4, 5])
//!     .with_submesh(vec![6, 7, 8]);
//!
//! let partition = partition(&mesh, &PartitionOptions::default()).unwrap();
//! assert_eq!(partition.num_islands(), 2);
//!
//! for island in partition.islands() {
//!     println!(
//!         "{:?}: {} triangles",
//!         island.submesh(),
//!         island.num_triangles()
//!     );
//! }
//! ```
//!
//! ## Standalone Pieces
//!
//! ```
//! use splinter::prelude::*;
//! use nalgebra::Point3;
//!
//! # let vertices = vec![
//! #     Point3::new(0.0, 0.0, 0.0),
//! #     Point3::new(1.0, 0.0, 0.0),
//! #     Point3::new(0.0, 1.0, 0.0),
//! #     Point3::new(5.0, 0.0, 0.0),
//! #     Point3::new(6.0, 0.0, 0.0),
//! #     Point3::new(5.0, 1.0, 0.0),
//! # ];
//! # let faces = vec![[0, 1, 2], [3, 4, 5]];
//! let mesh: IndexedMesh = build_from_triangles(&vertices, &faces).unwrap();
//! let pieces = split_islands(&mesh, &PartitionOptions::default()).unwrap();
//!
//! assert_eq!(pieces.len(), 2);
//! assert_eq!(pieces[1].num_vertices(), 3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use splinter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::partition::{
        partition, partition_submesh, split_islands, Island, Partition, PartitionOptions,
        Strategy, WeldMode,
    };
    pub use crate::algo::validate::{validate_partition, PartitionReport};
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::{
        build_from_submeshes, build_from_triangles, DegeneratePolicy, IndexedMesh, IslandId,
        MeshIndex, SubMeshId,
    };
}

// Re-export nalgebra types for convenience
pub use nalgebra;
