//! Core mesh data structures.
//!
//! This module provides the raw indexed representation consumed by the
//! partitioner.
//!
//! # Overview
//!
//! The primary type is [`IndexedMesh`], a shared vertex buffer plus one flat
//! index buffer per sub-mesh (material slot). Each consecutive triple in an
//! index buffer is one triangle. No topology is stored or assumed: the mesh
//! may be non-manifold and may contain coincident vertices with distinct
//! indices.
//!
//! # Index Types
//!
//! Index buffers are generic over [`MeshIndex`], implemented for `u16`, `u32`
//! and `u64`. Sub-meshes and islands are identified by [`SubMeshId`] and
//! [`IslandId`].
//!
//! # Construction
//!
//! ```
//! use splinter::mesh::{IndexedMesh, build_from_triangles};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//!
//! // From a triangle list
//! let mesh: IndexedMesh = build_from_triangles(&vertices, &[[0, 1, 2]]).unwrap();
//!
//! // Or directly from raw index buffers
//! let raw: IndexedMesh<u16> = IndexedMesh::new(vertices).with_submesh(vec![0, 1, 2]);
//! assert_eq!(mesh.num_triangles(), raw.num_triangles());
//! ```

mod builder;
mod index;
mod indexed;

pub use builder::{build_from_submeshes, build_from_triangles, to_triangles};
pub use index::{IslandId, MeshIndex, SubMeshId};
pub use indexed::{DegeneratePolicy, IndexedMesh};
