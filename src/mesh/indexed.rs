//! Indexed triangle mesh with per-sub-mesh index buffers.
//!
//! This is the raw form a mesh importer hands over: one shared vertex buffer
//! and, for every material slot, a flat index buffer where each consecutive
//! triple is one triangle. No connectivity is stored; duplicate positions with
//! distinct indices (UV seams, normal splits) are common and expected.

use nalgebra::Point3;

use super::index::{MeshIndex, SubMeshId};
use crate::error::{MeshError, Result};

/// How triangles that repeat a vertex index are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Fail with [`MeshError::DegenerateTriangle`].
    #[default]
    Reject,
    /// Keep the triangle; it contributes only its distinct, non-loop edges.
    Allow,
}

/// A triangle mesh made of a vertex buffer and one index buffer per sub-mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedMesh<I: MeshIndex = u32> {
    positions: Vec<Point3<f64>>,
    submeshes: Vec<Vec<I>>,
}

impl<I: MeshIndex> Default for IndexedMesh<I> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<I: MeshIndex> IndexedMesh<I> {
    /// Create a mesh with the given vertex positions and no sub-meshes.
    pub fn new(positions: Vec<Point3<f64>>) -> Self {
        Self {
            positions,
            submeshes: Vec::new(),
        }
    }

    /// Append a sub-mesh index buffer, builder style.
    pub fn with_submesh(mut self, indices: Vec<I>) -> Self {
        self.submeshes.push(indices);
        self
    }

    /// Append a sub-mesh index buffer and return its id.
    pub fn add_submesh(&mut self, indices: Vec<I>) -> SubMeshId {
        self.submeshes.push(indices);
        SubMeshId::new(self.submeshes.len() - 1)
    }

    /// All vertex positions.
    #[inline]
    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    /// Position of a single vertex.
    #[inline]
    pub fn position(&self, index: I) -> &Point3<f64> {
        &self.positions[index.to_usize()]
    }

    /// The flat index buffer of a sub-mesh.
    #[inline]
    pub fn submesh(&self, id: SubMeshId) -> &[I] {
        &self.submeshes[id.index()]
    }

    /// All sub-mesh index buffers, in slot order.
    #[inline]
    pub fn submeshes(&self) -> &[Vec<I>] {
        &self.submeshes
    }

    /// Iterator over sub-mesh ids.
    pub fn submesh_ids(&self) -> impl Iterator<Item = SubMeshId> {
        (0..self.submeshes.len()).map(SubMeshId::new)
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of sub-meshes.
    #[inline]
    pub fn num_submeshes(&self) -> usize {
        self.submeshes.len()
    }

    /// Total number of whole triangles across all sub-meshes.
    pub fn num_triangles(&self) -> usize {
        self.submeshes.iter().map(|s| s.len() / 3).sum()
    }

    /// Iterate over the triangles of a sub-mesh.
    ///
    /// A trailing partial triangle is skipped; use [`validate`](Self::validate)
    /// to reject such buffers.
    pub fn triangles(&self, id: SubMeshId) -> impl Iterator<Item = [I; 3]> + '_ {
        self.submeshes[id.index()]
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
    }

    /// Check every sub-mesh for malformed buffers, out-of-range indices and,
    /// under [`DegeneratePolicy::Reject`], degenerate triangles.
    ///
    /// Sub-meshes are checked in order and the first problem is returned.
    pub fn validate(&self, policy: DegeneratePolicy) -> Result<()> {
        for id in self.submesh_ids() {
            self.validate_submesh(id, policy)?;
        }
        Ok(())
    }

    /// Check a single sub-mesh. See [`validate`](Self::validate).
    pub fn validate_submesh(&self, id: SubMeshId, policy: DegeneratePolicy) -> Result<()> {
        let indices = self.submesh(id);
        if indices.len() % 3 != 0 {
            return Err(MeshError::InvalidInput {
                submesh: id.index(),
                len: indices.len(),
            });
        }

        let num_vertices = self.num_vertices();
        for (ti, tri) in self.triangles(id).enumerate() {
            for &vi in &tri {
                if vi.to_usize() >= num_vertices {
                    return Err(MeshError::IndexOutOfRange {
                        submesh: id.index(),
                        triangle: ti,
                        index: vi.to_usize(),
                        num_vertices,
                    });
                }
            }
            if policy == DegeneratePolicy::Reject
                && (tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2])
            {
                return Err(MeshError::DegenerateTriangle {
                    submesh: id.index(),
                    triangle: ti,
                });
            }
        }
        Ok(())
    }
}
