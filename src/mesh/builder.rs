//! Mesh construction utilities.
//!
//! This module provides functions for building indexed meshes from
//! triangle lists, as commonly produced by procedural generators and tests,
//! and for turning flat index buffers back into triangle lists.

use nalgebra::Point3;

use super::index::MeshIndex;
use super::indexed::IndexedMesh;
use crate::error::{MeshError, Result};

/// Build a single-sub-mesh indexed mesh from vertices and triangle faces.
///
/// # Arguments
/// * `vertices` - List of vertex positions
/// * `faces` - List of triangles, each as [v0, v1, v2] indices
///
/// # Returns
/// An indexed mesh, or an error if an index is out of range or does not fit
/// the index type.
///
/// # Example
/// ```
/// use splinter::mesh::{build_from_triangles, IndexedMesh};
/// use nalgebra::Point3;
///
/// let vertices = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.5, 1.0, 0.0),
/// ];
/// let faces = vec![[0, 1, 2]];
///
/// let mesh: IndexedMesh = build_from_triangles(&vertices, &faces).unwrap();
/// assert_eq!(mesh.num_vertices(), 3);
/// assert_eq!(mesh.num_triangles(), 1);
/// ```
pub fn build_from_triangles<I: MeshIndex>(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
) -> Result<IndexedMesh<I>> {
    build_from_submeshes(vertices, &[faces.to_vec()])
}

/// Build an indexed mesh with one sub-mesh per triangle list.
pub fn build_from_submeshes<I: MeshIndex>(
    vertices: &[Point3<f64>],
    submeshes: &[Vec<[usize; 3]>],
) -> Result<IndexedMesh<I>> {
    let mut mesh = IndexedMesh::new(vertices.to_vec());

    for (si, faces) in submeshes.iter().enumerate() {
        let mut indices = Vec::with_capacity(faces.len() * 3);
        for (fi, face) in faces.iter().enumerate() {
            for &vi in face {
                if vi >= vertices.len() {
                    return Err(MeshError::IndexOutOfRange {
                        submesh: si,
                        triangle: fi,
                        index: vi,
                        num_vertices: vertices.len(),
                    });
                }
                let index = I::try_from_usize(vi).ok_or_else(|| {
                    MeshError::invalid_param("vertex index", vi, "does not fit the index type")
                })?;
                indices.push(index);
            }
        }
        mesh.add_submesh(indices);
    }

    Ok(mesh)
}

/// Convert a flat index buffer into a list of triangles.
///
/// A trailing partial triangle is dropped.
pub fn to_triangles<I: MeshIndex>(indices: &[I]) -> Vec<[usize; 3]> {
    indices
        .chunks_exact(3)
        .map(|t| [t[0].to_usize(), t[1].to_usize(), t[2].to_usize()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::SubMeshId;

    fn two_triangles() -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        // Two triangles sharing an edge
        let vertices = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
        ];
        let faces = vec![[0, 1, 2], [1, 0, 3]];
        (vertices, faces)
    }

    #[test]
    fn test_two_triangles() {
        let (vertices, faces) = two_triangles();
        let mesh: IndexedMesh<u32> = build_from_triangles(&vertices, &faces).unwrap();

        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_submeshes(), 1);
        assert_eq!(mesh.submesh(SubMeshId::new(0)), &[0, 1, 2, 1, 0, 3]);
    }

    #[test]
    fn test_submeshes() {
        let (vertices, faces) = two_triangles();
        let mesh: IndexedMesh<u16> =
            build_from_submeshes(&vertices, &[vec![faces[0]], vec![faces[1]]]).unwrap();

        assert_eq!(mesh.num_submeshes(), 2);
        assert_eq!(mesh.num_triangles(), 2);
        assert_eq!(to_triangles(mesh.submesh(SubMeshId::new(1))), vec![[1, 0, 3]]);
    }

    #[test]
    fn test_to_triangles_drops_partial() {
        assert_eq!(to_triangles(&[0u32, 1, 2, 3]), vec![[0, 1, 2]]);
    }

    #[test]
    fn test_invalid_vertex_index() {
        let vertices = vec![Point3::new(0.0, 0.0, 0.0)];
        let faces = vec![[0, 1, 2]]; // Indices 1 and 2 are invalid

        let result: Result<IndexedMesh<u32>> = build_from_triangles(&vertices, &faces);
        assert!(matches!(
            result,
            Err(MeshError::IndexOutOfRange { index: 1, .. })
        ));
    }

    #[test]
    fn test_index_does_not_fit() {
        let vertices = vec![Point3::origin(); 70_000];
        let faces = vec![[0, 1, 69_999]];

        let result: Result<IndexedMesh<u16>> = build_from_triangles(&vertices, &faces);
        assert!(matches!(result, Err(MeshError::InvalidParameter { .. })));
    }
}
