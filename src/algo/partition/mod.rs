//! Edge-connected island partitioning.
//!
//! Splits each sub-mesh of an [`IndexedMesh`] into islands: groups of
//! triangles connected through shared edges. Connectivity is reconstructed
//! from the raw index buffers alone. Vertices that share a position are
//! welded for the adjacency test (see [`weld`]), while the emitted islands
//! keep the original indices so the caller can rebuild one drawable per
//! island and reassign materials per sub-mesh.
//!
//! # Pipeline
//!
//! For every sub-mesh, independently:
//!
//! 1. [`build_canonical_map_with`] maps each referenced vertex to the lowest
//!    index at the same position.
//! 2. Each triangle is reduced to its normalized canonical [`Edge`]s.
//! 3. Triangles are grouped into islands by the configured [`Strategy`].
//!
//! Islands never cross sub-mesh boundaries, even where two sub-meshes share
//! an edge in space.
//!
//! # Strategies
//!
//! - [`Strategy::Greedy`] seeds an island from the first unassigned triangle
//!   and floods it pass by pass until a pass absorbs nothing. The outcome
//!   depends on triangle order, and at non-manifold edges a triangle only
//!   joins through an edge that is still open.
//! - [`Strategy::UnionFind`] computes the true edge-connected components,
//!   independent of triangle order.
//!
//! # Example
//!
//! ```
//! use splinter::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(5.0, 0.0, 0.0),
//!     Point3::new(6.0, 0.0, 0.0),
//!     Point3::new(5.0, 1.0, 0.0),
//! ];
//! // A quad and a lone triangle.
//! let faces = vec![[0, 1, 2], [0, 2, 3], [4, 5, 6]];
//! let mesh: IndexedMesh = build_from_triangles(&vertices, &faces).unwrap();
//!
//! let partition = partition(&mesh, &PartitionOptions::default()).unwrap();
//! assert_eq!(partition.num_islands(), 2);
//! assert_eq!(partition.islands().next().unwrap().num_triangles(), 2);
//! ```

mod edge;
mod greedy;
mod island;
mod union_find;
pub mod weld;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use nalgebra::Point3;
use rayon::prelude::*;

pub use edge::{triangle_edges, Edge, TriangleEdges};
pub use island::{GrowingIsland, IslandState};
pub use weld::{build_canonical_map, build_canonical_map_with, CanonicalMap, WeldMode};

use super::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{DegeneratePolicy, IndexedMesh, IslandId, MeshIndex, SubMeshId};

/// How triangles are grouped into islands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Seed-and-flood growth, one island at a time, in triangle order.
    #[default]
    Greedy,
    /// Disjoint-set union over all shared edges.
    UnionFind,
}

/// Options for island partitioning.
#[derive(Debug, Clone)]
pub struct PartitionOptions {
    /// Grouping strategy.
    pub strategy: Strategy,

    /// How vertex positions are compared when welding.
    pub weld: WeldMode,

    /// How triangles with repeated indices are handled.
    pub degenerate: DegeneratePolicy,

    /// Whether to partition sub-meshes in parallel (default: true).
    /// The result is identical either way.
    pub parallel: bool,
}

impl Default for PartitionOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::Greedy,
            weld: WeldMode::Exact,
            degenerate: DegeneratePolicy::Reject,
            parallel: true,
        }
    }
}

impl PartitionOptions {
    /// Set the grouping strategy.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Weld vertices closer than `tolerance` instead of requiring equality.
    pub fn with_weld_tolerance(mut self, tolerance: f64) -> Self {
        self.weld = WeldMode::Tolerance(tolerance);
        self
    }

    /// Set the degenerate triangle policy.
    pub fn with_degenerate(mut self, policy: DegeneratePolicy) -> Self {
        self.degenerate = policy;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check parameter values.
    pub fn validate(&self) -> Result<()> {
        if let WeldMode::Tolerance(eps) = self.weld {
            if !eps.is_finite() || eps < 0.0 {
                return Err(MeshError::invalid_param(
                    "weld tolerance",
                    eps,
                    "must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }
}

/// A triangle with its original indices and canonical edges.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PreparedTriangle<I: MeshIndex> {
    pub triangle: [I; 3],
    pub edges: TriangleEdges,
}

/// Pair each triangle of a flat index buffer with its canonical edges.
pub(crate) fn prepare_triangles<I: MeshIndex>(
    indices: &[I],
    map: &CanonicalMap,
) -> Vec<PreparedTriangle<I>> {
    indices
        .chunks_exact(3)
        .map(|t| {
            let triangle = [t[0], t[1], t[2]];
            let canonical =
                map.canonical_triangle([t[0].to_usize(), t[1].to_usize(), t[2].to_usize()]);
            PreparedTriangle {
                triangle,
                edges: TriangleEdges::new(canonical),
            }
        })
        .collect()
}

/// One island: triangles of a single sub-mesh connected through shared edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Island<I: MeshIndex = u32> {
    submesh: SubMeshId,
    indices: Vec<I>,
}

impl<I: MeshIndex> Island<I> {
    /// The sub-mesh this island was taken from.
    #[inline]
    pub fn submesh(&self) -> SubMeshId {
        self.submesh
    }

    /// Flattened triangle indices into the original vertex buffer.
    #[inline]
    pub fn indices(&self) -> &[I] {
        &self.indices
    }

    /// Number of triangles.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [I; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Consume the island, returning its index buffer.
    pub fn into_indices(self) -> Vec<I> {
        self.indices
    }

    /// Extract the island as a standalone single-sub-mesh mesh.
    ///
    /// Only the vertices the island references are kept, in order of first
    /// use, and the indices are rewritten to match.
    ///
    /// # Panics
    /// Panics if `source` is not the mesh the island was partitioned from and
    /// an island index is out of range for it.
    pub fn to_mesh(&self, source: &IndexedMesh<I>) -> IndexedMesh<I> {
        let mut remap: HashMap<I, I> = HashMap::new();
        let mut positions: Vec<Point3<f64>> = Vec::new();
        let mut indices = Vec::with_capacity(self.indices.len());

        for &i in &self.indices {
            let local = *remap.entry(i).or_insert_with(|| {
                positions.push(*source.position(i));
                I::from_usize(positions.len() - 1)
            });
            indices.push(local);
        }

        IndexedMesh::new(positions).with_submesh(indices)
    }
}

/// The islands of every sub-mesh, grouped in sub-mesh order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<I: MeshIndex = u32> {
    submeshes: Vec<Vec<Island<I>>>,
}

impl<I: MeshIndex> Partition<I> {
    /// Islands of one sub-mesh, in discovery order.
    #[inline]
    pub fn submesh_islands(&self, id: SubMeshId) -> &[Island<I>] {
        &self.submeshes[id.index()]
    }

    /// All islands, concatenated across sub-meshes.
    pub fn islands(&self) -> impl Iterator<Item = &Island<I>> + '_ {
        self.submeshes.iter().flatten()
    }

    /// Island by its position in [`islands`](Self::islands).
    pub fn island(&self, id: IslandId) -> Option<&Island<I>> {
        self.islands().nth(id.index())
    }

    /// Number of sub-meshes.
    #[inline]
    pub fn num_submeshes(&self) -> usize {
        self.submeshes.len()
    }

    /// Total number of islands.
    pub fn num_islands(&self) -> usize {
        self.submeshes.iter().map(Vec::len).sum()
    }

    /// Total number of triangles across all islands.
    pub fn num_triangles(&self) -> usize {
        self.islands().map(Island::num_triangles).sum()
    }

    /// The island with the most triangles (the first one on ties).
    pub fn largest_island(&self) -> Option<(IslandId, &Island<I>)> {
        let mut best: Option<(usize, &Island<I>)> = None;
        for (k, island) in self.islands().enumerate() {
            if best.map_or(true, |(_, b)| island.num_triangles() > b.num_triangles()) {
                best = Some((k, island));
            }
        }
        best.map(|(k, island)| (IslandId::new(k), island))
    }

    /// Consume the partition, returning all islands in order.
    pub fn into_islands(self) -> Vec<Island<I>> {
        self.submeshes.into_iter().flatten().collect()
    }
}

/// Partition every sub-mesh of `mesh` into islands.
///
/// All sub-meshes are validated before any work is done; on error no partial
/// result is returned.
pub fn partition<I: MeshIndex>(
    mesh: &IndexedMesh<I>,
    options: &PartitionOptions,
) -> Result<Partition<I>> {
    partition_with_progress(mesh, options, &Progress::none())
}

/// Partition with progress reporting.
///
/// Progress is reported once per completed sub-mesh.
pub fn partition_with_progress<I: MeshIndex>(
    mesh: &IndexedMesh<I>,
    options: &PartitionOptions,
    progress: &Progress,
) -> Result<Partition<I>> {
    options.validate()?;
    mesh.validate(options.degenerate)?;

    let total = mesh.num_submeshes();
    let done = AtomicUsize::new(0);
    progress.report(0, total, "Partitioning submeshes");

    let run = |id: SubMeshId| {
        let islands = partition_group(mesh, id, options);
        let completed = done.fetch_add(1, Ordering::Relaxed) + 1;
        progress.report(completed, total, "Partitioning submeshes");
        islands
    };

    let submeshes: Vec<Vec<Island<I>>> = if options.parallel {
        mesh.submesh_ids()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(run)
            .collect()
    } else {
        mesh.submesh_ids().map(run).collect()
    };

    Ok(Partition { submeshes })
}

/// Partition a single sub-mesh.
pub fn partition_submesh<I: MeshIndex>(
    mesh: &IndexedMesh<I>,
    id: SubMeshId,
    options: &PartitionOptions,
) -> Result<Vec<Island<I>>> {
    if id.index() >= mesh.num_submeshes() {
        return Err(MeshError::invalid_param(
            "submesh",
            id.index(),
            "no such submesh",
        ));
    }
    options.validate()?;
    mesh.validate_submesh(id, options.degenerate)?;
    Ok(partition_group(mesh, id, options))
}

/// Partition `mesh` and extract every island as a standalone mesh.
///
/// Meshes are returned in [`Partition::islands`] order.
pub fn split_islands<I: MeshIndex>(
    mesh: &IndexedMesh<I>,
    options: &PartitionOptions,
) -> Result<Vec<IndexedMesh<I>>> {
    let partition = partition(mesh, options)?;
    Ok(partition.islands().map(|island| island.to_mesh(mesh)).collect())
}

fn partition_group<I: MeshIndex>(
    mesh: &IndexedMesh<I>,
    id: SubMeshId,
    options: &PartitionOptions,
) -> Vec<Island<I>> {
    let indices = mesh.submesh(id);
    let map = build_canonical_map_with(
        mesh.positions(),
        indices.iter().map(|i| i.to_usize()),
        options.weld,
    );
    let triangles = prepare_triangles(indices, &map);
    let num_triangles = triangles.len();

    let raw = match options.strategy {
        Strategy::Greedy => greedy::grow_islands(triangles),
        Strategy::UnionFind => union_find::connected_islands(triangles),
    };

    debug!(
        "submesh {}: {} triangles, {} welded vertices -> {} islands ({:?})",
        id.index(),
        num_triangles,
        map.len() - map.representatives(),
        raw.len(),
        options.strategy
    );

    raw.into_iter()
        .map(|indices| Island { submesh: id, indices })
        .collect()
}
