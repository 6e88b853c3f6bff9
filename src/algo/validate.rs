//! Partition validation.
//!
//! Checks the properties every partition must satisfy, independently of how
//! it was produced. Useful for testing and for catching regressions when
//! changing the grouping strategy.

use std::collections::{HashMap, VecDeque};

use super::partition::{
    build_canonical_map_with, CanonicalMap, Edge, Island, Partition, PartitionOptions, Strategy,
    TriangleEdges,
};
use crate::error::Result;
use crate::mesh::{IndexedMesh, MeshIndex, SubMeshId};

/// Detailed validation report for a partition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionReport {
    /// Number of triangles in the input mesh.
    pub input_triangles: usize,
    /// Number of triangles across all islands.
    pub output_triangles: usize,
    /// Number of islands.
    pub islands: usize,

    /// Input triangles that appear in no island of their sub-mesh.
    pub missing_triangles: usize,
    /// Island triangles with no matching input triangle in their sub-mesh
    /// (duplicated, fabricated, or moved across sub-meshes).
    pub extra_triangles: usize,

    /// Islands whose triangles are not all reachable from each other through
    /// shared edges.
    pub disconnected_islands: usize,
    /// Triangles that should have been absorbed by an earlier island.
    ///
    /// For [`Strategy::Greedy`] this counts triangles touching an edge left
    /// open by an earlier island of the same sub-mesh. For
    /// [`Strategy::UnionFind`] it counts triangles sharing any edge with
    /// another island of the same sub-mesh.
    pub maximality_violations: usize,
}

impl PartitionReport {
    /// Check if the partition satisfies every property.
    pub fn is_valid(&self) -> bool {
        self.missing_triangles == 0
            && self.extra_triangles == 0
            && self.disconnected_islands == 0
            && self.maximality_violations == 0
    }
}

/// Validate `partition` against the mesh it was computed from.
///
/// `options` must be the options used to compute the partition, since the
/// weld mode and strategy define adjacency and maximality. Returns an error
/// only if the mesh itself is invalid.
pub fn validate_partition<I: MeshIndex>(
    mesh: &IndexedMesh<I>,
    partition: &Partition<I>,
    options: &PartitionOptions,
) -> Result<PartitionReport> {
    options.validate()?;
    mesh.validate(options.degenerate)?;

    let mut report = PartitionReport {
        input_triangles: mesh.num_triangles(),
        output_triangles: partition.num_triangles(),
        islands: partition.num_islands(),
        ..Default::default()
    };

    let groups = mesh.num_submeshes().max(partition.num_submeshes());
    for g in 0..groups {
        let id = SubMeshId::new(g);
        let input: &[I] = if g < mesh.num_submeshes() {
            mesh.submesh(id)
        } else {
            &[]
        };
        let islands: &[Island<I>] = if g < partition.num_submeshes() {
            partition.submesh_islands(id)
        } else {
            &[]
        };

        let (missing, extra) = compare_triangles(input, islands, id);
        report.missing_triangles += missing;
        report.extra_triangles += extra;

        if g >= mesh.num_submeshes() {
            continue;
        }

        let map = build_canonical_map_with(
            mesh.positions(),
            input.iter().map(|i| i.to_usize()),
            options.weld,
        );
        let island_edges: Vec<Vec<TriangleEdges>> = islands
            .iter()
            .map(|island| island_triangle_edges(island, &map))
            .collect();

        report.disconnected_islands += island_edges
            .iter()
            .filter(|edges| !is_edge_connected(edges))
            .count();
        report.maximality_violations += match options.strategy {
            Strategy::Greedy => greedy_violations(&island_edges),
            Strategy::UnionFind => component_violations(&island_edges),
        };
    }

    Ok(report)
}

/// Multiset difference between the input triangles of a sub-mesh and the
/// triangles of its islands. Returns `(missing, extra)`.
fn compare_triangles<I: MeshIndex>(
    input: &[I],
    islands: &[Island<I>],
    id: SubMeshId,
) -> (usize, usize) {
    let mut balance: HashMap<[I; 3], isize> = HashMap::new();
    for t in input.chunks_exact(3) {
        *balance.entry([t[0], t[1], t[2]]).or_default() += 1;
    }

    let mut extra = 0usize;
    for island in islands {
        if island.submesh() != id {
            extra += island.num_triangles();
            continue;
        }
        for t in island.triangles() {
            *balance.entry(t).or_default() -= 1;
        }
    }

    let missing = balance.values().filter(|&&c| c > 0).sum::<isize>() as usize;
    extra += balance.values().filter(|&&c| c < 0).map(|c| -c).sum::<isize>() as usize;
    (missing, extra)
}

fn island_triangle_edges<I: MeshIndex>(
    island: &Island<I>,
    map: &CanonicalMap,
) -> Vec<TriangleEdges> {
    island
        .triangles()
        .map(|[a, b, c]| {
            TriangleEdges::new(map.canonical_triangle([a.to_usize(), b.to_usize(), c.to_usize()]))
        })
        .collect()
}

/// Whether every triangle is reachable from the first through shared edges.
fn is_edge_connected(triangles: &[TriangleEdges]) -> bool {
    if triangles.len() < 2 {
        return true;
    }

    let mut users: HashMap<Edge, Vec<usize>> = HashMap::new();
    for (t, edges) in triangles.iter().enumerate() {
        for &e in edges.as_slice() {
            users.entry(e).or_default().push(t);
        }
    }

    let mut visited = vec![false; triangles.len()];
    let mut queue = VecDeque::from([0usize]);
    visited[0] = true;
    let mut reached = 1;

    while let Some(t) = queue.pop_front() {
        for e in triangles[t].as_slice() {
            for &n in &users[e] {
                if !visited[n] {
                    visited[n] = true;
                    reached += 1;
                    queue.push_back(n);
                }
            }
        }
    }

    reached == triangles.len()
}

/// Triangles of later islands touching an edge an earlier island left open.
///
/// An island's open edges are exactly the edges used an odd number of times
/// by its triangles.
fn greedy_violations(islands: &[Vec<TriangleEdges>]) -> usize {
    let mut first_open: HashMap<Edge, usize> = HashMap::new();
    for (k, triangles) in islands.iter().enumerate() {
        let mut parity: HashMap<Edge, bool> = HashMap::new();
        for edges in triangles {
            for &e in edges.as_slice() {
                let odd = parity.entry(e).or_insert(false);
                *odd = !*odd;
            }
        }
        for (e, odd) in parity {
            if odd {
                first_open.entry(e).or_insert(k);
            }
        }
    }

    islands
        .iter()
        .enumerate()
        .map(|(m, triangles)| {
            triangles
                .iter()
                .filter(|edges| {
                    edges
                        .as_slice()
                        .iter()
                        .any(|e| first_open.get(e).is_some_and(|&k| k < m))
                })
                .count()
        })
        .sum()
}

/// Triangles sharing an edge with a triangle of a different island.
fn component_violations(islands: &[Vec<TriangleEdges>]) -> usize {
    let mut owner: HashMap<Edge, usize> = HashMap::new();
    for (k, triangles) in islands.iter().enumerate() {
        for edges in triangles {
            for &e in edges.as_slice() {
                owner.entry(e).or_insert(k);
            }
        }
    }

    islands
        .iter()
        .enumerate()
        .map(|(m, triangles)| {
            triangles
                .iter()
                .filter(|edges| edges.as_slice().iter().any(|e| owner[e] != m))
                .count()
        })
        .sum()
}
