//! Order-independent islands via disjoint-set union over shared edges.
//!
//! Every pair of triangles sharing a canonical edge is merged, including all
//! triangles around a non-manifold edge, so the islands are the true
//! edge-connected components regardless of triangle order.

use std::collections::HashMap;

use super::edge::Edge;
use super::PreparedTriangle;
use crate::mesh::MeshIndex;

/// Disjoint-set with path compression.
#[derive(Debug)]
pub(crate) struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Order-dependent union: the smaller index always becomes the representative.
    /// Returns `true` if `a` and `b` were in different sets.
    pub fn union_keep_min(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        let (min, max) = if ra <= rb { (ra, rb) } else { (rb, ra) };
        self.parent[max] = min;
        true
    }
}

/// Partition prepared triangles into edge-connected components.
///
/// Islands are ordered by their lowest triangle; triangles within an island
/// keep their input order.
pub(crate) fn connected_islands<I: MeshIndex>(
    triangles: Vec<PreparedTriangle<I>>,
) -> Vec<Vec<I>> {
    let mut sets = UnionFind::new(triangles.len());
    let mut first_user: HashMap<Edge, usize> = HashMap::with_capacity(triangles.len() * 2);

    for (t, tri) in triangles.iter().enumerate() {
        for &e in tri.edges.as_slice() {
            match first_user.get(&e) {
                Some(&other) => {
                    sets.union_keep_min(t, other);
                }
                None => {
                    first_user.insert(e, t);
                }
            }
        }
    }

    // With keep-min unions the root is the lowest triangle of its set, so a
    // triangle that is its own root opens a new island.
    let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
    let mut islands: Vec<Vec<I>> = Vec::new();
    for (t, tri) in triangles.iter().enumerate() {
        let root = sets.find(t);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            islands.push(Vec::new());
            islands.len() - 1
        });
        islands[slot].extend_from_slice(&tri.triangle);
    }

    islands
}

#[cfg(test)]
mod tests {
    use super::super::{build_canonical_map, prepare_triangles};
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_union_keep_min() {
        let mut uf = UnionFind::new(5);
        assert!(uf.union_keep_min(4, 2));
        assert!(uf.union_keep_min(2, 3));
        assert!(!uf.union_keep_min(3, 4));
        assert_eq!(uf.find(4), 2);
        assert_eq!(uf.find(3), 2);
        assert_eq!(uf.find(0), 0);
    }

    #[test]
    fn test_nonmanifold_edge_joins_all() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
        ];
        let indices: Vec<u32> = vec![0, 1, 2, 1, 0, 3, 0, 1, 4];
        let map = build_canonical_map(&positions, indices.iter().map(|&i| i as usize));
        let islands = connected_islands(prepare_triangles(&indices, &map));

        assert_eq!(islands, vec![indices]);
    }

    #[test]
    fn test_wide_index_buffer() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(6.0, 0.0, 0.0),
            Point3::new(5.0, 1.0, 0.0),
        ];
        let indices: Vec<u64> = vec![4, 5, 6, 0, 1, 2, 0, 2, 3];
        let map = build_canonical_map(&positions, indices.iter().map(|&i| i as usize));
        let islands = connected_islands(prepare_triangles(&indices, &map));

        assert_eq!(islands, vec![vec![4, 5, 6], vec![0, 1, 2, 0, 2, 3]]);
    }

    #[test]
    fn test_bridge_found_late_still_merges() {
        // t0 and t1 are only connected through t2, which comes last.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
        ];
        let indices: Vec<u32> = vec![
            0, 1, 3, // t0
            1, 2, 5, // t1
            1, 5, 4, 1, 4, 3, // bridge: t2, t3
        ];
        let map = build_canonical_map(&positions, indices.iter().map(|&i| i as usize));
        let islands = connected_islands(prepare_triangles(&indices, &map));

        assert_eq!(islands.len(), 1);
        assert_eq!(islands[0], indices);
    }
}
