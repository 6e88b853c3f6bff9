//! Seed-and-flood island growth.
//!
//! Islands are grown one at a time to a local fixed point: the first
//! unassigned triangle seeds an island, then the remaining pool is scanned in
//! order, pass after pass, absorbing every triangle that shares an open edge.
//! A pass that absorbs nothing ends the island and the next unassigned
//! triangle seeds another.
//!
//! The result depends on triangle order. A triangle adjacent to two regions
//! joins whichever island reaches it first, and at a non-manifold edge a third
//! triangle only joins if it touches another open edge. For
//! order-independent components see [`union_find`](super::union_find).

use std::collections::VecDeque;

use log::trace;

use super::island::GrowingIsland;
use super::PreparedTriangle;
use crate::mesh::MeshIndex;

/// Partition prepared triangles into islands by greedy flood-fill.
///
/// Each returned island is a flattened index buffer in absorption order.
pub(crate) fn grow_islands<I: MeshIndex>(triangles: Vec<PreparedTriangle<I>>) -> Vec<Vec<I>> {
    let mut remaining: VecDeque<PreparedTriangle<I>> = triangles.into();
    let mut islands = Vec::new();

    while let Some(seed) = remaining.pop_front() {
        let mut island = GrowingIsland::seed(seed.triangle, &seed.edges);
        let mut passes = 0usize;

        loop {
            passes += 1;
            let before = remaining.len();
            remaining.retain(|t| !island.try_absorb(t.triangle, &t.edges));
            if remaining.len() == before {
                island.terminate();
                break;
            }
        }

        trace!(
            "island {}: {} triangles, {} open edges, {} passes",
            islands.len(),
            island.num_triangles(),
            island.num_open_edges(),
            passes
        );
        islands.push(island.into_indices());
    }

    islands
}
