//! A single island being grown from a seed triangle.
//!
//! The island tracks its boundary as an open-edge set. Absorbing a triangle
//! through one of those edges turns the matched edge interior and toggles the
//! triangle's other edges, so the set always holds exactly the edges used an
//! odd number of times by the island's triangles.

use std::collections::HashSet;

use super::edge::{Edge, TriangleEdges};
use crate::mesh::MeshIndex;

/// Lifecycle of a [`GrowingIsland`]. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IslandState {
    /// Holds only its seed triangle.
    Seeded,
    /// Has absorbed at least one triangle.
    Growing,
    /// A full pass absorbed nothing; the island is final.
    Terminal,
}

/// An island under construction: open-edge boundary plus the triangles it
/// owns, in absorption order and with their original indices.
#[derive(Debug, Clone)]
pub struct GrowingIsland<I: MeshIndex> {
    open: HashSet<Edge>,
    indices: Vec<I>,
    state: IslandState,
}

impl<I: MeshIndex> GrowingIsland<I> {
    /// Start an island from a seed triangle; all of its edges become open.
    pub fn seed(triangle: [I; 3], edges: &TriangleEdges) -> Self {
        let mut open = HashSet::with_capacity(8);
        open.extend(edges.as_slice().iter().copied());
        Self {
            open,
            indices: triangle.to_vec(),
            state: IslandState::Seeded,
        }
    }

    /// Absorb `triangle` if it shares an edge with the open boundary.
    ///
    /// On success the first matching edge is removed and the remaining edges
    /// are toggled. Returns `false` and leaves the island untouched when no
    /// edge matches or the island is terminal.
    pub fn try_absorb(&mut self, triangle: [I; 3], edges: &TriangleEdges) -> bool {
        if self.state == IslandState::Terminal {
            return false;
        }

        let edges = edges.as_slice();
        let Some(matched) = edges.iter().position(|e| self.open.contains(e)) else {
            return false;
        };

        self.open.remove(&edges[matched]);
        for (k, e) in edges.iter().enumerate() {
            if k != matched && !self.open.remove(e) {
                self.open.insert(*e);
            }
        }

        self.indices.extend_from_slice(&triangle);
        self.state = IslandState::Growing;
        true
    }

    /// Mark the island final after a pass without absorptions.
    pub fn terminate(&mut self) {
        self.state = IslandState::Terminal;
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> IslandState {
        self.state
    }

    /// Whether `edge` is currently on the island's boundary.
    #[inline]
    pub fn is_open(&self, edge: &Edge) -> bool {
        self.open.contains(edge)
    }

    /// Number of open boundary edges.
    #[inline]
    pub fn num_open_edges(&self) -> usize {
        self.open.len()
    }

    /// Number of triangles absorbed so far, seed included.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Flattened triangle indices in absorption order.
    #[inline]
    pub fn indices(&self) -> &[I] {
        &self.indices
    }

    /// Consume the island, returning its flattened triangle indices.
    pub fn into_indices(self) -> Vec<I> {
        self.indices
    }
}
