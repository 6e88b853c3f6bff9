//! Normalized undirected edges over canonical vertex indices.

/// An undirected edge stored as `(min, max)` so that `(a, b)` and `(b, a)`
/// compare and hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(usize, usize);

impl Edge {
    /// Create a normalized edge between two canonical vertex indices.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// The smaller endpoint.
    #[inline]
    pub fn lo(self) -> usize {
        self.0
    }

    /// The larger endpoint.
    #[inline]
    pub fn hi(self) -> usize {
        self.1
    }

    /// Whether both endpoints are the same vertex.
    #[inline]
    pub fn is_loop(self) -> bool {
        self.0 == self.1
    }
}

/// The three normalized edges of a triangle `[a, b, c]`: `ab`, `bc`, `ca`.
#[inline]
pub fn triangle_edges([a, b, c]: [usize; 3]) -> [Edge; 3] {
    [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
}

/// The distinct, non-loop edges of a triangle.
///
/// A proper triangle always has three. A triangle whose corners collapse
/// (repeated indices, or distinct indices welded onto one canonical vertex)
/// keeps fewer: `[a, a, b]` has one edge and `[a, a, a]` has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleEdges {
    edges: [Edge; 3],
    len: u8,
}

impl TriangleEdges {
    /// Derive the edge set of a triangle given its canonical corners.
    pub fn new(canonical: [usize; 3]) -> Self {
        let all = triangle_edges(canonical);
        let mut edges = all;
        let mut len = 0usize;
        for e in all {
            if e.is_loop() || edges[..len].contains(&e) {
                continue;
            }
            edges[len] = e;
            len += 1;
        }
        Self {
            edges,
            len: len as u8,
        }
    }

    /// The edges, in `ab`, `bc`, `ca` order with collapsed ones removed.
    #[inline]
    pub fn as_slice(&self) -> &[Edge] {
        &self.edges[..self.len as usize]
    }

    /// Number of distinct edges (0 to 3).
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Whether the triangle has collapsed to a point.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
