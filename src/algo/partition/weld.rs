//! Vertex welding for adjacency tests.
//!
//! Importers routinely split a vertex into several indices that share one
//! position (UV seams, hard normals, skin weight splits). For adjacency
//! purposes those indices must count as one node, so every referenced index
//! is mapped to a canonical representative: the lowest referenced index at
//! the same position.
//!
//! The map is only used to compare edges. Emitted triangles always keep
//! their original indices.

use std::collections::HashMap;

use nalgebra::Point3;

/// How vertex positions are compared when welding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WeldMode {
    /// Positions weld only when they compare equal (`-0.0 == 0.0`, NaN never
    /// equals anything).
    #[default]
    Exact,
    /// Positions weld when they lie within the given distance of an earlier
    /// referenced vertex.
    Tolerance(f64),
}

/// Mapping from original vertex index to its canonical representative.
///
/// The mapping is idempotent: `canonical(canonical(i)) == canonical(i)`.
#[derive(Debug, Clone, Default)]
pub struct CanonicalMap {
    map: HashMap<usize, usize>,
    representatives: usize,
}

impl CanonicalMap {
    /// The canonical representative of `index`.
    ///
    /// Indices that were not referenced when the map was built map to
    /// themselves.
    #[inline]
    pub fn canonical(&self, index: usize) -> usize {
        self.map.get(&index).copied().unwrap_or(index)
    }

    /// Canonical corners of a triangle.
    #[inline]
    pub fn canonical_triangle(&self, [a, b, c]: [usize; 3]) -> [usize; 3] {
        [self.canonical(a), self.canonical(b), self.canonical(c)]
    }

    /// Number of referenced indices in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of distinct canonical representatives.
    #[inline]
    pub fn representatives(&self) -> usize {
        self.representatives
    }

    /// Iterate over `(index, canonical)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.map.iter().map(|(&i, &c)| (i, c))
    }
}

/// Build a canonical map using exact position equality.
///
/// `referenced` may contain duplicates and may be in any order; the result
/// only depends on the set of indices.
///
/// # Panics
/// Panics if a referenced index is out of range for `positions`.
///
/// # Example
///
/// ```
/// use splinter::algo::partition::build_canonical_map;
/// use nalgebra::Point3;
///
/// let positions = vec![
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 0.0, 0.0), // same position as 0
/// ];
/// let map = build_canonical_map(&positions, [0, 1, 2]);
/// assert_eq!(map.canonical(2), 0);
/// assert_eq!(map.representatives(), 2);
/// ```
pub fn build_canonical_map<R>(positions: &[Point3<f64>], referenced: R) -> CanonicalMap
where
    R: IntoIterator<Item = usize>,
{
    build_canonical_map_with(positions, referenced, WeldMode::Exact)
}

/// Build a canonical map with the given [`WeldMode`].
///
/// # Panics
/// Panics if a referenced index is out of range for `positions`.
pub fn build_canonical_map_with<R>(
    positions: &[Point3<f64>],
    referenced: R,
    mode: WeldMode,
) -> CanonicalMap
where
    R: IntoIterator<Item = usize>,
{
    let mut sorted: Vec<usize> = referenced.into_iter().collect();
    sorted.sort_unstable();
    sorted.dedup();

    match mode {
        WeldMode::Tolerance(eps) if eps > 0.0 => weld_tolerance(positions, &sorted, eps),
        _ => weld_exact(positions, &sorted),
    }
}

/// Hash key matching float equality: `-0.0` folds into `0.0`, NaN has no key.
fn exact_key(p: &Point3<f64>) -> Option<[u64; 3]> {
    let mut key = [0u64; 3];
    for (k, &c) in key.iter_mut().zip(p.coords.iter()) {
        if c.is_nan() {
            return None;
        }
        *k = if c == 0.0 { 0 } else { c.to_bits() };
    }
    Some(key)
}

fn weld_exact(positions: &[Point3<f64>], sorted: &[usize]) -> CanonicalMap {
    let mut first_at: HashMap<[u64; 3], usize> = HashMap::with_capacity(sorted.len());
    let mut map = HashMap::with_capacity(sorted.len());
    let mut representatives = 0;

    for &i in sorted {
        let rep = match exact_key(&positions[i]) {
            Some(key) => *first_at.entry(key).or_insert(i),
            None => i,
        };
        if rep == i {
            representatives += 1;
        }
        map.insert(i, rep);
    }

    CanonicalMap {
        map,
        representatives,
    }
}

fn weld_tolerance(positions: &[Point3<f64>], sorted: &[usize], eps: f64) -> CanonicalMap {
    // Clamped so the cell scale stays finite for subnormal eps.
    let inv = 1.0 / eps.max(f64::MIN_POSITIVE);
    let cell_of = |p: &Point3<f64>| -> [i64; 3] {
        [
            (p.x * inv).floor() as i64,
            (p.y * inv).floor() as i64,
            (p.z * inv).floor() as i64,
        ]
    };

    let mut grid: HashMap<[i64; 3], Vec<usize>> = HashMap::new();
    let mut map: HashMap<usize, usize> = HashMap::with_capacity(sorted.len());
    let mut representatives = 0;

    for &i in sorted {
        let p = &positions[i];
        if p.coords.iter().any(|c| c.is_nan()) {
            map.insert(i, i);
            representatives += 1;
            continue;
        }

        let cell = cell_of(p);
        let mut nearest: Option<usize> = None;
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                for dz in -1i64..=1 {
                    let key = [
                        cell[0].saturating_add(dx),
                        cell[1].saturating_add(dy),
                        cell[2].saturating_add(dz),
                    ];
                    let Some(bucket) = grid.get(&key) else {
                        continue;
                    };
                    for &j in bucket {
                        let q = &positions[j];
                        if (q == p || (p - q).norm() <= eps) && nearest.map_or(true, |n| j < n) {
                            nearest = Some(j);
                        }
                    }
                }
            }
        }

        let rep = match nearest {
            Some(j) => map[&j],
            None => {
                representatives += 1;
                i
            }
        };
        map.insert(i, rep);
        grid.entry(cell).or_default().push(i);
    }

    CanonicalMap {
        map,
        representatives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seam_positions() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_lowest_index_is_representative() {
        let map = build_canonical_map(&seam_positions(), [3, 2, 1, 0, 4]);

        assert_eq!(map.canonical(0), 0);
        assert_eq!(map.canonical(1), 1);
        assert_eq!(map.canonical(2), 1);
        assert_eq!(map.canonical(3), 0);
        assert_eq!(map.canonical(4), 4);
        assert_eq!(map.len(), 5);
        assert_eq!(map.representatives(), 3);
    }

    #[test]
    fn test_idempotent() {
        let map = build_canonical_map(&seam_positions(), 0..5);
        for (i, c) in map.iter() {
            assert_eq!(map.canonical(c), c, "canonical({}) is not a fixed point", i);
        }
    }

    #[test]
    fn test_only_referenced_indices_participate() {
        // 0 is not referenced, so 3 becomes its own representative.
        let map = build_canonical_map(&seam_positions(), [3, 4]);
        assert_eq!(map.canonical(3), 3);
        assert_eq!(map.canonical(0), 0);
        assert_eq!(map.representatives(), 2);
    }

    #[test]
    fn test_signed_zero_and_nan() {
        let positions = vec![
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-0.0, 1.0, 0.0),
            Point3::new(f64::NAN, 0.0, 0.0),
            Point3::new(f64::NAN, 0.0, 0.0),
        ];
        let map = build_canonical_map(&positions, 0..4);

        assert_eq!(map.canonical(1), 0);
        assert_eq!(map.canonical(2), 2);
        assert_eq!(map.canonical(3), 3);
    }

    #[test]
    fn test_exact_mode_ignores_tiny_offsets() {
        let positions = vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1e-12, 0.0, 0.0)];
        let map = build_canonical_map(&positions, 0..2);
        assert_eq!(map.canonical(1), 1);
    }

    #[test]
    fn test_tolerance_mode() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1e-7, 0.0, 0.0),
            Point3::new(1.0, 1e-7, 0.0),
            Point3::new(0.5, 0.0, 0.0),
        ];
        let map = build_canonical_map_with(&positions, 0..5, WeldMode::Tolerance(1e-6));

        assert_eq!(map.canonical(2), 0);
        assert_eq!(map.canonical(3), 1);
        assert_eq!(map.canonical(4), 4);
        assert_eq!(map.representatives(), 3);
    }

    #[test]
    fn test_tolerance_across_cell_boundary() {
        // Straddles a grid cell boundary at x = 1e-3.
        let positions = vec![
            Point3::new(0.999e-3, 0.0, 0.0),
            Point3::new(1.001e-3, 0.0, 0.0),
        ];
        let map = build_canonical_map_with(&positions, 0..2, WeldMode::Tolerance(1e-3));
        assert_eq!(map.canonical(1), 0);
    }

    #[test]
    fn test_subnormal_tolerance() {
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(5e-324, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
        ];
        let map = build_canonical_map_with(&positions, 0..3, WeldMode::Tolerance(1e-320));
        assert_eq!(map.canonical(1), 0);
        assert_eq!(map.canonical(2), 2);
    }

    #[test]
    fn test_zero_tolerance_is_exact() {
        let positions = seam_positions();
        let exact = build_canonical_map(&positions, 0..5);
        let zero = build_canonical_map_with(&positions, 0..5, WeldMode::Tolerance(0.0));
        for i in 0..5 {
            assert_eq!(exact.canonical(i), zero.canonical(i));
        }
    }
}
