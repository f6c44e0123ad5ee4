//! The vertex-keyed adjacency structure holding a triangulation.
//!
//! Instead of a doubly connected edge list, every vertex `v` owns a "star":
//! a flat list of index pairs, each pair `(p, q)` encoding the clockwise
//! triangle `(v, p, q)` incident to `v`. A triangle `(i, j, k)` is
//! therefore represented exactly once in each of its three stars, as
//! `(j, k)` in the star of `i`, `(k, i)` in the star of `j` and `(i, j)` in
//! the star of `k`. Navigation is an O(degree) scan, but there are no
//! reference cycles: the structure is nothing but integers.

use smallvec::SmallVec;

use super::search;

/// Star entries are pairs; most vertices touch no more than eight
/// triangles, which this inline capacity keeps off the heap.
type Star = SmallVec<[usize; 16]>;

/// A triangulation over `n` vertices together with its constraint edge set.
///
/// All triangles are stored with clockwise winding; `add_triangle` callers
/// must uphold that.
pub struct Triangulation {
    stars: Vec<Star>,
    /// Canonical (smaller index first), lexicographically sorted and
    /// deduplicated constraint edges.
    constraints: Vec<[usize; 2]>,
}

impl Triangulation {
    /// Creates an empty triangulation. `constraints` must already be
    /// canonical, sorted and free of duplicates.
    pub fn new(num_vertices: usize, constraints: Vec<[usize; 2]>) -> Self {
        debug_assert!(constraints.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(constraints.iter().all(|e| e[0] <= e[1]));
        Self {
            stars: vec![Star::new(); num_vertices],
            constraints,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.stars.len()
    }

    /// The star of `vertex` as a flat pair list.
    pub fn star(&self, vertex: usize) -> &[usize] {
        &self.stars[vertex]
    }

    /// Inserts the clockwise triangle `(i, j, k)`.
    pub fn add_triangle(&mut self, i: usize, j: usize, k: usize) {
        self.stars[i].extend_from_slice(&[j, k]);
        self.stars[j].extend_from_slice(&[k, i]);
        self.stars[k].extend_from_slice(&[i, j]);
    }

    /// Removes the triangle `(i, j, k)`, in any cyclic rotation of the
    /// order it was added with.
    pub fn remove_triangle(&mut self, i: usize, j: usize, k: usize) {
        self.remove_pair(i, j, k);
        self.remove_pair(j, k, i);
        self.remove_pair(k, i, j);
    }

    fn remove_pair(&mut self, vertex: usize, p: usize, q: usize) {
        let star = &mut self.stars[vertex];
        for position in (0..star.len()).step_by(2) {
            if star[position] == p && star[position + 1] == q {
                // Swap the last pair into place and shrink.
                let length = star.len();
                star[position] = star[length - 2];
                star[position + 1] = star[length - 1];
                star.truncate(length - 2);
                return;
            }
        }
        debug_assert!(false, "removed triangle was not present");
    }

    /// The vertex opposite the directed edge `j -> i`, i.e. the third
    /// vertex of the unique triangle containing that directed edge, or
    /// `None` at the triangulation boundary.
    pub fn opposite(&self, j: usize, i: usize) -> Option<usize> {
        self.stars[i]
            .chunks_exact(2)
            .find(|pair| pair[1] == j)
            .map(|pair| pair[0])
    }

    /// Whether the undirected edge `{i, j}` is a constraint edge.
    pub fn is_constraint(&self, i: usize, j: usize) -> bool {
        let edge = if i < j { [i, j] } else { [j, i] };
        search::eq(&self.constraints, |e| e.cmp(&edge)).is_some()
    }

    /// Replaces the two triangles sharing the edge `{i, j}` by the two
    /// triangles on the dual diagonal. A no-op if `{i, j}` is a boundary
    /// edge.
    ///
    /// Winding matters here: with `a` opposite the directed edge `j -> i`
    /// and `b` opposite `i -> j`, the clockwise triangles `(i, a, j)` and
    /// `(j, b, i)` become `(i, a, b)` and `(j, b, a)`.
    pub fn flip(&mut self, i: usize, j: usize) {
        let (Some(a), Some(b)) = (self.opposite(j, i), self.opposite(i, j)) else {
            return;
        };
        self.remove_triangle(i, a, j);
        self.remove_triangle(j, b, i);
        self.add_triangle(i, a, b);
        self.add_triangle(j, b, a);
    }

    /// All triangles, each reported exactly once with its smallest vertex
    /// first and its stored cyclic order preserved.
    pub fn cells(&self) -> Vec<[usize; 3]> {
        let mut cells = Vec::new();
        for (i, star) in self.stars.iter().enumerate() {
            for pair in star.chunks_exact(2) {
                let (s, t) = (pair[0], pair[1]);
                if i < s && i < t {
                    cells.push([i, s, t]);
                }
            }
        }
        cells
    }

    /// Validates the structural invariants. Only called from tests.
    #[cfg(test)]
    pub fn sanity_check(&self) {
        let mut total_pairs = 0;
        for (i, star) in self.stars.iter().enumerate() {
            assert_eq!(star.len() % 2, 0, "odd star length at vertex {i}");
            total_pairs += star.len() / 2;
            for pair in star.chunks_exact(2) {
                let (s, t) = (pair[0], pair[1]);
                assert!(s != i && t != i && s != t);
                // The same triangle must appear in the other two stars,
                // rotated accordingly.
                assert_eq!(self.opposite(i, s), Some(t), "missing ({s}, {t}, {i})");
                assert_eq!(self.opposite(t, i), Some(s), "missing ({i}, {s}, {t})");
            }
        }
        assert_eq!(total_pairs, 3 * self.cells().len());
    }
}
