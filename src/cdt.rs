//! The public triangulation entry point.

use thiserror::Error;

use crate::delaunay_core::{classify, monotone, refinement, triangulation::Triangulation};
use crate::point::Point2;

/// Options controlling [triangulate].
///
/// The defaults produce the full constrained Delaunay triangulation of the
/// input: Delaunay refinement on, both interior and exterior triangles
/// reported, no infinite pseudo-triangles.
///
/// # Example
/// ```
/// use trellis::TriangulationOptions;
///
/// let options = TriangulationOptions::default();
/// assert!(options.delaunay && options.interior && options.exterior);
/// assert!(!options.infinity);
///
/// let interior = TriangulationOptions::interior_only();
/// assert!(!interior.exterior);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriangulationOptions {
    /// Run the Delaunay refinement pass after construction. When false,
    /// the raw sweep triangulation is returned; it realizes all
    /// constraints but makes no empty-circle promise.
    pub delaunay: bool,
    /// Include triangles inside the constraint polygon.
    pub interior: bool,
    /// Include triangles outside the constraint polygon.
    pub exterior: bool,
    /// Additionally report a pseudo-triangle `(b, a, INFINITE_VERTEX)` for
    /// every convex hull edge `(a, b)`. Only effective while `exterior`
    /// output is requested.
    pub infinity: bool,
}

impl Default for TriangulationOptions {
    fn default() -> Self {
        TriangulationOptions {
            delaunay: true,
            interior: true,
            exterior: true,
            infinity: false,
        }
    }
}

impl TriangulationOptions {
    /// Only triangles inside the constraint polygon.
    pub fn interior_only() -> Self {
        TriangulationOptions {
            exterior: false,
            ..Self::default()
        }
    }

    /// Only triangles outside the constraint polygon.
    pub fn exterior_only() -> Self {
        TriangulationOptions {
            interior: false,
            ..Self::default()
        }
    }

    /// The raw constraint-respecting triangulation without Delaunay
    /// refinement.
    pub fn conforming_only() -> Self {
        TriangulationOptions {
            delaunay: false,
            ..Self::default()
        }
    }
}

/// The error type returned by [triangulate].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TriangulationError {
    /// A constraint edge referenced a vertex index outside of the point
    /// list.
    #[error("constraint edge {edge} references vertex {index}, but only {num_points} points were given")]
    InvalidEdgeIndex {
        /// Position of the offending edge in the `edges` argument.
        edge: usize,
        /// The out-of-range vertex index.
        index: usize,
        /// Number of points that were passed in.
        num_points: usize,
    },
}

/// Triangulates `points`, keeping every edge in `edges` fixed.
///
/// Returns the triangles as index triples into `points`. Every constraint
/// edge appears as a triangle edge in the result; subject to that, all
/// other edges satisfy the empty-circumcircle property (unless
/// [TriangulationOptions::delaunay] is disabled). The output order is
/// unspecified but deterministic for a given input.
///
/// Vertical constraint edges (both endpoints sharing one x coordinate)
/// cannot be represented by the sweep and are silently dropped; they still
/// count as constraints for flip blocking and interior/exterior
/// classification should the triangulation contain them by chance.
/// Duplicate constraint edges are deduplicated. Coincident input points
/// are kept as distinct vertices and may produce degenerate triangles.
///
/// # Example
/// ```
/// use trellis::{triangulate, Point2, TriangulationOptions};
///
/// let points = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let cells = triangulate(&points, &[], TriangulationOptions::default())?;
/// assert_eq!(cells.len(), 2);
/// # Ok::<(), trellis::TriangulationError>(())
/// ```
pub fn triangulate(
    points: &[Point2],
    edges: &[[usize; 2]],
    options: TriangulationOptions,
) -> Result<Vec<[usize; 3]>, TriangulationError> {
    for (edge, &endpoints) in edges.iter().enumerate() {
        for index in endpoints {
            if index >= points.len() {
                return Err(TriangulationError::InvalidEdgeIndex {
                    edge,
                    index,
                    num_points: points.len(),
                });
            }
        }
    }
    if points.is_empty() || (!options.interior && !options.exterior) {
        return Ok(Vec::new());
    }

    let constraints = canonicalize_edges(edges);
    let cells = monotone::monotone_triangulation(points, &constraints);

    // The raw sweep output needs no adjacency structure.
    if !options.delaunay && options.interior && options.exterior && !options.infinity {
        return Ok(cells);
    }

    let mut triangulation = Triangulation::new(points.len(), constraints);
    for [i, j, k] in cells {
        triangulation.add_triangle(i, j, k);
    }
    if options.delaunay {
        refinement::refine(points, &mut triangulation);
    }

    if options.interior && options.exterior && !options.infinity {
        return Ok(triangulation.cells());
    }

    let target = if options.interior && options.exterior {
        0
    } else if options.interior {
        -1
    } else {
        1
    };
    let infinity = options.infinity && options.exterior;
    Ok(classify::filter_triangulation(
        &triangulation,
        target,
        infinity,
    ))
}

/// Smaller index first, sorted, duplicates removed.
fn canonicalize_edges(edges: &[[usize; 2]]) -> Vec<[usize; 2]> {
    let mut canonical: Vec<[usize; 2]> = edges
        .iter()
        .map(|&[i, j]| if i < j { [i, j] } else { [j, i] })
        .collect();
    canonical.sort_unstable();
    canonical.dedup();
    canonical
}
