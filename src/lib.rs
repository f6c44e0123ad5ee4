//! # trellis
//!
//! A two-dimensional [constrained Delaunay triangulation](https://en.wikipedia.org/wiki/Constrained_Delaunay_triangulation)
//! library.
//!
//! Given a set of points and an optional list of constraint edges,
//! [triangulate] produces a triangulation in which every constraint edge is
//! present as a triangle edge, while every other edge satisfies the
//! empty-circumcircle property. The result can be restricted to the
//! interior or the exterior of the constraint polygon, and the unbounded
//! faces across each convex hull edge can be reported as pseudo-triangles.
//!
//! All geometric decisions are made with adaptive-precision predicates and
//! are sign-exact, so nearly degenerate input does not corrupt the
//! triangulation. For a fixed input the output is deterministic.
//!
//! # Example
//!
//! ```
//! use trellis::{triangulate, Point2, TriangulationOptions};
//!
//! // A unit square with a constrained diagonal from corner 0 to corner 2.
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let cells = triangulate(&points, &[[0, 2]], TriangulationOptions::default())?;
//!
//! assert_eq!(cells.len(), 2);
//! for cell in &cells {
//!     assert!(cell.contains(&0) && cell.contains(&2));
//! }
//! # Ok::<(), trellis::TriangulationError>(())
//! ```
//!
//! # Filtering
//!
//! With constraint edges forming a closed polygon, the triangles inside
//! and outside of it can be told apart:
//!
//! ```
//! use trellis::{triangulate, Point2, TriangulationOptions};
//!
//! let points = vec![
//!     Point2::new(0.0, 0.0),
//!     Point2::new(1.0, 0.0),
//!     Point2::new(1.0, 1.0),
//!     Point2::new(0.0, 1.0),
//! ];
//! let ring = [[0, 1], [1, 2], [2, 3], [3, 0]];
//! let inside = triangulate(&points, &ring, TriangulationOptions::interior_only())?;
//! assert_eq!(inside.len(), 2);
//! # Ok::<(), trellis::TriangulationError>(())
//! ```
//!
//! # Limitations
//!
//! Constraint edges may share endpoints but must not cross each other or
//! pass through other points. Vertical constraint edges are silently
//! dropped. Coincident input points are treated as distinct vertices.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod cdt;
mod delaunay_core;
mod point;

#[cfg(test)]
mod test_utilities;

pub use cdt::{triangulate, TriangulationError, TriangulationOptions};
pub use point::Point2;

/// The pseudo-vertex index used as the third corner of the infinite
/// triangles reported by [TriangulationOptions::infinity].
pub const INFINITE_VERTEX: usize = usize::MAX;
