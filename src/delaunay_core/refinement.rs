//! Restores the Delaunay property of a triangulation by edge flipping.
//!
//! Every non-constraint interior edge is checked against the in-circle
//! predicate; failing edges go onto a stack and are flipped one by one.
//! Each flip exposes the four perimeter edges of the flipped quadrilateral
//! to new violations, so those are re-tested and pushed as needed. The
//! process terminates since every flip strictly increases the
//! triangulation's angle vector; the result is the unique constrained
//! Delaunay triangulation up to exactly concyclic ties.

use crate::point::Point2;

use super::predicates::in_circle;
use super::triangulation::Triangulation;

/// Flips edges until every non-constraint edge is locally Delaunay.
/// Returns the number of flips performed.
pub fn refine(points: &[Point2], triangulation: &mut Triangulation) -> usize {
    // Edge endpoints, flattened; edges are pushed with the smaller
    // endpoint first.
    let mut stack: Vec<usize> = Vec::new();

    for a in 0..triangulation.num_vertices() {
        let star = triangulation.star(a);
        for pair in star.chunks_exact(2) {
            let (x, b) = (pair[0], pair[1]);
            // Visit each undirected edge from its smaller endpoint only.
            if b < a || triangulation.is_constraint(a, b) {
                continue;
            }
            // The opposite vertex across {a, b}, if the edge is interior.
            let Some(y) = star
                .chunks_exact(2)
                .find(|other| other[0] == b)
                .map(|other| other[1])
            else {
                continue;
            };
            if in_circle(points[a], points[b], points[x], points[y]) > 0.0 {
                stack.push(a);
                stack.push(b);
            }
        }
    }

    let mut flips = 0;
    while let Some(b) = stack.pop() {
        let a = stack.pop().expect("edge stack holds pairs");

        // Look up both opposite vertices again; earlier flips may have
        // retriangulated this region or removed the edge entirely.
        let mut x = None;
        let mut y = None;
        for pair in triangulation.star(a).chunks_exact(2) {
            let (s, t) = (pair[0], pair[1]);
            if s == b {
                y = Some(t);
            } else if t == b {
                x = Some(s);
            }
        }
        let (Some(x), Some(y)) = (x, y) else {
            continue;
        };
        if in_circle(points[a], points[b], points[x], points[y]) <= 0.0 {
            // A previous flip already fixed this edge.
            continue;
        }

        triangulation.flip(a, b);
        flips += 1;

        // The flip replaced {a, b} by {x, y}; re-test the quadrilateral's
        // perimeter.
        test_flip(points, triangulation, &mut stack, x, a, y);
        test_flip(points, triangulation, &mut stack, a, y, x);
        test_flip(points, triangulation, &mut stack, y, b, x);
        test_flip(points, triangulation, &mut stack, b, x, y);
    }
    flips
}

/// Pushes the edge {a, b} if it is interior, unconstrained and fails the
/// in-circle test against its two opposite vertices, of which `x` is the
/// known one on the freshly flipped side.
fn test_flip(
    points: &[Point2],
    triangulation: &Triangulation,
    stack: &mut Vec<usize>,
    mut a: usize,
    mut b: usize,
    mut x: usize,
) {
    let Some(mut y) = triangulation.opposite(a, b) else {
        return;
    };
    if b < a {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut x, &mut y);
    }
    if triangulation.is_constraint(a, b) {
        return;
    }
    if in_circle(points[a], points[b], points[x], points[y]) > 0.0 {
        stack.push(a);
        stack.push(b);
    }
}
