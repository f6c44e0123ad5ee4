//! Sweep-line construction of an initial triangulation that realizes every
//! (non-vertical) constraint edge.
//!
//! The sweep moves left to right over three kinds of events: plain points,
//! constraint starts and constraint ends. Its status is a list of partial
//! hulls, one per "channel" between two constraint segments, ordered from
//! top to bottom. Each hull tracks the right frontier of the region
//! triangulated so far inside its channel as two monotone vertex chains.
//! Constraint starts split a channel in two, constraint ends merge the two
//! adjacent channels back together.
//!
//! A sentinel hull whose segment lies left of and above all real events
//! heads the list, so every point falls into some channel and the searches
//! below never need a boundary case.

use std::cmp::Ordering;

use crate::point::Point2;

use super::predicates::orient2d;
use super::search;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
enum EventKind {
    Point,
    End,
    Start,
}

#[derive(Clone, Copy, Debug)]
struct SweepEvent {
    /// The event's primary point: the point itself, or the constraint
    /// endpoint the sweep line touches first (`Start`) or last (`End`).
    a: Point2,
    /// The constraint's other endpoint; `None` for point events.
    b: Option<Point2>,
    kind: EventKind,
    /// Point index for point events, constraint index otherwise.
    index: usize,
}

struct PartialHull {
    /// Left and right endpoint of the constraint segment bounding this
    /// hull's channel from above.
    a: Point2,
    b: Point2,
    /// The originating constraint index; `None` for the sentinel.
    index: Option<usize>,
    /// Frontier chain along the channel's upper boundary.
    top_chain: Vec<usize>,
    /// Frontier chain along the channel's lower boundary.
    bottom_chain: Vec<usize>,
}

/// Triangulates `points` so that every non-vertical edge in `constraints`
/// shows up as a triangle edge. Emitted triangles are wound clockwise.
///
/// `constraints` must be canonicalized and deduplicated; edges with equal
/// x coordinates on both endpoints are skipped entirely.
pub fn monotone_triangulation(points: &[Point2], constraints: &[[usize; 2]]) -> Vec<[usize; 3]> {
    let mut cells = Vec::new();
    if points.is_empty() {
        return cells;
    }

    let mut events = build_events(points, constraints);
    events.sort_by(compare_events);

    // A vertical pseudo-segment strictly left of every event. Every real
    // point compares below it, so it owns the whole plane until the first
    // constraint starts.
    let first_x = events[0].a.x;
    let min_x = first_x - (1.0 + first_x.abs()) * 2.0 * f64::EPSILON;
    let mut hulls = vec![PartialHull {
        a: Point2::new(min_x, 0.0),
        b: Point2::new(min_x, 1.0),
        index: None,
        top_chain: Vec::new(),
        bottom_chain: Vec::new(),
    }];

    for event in &events {
        match event.kind {
            EventKind::Point => add_point(&mut cells, &mut hulls, points, event.a, event.index),
            EventKind::Start => split_hulls(&mut hulls, event),
            EventKind::End => merge_hulls(&mut hulls, event),
        }
    }
    cells
}

fn build_events(points: &[Point2], constraints: &[[usize; 2]]) -> Vec<SweepEvent> {
    let mut events = Vec::with_capacity(points.len() + 2 * constraints.len());
    for (index, &point) in points.iter().enumerate() {
        events.push(SweepEvent {
            a: point,
            b: None,
            kind: EventKind::Point,
            index,
        });
    }
    for (index, edge) in constraints.iter().enumerate() {
        let (p, q) = (points[edge[0]], points[edge[1]]);
        let (left, right) = match compare_coordinates(p.x, q.x) {
            Ordering::Less => (p, q),
            Ordering::Greater => (q, p),
            // Vertical constraints cannot be represented by the sweep and
            // are dropped.
            Ordering::Equal => continue,
        };
        events.push(SweepEvent {
            a: left,
            b: Some(right),
            kind: EventKind::Start,
            index,
        });
        events.push(SweepEvent {
            a: right,
            b: Some(left),
            kind: EventKind::End,
            index,
        });
    }
    events
}

fn compare_coordinates(lhs: f64, rhs: f64) -> Ordering {
    lhs.partial_cmp(&rhs)
        .expect("invalid point coordinate, possible NaN detected")
}

fn ordering_from_determinant(determinant: f64) -> Ordering {
    determinant
        .partial_cmp(&0.0)
        .expect("invalid point coordinate, possible NaN detected")
}

/// The total event order: by x, then y, then kind (points before ends
/// before starts), then by the segments' angular order, finally by index.
fn compare_events(lhs: &SweepEvent, rhs: &SweepEvent) -> Ordering {
    compare_coordinates(lhs.a.x, rhs.a.x)
        .then_with(|| compare_coordinates(lhs.a.y, rhs.a.y))
        .then_with(|| lhs.kind.cmp(&rhs.kind))
        .then_with(|| match (lhs.b, rhs.b) {
            (Some(lhs_b), Some(rhs_b)) => ordering_from_determinant(orient2d(lhs.a, lhs_b, rhs_b)),
            _ => Ordering::Equal,
        })
        .then_with(|| lhs.index.cmp(&rhs.index))
}

/// Where `point` lies relative to the hull's segment: `Less` below,
/// `Greater` above, `Equal` on the segment's supporting line.
///
/// Since the status list is ordered top to bottom, it is sorted under this
/// comparator and the channel owning a point is the last hull whose
/// segment is above it.
fn hull_position(hull: &PartialHull, point: Point2) -> Ordering {
    ordering_from_determinant(orient2d(hull.a, hull.b, point))
}

fn add_point(
    cells: &mut Vec<[usize; 3]>,
    hulls: &mut [PartialHull],
    points: &[Point2],
    point: Point2,
    index: usize,
) {
    let lo = search::lt(hulls, |hull| hull_position(hull, point))
        .expect("the sentinel hull must lie above all events");
    let hi = search::gt(hulls, |hull| hull_position(hull, point));

    // The owning channel, plus every channel whose constraint the point
    // lies on.
    for hull in &mut hulls[lo..hi] {
        let chain = &mut hull.top_chain;
        while chain.len() >= 2 {
            let u = chain[chain.len() - 2];
            let v = chain[chain.len() - 1];
            if orient2d(points[u], points[v], point) > 0.0 {
                cells.push([v, u, index]);
                chain.pop();
            } else {
                break;
            }
        }
        chain.push(index);

        let chain = &mut hull.bottom_chain;
        while chain.len() >= 2 {
            let u = chain[chain.len() - 2];
            let v = chain[chain.len() - 1];
            if orient2d(points[u], points[v], point) < 0.0 {
                cells.push([u, v, index]);
                chain.pop();
            } else {
                break;
            }
        }
        chain.push(index);
    }
}

/// Ranks a hull against a constraint segment `a -> b`: `Less` when the
/// hull's segment is above the constraint, `Greater` when below. Which
/// endpoints get compared depends on their x order; ties on collinear
/// configurations fall back to the originating index, with the sentinel
/// ranking first.
fn find_split(hull: &PartialHull, a: Point2, b: Point2, index: usize) -> Ordering {
    let d = if hull.a.x < a.x {
        orient2d(hull.a, hull.b, a)
    } else {
        orient2d(b, a, hull.a)
    };
    if d != 0.0 {
        return ordering_from_determinant(d);
    }
    let d = if b.x < hull.b.x {
        orient2d(hull.a, hull.b, b)
    } else {
        orient2d(b, a, hull.b)
    };
    if d != 0.0 {
        return ordering_from_determinant(d);
    }
    hull.index.cmp(&Some(index))
}

/// Handles a constraint start: the owning channel is split along the new
/// segment. Both halves continue from the segment's left endpoint, which
/// the preceding point event has already pushed onto the owning hull's
/// chains.
fn split_hulls(hulls: &mut Vec<PartialHull>, event: &SweepEvent) {
    let b = event.b.expect("start events always carry a partner point");
    let split_index = search::le(hulls, |hull| find_split(hull, event.a, b, event.index))
        .expect("the sentinel hull must rank before all constraints");

    let hull = &mut hulls[split_index];
    let meeting_point = *hull
        .bottom_chain
        .last()
        .expect("the constraint's left endpoint was swept before its start event");
    let old_bottom = std::mem::replace(&mut hull.bottom_chain, vec![meeting_point]);

    hulls.insert(
        split_index + 1,
        PartialHull {
            a: event.a,
            b,
            index: Some(event.index),
            top_chain: vec![meeting_point],
            bottom_chain: old_bottom,
        },
    );
}

/// Handles a constraint end: the channel below the ending segment is
/// merged into the one above it.
fn merge_hulls(hulls: &mut Vec<PartialHull>, event: &SweepEvent) {
    let b = event.b.expect("end events always carry a partner point");
    // Search with the endpoints restored to their start orientation.
    let merge_index = search::eq(hulls, |hull| find_split(hull, b, event.a, event.index));

    let Some(merge_index) = merge_index else {
        debug_assert!(false, "no hull found for end event");
        return;
    };
    if merge_index == 0 {
        debug_assert!(false, "end event matched the sentinel hull");
        return;
    }

    let bottom = std::mem::take(&mut hulls[merge_index].bottom_chain);
    hulls[merge_index - 1].bottom_chain = bottom;
    hulls.remove(merge_index);
}

#[cfg(test)]
mod test {
    use super::{monotone_triangulation, EventKind};
    use crate::point::Point2;

    fn unit_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_event_kind_order() {
        assert!(EventKind::Point < EventKind::End);
        assert!(EventKind::End < EventKind::Start);
    }

    #[test]
    fn test_empty_and_tiny_inputs() {
        assert!(monotone_triangulation(&[], &[]).is_empty());
        assert!(monotone_triangulation(&[Point2::new(0.0, 0.0)], &[]).is_empty());
        let two = [Point2::new(0.0, 0.0), Point2::new(1.0, 2.0)];
        assert!(monotone_triangulation(&two, &[]).is_empty());
    }

    #[test]
    fn test_single_triangle() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let cells = monotone_triangulation(&points, &[]);
        assert_eq!(cells.len(), 1);
        let mut indices = cells[0];
        indices.sort_unstable();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn test_square() {
        let cells = monotone_triangulation(&unit_square(), &[]);
        let mut cells = cells;
        cells.sort_unstable();
        // The sweep triangulates the square along the {1, 3} diagonal.
        assert_eq!(cells, vec![[0, 3, 1], [1, 3, 2]]);
    }

    #[test]
    fn test_square_with_constraint_diagonal() {
        let cells = monotone_triangulation(&unit_square(), &[[0, 2]]);
        assert_eq!(cells.len(), 2);
        for cell in &cells {
            assert!(cell.contains(&0) && cell.contains(&2));
        }
    }

    #[test]
    fn test_collinear_points_produce_nothing() {
        let points: Vec<_> = (0..5).map(|i| Point2::new(i as f64, 2.0)).collect();
        assert!(monotone_triangulation(&points, &[]).is_empty());
    }

    #[test]
    fn test_vertical_constraint_is_dropped() {
        let cells = monotone_triangulation(&unit_square(), &[[0, 3]]);
        let mut cells = cells;
        cells.sort_unstable();
        // Same result as the unconstrained square: the vertical edge
        // {0, 3} generates no events (it still happens to lie on the hull).
        assert_eq!(cells, vec![[0, 3, 1], [1, 3, 2]]);
    }

    #[test]
    fn test_constrained_square_boundary() {
        let constraints = [[0, 1], [1, 2], [2, 3], [0, 3]];
        let cells = monotone_triangulation(&unit_square(), &constraints);
        assert_eq!(cells.len(), 2);
    }

    #[test]
    fn test_clockwise_winding() {
        use crate::delaunay_core::predicates::orient2d;
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 3.0),
            Point2::new(3.5, 2.0),
            Point2::new(4.0, 0.5),
            Point2::new(2.5, -1.0),
        ];
        let cells = monotone_triangulation(&points, &[]);
        assert!(!cells.is_empty());
        for [i, j, k] in cells {
            assert!(orient2d(points[i], points[j], points[k]) < 0.0);
        }
    }

    #[test]
    fn test_crossing_channels() {
        // Two horizontal constraints stacked above each other, with points
        // in all three channels.
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.5, 2.0),
            Point2::new(3.5, 2.0),
            Point2::new(2.0, 1.0),
            Point2::new(2.0, 3.0),
            Point2::new(2.0, -1.0),
        ];
        let constraints = [[0, 1], [2, 3]];
        let cells = monotone_triangulation(&points, &constraints);

        let realized = |a: usize, b: usize| {
            cells
                .iter()
                .any(|cell| cell.contains(&a) && cell.contains(&b))
        };
        assert!(realized(0, 1));
        assert!(realized(2, 3));
        // Triangles never cross a constraint: nothing connects the point
        // below {0, 1} with anything above it.
        for cell in &cells {
            if cell.contains(&6) {
                assert!(
                    [2, 3, 4, 5].iter().all(|above| !cell.contains(above)),
                    "cell {cell:?} crosses a constraint",
                );
            }
        }
    }
}
