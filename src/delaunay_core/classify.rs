//! Labels every triangle as interior or exterior of the constraint
//! polygon and filters the cell list accordingly.
//!
//! The classifier flood fills outwards from the triangulation boundary:
//! cells reachable without crossing a constraint share a label, and the
//! label flips each time the fill steps across a constraint edge. Cells
//! whose boundary edge is not a constraint are seeded as exterior.

use crate::INFINITE_VERTEX;

use super::search;
use super::triangulation::Triangulation;

/// Cell labels: +1 exterior, -1 interior, 0 unreachable.
pub type Label = i8;

/// All cells of a triangulation in canonical order together with their
/// interior/exterior labels and, optionally, the unbounded pseudo-cells
/// across each hull edge.
pub struct Classification {
    cells: Vec<[usize; 3]>,
    labels: Vec<Label>,
    infinite_cells: Vec<[usize; 3]>,
}

/// Rotates the cell's smallest index to the front. Rotation, unlike
/// sorting, preserves the cyclic order and with it the winding, which the
/// neighbor lookup below relies on.
fn rotate_smallest_first(cell: &mut [usize; 3]) {
    let [x, y, z] = *cell;
    if y < z {
        if y < x {
            *cell = [y, z, x];
        }
    } else if z < x {
        *cell = [z, x, y];
    }
}

/// Indexes and labels all cells. `infinity` additionally collects a
/// pseudo-cell `(b, a, INFINITE_VERTEX)` for every boundary edge `(a, b)`.
pub fn classify(triangulation: &Triangulation, infinity: bool) -> Classification {
    let mut cells = triangulation.cells();
    for cell in &mut cells {
        rotate_smallest_first(cell);
    }
    cells.sort_unstable();

    let num_cells = cells.len();
    let mut labels: Vec<Label> = vec![0; num_cells];
    let mut neighbors: Vec<Option<usize>> = vec![None; 3 * num_cells];
    let mut across_constraint = vec![false; 3 * num_cells];
    let mut infinite_cells = Vec::new();

    // Seed queues: cells with a non-constraint boundary edge are exterior,
    // cells behind a boundary constraint start the opposite side.
    let mut same_side = Vec::new();
    let mut cross_side = Vec::new();

    for (i, cell) in cells.iter().enumerate() {
        for j in 0..3 {
            let p1 = cell[j];
            let p2 = cell[(j + 1) % 3];
            let constraint = triangulation.is_constraint(p1, p2);
            across_constraint[3 * i + j] = constraint;

            let neighbor = triangulation.opposite(p2, p1).and_then(|v| {
                let mut other = [p2, p1, v];
                rotate_smallest_first(&mut other);
                search::eq(&cells, |candidate| candidate.cmp(&other))
            });
            neighbors[3 * i + j] = neighbor;

            if neighbor.is_none() {
                if constraint {
                    cross_side.push(i);
                } else {
                    same_side.push(i);
                    labels[i] = 1;
                }
                if infinity {
                    infinite_cells.push([p2, p1, INFINITE_VERTEX]);
                }
            }
        }
    }

    // Alternating flood fill: drain the current side completely, then step
    // across the constraints found along the way with the sign flipped.
    let mut side: Label = 1;
    while !same_side.is_empty() || !cross_side.is_empty() {
        while let Some(cell) = same_side.pop() {
            if labels[cell] == -side {
                continue;
            }
            labels[cell] = side;
            for j in 0..3 {
                let Some(neighbor) = neighbors[3 * cell + j] else {
                    continue;
                };
                if labels[neighbor] != 0 {
                    continue;
                }
                if across_constraint[3 * cell + j] {
                    cross_side.push(neighbor);
                } else {
                    labels[neighbor] = side;
                    same_side.push(neighbor);
                }
            }
        }
        std::mem::swap(&mut same_side, &mut cross_side);
        cross_side.clear();
        side = -side;
    }

    Classification {
        cells,
        labels,
        infinite_cells,
    }
}

impl Classification {
    /// The cells matching `target` (0 selects everything), with the
    /// infinite pseudo-cells appended when `infinity` is set and the
    /// target includes the exterior.
    pub fn into_filtered(self, target: Label, infinity: bool) -> Vec<[usize; 3]> {
        let Classification {
            cells,
            labels,
            mut infinite_cells,
        } = self;

        let mut result = if target == 0 {
            cells
        } else {
            cells
                .into_iter()
                .zip(labels)
                .filter(|&(_, label)| label == target)
                .map(|(cell, _)| cell)
                .collect()
        };
        if infinity && target >= 0 {
            result.append(&mut infinite_cells);
        }
        result
    }
}

/// Convenience wrapper running classification and filtering in one step.
pub fn filter_triangulation(
    triangulation: &Triangulation,
    target: Label,
    infinity: bool,
) -> Vec<[usize; 3]> {
    classify(triangulation, infinity).into_filtered(target, infinity)
}

#[cfg(test)]
mod test {
    use super::{classify, filter_triangulation, rotate_smallest_first};
    use crate::delaunay_core::monotone::monotone_triangulation;
    use crate::delaunay_core::triangulation::Triangulation;
    use crate::point::Point2;
    use crate::INFINITE_VERTEX;

    fn build(points: &[Point2], mut constraints: Vec<[usize; 2]>) -> Triangulation {
        constraints.sort_unstable();
        let cells = monotone_triangulation(points, &constraints);
        let mut triangulation = Triangulation::new(points.len(), constraints);
        for [i, j, k] in cells {
            triangulation.add_triangle(i, j, k);
        }
        triangulation
    }

    fn unit_square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_rotate_preserves_cyclic_order() {
        let mut cell = [2, 0, 1];
        rotate_smallest_first(&mut cell);
        assert_eq!(cell, [0, 1, 2]);

        let mut cell = [1, 2, 0];
        rotate_smallest_first(&mut cell);
        assert_eq!(cell, [0, 1, 2]);

        let mut cell = [0, 2, 1];
        rotate_smallest_first(&mut cell);
        assert_eq!(cell, [0, 2, 1]);
    }

    #[test]
    fn test_constrained_square_interior() {
        let constraints = vec![[0, 1], [1, 2], [2, 3], [0, 3]];
        let triangulation = build(&unit_square(), constraints);
        let interior = filter_triangulation(&triangulation, -1, false);
        assert_eq!(interior.len(), 2);

        let exterior = filter_triangulation(&triangulation, 1, false);
        assert!(exterior.is_empty());
    }

    #[test]
    fn test_infinite_cells() {
        let constraints = vec![[0, 1], [1, 2], [2, 3], [0, 3]];
        let triangulation = build(&unit_square(), constraints);
        let exterior = filter_triangulation(&triangulation, 1, true);
        assert_eq!(exterior.len(), 4);
        for cell in &exterior {
            assert_eq!(cell[2], INFINITE_VERTEX);
        }

        let everything = filter_triangulation(&triangulation, 0, true);
        assert_eq!(everything.len(), 6);
    }

    #[test]
    fn test_unconstrained_cells_are_exterior() {
        let triangulation = build(&unit_square(), Vec::new());
        let classification = classify(&triangulation, false);
        assert!(classification.labels.iter().all(|&label| label == 1));
    }

    #[test]
    fn test_donut() {
        // An outer diamond ring with an inner diamond hole, both fully
        // constrained (diamonds, so that no ring edge is vertical). Labels
        // alternate: annulus interior, hole exterior.
        let points = vec![
            Point2::new(4.0, 0.0),
            Point2::new(8.0, 4.0),
            Point2::new(4.0, 8.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 2.0),
            Point2::new(6.0, 4.0),
            Point2::new(4.0, 6.0),
            Point2::new(2.0, 4.0),
        ];
        let constraints = vec![
            [0, 1],
            [1, 2],
            [2, 3],
            [0, 3],
            [4, 5],
            [5, 6],
            [6, 7],
            [4, 7],
        ];
        let mut triangulation = build(&points, constraints);
        crate::delaunay_core::refinement::refine(&points, &mut triangulation);

        let total = triangulation.cells().len();
        assert_eq!(total, 10);

        let interior = filter_triangulation(&triangulation, -1, false);
        let exterior = filter_triangulation(&triangulation, 1, false);
        assert_eq!(interior.len(), 8);
        assert_eq!(exterior.len(), 2);
        // The hole is triangulated from inner ring vertices only.
        for cell in &exterior {
            assert!(cell.iter().all(|&v| v >= 4));
        }
    }
}
