//! Shared helpers for randomized tests.

use rand::distributions::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};

use crate::point::Point2;

pub const SEED: u64 = 0x0bad_5eed;

/// Uniformly distributed points in a square around the origin,
/// reproducible through the seed.
pub fn random_points_with_seed(size: usize, seed: u64) -> Vec<Point2> {
    let mut rng = StdRng::seed_from_u64(seed);
    let range = Uniform::new(-100.0, 100.0);
    (0..size)
        .map(|_| Point2::new(range.sample(&mut rng), range.sample(&mut rng)))
        .collect()
}

/// The area of the convex hull of `points` (Andrew's monotone chain plus
/// the shoelace formula).
pub fn convex_hull_area(points: &[Point2]) -> f64 {
    let mut sorted: Vec<Point2> = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    let cross = |o: Point2, a: Point2, b: Point2| -> f64 {
        (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
    };

    let half_hull = |iter: &mut dyn Iterator<Item = Point2>| -> Vec<Point2> {
        let mut chain: Vec<Point2> = Vec::new();
        for point in iter {
            while chain.len() >= 2
                && cross(chain[chain.len() - 2], chain[chain.len() - 1], point) <= 0.0
            {
                chain.pop();
            }
            chain.push(point);
        }
        chain
    };

    let mut lower = half_hull(&mut sorted.iter().copied());
    let mut upper = half_hull(&mut sorted.iter().rev().copied());
    lower.pop();
    upper.pop();
    lower.append(&mut upper);

    let hull = lower;
    let mut doubled = 0.0;
    for i in 0..hull.len() {
        let a = hull[i];
        let b = hull[(i + 1) % hull.len()];
        doubled += a.x * b.y - b.x * a.y;
    }
    doubled.abs() * 0.5
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_convex_hull_area() {
        let square = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
            // Interior points must not affect the hull.
            Point2::new(1.0, 1.0),
            Point2::new(0.5, 1.5),
        ];
        assert_relative_eq!(convex_hull_area(&square), 4.0);
    }

    #[test]
    fn test_random_points_are_reproducible() {
        assert_eq!(
            random_points_with_seed(10, SEED),
            random_points_with_seed(10, SEED)
        );
    }
}
