/// A two-dimensional point with double precision coordinates.
///
/// Coordinates are used as-is; the triangulation works on IEEE-754 doubles
/// and never rounds or snaps its input.
///
/// # Example
/// ```
/// use trellis::Point2;
///
/// let p = Point2::new(1.0, 2.0);
/// assert_eq!(p.x, 1.0);
/// assert_eq!(p.y, 2.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    /// The point's x coordinate
    pub x: f64,
    /// The point's y coordinate
    pub y: f64,
}

impl Point2 {
    /// Creates a new point from its coordinates.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point2 { x, y }
    }
}

impl From<[f64; 2]> for Point2 {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Point2::new(x, y)
    }
}

impl From<(f64, f64)> for Point2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point2::new(x, y)
    }
}

impl From<Point2> for [f64; 2] {
    #[inline]
    fn from(point: Point2) -> Self {
        [point.x, point.y]
    }
}
