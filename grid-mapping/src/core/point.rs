//! World and grid coordinate types.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// A point in world coordinates (meters).
///
/// Besides vector arithmetic, a point can be shifted on both axes by a
/// scalar, which is how a scan's bounding box is built from the sensor
/// position and its maximum range:
///
/// ```text
/// bbx_min = position - range_max
/// bbx_max = position + range_max
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// The world origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, CCW from +X).
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<f64> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: f64) -> Point {
        Point::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub<f64> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: f64) -> Point {
        Point::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Point> for f64 {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Point) -> Point {
        rhs * self
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Signed cell coordinate: `x` is the column, `y` the row.
///
/// Signed so that cells can be reasoned about before a bounds check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GridCoord {
    /// Column
    pub x: i64,
    /// Row
    pub y: i64,
}

impl GridCoord {
    /// Create a new grid coordinate.
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

impl Add for GridCoord {
    type Output = GridCoord;

    #[inline]
    fn add(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(1.0, 2.0);
        let q = Point::new(0.5, -1.0);

        assert_eq!(p + q, Point::new(1.5, 1.0));
        assert_eq!(p - q, Point::new(0.5, 3.0));
        assert_eq!(p * 2.0, Point::new(2.0, 4.0));
        assert_eq!(2.0 * p, Point::new(2.0, 4.0));
        assert_eq!(-p, Point::new(-1.0, -2.0));
    }

    #[test]
    fn test_scalar_radius_shift() {
        let center = Point::new(3.0, -1.0);
        assert_eq!(center - 2.0, Point::new(1.0, -3.0));
        assert_eq!(center + 2.0, Point::new(5.0, 1.0));
    }

    #[test]
    fn test_from_angle() {
        let up = Point::from_angle(std::f64::consts::FRAC_PI_2);
        assert_relative_eq!(up.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(up.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_distance() {
        assert_relative_eq!(Point::ZERO.distance(&Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }
}
