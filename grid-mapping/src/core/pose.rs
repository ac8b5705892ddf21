//! Sensor pose and angle helpers.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use super::point::Point;

/// Sensor pose in the world frame.
///
/// Poses are given alongside each scan; nothing in this crate estimates them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose2D {
    /// X position (meters)
    pub x: f64,
    /// Y position (meters)
    pub y: f64,
    /// Heading (radians, CCW from +X)
    pub theta: f64,
}

impl Pose2D {
    /// Create a new pose.
    #[inline]
    pub const fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    /// Position part of the pose.
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Wrap an angle into `(-π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalize_angle_range() {
        assert_relative_eq!(normalize_angle(0.0), 0.0);
        assert_relative_eq!(normalize_angle(PI), PI);
        assert_relative_eq!(normalize_angle(-PI), PI);
        assert_relative_eq!(normalize_angle(1.5 * PI), -0.5 * PI, epsilon = 1e-12);
        assert_relative_eq!(normalize_angle(-1.5 * PI), 0.5 * PI, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_many_turns() {
        for k in -5..=5 {
            let a = 0.3 + k as f64 * 2.0 * PI;
            assert_relative_eq!(normalize_angle(a), 0.3, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_position() {
        let pose = Pose2D::new(1.0, -2.0, 0.5);
        assert_eq!(pose.position(), Point::new(1.0, -2.0));
    }
}
