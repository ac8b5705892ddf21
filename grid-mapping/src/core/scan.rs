//! Laser scan input type.
//!
//! ## Angular Convention
//!
//! ```text
//!          0 (+X, sensor forward)
//!           ↑
//!           │
//!  π/2 (+Y) ├───────→ -π/2 (-Y)
//!           │
//!           ↓
//!          ±π
//! ```
//!
//! Beam `i` points along `angle_min + i * angle_increment` in the sensor
//! frame; the pose heading is added when the scan is inserted into a grid.

use serde::{Deserialize, Deserializer, Serialize};

/// A planar range scan with evenly spaced beams.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LaserScan {
    /// Angle of the first beam (radians).
    pub angle_min: f64,
    /// Angular step between consecutive beams (radians).
    pub angle_increment: f64,
    /// Readings closer than this are rejected.
    #[serde(default)]
    pub range_min: f64,
    /// Readings at or beyond this are "no return".
    pub range_max: f64,
    /// One reading per beam. May contain NaN, infinities, zeros and negatives.
    #[serde(deserialize_with = "deserialize_ranges")]
    pub ranges: Vec<f64>,
}

/// JSON writes non-finite floats as `null`; read them back as NaN.
fn deserialize_ranges<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let ranges: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
    Ok(ranges
        .into_iter()
        .map(|r| r.unwrap_or(f64::NAN))
        .collect())
}

impl LaserScan {
    /// Create a new scan.
    pub fn new(
        angle_min: f64,
        angle_increment: f64,
        range_min: f64,
        range_max: f64,
        ranges: Vec<f64>,
    ) -> Self {
        Self {
            angle_min,
            angle_increment,
            range_min,
            range_max,
            ranges,
        }
    }

    /// Number of beams.
    #[inline]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Is the scan empty?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Sensor-frame angle of beam `i`.
    #[inline]
    pub fn angle(&self, i: usize) -> f64 {
        self.angle_min + i as f64 * self.angle_increment
    }

    /// Sanitize a single reading.
    ///
    /// - `None`: unusable (NaN, non-positive, below `range_min`); the beam
    ///   contributes nothing.
    /// - `Some(range_max)`: no return (`+inf` or at/beyond `range_max`); the
    ///   beam is free space all the way out but never marks an obstacle.
    /// - `Some(range)`: a genuine obstacle return.
    #[inline]
    pub fn sanitize_range(&self, range: f64) -> Option<f64> {
        if range.is_nan() || range <= 0.0 || range < self.range_min {
            None
        } else if range >= self.range_max {
            Some(self.range_max)
        } else {
            Some(range)
        }
    }

    /// Sanitized readings, aligned 1:1 with the beams.
    pub fn sanitized_ranges(&self) -> Vec<Option<f64>> {
        self.ranges
            .iter()
            .map(|&r| self.sanitize_range(r))
            .collect()
    }

    /// `(angle, range)` pairs of usable beams, in beam order.
    pub fn usable_beams(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ranges
            .iter()
            .enumerate()
            .filter_map(|(i, &r)| self.sanitize_range(r).map(|r| (self.angle(i), r)))
    }

    /// Is this (sanitized) range an obstacle return rather than a no-return?
    #[inline]
    pub fn is_hit(&self, range: f64) -> bool {
        range > 0.0 && range < self.range_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scan(ranges: Vec<f64>) -> LaserScan {
        LaserScan::new(-1.0, 0.5, 0.1, 10.0, ranges)
    }

    #[test]
    fn test_beam_angles() {
        let s = scan(vec![1.0, 1.0, 1.0]);
        assert_relative_eq!(s.angle(0), -1.0);
        assert_relative_eq!(s.angle(2), 0.0);
    }

    #[test]
    fn test_sanitized_ranges_alignment() {
        let s = scan(vec![
            2.0,
            f64::NAN,
            -1.0,
            0.0,
            0.05,
            f64::INFINITY,
            12.0,
            10.0,
        ]);
        let ranges = s.sanitized_ranges();

        assert_eq!(ranges.len(), s.len());
        assert_eq!(ranges[0], Some(2.0));
        assert_eq!(ranges[1], None);
        assert_eq!(ranges[2], None);
        assert_eq!(ranges[3], None);
        assert_eq!(ranges[4], None);
        assert_eq!(ranges[5], Some(10.0));
        assert_eq!(ranges[6], Some(10.0));
        assert_eq!(ranges[7], Some(10.0));
    }

    #[test]
    fn test_no_return_is_not_hit() {
        let s = scan(vec![f64::INFINITY, 3.0]);
        let ranges = s.sanitized_ranges();
        assert!(!s.is_hit(ranges[0].unwrap()));
        assert!(s.is_hit(ranges[1].unwrap()));
    }

    #[test]
    fn test_usable_beams_keep_angles() {
        let s = scan(vec![f64::NAN, 2.0, 0.0, 4.0]);
        let beams: Vec<_> = s.usable_beams().collect();
        assert_eq!(beams.len(), 2);
        assert_relative_eq!(beams[0].0, -0.5);
        assert_relative_eq!(beams[1].0, 0.5);
        assert_relative_eq!(beams[1].1, 4.0);
    }
}
