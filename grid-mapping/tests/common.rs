//! Test utilities for grid mapping.
//!
//! Synthetic scans of an axis-aligned rectangular room and simple
//! trajectories through it.

#![allow(dead_code)]

use std::f64::consts::{FRAC_PI_2, PI};

use grid_mapping::{LaserScan, Pose2D};

/// Scan of an empty `room_width × room_height` room with its lower-left
/// corner at the world origin, taken from `(x, y)` with heading 0.
///
/// Beams start at -π and sweep a full circle.
pub fn room_scan(room_width: f64, room_height: f64, x: f64, y: f64, num_beams: usize) -> LaserScan {
    let angle_increment = 2.0 * PI / num_beams as f64;
    let range_max = 2.0 * (room_width * room_width + room_height * room_height).sqrt();

    let ranges = (0..num_beams)
        .map(|i| {
            let angle = -PI + i as f64 * angle_increment;
            room_range(room_width, room_height, x, y, angle).unwrap_or(f64::INFINITY)
        })
        .collect();

    LaserScan::new(-PI, angle_increment, 0.0, range_max, ranges)
}

/// Distance from `(x, y)` to the room wall along `angle`.
pub fn room_range(room_width: f64, room_height: f64, x: f64, y: f64, angle: f64) -> Option<f64> {
    let (sin_a, cos_a) = angle.sin_cos();
    let mut best: Option<f64> = None;
    let mut consider = |t: f64, on_wall: bool| {
        if t > 0.0 && on_wall && best.is_none_or(|b| t < b) {
            best = Some(t);
        }
    };

    if cos_a > 1e-12 {
        let t = (room_width - x) / cos_a;
        consider(t, (0.0..=room_height).contains(&(y + t * sin_a)));
    }
    if cos_a < -1e-12 {
        let t = -x / cos_a;
        consider(t, (0.0..=room_height).contains(&(y + t * sin_a)));
    }
    if sin_a > 1e-12 {
        let t = (room_height - y) / sin_a;
        consider(t, (0.0..=room_width).contains(&(x + t * cos_a)));
    }
    if sin_a < -1e-12 {
        let t = -y / sin_a;
        consider(t, (0.0..=room_width).contains(&(x + t * cos_a)));
    }

    best
}

/// Scan with a single beam along the sensor's +X axis.
pub fn single_beam(range: f64, range_max: f64) -> LaserScan {
    LaserScan::new(0.0, 0.0, 0.0, range_max, vec![range])
}

/// Straight-line trajectory along +X.
pub fn straight_trajectory(n: usize, spacing: f64) -> Vec<Pose2D> {
    (0..n)
        .map(|i| Pose2D::new(i as f64 * spacing, 0.0, 0.0))
        .collect()
}

/// Square loop trajectory starting at the origin, turning left at corners.
pub fn square_trajectory(side_length: f64, points_per_side: usize) -> Vec<Pose2D> {
    let spacing = side_length / points_per_side as f64;
    let mut poses = Vec::with_capacity(points_per_side * 4);

    for i in 0..points_per_side {
        poses.push(Pose2D::new(i as f64 * spacing, 0.0, 0.0));
    }
    for i in 0..points_per_side {
        poses.push(Pose2D::new(side_length, i as f64 * spacing, FRAC_PI_2));
    }
    for i in 0..points_per_side {
        poses.push(Pose2D::new(side_length - i as f64 * spacing, side_length, PI));
    }
    for i in 0..points_per_side {
        poses.push(Pose2D::new(0.0, side_length - i as f64 * spacing, -FRAC_PI_2));
    }

    poses
}
