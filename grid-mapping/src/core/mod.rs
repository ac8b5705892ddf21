//! Core value types for the grid engine.
//!
//! All types follow the ROS REP-103 coordinate convention:
//! - **X-axis**: Forward
//! - **Y-axis**: Left
//! - **Theta**: Counter-clockwise rotation from +X axis (radians)
//!
//! ## Type Categories
//!
//! ### Coordinates
//! - [`Point`]: Floating-point world coordinates in meters
//! - [`GridCoord`]: Signed cell (column, row) coordinates
//!
//! ### Sensor Input
//! - [`Pose2D`]: Sensor position (x, y) and heading (theta)
//! - [`LaserScan`]: Evenly spaced range readings, with the range sanitizer

mod point;
mod pose;
mod scan;

pub use point::{GridCoord, Point};
pub use pose::{Pose2D, normalize_angle};
pub use scan::LaserScan;
