//! # grid_mapping
//!
//! 2D occupancy mapping from range scans with known poses.
//!
//! ## Overview
//!
//! Each scan is ray cast into a growable grid of log-odds values. Cells a
//! beam passes through collect free evidence, the cell it ends in collects
//! occupied evidence. Two grid variants share the same geometry and update
//! rule:
//!
//! - [`OccGrid`]: one log-odds value per cell
//! - [`AngleGrid`]: one log-odds value per cell and incidence-heading bin,
//!   so a surface seen from one side keeps its evidence when the other side
//!   is observed as free
//!
//! Grids start small and grow to fit each scan's reach; existing values
//! keep their world position across every resize.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use grid_mapping::{AngleGrid, LaserScan, Point, Pose2D};
//!
//! let mut grid = AngleGrid::new(Point::ZERO, 0.05, 1, 1, 8);
//! let scan = LaserScan::new(-1.57, 0.01, 0.15, 8.0, ranges);
//! let result = grid.insert_scan(&scan, Pose2D::new(0.0, 0.0, 0.0));
//!
//! println!("Used {} beams", result.beams_used);
//! ```
//!
//! ## Coordinate System
//!
//! Uses ROS REP-103 convention:
//! - X: Forward (positive ahead of the sensor)
//! - Y: Left
//! - Theta: Rotation in radians, CCW positive from +X axis

#![warn(missing_docs)]

// Core types
pub mod core;

// Grid geometry, storage and scan insertion
pub mod grid;

// TOML configuration
pub mod config;

// Snapshots and recorded sessions
pub mod io;

// Error types
pub mod error;

// Re-export commonly used types
pub use core::{GridCoord, LaserScan, Point, Pose2D, normalize_angle};

pub use grid::{
    AngleGrid, GridBase, GridKind, GridLayout, LogOddsConfig, OccGrid, OccupancyMap, ScanUpdate,
};

pub use config::{ConfigLoadError, MappingConfig};

pub use error::{GridError, Result};

pub use io::{GridSnapshot, ScanRecord, Session};
