//! Laser scan tracing shared by the grid variants.
//!
//! Inserting a scan is a read phase followed by a write phase:
//!
//! 1. Grow the grid so the scan's bounding box (`position ± range_max`)
//!    fits. After this every beam endpoint is addressable.
//! 2. Trace every usable beam: all cells on the ray are free candidates and
//!    an obstacle return also records its endpoint cell as a hit.
//! 3. The variant resolves free vs. occupied (occupied wins) and applies
//!    each cell's log-odds change once.
//!
//! Steps 1 and 2 live here; step 3 is per variant because the occupied
//! bookkeeping differs (per cell vs. per cell and heading layer).

use std::collections::HashSet;

use log::{trace, warn};

use crate::core::{LaserScan, Point, Pose2D};

use super::GridLayout;
use super::base::GridBase;
use super::raycaster::ray_cast;

/// Statistics about a single scan insertion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanUpdate {
    /// Beams that survived sanitizing and were traced.
    pub beams_used: usize,
    /// Cell values decremented as free.
    pub free_updates: usize,
    /// Cell values incremented as occupied.
    pub occupied_updates: usize,
}

impl ScanUpdate {
    /// Total cell values changed.
    pub fn cells_updated(&self) -> usize {
        self.free_updates + self.occupied_updates
    }

    /// Accumulate another result into this one.
    pub fn merge(&mut self, other: &ScanUpdate) {
        self.beams_used += other.beams_used;
        self.free_updates += other.free_updates;
        self.occupied_updates += other.occupied_updates;
    }
}

/// Cells touched by one scan, before any update is applied.
#[derive(Debug, Default)]
pub(crate) struct ScanTrace {
    /// Every cell any beam passed through, endpoints included.
    pub free: HashSet<usize>,
    /// `(cell, world beam angle)` for each obstacle return, in beam order.
    pub hits: Vec<(usize, f64)>,
    pub beams_used: usize,
}

/// Axis-aligned box around everything the scan can reach.
pub(crate) fn scan_bounds(scan: &LaserScan, pose: Pose2D) -> (Point, Point) {
    let position = pose.position();
    (position - scan.range_max, position + scan.range_max)
}

/// Expand `grid` until the scan's bounding box fits.
///
/// Returns `false` without touching the grid when some beam endpoint would
/// not be finite: a non-finite pose or beam angle, or a `range_max` that is
/// not a positive number.
pub(crate) fn fit_scan<G: GridLayout + ?Sized>(grid: &mut G, scan: &LaserScan, pose: Pose2D) -> bool {
    if !(scan.range_max > 0.0 && scan.range_max.is_finite() && pose.x.is_finite() && pose.y.is_finite()) {
        warn!(
            "Skipping scan with range_max {} at pose ({}, {})",
            scan.range_max, pose.x, pose.y
        );
        return false;
    }
    if !(pose.theta.is_finite() && scan.angle_min.is_finite() && scan.angle_increment.is_finite()) {
        warn!(
            "Skipping scan with heading {}, angle_min {}, angle_increment {}",
            pose.theta, scan.angle_min, scan.angle_increment
        );
        return false;
    }

    let (bbx_min, bbx_max) = scan_bounds(scan, pose);
    let base = grid.base();
    if !base.in_bounds(bbx_min) || !base.in_bounds(bbx_max) {
        grid.expand_map(bbx_min, bbx_max);
    }
    true
}

/// Trace all usable beams of `scan` fired from `pose`.
///
/// The grid must already contain the scan's bounding box.
pub(crate) fn trace_scan(base: &GridBase, scan: &LaserScan, pose: Pose2D) -> ScanTrace {
    let origin = pose.position();
    let mut result = ScanTrace::default();

    for (beam_angle, range) in scan.usable_beams() {
        let angle = pose.theta + beam_angle;
        let ray_end = origin + range * Point::from_angle(angle);

        if scan.is_hit(range) {
            result.hits.push((base.position_to_index(ray_end), angle));
        }
        result.free.extend(ray_cast(base, origin, ray_end));
        result.beams_used += 1;
    }

    if result.beams_used == 0 && !scan.is_empty() {
        warn!("Scan of {} beams had no usable ranges", scan.len());
    }
    trace!(
        "Traced {} beams: {} ray cells, {} hits",
        result.beams_used,
        result.free.len(),
        result.hits.len()
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;

    #[test]
    fn test_scan_bounds() {
        let scan = LaserScan::new(0.0, 0.1, 0.0, 4.0, vec![1.0]);
        let (min, max) = scan_bounds(&scan, Pose2D::new(1.0, -1.0, 2.0));
        assert_eq!(min, Point::new(-3.0, -5.0));
        assert_eq!(max, Point::new(5.0, 3.0));
    }

    #[test]
    fn test_fit_scan_expands() {
        let mut grid: Grid<f64> = Grid::new(Point::ZERO, 0.5, 2, 2);
        let scan = LaserScan::new(0.0, 0.1, 0.0, 3.0, vec![1.0]);
        let pose = Pose2D::new(0.5, 0.5, 0.0);
        assert!(fit_scan(&mut grid, &scan, pose));

        let (min, max) = scan_bounds(&scan, pose);
        assert!(grid.base().in_bounds(min));
        assert!(grid.base().in_bounds(max));
    }

    #[test]
    fn test_fit_scan_rejects_unbounded_scan() {
        let mut grid: Grid<f64> = Grid::new(Point::ZERO, 0.5, 2, 2);
        let before = grid.clone();
        let scan = LaserScan::new(0.0, 0.1, 0.0, f64::INFINITY, vec![1.0]);

        assert!(!fit_scan(&mut grid, &scan, Pose2D::default()));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_fit_scan_rejects_non_finite_angles() {
        let mut grid: Grid<f64> = Grid::new(Point::ZERO, 0.5, 2, 2);
        let before = grid.clone();
        let scan = LaserScan::new(0.0, 0.1, 0.0, 3.0, vec![1.0]);

        assert!(!fit_scan(&mut grid, &scan, Pose2D::new(0.5, 0.5, f64::NAN)));
        let scan = LaserScan::new(f64::INFINITY, 0.1, 0.0, 3.0, vec![1.0]);
        assert!(!fit_scan(&mut grid, &scan, Pose2D::new(0.5, 0.5, 0.0)));
        let scan = LaserScan::new(0.0, f64::NAN, 0.0, 3.0, vec![1.0]);
        assert!(!fit_scan(&mut grid, &scan, Pose2D::new(0.5, 0.5, 0.0)));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_trace_skips_unusable_beams() {
        let base = GridBase::new(Point::new(-5.0, -5.0), 1.0, 11, 11);
        let scan = LaserScan::new(0.0, 0.0, 0.0, 4.0, vec![f64::NAN, 0.0, -1.0]);
        let trace = trace_scan(&base, &scan, Pose2D::default());

        assert_eq!(trace.beams_used, 0);
        assert!(trace.free.is_empty());
        assert!(trace.hits.is_empty());
    }

    #[test]
    fn test_trace_no_return_is_free_only() {
        let base = GridBase::new(Point::new(-5.0, -5.0), 1.0, 11, 11);
        let scan = LaserScan::new(0.0, 0.0, 0.0, 3.0, vec![f64::INFINITY]);
        let trace = trace_scan(&base, &scan, Pose2D::new(0.5, 0.5, 0.0));

        assert_eq!(trace.beams_used, 1);
        assert!(trace.hits.is_empty());
        // (0.5, 0.5) → (3.5, 0.5): four cells, endpoint included
        assert_eq!(trace.free.len(), 4);
    }
}
