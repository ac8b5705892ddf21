//! Log-odds occupancy grid.
//!
//! Each cell holds accumulated log-odds (0.0 = unknown, positive favors
//! occupied, negative favors free). A scan applies at most one change per
//! cell: `-free` for cells beams passed through, `+occupied` for cells a
//! beam terminated in. Occupied evidence wins when a cell is both.

use std::collections::HashSet;
use std::fmt;

use crate::core::{LaserScan, Point, Pose2D};
use crate::error::{GridError, Result};
use crate::io::GridSnapshot;

use super::base::GridBase;
use super::config::{LogOddsConfig, log_odds_to_probability};
use super::raycaster;
use super::scan_update::{self, ScanUpdate};
use super::storage::Grid;
use super::GridLayout;

/// 2D occupancy grid of log-odds values.
#[derive(Clone, Debug, PartialEq)]
pub struct OccGrid {
    grid: Grid<f64>,
    log_odds: LogOddsConfig,
}

impl OccGrid {
    /// Create an all-unknown grid with default log-odds increments.
    pub fn new(origin: Point, resolution: f64, width: usize, height: usize) -> Self {
        Self::with_config(origin, resolution, width, height, LogOddsConfig::default())
    }

    /// Create an all-unknown grid with custom log-odds increments.
    pub fn with_config(
        origin: Point,
        resolution: f64,
        width: usize,
        height: usize,
        log_odds: LogOddsConfig,
    ) -> Self {
        Self {
            grid: Grid::new(origin, resolution, width, height),
            log_odds,
        }
    }

    /// Rehydrate a grid from a prior snapshot without replaying scans.
    pub fn from_snapshot(snapshot: &GridSnapshot, log_odds: LogOddsConfig) -> Result<Self> {
        let base = snapshot.base()?;
        if snapshot.cells.len() != base.cell_count() {
            return Err(GridError::SnapshotSize {
                expected: base.cell_count(),
                actual: snapshot.cells.len(),
            });
        }
        Ok(Self {
            grid: Grid::from_data(base, snapshot.cells.clone()),
            log_odds,
        })
    }

    /// Capture geometry and cells.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.grid.base(), self.grid.data().to_vec())
    }

    /// Log-odds increments used by [`insert_scan`](Self::insert_scan).
    #[inline]
    pub fn log_odds_config(&self) -> &LogOddsConfig {
        &self.log_odds
    }

    /// Underlying cell storage.
    #[inline]
    pub fn grid(&self) -> &Grid<f64> {
        &self.grid
    }

    /// World coordinates of cell (0, 0).
    #[inline]
    pub fn origin(&self) -> Point {
        self.grid.base().origin()
    }

    /// Resolution in world units per cell.
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.grid.base().resolution()
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.grid.base().width()
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.grid.base().height()
    }

    /// Raw log-odds, row-major.
    #[inline]
    pub fn data(&self) -> &[f64] {
        self.grid.data()
    }

    /// Log-odds at a world point, `None` outside the grid.
    #[inline]
    pub fn value_at(&self, p: Point) -> Option<f64> {
        self.grid.value_at(p)
    }

    /// Occupancy probability for every cell, row-major.
    pub fn probabilities(&self) -> Vec<f64> {
        self.grid
            .data()
            .iter()
            .map(|&l| log_odds_to_probability(l))
            .collect()
    }

    /// Linear indices of the cells on the segment `from → to`.
    pub fn ray_cast(&self, from: Point, to: Point) -> Vec<usize> {
        raycaster::ray_cast(self.grid.base(), from, to)
    }

    /// Fold one scan taken at `pose` into the grid.
    ///
    /// Grows the grid first if the scan could reach outside it.
    pub fn insert_scan(&mut self, scan: &LaserScan, pose: Pose2D) -> ScanUpdate {
        if !scan_update::fit_scan(self, scan, pose) {
            return ScanUpdate::default();
        }
        let trace = scan_update::trace_scan(self.grid.base(), scan, pose);

        let occupied: HashSet<usize> = trace.hits.iter().map(|&(cell, _)| cell).collect();
        let log_odds = self.log_odds;
        let data = self.grid.data_mut();

        let mut result = ScanUpdate {
            beams_used: trace.beams_used,
            ..Default::default()
        };
        for &cell in trace.free.difference(&occupied) {
            data[cell] -= log_odds.free;
            result.free_updates += 1;
        }
        for &cell in &occupied {
            data[cell] += log_odds.occupied;
            result.occupied_updates += 1;
        }

        result
    }
}

impl GridLayout for OccGrid {
    fn base(&self) -> &GridBase {
        self.grid.base()
    }

    fn merge(&mut self, other: &Self) {
        self.grid.merge(&other.grid);
    }

    fn resize(&mut self, origin: Point, width: usize, height: usize) {
        self.grid.resize(origin, width, height);
    }
}

impl fmt::Display for OccGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.grid, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::config::{LOG_ODDS_FREE, LOG_ODDS_OCCUPIED};
    use approx::assert_relative_eq;

    fn single_beam(range: f64, range_max: f64) -> LaserScan {
        LaserScan::new(0.0, 0.0, 0.0, range_max, vec![range])
    }

    #[test]
    fn test_single_beam_hit() {
        let mut grid = OccGrid::new(Point::new(-10.0, -10.0), 1.0, 20, 20);
        let result = grid.insert_scan(&single_beam(5.0, 8.0), Pose2D::new(0.5, 0.5, 0.0));

        assert_eq!(result.beams_used, 1);
        assert_eq!(result.occupied_updates, 1);
        assert_eq!(result.free_updates, 5);
        assert_relative_eq!(grid.value_at(Point::new(5.5, 0.5)).unwrap(), LOG_ODDS_OCCUPIED);
        for x in 0..5 {
            let p = Point::new(x as f64 + 0.5, 0.5);
            assert_relative_eq!(grid.value_at(p).unwrap(), -LOG_ODDS_FREE);
        }
        assert_relative_eq!(grid.value_at(Point::new(6.5, 0.5)).unwrap(), 0.0);
    }

    #[test]
    fn test_max_range_marks_no_obstacle() {
        let mut grid = OccGrid::new(Point::new(-10.0, -10.0), 1.0, 20, 20);
        let result = grid.insert_scan(&single_beam(f64::INFINITY, 3.0), Pose2D::new(0.5, 0.5, 0.0));

        assert_eq!(result.occupied_updates, 0);
        assert!(grid.data().iter().all(|&v| v <= 0.0));
        assert_relative_eq!(grid.value_at(Point::new(3.5, 0.5)).unwrap(), -LOG_ODDS_FREE);
    }

    #[test]
    fn test_each_cell_updated_once_per_scan() {
        let mut grid = OccGrid::new(Point::new(-10.0, -10.0), 1.0, 20, 20);
        // Three identical beams
        let scan = LaserScan::new(0.0, 0.0, 0.0, 8.0, vec![4.0, 4.0, 4.0]);
        grid.insert_scan(&scan, Pose2D::new(0.5, 0.5, 0.0));

        assert_relative_eq!(grid.value_at(Point::new(2.5, 0.5)).unwrap(), -LOG_ODDS_FREE);
        assert_relative_eq!(grid.value_at(Point::new(4.5, 0.5)).unwrap(), LOG_ODDS_OCCUPIED);
    }

    #[test]
    fn test_custom_log_odds() {
        let config = LogOddsConfig {
            free: 0.25,
            occupied: 2.0,
        };
        let mut grid = OccGrid::with_config(Point::new(-5.0, -5.0), 1.0, 10, 10, config);
        grid.insert_scan(&single_beam(2.0, 4.0), Pose2D::new(0.5, 0.5, 0.0));

        assert_relative_eq!(grid.value_at(Point::new(2.5, 0.5)).unwrap(), 2.0);
        assert_relative_eq!(grid.value_at(Point::new(1.5, 0.5)).unwrap(), -0.25);
    }

    #[test]
    fn test_insert_grows_grid() {
        let mut grid = OccGrid::new(Point::ZERO, 0.1, 1, 1);
        grid.insert_scan(&single_beam(2.0, 5.0), Pose2D::new(0.05, 0.05, 0.0));

        assert!(grid.base().in_bounds(Point::new(-4.95, -4.95)));
        assert!(grid.base().in_bounds(Point::new(5.05, 5.05)));
        assert!(grid.value_at(Point::new(2.05, 0.05)).unwrap() > 0.0);
    }

    #[test]
    fn test_nan_heading_leaves_grid_untouched() {
        let mut grid = OccGrid::new(Point::new(-5.0, -5.0), 1.0, 10, 10);
        let result = grid.insert_scan(&single_beam(2.0, 4.0), Pose2D::new(0.5, 0.5, f64::NAN));

        assert_eq!(result, ScanUpdate::default());
        assert!(grid.data().iter().all(|&v| v == 0.0));
        assert_eq!(grid.value_at(Point::new(-4.5, -4.5)), Some(0.0));
    }

    #[test]
    fn test_probabilities() {
        let mut grid = OccGrid::new(Point::new(-5.0, -5.0), 1.0, 10, 10);
        grid.insert_scan(&single_beam(2.0, 4.0), Pose2D::new(0.5, 0.5, 0.0));
        let probs = grid.probabilities();

        let hit = grid.base().position_to_index(Point::new(2.5, 0.5));
        let free = grid.base().position_to_index(Point::new(1.5, 0.5));
        let unknown = grid.base().position_to_index(Point::new(-3.5, -3.5));
        assert_relative_eq!(probs[hit], 0.8, epsilon = 1e-3);
        assert_relative_eq!(probs[free], 0.4, epsilon = 1e-3);
        assert_relative_eq!(probs[unknown], 0.5);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut grid = OccGrid::new(Point::new(-5.0, -5.0), 0.5, 20, 20);
        grid.insert_scan(&single_beam(3.0, 4.0), Pose2D::new(0.0, 0.0, 1.0));

        let restored = OccGrid::from_snapshot(&grid.snapshot(), LogOddsConfig::default()).unwrap();
        assert_eq!(restored, grid);
    }

    #[test]
    fn test_snapshot_size_mismatch() {
        let mut snapshot = OccGrid::new(Point::ZERO, 1.0, 3, 3).snapshot();
        snapshot.cells.pop();

        let err = OccGrid::from_snapshot(&snapshot, LogOddsConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GridError::SnapshotSize {
                expected: 9,
                actual: 8
            }
        ));
    }
}
