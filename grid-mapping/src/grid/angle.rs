//! Angle-binned occupancy grid.
//!
//! Like [`OccGrid`](super::OccGrid), but every cell keeps one log-odds value
//! per incidence-heading bin. A thin wall seen from one side does not erase
//! evidence gathered from the other side.
//!
//! Bins partition the full circle starting at -π:
//!
//! ```text
//! bins[i] = -π + i · 2π / layers
//! ```
//!
//! A beam with world angle `a` hits a surface from heading `a + π`; that
//! heading (wrapped into (-π, π]) falls into the largest bin not above it.
//! Storage is layer-major, so layer `k` is a contiguous row-major slice.

use std::collections::{HashMap, HashSet};
use std::f64::consts::PI;
use std::fmt;

use crate::core::{LaserScan, Point, Pose2D, normalize_angle};
use crate::error::{GridError, Result};
use crate::io::GridSnapshot;

use super::GridLayout;
use super::base::GridBase;
use super::config::LogOddsConfig;
use super::scan_update::{self, ScanUpdate};
use super::storage::{Grid, write_header, write_rows};

/// Occupancy grid with per-heading log-odds layers.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleGrid {
    grid: Grid<f64>,
    bins: Vec<f64>,
    log_odds: LogOddsConfig,
}

impl AngleGrid {
    /// Create an all-unknown grid with `layers` heading bins.
    ///
    /// # Panics
    /// If `layers` is zero.
    pub fn new(origin: Point, resolution: f64, width: usize, height: usize, layers: usize) -> Self {
        Self::with_config(origin, resolution, width, height, layers, LogOddsConfig::default())
    }

    /// Create an all-unknown grid with custom log-odds increments.
    pub fn with_config(
        origin: Point,
        resolution: f64,
        width: usize,
        height: usize,
        layers: usize,
        log_odds: LogOddsConfig,
    ) -> Self {
        Self::from_grid(
            Grid::with_layers(origin, resolution, width, height, layers),
            log_odds,
        )
    }

    fn from_grid(grid: Grid<f64>, log_odds: LogOddsConfig) -> Self {
        Self {
            bins: bin_edges(grid.layers()),
            grid,
            log_odds,
        }
    }

    /// Rehydrate from a snapshot; the layer count is `cells / (width · height)`.
    pub fn from_snapshot(snapshot: &GridSnapshot, log_odds: LogOddsConfig) -> Result<Self> {
        let base = snapshot.base()?;
        let layer_size = base.cell_count();
        let cells = snapshot.cells.len();
        if cells == 0 || cells % layer_size != 0 {
            return Err(GridError::SnapshotSize {
                expected: layer_size * (cells / layer_size).max(1),
                actual: cells,
            });
        }
        let grid = Grid::from_layers(base, cells / layer_size, snapshot.cells.clone());
        Ok(Self::from_grid(grid, log_odds))
    }

    /// Capture geometry and all layers.
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.grid.base(), self.grid.data().to_vec())
    }

    /// Number of heading bins.
    #[inline]
    pub fn layers(&self) -> usize {
        self.grid.layers()
    }

    /// Lower edge of each heading bin, ascending from -π.
    #[inline]
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// Log-odds increments used by [`insert_scan`](Self::insert_scan).
    #[inline]
    pub fn log_odds_config(&self) -> &LogOddsConfig {
        &self.log_odds
    }

    /// Underlying layered cell storage.
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

    /// All layers, layer-major.
    #[inline]
    pub fn data(&self) -> &[f64] {
        self.grid.data()
    }

    /// Row-major log-odds of one heading bin.
    ///
    /// # Panics
    /// If `layer >= self.layers()`.
    #[inline]
    pub fn layer(&self, layer: usize) -> &[f64] {
        self.grid.layer(layer)
    }

    /// Log-odds at a world point in one layer, `None` outside the grid.
    #[inline]
    pub fn value_at(&self, p: Point, layer: usize) -> Option<f64> {
        self.grid.layer_value_at(p, layer)
    }

    /// Heading bin for a beam travelling at world angle `angle`.
    pub fn angle_index(&self, angle: f64) -> usize {
        let incidence = normalize_angle(angle + PI);
        // incidence > -π = bins[0], so the partition point is at least 1
        self.bins
            .partition_point(|&edge| edge <= incidence)
            .saturating_sub(1)
    }

    /// Fold one scan taken at `pose` into the grid.
    ///
    /// Free evidence goes to every layer of each traversed cell. An obstacle
    /// return goes to the layer of its incidence heading only, and suppresses
    /// the free update of that one `(cell, layer)` pair. When several beams
    /// end in the same cell, the first one decides the layer.
    pub fn insert_scan(&mut self, scan: &LaserScan, pose: Pose2D) -> ScanUpdate {
        if !scan_update::fit_scan(self, scan, pose) {
            return ScanUpdate::default();
        }
        let trace = scan_update::trace_scan(self.grid.base(), scan, pose);

        let mut occupied: HashMap<usize, usize> = HashMap::with_capacity(trace.hits.len());
        for &(cell, angle) in &trace.hits {
            occupied
                .entry(cell)
                .or_insert_with(|| self.angle_index(angle));
        }

        let layer_size = self.grid.base().cell_count();
        let layers = self.layers();
        let mut free: HashSet<usize> = trace
            .free
            .iter()
            .flat_map(|&cell| (0..layers).map(move |layer| cell + layer * layer_size))
            .collect();
        for (&cell, &layer) in &occupied {
            free.remove(&(cell + layer * layer_size));
        }

        let log_odds = self.log_odds;
        let data = self.grid.data_mut();
        for &i in &free {
            data[i] -= log_odds.free;
        }
        for (&cell, &layer) in &occupied {
            data[cell + layer * layer_size] += log_odds.occupied;
        }

        ScanUpdate {
            beams_used: trace.beams_used,
            free_updates: free.len(),
            occupied_updates: occupied.len(),
        }
    }
}

fn bin_edges(layers: usize) -> Vec<f64> {
    let step = 2.0 * PI / layers as f64;
    (0..layers).map(|i| -PI + i as f64 * step).collect()
}

impl GridLayout for AngleGrid {
    fn base(&self) -> &GridBase {
        self.grid.base()
    }

    /// # Panics
    /// If the layer counts differ.
    fn merge(&mut self, other: &Self) {
        self.grid.merge(&other.grid);
    }

    fn resize(&mut self, origin: Point, width: usize, height: usize) {
        self.grid.resize(origin, width, height);
    }
}

impl fmt::Display for AngleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let base = self.grid.base();
        write_header(f, base)?;
        writeln!(f, "  layers: {}", self.layers())?;
        for layer in 0..self.layers() {
            writeln!(f, "layer {}:", layer)?;
            write_rows(f, base.width(), self.layer(layer))?;
        }
        Ok(())
    }
}
