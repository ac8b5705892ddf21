//! Grid snapshots.
//!
//! A snapshot is the minimum needed to rebuild a grid: geometry plus the
//! raw log-odds cells. Layered grids store their layers back to back, so
//! the layer count is `cells.len() / (width * height)`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::error::{GridError, Result};
use crate::grid::GridBase;

/// Serializable grid geometry and cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// World position of the lower-left corner of cell (0, 0)
    pub origin: Point,
    /// Meters per cell
    pub resolution: f64,
    /// Width in cells
    pub width: usize,
    /// Height in cells
    pub height: usize,
    /// Log-odds values, row-major, layer-major for layered grids
    pub cells: Vec<f64>,
}

impl GridSnapshot {
    /// Capture `cells` laid out on `base`.
    pub fn new(base: &GridBase, cells: Vec<f64>) -> Self {
        Self {
            origin: base.origin(),
            resolution: base.resolution(),
            width: base.width(),
            height: base.height(),
            cells,
        }
    }

    /// Validated geometry of the snapshot.
    pub fn base(&self) -> Result<GridBase> {
        if !(self.resolution > 0.0 && self.resolution.is_finite()) {
            return Err(GridError::InvalidGeometry(format!(
                "resolution must be positive, got {}",
                self.resolution
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(GridError::InvalidGeometry(format!(
                "empty grid {}x{}",
                self.width, self.height
            )));
        }
        if self.width.checked_mul(self.height).is_none() {
            return Err(GridError::InvalidGeometry(format!(
                "grid {}x{} has too many cells",
                self.width, self.height
            )));
        }
        if !(self.origin.x.is_finite() && self.origin.y.is_finite()) {
            return Err(GridError::InvalidGeometry(format!(
                "non-finite origin {}",
                self.origin
            )));
        }
        let base = GridBase::new(self.origin, self.resolution, self.width, self.height);
        let top = base.top_corner();
        if !(top.x.is_finite() && top.y.is_finite()) {
            return Err(GridError::InvalidGeometry(format!(
                "grid extent overflows at {}",
                top
            )));
        }
        Ok(base)
    }
}

/// Write a snapshot as JSON.
pub fn save(snapshot: &GridSnapshot, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, snapshot)?;
    writer.flush()?;

    info!(
        "Saved {}x{} grid ({} cells) to {}",
        snapshot.width,
        snapshot.height,
        snapshot.cells.len(),
        path.display()
    );
    Ok(())
}

/// Read a snapshot written by [`save`].
pub fn load(path: &Path) -> Result<GridSnapshot> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: GridSnapshot = serde_json::from_reader(reader)?;

    info!(
        "Loaded {}x{} grid ({} cells) from {}",
        snapshot.width,
        snapshot.height,
        snapshot.cells.len(),
        path.display()
    );
    Ok(snapshot)
}
