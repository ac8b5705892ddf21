//! Grid configuration section.

use serde::{Deserialize, Serialize};

use crate::core::Point;
use crate::grid::GridKind;

use super::defaults;

/// Grid configuration section
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Cell resolution (meters)
    #[serde(default = "defaults::resolution")]
    pub resolution: f64,

    /// Origin X (lower-left corner of cell (0, 0))
    #[serde(default)]
    pub origin_x: f64,

    /// Origin Y
    #[serde(default)]
    pub origin_y: f64,

    /// Initial grid width (cells); the grid grows as scans arrive
    #[serde(default = "defaults::grid_size")]
    pub width: usize,

    /// Initial grid height (cells)
    #[serde(default = "defaults::grid_size")]
    pub height: usize,

    /// Grid variant: "occupancy" or "angle"
    #[serde(default = "defaults::kind")]
    pub kind: GridKind,

    /// Heading bins per cell, used when `kind = "angle"`
    #[serde(default = "defaults::layers")]
    pub layers: usize,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            resolution: defaults::resolution(),
            origin_x: 0.0,
            origin_y: 0.0,
            width: defaults::grid_size(),
            height: defaults::grid_size(),
            kind: defaults::kind(),
            layers: defaults::layers(),
        }
    }
}

impl GridSection {
    /// World position of cell (0, 0).
    pub fn origin(&self) -> Point {
        Point::new(self.origin_x, self.origin_y)
    }
}
