//! Runtime choice between the two grid variants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::MappingConfig;
use crate::core::{LaserScan, Point, Pose2D};
use crate::error::Result;
use crate::io::GridSnapshot;

use super::GridLayout;
use super::angle::AngleGrid;
use super::base::GridBase;
use super::config::LogOddsConfig;
use super::occupancy::OccGrid;
use super::scan_update::ScanUpdate;

/// Grid variant selector, as written in configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridKind {
    /// [`OccGrid`]
    Occupancy,
    /// [`AngleGrid`]
    Angle,
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupancy => write!(f, "occupancy"),
            Self::Angle => write!(f, "angle"),
        }
    }
}

/// An occupancy map of either variant.
#[derive(Clone, Debug, PartialEq)]
pub enum OccupancyMap {
    /// One log-odds value per cell.
    Occupancy(OccGrid),
    /// One log-odds value per cell and heading bin.
    Angle(AngleGrid),
}

impl OccupancyMap {
    /// Build an empty map from configuration.
    pub fn from_config(config: &MappingConfig) -> Self {
        let grid = &config.grid;
        let origin = grid.origin();
        match grid.kind {
            GridKind::Occupancy => Self::Occupancy(OccGrid::with_config(
                origin,
                grid.resolution,
                grid.width,
                grid.height,
                config.log_odds,
            )),
            GridKind::Angle => Self::Angle(AngleGrid::with_config(
                origin,
                grid.resolution,
                grid.width,
                grid.height,
                grid.layers,
                config.log_odds,
            )),
        }
    }

    /// Rehydrate from a snapshot.
    ///
    /// A snapshot with exactly `width · height` cells becomes an [`OccGrid`],
    /// anything else is read as a layered [`AngleGrid`].
    pub fn from_snapshot(snapshot: &GridSnapshot, log_odds: LogOddsConfig) -> Result<Self> {
        if snapshot.cells.len() == snapshot.base()?.cell_count() {
            OccGrid::from_snapshot(snapshot, log_odds).map(Self::Occupancy)
        } else {
            AngleGrid::from_snapshot(snapshot, log_odds).map(Self::Angle)
        }
    }

    /// Fold one scan taken at `pose` into the map.
    pub fn insert_scan(&mut self, scan: &LaserScan, pose: Pose2D) -> ScanUpdate {
        match self {
            Self::Occupancy(grid) => grid.insert_scan(scan, pose),
            Self::Angle(grid) => grid.insert_scan(scan, pose),
        }
    }

    /// Capture geometry and cells.
    pub fn snapshot(&self) -> GridSnapshot {
        match self {
            Self::Occupancy(grid) => grid.snapshot(),
            Self::Angle(grid) => grid.snapshot(),
        }
    }

    /// Number of heading layers (1 for a plain occupancy grid).
    pub fn layers(&self) -> usize {
        match self {
            Self::Occupancy(_) => 1,
            Self::Angle(grid) => grid.layers(),
        }
    }

    /// Short name of the variant, as used in configuration.
    pub fn kind(&self) -> GridKind {
        match self {
            Self::Occupancy(_) => GridKind::Occupancy,
            Self::Angle(_) => GridKind::Angle,
        }
    }
}

impl GridLayout for OccupancyMap {
    fn base(&self) -> &GridBase {
        match self {
            Self::Occupancy(grid) => grid.base(),
            Self::Angle(grid) => grid.base(),
        }
    }

    /// # Panics
    /// If the variants differ.
    fn merge(&mut self, other: &Self) {
        match (self, other) {
            (Self::Occupancy(a), Self::Occupancy(b)) => a.merge(b),
            (Self::Angle(a), Self::Angle(b)) => a.merge(b),
            _ => panic!("cannot merge an occupancy grid with an angle grid"),
        }
    }

    fn resize(&mut self, origin: Point, width: usize, height: usize) {
        match self {
            Self::Occupancy(grid) => grid.resize(origin, width, height),
            Self::Angle(grid) => grid.resize(origin, width, height),
        }
    }
}

impl fmt::Display for OccupancyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupancy(grid) => fmt::Display::fmt(grid, f),
            Self::Angle(grid) => fmt::Display::fmt(grid, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn test_from_config_kind() {
        let mut config = MappingConfig::default();
        config.grid.kind = GridKind::Occupancy;
        assert_eq!(OccupancyMap::from_config(&config).kind(), GridKind::Occupancy);

        config.grid.kind = GridKind::Angle;
        config.grid.layers = 6;
        let map = OccupancyMap::from_config(&config);
        assert_eq!(map.kind(), GridKind::Angle);
        assert_eq!(map.layers(), 6);
    }

    #[test]
    fn test_snapshot_picks_variant() {
        let occ = OccupancyMap::Occupancy(OccGrid::new(Point::ZERO, 1.0, 3, 2));
        let angle = OccupancyMap::Angle(AngleGrid::new(Point::ZERO, 1.0, 3, 2, 4));

        let restored = OccupancyMap::from_snapshot(&occ.snapshot(), LogOddsConfig::default()).unwrap();
        assert_eq!(restored, occ);
        let restored = OccupancyMap::from_snapshot(&angle.snapshot(), LogOddsConfig::default()).unwrap();
        assert_eq!(restored, angle);
    }

    #[test]
    fn test_oversized_snapshot_is_an_error() {
        let snapshot = GridSnapshot {
            origin: Point::ZERO,
            resolution: 1.0,
            width: usize::MAX / 2,
            height: 4,
            cells: vec![0.0; 4],
        };
        assert!(matches!(
            OccupancyMap::from_snapshot(&snapshot, LogOddsConfig::default()),
            Err(GridError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_insert_dispatches() {
        let mut map = OccupancyMap::Angle(AngleGrid::new(Point::ZERO, 0.1, 1, 1, 2));
        let scan = LaserScan::new(0.0, 0.0, 0.0, 1.0, vec![0.5]);
        let result = map.insert_scan(&scan, Pose2D::new(0.05, 0.05, 0.0));

        assert_eq!(result.beams_used, 1);
        assert!(map.base().in_bounds(Point::new(1.05, 1.05)));
    }

    #[test]
    #[should_panic]
    fn test_cross_variant_merge_panics() {
        let mut a = OccupancyMap::Occupancy(OccGrid::new(Point::ZERO, 1.0, 2, 2));
        let b = OccupancyMap::Angle(AngleGrid::new(Point::ZERO, 1.0, 2, 2, 2));
        a.merge(&b);
    }
}
