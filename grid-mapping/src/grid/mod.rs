//! Growable occupancy grids built from 2D laser scans.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │        LaserScan + Pose2D (one record at a time)     │
//! └──────────────────────────┬───────────────────────────┘
//!                            ▼
//!                 ┌─────────────────────┐
//!                 │    scan_update      │  fit bbox, trace beams
//!                 │  (raycaster, base)  │
//!                 └──────────┬──────────┘
//!              ┌─────────────┴─────────────┐
//!              ▼                           ▼
//!     ┌─────────────────┐        ┌──────────────────┐
//!     │     OccGrid     │        │    AngleGrid     │
//!     │ 1 value / cell  │        │ L values / cell  │
//!     └─────────────────┘        └──────────────────┘
//! ```
//!
//! Every grid shares the [`GridLayout`] contract: a [`GridBase`] geometry,
//! additive [`merge`](GridLayout::merge), and
//! [`resize`](GridLayout::resize). Expansion is written once on top of
//! those two.
//!
//! ## Coordinates
//!
//! - `origin` is the world position of the lower-left corner of cell (0, 0)
//! - cell `(x, y)` has linear index `y * width + x`
//! - the grid covers `[origin, origin + (width, height) · resolution)`

mod angle;
mod base;
mod config;
mod map;
mod occupancy;
mod raycaster;
mod scan_update;
mod storage;

pub use angle::AngleGrid;
pub use base::{EXPANSION_PAD_FRACTION, GridBase};
pub use config::{
    LOG_ODDS_FREE, LOG_ODDS_OCCUPIED, LogOddsConfig, log_odds_to_probability,
    probability_to_log_odds,
};
pub use map::{GridKind, OccupancyMap};
pub use occupancy::OccGrid;
pub use raycaster::{BresenhamLine, ray_cast};
pub use scan_update::ScanUpdate;
pub use storage::Grid;

use log::debug;

use crate::core::Point;

/// Geometry-aware grid operations shared by every grid variant.
pub trait GridLayout {
    /// Grid geometry.
    fn base(&self) -> &GridBase;

    /// Add every cell of `other` into the cell at the same world position.
    ///
    /// `other` must share this grid's resolution and lie entirely inside it.
    /// A source whose origin is off this grid's lattice snaps to the nearest
    /// cell rather than the one below it.
    fn merge(&mut self, other: &Self);

    /// Re-allocate with a new origin and size, keeping every value at its
    /// world position. The new extent must contain the old one.
    fn resize(&mut self, origin: Point, width: usize, height: usize);

    /// Grow the grid so both `p_min` and `p_max` fall inside it.
    ///
    /// Growth only happens on the sides that need it, padded by a fraction
    /// of the current size. Returns `true` if the grid was resized.
    fn expand_map(&mut self, p_min: Point, p_max: Point) -> bool {
        let old = *self.base();
        let Some(new) = old.expanded(p_min, p_max) else {
            return false;
        };

        debug!(
            "Expanding grid: {}x{} at {} -> {}x{} at {}",
            old.width(),
            old.height(),
            old.origin(),
            new.width(),
            new.height(),
            new.origin()
        );
        self.resize(new.origin(), new.width(), new.height());
        true
    }
}
