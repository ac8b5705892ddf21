//! Grid geometry and coordinate arithmetic.
//!
//! [`GridBase`] owns no cells. It describes where a lattice sits in the
//! world and converts between world points, cell coordinates and linear
//! indices:
//!
//! ```text
//!  y
//!  ↑   ┌────┬────┬────┐ ← top corner = origin + (w, h) * resolution
//!  │   │ 6  │ 7  │ 8  │   row 2
//!  │   ├────┼────┼────┤
//!  │   │ 3  │ 4  │ 5  │   row 1
//!  │   ├────┼────┼────┤
//!  │   │ 0  │ 1  │ 2  │   row 0
//!  │   └────┴────┴────┘
//!  │   origin
//!  └──────────────────→ x
//!
//! index = row * w + col
//! ```

use crate::core::{GridCoord, Point};

/// Fraction of the larger grid dimension added as padding on each growing side.
pub const EXPANSION_PAD_FRACTION: f64 = 0.2;

/// Grid geometry: origin, resolution and size in cells.
///
/// Cell `(col, row)` covers
/// `[origin.x + col*res, origin.x + (col+1)*res) × [origin.y + row*res, origin.y + (row+1)*res)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridBase {
    origin: Point,
    resolution: f64,
    width: usize,
    height: usize,
}

impl GridBase {
    /// Create a new geometry.
    ///
    /// # Panics
    /// If `resolution` is not positive or either dimension is zero.
    pub fn new(origin: Point, resolution: f64, width: usize, height: usize) -> Self {
        assert!(resolution > 0.0, "grid resolution must be positive");
        assert!(width >= 1 && height >= 1, "grid must have at least one cell");
        Self {
            origin,
            resolution,
            width,
            height,
        }
    }

    /// World coordinates of the lower-left corner of cell (0, 0).
    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Cell edge length in world units.
    #[inline]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cells in one spatial layer.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// `origin + (w, h) * resolution`, the exclusive upper corner.
    #[inline]
    pub fn top_corner(&self) -> Point {
        self.origin
            + Point::new(
                self.width as f64 * self.resolution,
                self.height as f64 * self.resolution,
            )
    }

    // === Coordinate Conversion ===

    /// Cell coordinate containing a world point. May lie outside the grid.
    #[inline]
    pub fn position_to_coord(&self, p: Point) -> GridCoord {
        GridCoord::new(
            ((p.x - self.origin.x) / self.resolution).floor() as i64,
            ((p.y - self.origin.y) / self.resolution).floor() as i64,
        )
    }

    /// Linear index of the cell containing `p`.
    ///
    /// `p` must be in bounds; check [`in_bounds`](Self::in_bounds) or
    /// expand the grid first.
    #[inline]
    pub fn position_to_index(&self, p: Point) -> usize {
        let coord = self.position_to_coord(p);
        debug_assert!(self.is_valid_coord(coord), "point {} outside grid", p);
        coord.y as usize * self.width + coord.x as usize
    }

    /// Lower-left corner of cell `i`.
    #[inline]
    pub fn index_to_position(&self, i: usize) -> Point {
        let coord = self.index_to_coord(i);
        self.origin
            + Point::new(
                coord.x as f64 * self.resolution,
                coord.y as f64 * self.resolution,
            )
    }

    /// Cell coordinate of linear index `i`.
    #[inline]
    pub fn index_to_coord(&self, i: usize) -> GridCoord {
        GridCoord::new((i % self.width) as i64, (i / self.width) as i64)
    }

    /// Linear index of a cell coordinate, if it lies in the grid.
    #[inline]
    pub fn coord_to_index(&self, coord: GridCoord) -> Option<usize> {
        self.is_valid_coord(coord)
            .then(|| coord.y as usize * self.width + coord.x as usize)
    }

    /// Check if a cell coordinate lies in the grid.
    #[inline]
    pub fn is_valid_coord(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// Is `p` inside `[origin, top_corner)` on both axes?
    ///
    /// Decided on the cell coordinate, so a point that passes is always
    /// safe to pass to [`position_to_index`](Self::position_to_index).
    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        self.is_valid_coord(self.position_to_coord(p))
    }

    /// Snap a scalar to the nearest multiple of the resolution.
    #[inline]
    pub fn round_to_map_res(&self, v: f64) -> f64 {
        (v / self.resolution).round() * self.resolution
    }

    /// Index of a cell-aligned point, such as another grid's origin.
    ///
    /// Rounds instead of flooring so a corner computed as `29.999999` cells
    /// away still lands on cell 30.
    pub(crate) fn aligned_index(&self, p: Point) -> usize {
        let col = ((p.x - self.origin.x) / self.resolution).round() as i64;
        let row = ((p.y - self.origin.y) / self.resolution).round() as i64;
        debug_assert!(col >= 0 && row >= 0, "point {} below grid origin", p);
        row as usize * self.width + col as usize
    }

    // === Expansion ===

    /// Geometry that contains both `p_min` and `p_max`, or `None` if this
    /// one already does.
    ///
    /// Only grows, never shrinks. Each growing side gets padding of
    /// `round(0.2 * max(w, h))` cells so repeated expansion is amortized.
    /// The new origin stays on this grid's cell lattice, so the old cells
    /// map onto new cells exactly.
    pub fn expanded(&self, p_min: Point, p_max: Point) -> Option<GridBase> {
        let c_min = self.position_to_coord(p_min);
        let c_max = self.position_to_coord(p_max);

        let grow_left = c_min.x < 0;
        let grow_down = c_min.y < 0;
        let grow_right = c_max.x >= self.width as i64;
        let grow_up = c_max.y >= self.height as i64;

        if !(grow_left || grow_down || grow_right || grow_up) {
            return None;
        }

        let pad = (EXPANSION_PAD_FRACTION * self.width.max(self.height) as f64).round()
            * self.resolution;

        let mut new_origin = self.origin;
        let mut new_top_corner = self.top_corner();
        if grow_left {
            new_origin.x = self.lower_edge(p_min.x, self.origin.x) - pad;
        }
        if grow_down {
            new_origin.y = self.lower_edge(p_min.y, self.origin.y) - pad;
        }
        if grow_right {
            new_top_corner.x = self.origin.x + self.round_to_map_res(p_max.x - self.origin.x) + pad;
        }
        if grow_up {
            new_top_corner.y = self.origin.y + self.round_to_map_res(p_max.y - self.origin.y) + pad;
        }

        // +1: the snapped top corner may sit half a cell below p_max
        let width = ((new_top_corner.x - new_origin.x) / self.resolution).round() as usize + 1;
        let height = ((new_top_corner.y - new_origin.y) / self.resolution).round() as usize + 1;

        Some(GridBase::new(new_origin, self.resolution, width, height))
    }

    /// Largest lattice line (through `reference`) at or below `v`.
    fn lower_edge(&self, v: f64, reference: f64) -> f64 {
        let edge = reference + ((v - reference) / self.resolution).floor() * self.resolution;
        // floor can land one rounding error above v
        if edge > v { edge - self.resolution } else { edge }
    }
}
