//! Bresenham ray casting for occupancy grid updates.
//!
//! Beams are traced from the sensor cell to the endpoint cell, stepping one
//! cell at a time along whichever axis has the larger span:
//!
//! ```text
//! From (0,0) to (7,3):
//!
//!     3 │        ●
//!     2 │     ●●
//!     1 │  ●●
//!     0 ●●
//!       └──────────
//!        0 1 2 3 4 5 6 7
//! ```
//!
//! - No floating-point operations once the endpoints are snapped to cells
//! - Each cell on the line is produced exactly once, with no gaps
//! - A zero-length segment yields just the starting cell

use crate::core::{GridCoord, Point};

use super::base::GridBase;

/// Bresenham's line algorithm iterator.
///
/// Generates all grid cells along a line from start to end, both inclusive.
pub struct BresenhamLine {
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
    x_inc: i64,
    y_inc: i64,
    error: i64,
    steep: bool,
    end_x: i64,
    end_y: i64,
    done: bool,
}

impl BresenhamLine {
    /// Create a new Bresenham line iterator from start to end coordinates.
    pub fn new(start: GridCoord, end: GridCoord) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        let steep = dy > dx;

        // Walk along the major axis; swap so that axis is always "x"
        let (x, y, end_x, end_y, dx, dy) = if steep {
            (start.y, start.x, end.y, end.x, dy, dx)
        } else {
            (start.x, start.y, end.x, end.y, dx, dy)
        };

        let x_inc = if end_x > x { 1 } else { -1 };
        let y_inc = if end_y > y { 1 } else { -1 };

        Self {
            x,
            y,
            dx,
            dy,
            x_inc,
            y_inc,
            error: dx / 2,
            steep,
            end_x,
            end_y,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = GridCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = if self.steep {
            GridCoord::new(self.y, self.x)
        } else {
            GridCoord::new(self.x, self.y)
        };

        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(result);
        }

        self.error -= self.dy;
        if self.error < 0 {
            self.y += self.y_inc;
            self.error += self.dx;
        }
        self.x += self.x_inc;

        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = (self.end_x - self.x).unsigned_abs() as usize + 1;
        (remaining, Some(remaining))
    }
}

/// Linear indices of the cells the segment `from → to` passes through, in
/// order from `from`. Both endpoints must lie inside `base`.
pub fn ray_cast(base: &GridBase, from: Point, to: Point) -> Vec<usize> {
    let start = base.position_to_coord(from);
    let end = base.position_to_coord(to);
    BresenhamLine::new(start, end)
        .filter_map(|coord| base.coord_to_index(coord))
        .collect()
}
