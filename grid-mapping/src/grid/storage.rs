//! Dense cell storage layered on [`GridBase`].
//!
//! Cells are stored row-major, row 0 first. Layered grids stack whole
//! spatial blocks one after another (layer-major):
//!
//! ```text
//! data: [ layer 0: row 0 | row 1 | ... ][ layer 1: row 0 | row 1 | ... ] ...
//!         └────────── w*h ───────────┘
//! index(cell, layer) = cell + layer * w * h
//! ```
//!
//! Merging is additive: every cell of the source grid is summed into the
//! destination cell at the same world position. Resizing is "allocate a
//! bigger grid, merge the old one into it, adopt it".

use std::fmt;
use std::ops::AddAssign;

use crate::core::Point;

use super::GridLayout;
use super::base::GridBase;

/// Dense row-major grid of cells of type `T`, one or more layers deep.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid<T> {
    base: GridBase,
    layers: usize,
    data: Vec<T>,
}

impl<T: Copy + Default> Grid<T> {
    /// Create a single-layer grid with every cell at `T::default()`.
    pub fn new(origin: Point, resolution: f64, width: usize, height: usize) -> Self {
        Self::with_layers(origin, resolution, width, height, 1)
    }

    /// Create a grid of `layers` stacked blocks, every cell at `T::default()`.
    ///
    /// # Panics
    /// If `layers` is zero.
    pub fn with_layers(
        origin: Point,
        resolution: f64,
        width: usize,
        height: usize,
        layers: usize,
    ) -> Self {
        let base = GridBase::new(origin, resolution, width, height);
        Self::from_layers(base, layers, vec![T::default(); base.cell_count() * layers])
    }

    /// Wrap existing single-layer cells.
    ///
    /// # Panics
    /// If `data.len()` does not match the geometry.
    pub fn from_data(base: GridBase, data: Vec<T>) -> Self {
        Self::from_layers(base, 1, data)
    }

    /// Wrap existing layer-major cells.
    ///
    /// # Panics
    /// If `layers` is zero or `data.len()` is not `layers` full blocks.
    pub fn from_layers(base: GridBase, layers: usize, data: Vec<T>) -> Self {
        assert!(layers >= 1, "grid needs at least one layer");
        assert_eq!(
            data.len(),
            base.cell_count() * layers,
            "cell count must match grid geometry"
        );
        Self { base, layers, data }
    }

    /// Grid geometry.
    #[inline]
    pub fn base(&self) -> &GridBase {
        &self.base
    }

    /// Number of stacked layers.
    #[inline]
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Raw cells, layer-major.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Mutable raw cells, layer-major.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Consume the grid, returning its cells.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Row-major cells of one layer.
    ///
    /// # Panics
    /// If `layer >= self.layers()`.
    pub fn layer(&self, layer: usize) -> &[T] {
        assert!(layer < self.layers, "layer {layer} out of range");
        let size = self.base.cell_count();
        &self.data[layer * size..(layer + 1) * size]
    }

    /// Cell value of the first layer at a world point, `None` outside the grid.
    #[inline]
    pub fn value_at(&self, p: Point) -> Option<T> {
        self.layer_value_at(p, 0)
    }

    /// Cell value of `layer` at a world point, `None` outside the grid.
    pub fn layer_value_at(&self, p: Point, layer: usize) -> Option<T> {
        self.base
            .in_bounds(p)
            .then(|| self.layer(layer)[self.base.position_to_index(p)])
    }
}

impl<T: Copy + Default + AddAssign> GridLayout for Grid<T> {
    fn base(&self) -> &GridBase {
        &self.base
    }

    /// # Panics
    /// If the layer counts differ.
    fn merge(&mut self, other: &Self) {
        assert_eq!(
            self.layers, other.layers,
            "cannot merge grids with different layer counts"
        );
        merge_layers(&self.base, &mut self.data, &other.base, &other.data, self.layers);
    }

    fn resize(&mut self, origin: Point, width: usize, height: usize) {
        let mut new_grid =
            Grid::with_layers(origin, self.base.resolution(), width, height, self.layers);
        new_grid.merge(self);
        *self = new_grid;
    }
}

impl<T: fmt::Display> fmt::Display for Grid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_header(f, &self.base)?;
        writeln!(f, "data:")?;
        write_rows(f, self.base.width(), &self.data)
    }
}

/// Add every cell of `src` into `dst` at the same world position.
///
/// `src` must lie entirely inside `dst`; the offset is computed once and
/// the rest is a stride walk over `src`, `layers` cells deep per position.
fn merge_layers<T: Copy + AddAssign>(
    dst_base: &GridBase,
    dst: &mut [T],
    src_base: &GridBase,
    src: &[T],
    layers: usize,
) {
    let origin_offset = dst_base.aligned_index(src_base.origin());
    let dst_layer = dst_base.cell_count();
    let src_layer = src_base.cell_count();
    let (w, w_in) = (dst_base.width(), src_base.width());
    debug_assert!(
        origin_offset % w + w_in <= w && origin_offset / w + src_base.height() <= dst_base.height(),
        "merged grid must lie inside the destination"
    );

    for row in 0..src_base.height() {
        let c = origin_offset + row * w;
        let c_in = row * w_in;
        for col in 0..w_in {
            for layer in 0..layers {
                dst[c + col + layer * dst_layer] += src[c_in + col + layer * src_layer];
            }
        }
    }
}

pub(super) fn write_header(f: &mut fmt::Formatter<'_>, base: &GridBase) -> fmt::Result {
    writeln!(f, "info:")?;
    writeln!(f, "  origin: {}", base.origin())?;
    writeln!(f, "  w: {}", base.width())?;
    writeln!(f, "  h: {}", base.height())?;
    writeln!(f, "  resolution: {}", base.resolution())
}

pub(super) fn write_rows<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    width: usize,
    cells: &[T],
) -> fmt::Result {
    for row in cells.chunks(width) {
        write!(f, " ")?;
        for (i, v) in row.iter().enumerate() {
            let sep = if i + 1 == row.len() { "" } else { "," };
            write!(f, " {}{}", v, sep)?;
        }
        writeln!(f)?;
    }
    Ok(())
}
