//! Default value functions for serde deserialization.

use crate::grid::GridKind;

pub fn resolution() -> f64 {
    0.05
}

pub fn grid_size() -> usize {
    1
}

pub fn kind() -> GridKind {
    GridKind::Angle
}

pub fn layers() -> usize {
    8
}
