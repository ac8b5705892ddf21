//! Sensor configuration section.

use serde::{Deserialize, Serialize};

use crate::core::LaserScan;

/// Sensor configuration section
///
/// Every field is optional. When set, it replaces the value carried by
/// each recorded scan before the scan is inserted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSection {
    /// Minimum valid range (meters)
    #[serde(default)]
    pub range_min: Option<f64>,

    /// Maximum valid range (meters)
    #[serde(default)]
    pub range_max: Option<f64>,
}

impl SensorSection {
    /// Apply the configured overrides to a scan.
    pub fn apply(&self, scan: &mut LaserScan) {
        if let Some(range_min) = self.range_min {
            scan.range_min = range_min;
        }
        if let Some(range_max) = self.range_max {
            scan.range_max = range_max;
        }
    }
}
