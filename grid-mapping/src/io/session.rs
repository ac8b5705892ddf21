//! Recorded mapping sessions.
//!
//! A session is a JSON document of scans already paired with the sensor
//! pose they were taken from:
//!
//! ```json
//! {
//!   "records": [
//!     {
//!       "pose": { "x": 0.0, "y": 0.0, "theta": 0.0 },
//!       "scan": {
//!         "angle_min": -1.57, "angle_increment": 0.01,
//!         "range_max": 8.0, "ranges": [1.2, 1.3, null]
//!       }
//!     }
//!   ]
//! }
//! ```
//!
//! JSON has no NaN or infinity; a `null` range is read as NaN and dropped
//! by the sanitizer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{LaserScan, Pose2D};
use crate::error::Result;

/// One scan and the pose it was taken from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    /// Sensor pose in the world frame
    pub pose: Pose2D,
    /// Ranges in the sensor frame
    pub scan: LaserScan,
}

/// Scans in recording order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Records in insertion order
    pub records: Vec<ScanRecord>,
}

impl Session {
    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the session holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read a session from a JSON file.
pub fn load(path: &Path) -> Result<Session> {
    let reader = BufReader::new(File::open(path)?);
    let session: Session = serde_json::from_reader(reader)?;
    info!("Loaded {} scans from {}", session.len(), path.display());
    Ok(session)
}

/// Parse a session from a JSON string.
pub fn from_json(json: &str) -> Result<Session> {
    Ok(serde_json::from_str(json)?)
}
