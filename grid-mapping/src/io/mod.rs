//! File I/O around the grid engine.
//!
//! - [`snapshot`]: save and load a grid's geometry and cells as JSON, so a
//!   later run can start from a prior map instead of replaying scans
//! - [`session`]: read a recorded sequence of `(pose, scan)` pairs
//!
//! ```rust,ignore
//! use grid_mapping::io::{session, snapshot};
//!
//! let session = session::load(Path::new("run.json"))?;
//! for record in &session.records {
//!     map.insert_scan(&record.scan, record.pose);
//! }
//! snapshot::save(&map.snapshot(), Path::new("map.json"))?;
//! ```

pub mod session;
pub mod snapshot;

pub use session::{ScanRecord, Session};
pub use snapshot::GridSnapshot;
