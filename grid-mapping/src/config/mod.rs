//! Configuration loading for grid mapping.
//!
//! Loads all configuration from a single TOML file. Every section and
//! field is optional and falls back to a built-in default.
//!
//! ```rust,ignore
//! use grid_mapping::config::MappingConfig;
//!
//! // Load from default path (configs/config.toml), or defaults if absent
//! let config = MappingConfig::load_default()?;
//! let map = OccupancyMap::from_config(&config);
//! ```
//!
//! ## Configuration Sections
//!
//! | Section | Description |
//! |---------|-------------|
//! | [`GridSection`] | Initial geometry, variant and heading bins |
//! | `log_odds` | Free / occupied increments ([`LogOddsConfig`](crate::grid::LogOddsConfig)) |
//! | [`SensorSection`] | Scan range overrides |
//!
//! ## Example TOML
//!
//! ```toml
//! [grid]
//! resolution = 0.05
//! kind = "angle"      # "occupancy" | "angle"
//! layers = 8
//!
//! [log_odds]
//! free = 0.4055       # ln(0.6/0.4)
//! occupied = 1.3863   # ln(0.8/0.2)
//!
//! [sensor]
//! range_min = 0.15
//! ```

mod defaults;
mod error;
mod grid;
mod mapping;
mod sensor;

pub use error::ConfigLoadError;
pub use grid::GridSection;
pub use mapping::{DEFAULT_CONFIG_PATH, MappingConfig};
pub use sensor::SensorSection;
