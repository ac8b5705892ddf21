//! Log-odds update configuration.

use serde::{Deserialize, Serialize};

/// Default decrement for a free observation: `ln(0.6 / 0.4)`.
pub const LOG_ODDS_FREE: f64 = 0.4055;

/// Default increment for an occupied observation: `ln(0.8 / 0.2)`.
pub const LOG_ODDS_OCCUPIED: f64 = 1.3863;

/// Configuration for log-odds occupancy updates.
///
/// - Log-odds: L(x) = log(P(x) / (1 - P(x)))
/// - Bayesian update: L_new = L_old + L_observation
///
/// Both values are positive magnitudes: a free observation subtracts
/// `free`, an occupied observation adds `occupied`. Values are not clamped.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogOddsConfig {
    /// Subtracted from a cell a beam passes through.
    #[serde(default = "default_free")]
    pub free: f64,

    /// Added to the cell a beam terminates in.
    #[serde(default = "default_occupied")]
    pub occupied: f64,
}

fn default_free() -> f64 {
    LOG_ODDS_FREE
}
fn default_occupied() -> f64 {
    LOG_ODDS_OCCUPIED
}

impl Default for LogOddsConfig {
    fn default() -> Self {
        Self {
            free: LOG_ODDS_FREE,
            occupied: LOG_ODDS_OCCUPIED,
        }
    }
}

impl LogOddsConfig {
    /// Build from the probabilities a single free / occupied observation implies.
    ///
    /// `free_prob` is the occupancy probability after one free observation
    /// (below 0.5), `occupied_prob` after one occupied observation (above 0.5).
    pub fn from_probability(free_prob: f64, occupied_prob: f64) -> Self {
        Self {
            free: -probability_to_log_odds(free_prob),
            occupied: probability_to_log_odds(occupied_prob),
        }
    }
}

/// Convert log-odds to occupancy probability.
/// Formula: P = 1 / (1 + exp(-L))
#[inline]
pub fn log_odds_to_probability(log_odds: f64) -> f64 {
    1.0 / (1.0 + (-log_odds).exp())
}

/// Convert occupancy probability to log-odds.
#[inline]
pub fn probability_to_log_odds(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}
