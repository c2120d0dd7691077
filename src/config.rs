//! Process-wide defaults for tolerance and sample rate
//!
//! Every near-equality comparison and every sampling call reads these
//! defaults unless an override is passed per call. The defaults live in
//! one explicit [`Config`] value behind a lock; callers snapshot it
//! with [`Config::global`] rather than reading mutable statics, so a
//! per-call override never leaks into concurrently running tests.

use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Default numeric tolerance for near-equality/near-zero tests
pub const DEFAULT_TOLERANCE: f64 = 1e-3;

/// Default sample rate in Hz
pub const DEFAULT_SAMPLE_RATE: f64 = 44100.0;

/// Process-wide configuration snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Numeric tolerance used by comparisons when no override is given
    pub tolerance: f64,
    /// Sample rate in Hz used by sampling/rendering when no override is given
    pub sample_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}

static GLOBAL: RwLock<Config> = RwLock::new(Config {
    tolerance: DEFAULT_TOLERANCE,
    sample_rate: DEFAULT_SAMPLE_RATE,
});

impl Config {
    /// Snapshot the current process-wide configuration
    pub fn global() -> Config {
        *GLOBAL.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the process-wide configuration
    ///
    /// Intended to be called once at startup; calls already holding a
    /// snapshot are unaffected.
    pub fn set_global(config: Config) {
        *GLOBAL.write().unwrap_or_else(|e| e.into_inner()) = config;
    }

    /// Resolve a per-call tolerance override against the global default
    pub fn resolve_tolerance(tolerance: Option<f64>) -> f64 {
        tolerance.unwrap_or_else(|| Config::global().tolerance)
    }

    /// Resolve a per-call sample-rate override against the global default
    pub fn resolve_sample_rate(sample_rate: Option<f64>) -> f64 {
        sample_rate.unwrap_or_else(|| Config::global().sample_rate)
    }
}
