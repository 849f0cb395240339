//! Configuration and error types for overlap detection.

use serde::{Deserialize, Serialize};
use store::TrackId;
use thiserror::Error;

/// Join strategy used to enumerate intersecting pairs.
///
/// Both strategies return identical output. `CrossJoin` evaluates the
/// predicate for all `N·(N−1)/2` combinations and is only useful as a
/// reference or for very small inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapStrategy {
    /// Sort by start, sweep with a min-heap of active ends. `O(N log N + K)`.
    #[default]
    SweepLine,
    /// Exhaustive pairwise filter. `O(N²)`.
    CrossJoin,
}

/// Settings for overlap detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapConfig {
    /// Configuration schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub strategy: OverlapStrategy,
}

impl OverlapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(mut self, strategy: OverlapStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn validate(&self) -> Result<(), OverlapError> {
        if self.version < 1 {
            return Err(OverlapError::InvalidConfigVersion {
                version: self.version,
            });
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    1
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            version: 1,
            strategy: OverlapStrategy::SweepLine,
        }
    }
}

/// Errors that abort overlap detection for the whole batch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OverlapError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },

    #[error("track {id}: invalid interval [{start}, {end}]")]
    InvalidInterval { id: TrackId, start: f64, end: f64 },

    #[error("duplicate track id {id}")]
    DuplicateTrackId { id: TrackId },
}
