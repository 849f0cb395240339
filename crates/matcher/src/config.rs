//! Matching policy configuration.
//!
//! ```
//! use matcher::{MatchConfig, MatchDirection, MatchPolicy};
//!
//! let cfg = MatchConfig::default()
//!     .with_policy(MatchPolicy::Polyline)
//!     .with_direction(MatchDirection::Symmetric);
//! assert!(cfg.validate().is_ok());
//! ```
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a driver sample finds its counterpart on the other track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// The other track's sample closest in time; ties go to the earlier
    /// timestamp. Linear co-scan, `O(n + m)`.
    #[default]
    NearestTimestamp,
    /// The closest point on the other track's piecewise-linear curve,
    /// regardless of time. `O(n·m)`.
    Polyline,
}

/// Which track drives the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchDirection {
    /// The track with fewer samples drives; equal lengths go to the smaller id.
    #[default]
    Driver,
    /// Both tracks drive in turn and the per-point distances are pooled.
    Symmetric,
}

/// Matching policy and direction applied to every row of a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Configuration schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub policy: MatchPolicy,
    #[serde(default)]
    pub direction: MatchDirection,
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_direction(mut self, direction: MatchDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn validate(&self) -> Result<(), MatchConfigError> {
        if self.version < 1 {
            return Err(MatchConfigError::InvalidVersion {
                version: self.version,
            });
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    1
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            version: 1,
            policy: MatchPolicy::NearestTimestamp,
            direction: MatchDirection::Driver,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchConfigError {
    #[error("invalid match config version {version}; expected >= 1")]
    InvalidVersion { version: u32 },
}
