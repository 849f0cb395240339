//! Configuration for building a [`TrackStore`](crate::TrackStore).
//!
//! ```rust
//! use store::StoreConfig;
//!
//! let config = StoreConfig::default().with_max_points_per_track(Some(10_000));
//! config.validate().expect("valid store config");
//! ```
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Ingestion policy for track columns.
///
/// Schema violations are always reported, never repaired. These knobs only
/// make the checks stricter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Configuration schema version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Reject tracks where two consecutive samples share a timestamp.
    ///
    /// Timestamps must always be non-decreasing; with this set they must be
    /// strictly increasing.
    #[serde(default)]
    pub reject_duplicate_timestamps: bool,
    /// Upper bound on samples per track. `None` disables the limit.
    #[serde(default)]
    pub max_points_per_track: Option<usize>,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reject_duplicate_timestamps(mut self, reject: bool) -> Self {
        self.reject_duplicate_timestamps = reject;
        self
    }

    pub fn with_max_points_per_track(mut self, max: Option<usize>) -> Self {
        self.max_points_per_track = max;
        self
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        if self.version < 1 {
            return Err(StoreError::InvalidConfig(format!(
                "version must be >= 1 (got {})",
                self.version
            )));
        }
        if self.max_points_per_track == Some(0) {
            return Err(StoreError::InvalidConfig(
                "max_points_per_track must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    1
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            version: 1,
            reject_duplicate_timestamps: false,
            max_points_per_track: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = StoreConfig::default();
        assert_eq!(cfg.version, 1);
        assert!(!cfg.reject_duplicate_timestamps);
        assert!(cfg.max_points_per_track.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_point_limit_rejected() {
        let cfg = StoreConfig::new().with_max_points_per_track(Some(0));
        match cfg.validate() {
            Err(StoreError::InvalidConfig(msg)) => assert!(msg.contains("max_points_per_track")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn zero_version_rejected() {
        let cfg = StoreConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(StoreError::InvalidConfig(_))));
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let cfg: StoreConfig = serde_json::from_str(r#"{"version": 1}"#).unwrap();
        assert_eq!(cfg, StoreConfig::default());
    }
}
