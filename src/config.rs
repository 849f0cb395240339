//! YAML configuration for the whole pipeline.
//!
//! One file carries the settings of every stage. Sections that are left out
//! fall back to their defaults, as do fields left out of a section.
//!
//! ## Example
//!
//! ```yaml
//! version: "1.0"
//! name: "harbour cameras"
//!
//! store:
//!   version: 1
//!   reject_duplicate_timestamps: false
//!   max_points_per_track: 100000
//!
//! overlap:
//!   version: 1
//!   strategy: sweep_line        # or cross_join
//!
//! matcher:
//!   version: 1
//!   policy: nearest_timestamp   # or polyline
//!   direction: driver           # or symmetric
//!
//! executor:
//!   version: 1
//!   use_parallel: true
//!   num_threads: 4
//!   min_rows_per_task: 16
//!   timeout_ms: 30000
//! ```

use std::fs;
use std::path::Path;

use matcher::MatchConfig;
use overlap::OverlapConfig;
use serde::{Deserialize, Serialize};
use store::StoreConfig;
use thiserror::Error;

use crate::error::PipelineError;
use crate::executor::{BatchExecutor, ExecutorConfig};

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Settings for every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackmatchConfig {
    /// Configuration format version: `"1"` or `"1.0"`.
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub overlap: OverlapConfig,

    #[serde(default)]
    pub matcher: MatchConfig,

    #[serde(default)]
    pub executor: ExecutorConfig,
}

impl Default for TrackmatchConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            store: StoreConfig::default(),
            overlap: OverlapConfig::default(),
            matcher: MatchConfig::default(),
            executor: ExecutorConfig::default(),
        }
    }
}

impl TrackmatchConfig {
    /// Load and validate a YAML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: TrackmatchConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }

        self.store
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("store: {err}")))?;
        self.overlap
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("overlap: {err}")))?;
        self.matcher
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("matcher: {err}")))?;
        self.executor
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("executor: {err}")))?;
        Ok(())
    }

    /// Build the batch executor described by the `matcher` and `executor`
    /// sections.
    pub fn executor(&self) -> Result<BatchExecutor, PipelineError> {
        BatchExecutor::new(self.matcher.clone(), self.executor.clone())
    }
}
