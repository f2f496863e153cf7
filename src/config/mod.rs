//! Configuration
//!
//! Layered with the `config` crate: built-in defaults, then the global file
//! (`$XDG_CONFIG_HOME/fsdrill/config.toml`), then an explicit file, then `FSDRILL__*`
//! environment variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;

use crate::engine::Timings;
use crate::error::ApiError;
use crate::level::Curriculum;
use crate::logging::{validate_logging_config, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timer durations in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Delay between a completed step and the next one
    #[serde(default = "default_auto_advance_ms")]
    pub auto_advance_ms: u64,

    /// How long a feedback message stays visible
    #[serde(default = "default_feedback_ttl_ms")]
    pub feedback_ttl_ms: u64,
}

fn default_auto_advance_ms() -> u64 {
    1500
}

fn default_feedback_ttl_ms() -> u64 {
    3000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: default_auto_advance_ms(),
            feedback_ttl_ms: default_feedback_ttl_ms(),
        }
    }
}

impl TimingConfig {
    pub fn timings(&self) -> Timings {
        Timings {
            auto_advance: Duration::from_millis(self.auto_advance_ms),
            feedback_ttl: Duration::from_millis(self.feedback_ttl_ms),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumConfig {
    /// Built-in level set: standard or quick
    #[serde(default = "default_curriculum")]
    pub name: String,
}

fn default_curriculum() -> String {
    Curriculum::default().name().to_string()
}

impl Default for CurriculumConfig {
    fn default() -> Self {
        Self {
            name: default_curriculum(),
        }
    }
}

impl CurriculumConfig {
    pub fn curriculum(&self) -> Result<Curriculum, ApiError> {
        self.name.parse()
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrillConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub curriculum: CurriculumConfig,
}

impl DrillConfig {
    /// Check values the type system cannot
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.timing.auto_advance_ms == 0 {
            return Err(ApiError::ConfigError(
                "timing.auto_advance_ms must be greater than zero".to_string(),
            ));
        }
        if self.timing.feedback_ttl_ms == 0 {
            return Err(ApiError::ConfigError(
                "timing.feedback_ttl_ms must be greater than zero".to_string(),
            ));
        }
        self.curriculum.curriculum()?;
        validate_logging_config(&self.logging)
    }
}
