//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::DrillConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file and environment, then validate.
    pub fn load() -> Result<DrillConfig, ApiError> {
        let config = MergeService::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with a specific file layered over the global one, then validate.
    pub fn load_from_file(path: &Path) -> Result<DrillConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Render a configuration as TOML
    pub fn render(config: &DrillConfig) -> Result<String, ApiError> {
        toml::to_string_pretty(config)
            .map_err(|e| ApiError::ConfigError(format!("Failed to render config: {}", e)))
    }
}
