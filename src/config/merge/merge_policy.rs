//! Built-in defaults every load starts from.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError};

/// Builder seeded with the default values of every section.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("logging.enabled", true)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "file")?
        .set_default("logging.color", true)?
        .set_default("timing.auto_advance_ms", 1500)?
        .set_default("timing.feedback_ttl_ms", 3000)?
        .set_default("curriculum.name", "standard")
}
