//! CLI Tooling
//!
//! Argument parsing and the non-interactive commands. `play` hands off to the prompt in
//! `tooling::repl`.

use crate::config::{ConfigLoader, DrillConfig};
use crate::error::ApiError;
use crate::level::Curriculum;
use crate::logging::LoggingConfig;
use crate::session::Session;
use crate::tooling::format::{format_levels_json, format_levels_text};
use crate::tooling::repl;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// fsdrill - practise managing folders and files
#[derive(Parser, Debug)]
#[command(name = "fsdrill")]
#[command(about = "Guided practice for folder and file management on a simulated file tree")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive practice session
    Play {
        /// Curriculum to play (standard or quick); defaults to the configured one
        #[arg(long)]
        curriculum: Option<String>,
        /// Level to start at, counting from 1
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        level: Option<u32>,
    },
    /// List the levels of a curriculum
    Levels {
        /// Curriculum to list; defaults to the configured one
        #[arg(long)]
        curriculum: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Show the resolved configuration as TOML
    Config,
}

impl Cli {
    /// Apply the logging flags on top of the loaded `[logging]` section
    pub fn apply_logging_overrides(&self, logging: &mut LoggingConfig) {
        if self.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            logging.file = Some(file.clone());
        }
    }
}

/// Loaded configuration plus the commands that run against it
pub struct CliContext {
    config: DrillConfig,
}

impl CliContext {
    /// Load configuration, then layer the CLI logging flags over it
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        cli.apply_logging_overrides(&mut config.logging);
        Ok(Self { config })
    }

    pub fn from_config(config: DrillConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DrillConfig {
        &self.config
    }

    fn curriculum(&self, requested: Option<&str>) -> Result<Curriculum, ApiError> {
        match requested {
            Some(name) => name.parse(),
            None => self.config.curriculum.curriculum(),
        }
    }

    /// Build a session for `play`. Needs an entered tokio runtime.
    pub fn session(&self, curriculum: Option<&str>, level: Option<u32>) -> Result<Session, ApiError> {
        let curriculum = self.curriculum(curriculum)?;
        let catalog = curriculum.catalog()?;
        let level_index = level.map(|n| n.saturating_sub(1) as usize).unwrap_or(0);
        info!(curriculum = %curriculum, level = level_index + 1, "Starting practice");
        Session::starting_at(catalog, self.config.timing.timings(), level_index)
    }

    /// Run a command; returns the text to print
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Play { curriculum, level } => {
                let session = self.session(curriculum.as_deref(), *level)?;
                repl::run(&session)?;
                Ok("Goodbye!".to_string())
            }
            Commands::Levels { curriculum, format } => {
                let curriculum = self.curriculum(curriculum.as_deref())?;
                let catalog = curriculum.catalog()?;
                if format == "json" {
                    format_levels_json(curriculum, &catalog)
                } else {
                    Ok(format_levels_text(curriculum, &catalog))
                }
            }
            Commands::Config => ConfigLoader::render(&self.config),
        }
    }
}
