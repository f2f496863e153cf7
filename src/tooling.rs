//! Command-line front end
//!
//! Argument parsing, the interactive practice prompt, and text/JSON formatting of
//! sessions and catalogs.

pub mod cli;
pub mod format;
pub mod repl;

pub use cli::{Cli, CliContext, Commands};
pub use repl::{ReplCommand, ReplOutcome};
