//! Integration tests for fsdrill

mod cli_parse;
mod config_loading;
mod prompt_commands;
mod properties;
mod session_scenarios;
mod support;
