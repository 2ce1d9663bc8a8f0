//! Command-line front end for LUKSO Universal Profile lookups.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration with environment variable expansion
//! - [`commands`] - `profile`, `account`, `avatar` and `networks` subcommands

pub mod commands;
pub mod config;

pub use commands::CommandError;
pub use config::{CliConfig, ConfigError};
