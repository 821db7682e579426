//! Kinship CLI library.
//!
//! This library provides the core functionality for the `kinship` command-line
//! interface: argument parsing, interview scripts, command execution and
//! output formatting.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod script;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use output::Formatter;
pub use script::Script;
