//! custref CLI library.
//!
//! Configuration, agent assembly, command execution and output formatting
//! for the `custref` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;
pub mod setup;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
