//! CLI module
//!
//! Command-line interface for running connector operations.
//!
//! # Commands
//!
//! - `check` - Test credentials against the API
//! - `run` - Execute a batch of operations from a file
//! - `resources` - List resources and their operations

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
