//! CLI module for zippy
//!
//! Provides command-line interface for:
//! - serve: run the HTTP API
//! - list / show / delete: inspect and remove stored packages
//! - create: validate and store a submission read from stdin

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{create, delete, list, run, run_command, serve, show};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_request, write_error, write_response};
