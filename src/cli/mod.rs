//! # Command-Line Interface
//!
//! Renders posts from a site file the way a host would, and inspects the
//! hook setup.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `render SITE POST` | Run the host content filter and print the result |
//! | `fields SITE POST` | Print the final label/value rows |
//! | `hooks` | List registered callbacks in execution order |
//! | `stylesheet` | Fire the asset action and print the queued stylesheet |
//!
//! ## Output Formats
//!
//! All commands support `--format text|json`. `--verbose` turns on debug
//! logging on stderr.
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod hooks_cmd;
mod logging;
mod output;
mod render_cmd;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
