#![forbid(unsafe_code)]

//! Command-line harness around `wordboard-core`.
//!
//! `replay` feeds a recorded trace to a fresh table and prints the final
//! render view as JSON. `check-config` loads and validates a table config.

pub mod cli;
pub mod error;
pub mod logging;

pub use cli::{Cli, Commands, run, run_from_env};
pub use error::{HarnessError, Result};
