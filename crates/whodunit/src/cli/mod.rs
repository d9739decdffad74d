//! Command-line interface for Whodunit.

mod commands;
mod generate;
mod show_config;

pub use commands::{Cli, Commands};
pub use generate::{GenerateOptions, run_generate};
pub use show_config::show_config;
