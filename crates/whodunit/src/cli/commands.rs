//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Whodunit - murder-mystery script generation with language models
#[derive(Parser, Debug)]
#[command(name = "whodunit")]
#[command(about = "Murder-mystery script generation with language models", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a complete script for a theme
    Generate {
        /// Theme of the script (defaults to the configured theme)
        #[arg(long)]
        theme: Option<String>,

        /// Directory of prompt templates overriding the bundled ones
        #[arg(long)]
        prompts: Option<PathBuf>,

        /// Directory the script is saved to
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the script to stdout instead of saving it
        #[arg(long)]
        no_save: bool,

        /// Extra configuration file layered above the user files
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit logs as JSON lines
        #[arg(long)]
        json_logs: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Extra configuration file layered above the user files
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show the API key instead of masking it
        #[arg(long)]
        show_secrets: bool,
    },
}
