//! Whodunit CLI binary.
//!
//! Generates a complete murder-mystery script for a theme and saves it as
//! markdown.

use clap::Parser;
use whodunit::{LoggingConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, GenerateOptions, run_generate, show_config};

    // Pick up API_KEY and friends from a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let json_logs = matches!(cli.command, Commands::Generate { json_logs: true, .. });
    init_logging(
        &LoggingConfig::new()
            .with_log_level(log_level)
            .with_json_logs(json_logs),
    )?;

    match cli.command {
        Commands::Generate {
            theme,
            prompts,
            output,
            no_save,
            config,
            ..
        } => {
            run_generate(GenerateOptions {
                theme,
                prompts,
                output,
                no_save,
                config,
            })
            .await?;
        }

        Commands::Config {
            config,
            show_secrets,
        } => {
            show_config(config.as_deref(), show_secrets)?;
        }
    }

    Ok(())
}
