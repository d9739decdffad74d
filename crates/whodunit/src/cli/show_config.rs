//! Effective configuration display.

use std::path::Path;
use whodunit::{ConfigError, WhodunitConfig, WhodunitResult};

/// Render the merged configuration as TOML, masking the API key unless
/// `show_secrets` is set.
pub fn render_config(config: &WhodunitConfig, show_secrets: bool) -> WhodunitResult<String> {
    let mut config = config.clone();
    if !show_secrets && !config.model.api_key.is_empty() {
        config.model.api_key = "********".to_string();
    }
    toml::to_string_pretty(&config)
        .map_err(|e| ConfigError::new(format!("Failed to render configuration: {}", e)).into())
}

/// Load and print the effective configuration.
pub fn show_config(explicit: Option<&Path>, show_secrets: bool) -> WhodunitResult<()> {
    let config = WhodunitConfig::load(explicit)?;
    print!("{}", render_config(&config, show_secrets)?);
    Ok(())
}
