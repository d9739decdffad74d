//! Layered application configuration.
//!
//! Sources, lowest precedence first:
//! 1. Bundled defaults (include_str! from whodunit.toml)
//! 2. `~/.config/whodunit/whodunit.toml`
//! 3. `./whodunit.toml`
//! 4. An explicit file, if given
//! 5. `WHODUNIT__SECTION__KEY` environment variables
//! 6. `API_KEY`, `BASE_URL` and `MODEL_NAME` for the model section

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use whodunit_core::SamplingParams;
use whodunit_error::{ConfigError, WhodunitError, WhodunitResult};
use whodunit_models::ModelConfig;
use whodunit_pipeline::PipelineConfig;

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../whodunit.toml");

/// Filesystem locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory whose templates override the bundled prompts
    pub prompts_dir: Option<PathBuf>,
    /// Directory saved scripts are written to
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            prompts_dir: None,
            output_dir: PathBuf::from("books/"),
        }
    }
}

/// Everything the `whodunit` binary needs to run.
///
/// # Example
///
/// ```toml
/// [model]
/// api_key = "sk-..."
/// base_url = "https://internlm-chat.intern-ai.org.cn/puyu/api/v1"
/// model = "internlm2.5-latest"
///
/// [pipeline]
/// max_concurrency = 2
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WhodunitConfig {
    /// Generation service connection
    pub model: ModelConfig,
    /// Decoding parameters for every request
    pub sampling: SamplingParams,
    /// Retry and concurrency settings
    pub pipeline: PipelineConfig,
    /// Prompt and output locations
    pub paths: PathsConfig,
}

impl WhodunitConfig {
    /// Load configuration from every source, with `explicit` layered above
    /// the user files.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a file cannot be read or a value has the
    /// wrong type. An explicit file that does not exist is an error; the user
    /// files are optional.
    #[instrument(name = "whodunit_config_load")]
    pub fn load(explicit: Option<&Path>) -> WhodunitResult<Self> {
        debug!("Loading configuration with precedence: env > explicit file > current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/whodunit/whodunit.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("whodunit").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("WHODUNIT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = builder
            .build()
            .map_err(|e| {
                WhodunitError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                WhodunitError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.apply_legacy_env(|key| std::env::var(key).ok());
        debug!(
            base_url = %config.model.base_url,
            model = %config.model.model,
            max_concurrency = config.pipeline.max_concurrency,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Parse configuration from TOML text layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the text is not valid TOML or a value has
    /// the wrong type.
    pub fn from_toml_str(text: &str) -> WhodunitResult<Self> {
        Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .and_then(Config::try_deserialize)
            .map_err(|e| {
                WhodunitError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Apply the `API_KEY`, `BASE_URL` and `MODEL_NAME` variables.
    ///
    /// Empty values are ignored.
    pub fn apply_legacy_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let fields = [
            ("API_KEY", &mut self.model.api_key),
            ("BASE_URL", &mut self.model.base_url),
            ("MODEL_NAME", &mut self.model.model),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                debug!(key, "Applying legacy environment variable");
                *field = value;
            }
        }
    }
}
