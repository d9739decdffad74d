//! Connection settings for a generation service.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use whodunit_error::{ConfigError, WhodunitResult};

/// Connection settings injected into a driver at construction.
///
/// # Examples
///
/// ```
/// use whodunit_models::ModelConfig;
///
/// let config = ModelConfig {
///     api_key: "sk-test".to_string(),
///     base_url: "https://internlm-chat.intern-ai.org.cn/puyu/api/v1".to_string(),
///     model: "internlm2.5-latest".to_string(),
///     timeout_secs: 120,
/// };
/// assert!(config.validate().is_ok());
/// assert!(config.chat_completions_url().ends_with("/v1/chat/completions"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Bearer token for the service
    pub api_key: String,
    /// Base URL, with or without the `/chat/completions` suffix
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            timeout_secs: 120,
        }
    }
}

impl ModelConfig {
    /// Check that the settings can produce a working client.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the first unusable field.
    pub fn validate(&self) -> WhodunitResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::new(
                "model.api_key is empty (set API_KEY or WHODUNIT__MODEL__API_KEY)",
            )
            .into());
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::new("model.base_url is empty").into());
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::new("model.model is empty").into());
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::new("model.timeout_secs must be positive").into());
        }
        Ok(())
    }

    /// Full chat-completions endpoint derived from `base_url`.
    pub fn chat_completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else {
            format!("{base}/chat/completions")
        }
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
