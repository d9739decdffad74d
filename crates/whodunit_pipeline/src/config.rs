//! Pipeline tuning.

use serde::{Deserialize, Serialize};

/// Default system prompt sent ahead of every stage prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str = "你是一个专业的剧本杀剧本写作助手，正在帮助用户写一本剧本杀剧本。";

/// Theme used when the caller supplies none.
pub const DEFAULT_THEME: &str = "万圣节恐怖之夜";

/// Settings for one [`ScriptWriter`](crate::ScriptWriter).
///
/// Missing fields deserialize to their defaults, so a partial `[pipeline]`
/// table is valid.
///
/// # Examples
///
/// ```
/// use whodunit_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.max_attempts, 3);
/// assert_eq!(config.max_concurrency, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Attempts per generation call before degrading
    pub max_attempts: u32,
    /// Character tasks in flight at once (at least 1)
    pub max_concurrency: usize,
    /// System message for every request
    pub system_prompt: String,
    /// Theme used for an empty request
    pub default_theme: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            max_concurrency: 4,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            default_theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Theme to write about, falling back to the default for blank input.
    pub fn resolve_theme<'a>(&'a self, theme: &'a str) -> &'a str {
        let theme = theme.trim();
        if theme.is_empty() {
            &self.default_theme
        } else {
            theme
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_theme_uses_default() {
        let config = PipelineConfig::default();
        assert_eq!(config.resolve_theme("   "), "万圣节恐怖之夜");
        assert_eq!(config.resolve_theme(" 雪夜山庄 "), "雪夜山庄");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"max_concurrency": 2}"#).unwrap();
        assert_eq!(config.max_concurrency, 2);
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }
}
