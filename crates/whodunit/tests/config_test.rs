//! Tests for layered configuration.

use std::collections::HashMap;
use std::io::Write;
use whodunit::{PipelineConfig, SamplingParams, WhodunitConfig};

#[test]
fn test_bundled_defaults() {
    let config = WhodunitConfig::from_toml_str("").unwrap();

    assert_eq!(config.pipeline, PipelineConfig::default());
    assert_eq!(config.sampling, SamplingParams::default());
    assert_eq!(config.model.timeout_secs, 120);
    assert_eq!(config.paths.output_dir.to_str(), Some("books/"));
    assert!(config.paths.prompts_dir.is_none());
}

#[test]
fn test_partial_override_keeps_other_defaults() {
    let config = WhodunitConfig::from_toml_str(
        r#"
        [model]
        model = "internlm2.5-latest"

        [pipeline]
        max_concurrency = 2

        [paths]
        prompts_dir = "my_prompts"
        "#,
    )
    .unwrap();

    assert_eq!(config.model.model, "internlm2.5-latest");
    assert_eq!(config.model.base_url, "https://api.openai.com/v1");
    assert_eq!(config.pipeline.max_concurrency, 2);
    assert_eq!(config.pipeline.max_attempts, 3);
    assert_eq!(config.pipeline.default_theme, "万圣节恐怖之夜");
    assert_eq!(
        config.paths.prompts_dir.as_deref().and_then(|p| p.to_str()),
        Some("my_prompts")
    );
}

#[test]
fn test_wrong_type_is_config_error() {
    let result = WhodunitConfig::from_toml_str("[pipeline]\nmax_attempts = \"many\"");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Configuration Error"));
}

#[test]
fn test_legacy_variables_override_model() {
    let mut config = WhodunitConfig::default();
    let env: HashMap<&str, &str> = [
        ("API_KEY", "sk-legacy"),
        ("BASE_URL", "https://internlm-chat.intern-ai.org.cn/puyu/api/v1"),
        ("MODEL_NAME", ""),
    ]
    .into_iter()
    .collect();

    config.apply_legacy_env(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.model.api_key, "sk-legacy");
    assert_eq!(
        config.model.base_url,
        "https://internlm-chat.intern-ai.org.cn/puyu/api/v1"
    );
    // Empty values are ignored
    assert_eq!(config.model.model, "gpt-4o-mini");
}

#[test]
fn test_explicit_file_is_layered() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[pipeline]\nmax_attempts = 5\n\n[sampling]\ntemperature = 0.9").unwrap();

    let config = WhodunitConfig::load(Some(file.path())).unwrap();

    assert_eq!(config.pipeline.max_attempts, 5);
    assert!((config.sampling.temperature - 0.9).abs() < f32::EPSILON);
    assert_eq!(config.sampling.max_tokens, 4096);
}

#[test]
fn test_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");
    assert!(WhodunitConfig::load(Some(&missing)).is_err());
}
