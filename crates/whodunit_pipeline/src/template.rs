//! Prompt template rendering.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]+)\}").expect("Valid placeholder regex"));

/// Substitute `{key}` placeholders in `template`.
///
/// Placeholders without an entry in `substitutions` are left verbatim, so
/// literal JSON examples inside a prompt survive rendering. Substituted
/// values are never re-scanned.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use whodunit_pipeline::render;
///
/// let mut subs = BTreeMap::new();
/// subs.insert("theme".to_string(), "雪夜".to_string());
///
/// let prompt = render("主题：{theme}，格式：{\"title\": \"...\"} {unknown}", &subs);
/// assert_eq!(prompt, "主题：雪夜，格式：{\"title\": \"...\"} {unknown}");
/// ```
pub fn render(template: &str, substitutions: &BTreeMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            match substitutions.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let out = render("{a}-{b}-{a}", &subs(&[("a", "1"), ("b", "2")]));
        assert_eq!(out, "1-2-1");
    }

    #[test]
    fn test_unknown_placeholders_left_verbatim() {
        let out = render("{known} {missing}", &subs(&[("known", "x")]));
        assert_eq!(out, "x {missing}");
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let out = render("{a} {b}", &subs(&[("a", "{b}"), ("b", "B")]));
        assert_eq!(out, "{b} B");
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let map = subs(&[("theme", "万圣节恐怖之夜"), ("intro", "{\"title\":\"T\"}")]);
        let template = "主题：{theme}\n信息：{intro}\n{\"num\": 6}";
        assert_eq!(render(template, &map), render(template, &map));
    }

    #[test]
    fn test_empty_map_returns_template() {
        let template = "无占位符 {\"k\": 1}";
        assert_eq!(render(template, &BTreeMap::new()), template);
    }
}
