//! LaTeX display math to markdown.

use regex::Regex;
use std::sync::LazyLock;

static DISPLAY_MATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\\[((?:\\.|[^\\\]])*?)\\\]").expect("Valid display math regex")
});

/// Rewrite `\[ ... \]` display math as `$$ ... $$`.
///
/// An opening `\[` that is itself escaped (`\\[`) is left alone.
///
/// # Examples
///
/// ```
/// use whodunit_pipeline::convert_latex_to_markdown;
///
/// assert_eq!(convert_latex_to_markdown(r"面积 \[a^2\]"), "面积 $$a^2$$");
/// ```
pub fn convert_latex_to_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut pos = 0;

    while let Some(caps) = DISPLAY_MATH.captures_at(text, pos) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        if text[..whole.start()].ends_with('\\') {
            // Escaped opening; a real block may start inside this match.
            pos = whole.start() + 1;
            continue;
        }
        out.push_str(&text[last..whole.start()]);
        out.push_str("$$");
        out.push_str(body.as_str());
        out.push_str("$$");
        last = whole.end();
        pos = whole.end();
    }

    out.push_str(&text[last..]);
    out
}
