// src/parser/html.rs

//! Plain-text extraction from menu HTML.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;

/// Tags after which the rendered text continues on a new line.
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(?:p|div|li|h[1-6]|tr)\s*>").expect("static pattern")
});

/// Strip markup from an HTML fragment, keeping line structure.
pub fn html_to_text(html: &str) -> String {
    let html = LINE_BREAKS.replace_all(html, "$0\n");
    Html::parse_fragment(&html)
        .root_element()
        .text()
        .collect()
}

/// Split text into lines on any line terminator.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c| {
        matches!(
            c,
            '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{85}' | '\u{2028}' | '\u{2029}'
        )
    })
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
