//! HTML rendering of cleaned text for display

use regex::{Captures, Regex};
use std::sync::LazyLock;

// Escaped input: `&amp;` may sit inside a URL, other entities end it
static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://(?:[^\s<>&]|&amp;)+").unwrap());

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', '!', '?'];

/// Escape the characters that are significant in HTML
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Wrap bare URLs in anchors, leaving sentence punctuation outside the link.
///
/// Expects already-escaped text.
#[must_use]
pub fn linkify(escaped: &str) -> String {
    BARE_URL
        .replace_all(escaped, |caps: &Captures<'_>| {
            let matched = &caps[0];
            let url = matched.trim_end_matches(TRAILING_PUNCTUATION);
            let punctuation = &matched[url.len()..];
            format!(
                r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a>{punctuation}"#
            )
        })
        .into_owned()
}

/// Escape, linkify and turn newlines into `<br>`
#[must_use]
pub fn render_html(text: &str) -> String {
    linkify(&escape_html(text)).replace('\n', "<br>")
}
