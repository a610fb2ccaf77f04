//! Removal of leftovers from HTML-to-text conversion

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Entities decoded in this order
const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&amp;", "&"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&nbsp;", " "),
];

// `555-123-4567 <tel:5551234567>`
static PHONE_DUPLICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{3}-\d{3}-\d{4})\s*<(?:tel:)?\+?\d{10,11}>").unwrap()
});

// `example.com <https://example.com/page>`, display text starting a word
static LINK_DUPLICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(^|[\s(])(?:https?://)?[a-z0-9-]+(?:\.[a-z0-9-]+)*\.[a-z]{2,}(?:/[^\s<>]*)?\s*<(https?://[^\s<>]+)>")
        .unwrap()
});

// `user@example.com <mailto:user@example.com>`
static MAILTO_DUPLICATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})\s*<mailto:([^\s<>]+)>").unwrap()
});

static BRACKETED_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(https?://[^\s<>]+)>").unwrap());

static ENTITY_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[^<>\n]*&(?:lt|gt|amp|quot|#39|nbsp);[^<>\n]*>").unwrap()
});

/// Decode the small entity set that survives text conversion
#[must_use]
pub fn decode_entities(text: &str) -> String {
    ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, literal)| {
            acc.replace(entity, literal)
        })
}

/// Collapse `display <canonical>` pairs and strip stray angle-bracket wrappers.
///
/// A mailto pair is only collapsed when both addresses are identical.
#[must_use]
pub fn clean_artifacts(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let decoded = decode_entities(text);
    let text = PHONE_DUPLICATE.replace_all(&decoded, "$1");
    let text = LINK_DUPLICATE.replace_all(&text, "$1$2");
    let text = MAILTO_DUPLICATE.replace_all(&text, |caps: &Captures<'_>| {
        if caps[1] == caps[2] {
            caps[1].to_string()
        } else {
            caps[0].to_string()
        }
    });
    let text = BRACKETED_URL.replace_all(&text, "$1");

    ENTITY_FRAGMENT.replace_all(&text, "").into_owned()
}
