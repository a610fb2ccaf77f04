//! Character-level repair of raw bodies

use tracing::trace;

/// Symbols kept even though they sit in a pruned block
pub const SYMBOL_WHITELIST: &[char] = &[
    // bullets
    '\u{2022}', '\u{2023}', '\u{2043}', '\u{25E6}',
    // arrows
    '\u{2192}', '\u{2190}', '\u{2191}', '\u{2193}',
    // check and cross marks
    '\u{2713}', '\u{2714}', '\u{2717}', '\u{2718}',
    // stars
    '\u{2605}', '\u{2606}',
];

/// Miscellaneous Symbols and Dingbats
const PRUNED_BLOCKS: &[(char, char)] = &[('\u{2600}', '\u{26FF}'), ('\u{2700}', '\u{27BF}')];

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

/// Check whether a symbol survives pruning
#[must_use]
pub fn is_whitelisted_symbol(c: char) -> bool {
    SYMBOL_WHITELIST.contains(&c)
}

fn is_pruned(c: char) -> bool {
    if c == VARIATION_SELECTOR_16 || u32::from(c) > 0xFFFF {
        return true;
    }
    PRUNED_BLOCKS
        .iter()
        .any(|&(start, end)| (start..=end).contains(&c))
        && !is_whitelisted_symbol(c)
}

/// Canonical replacement for a character, `None` meaning "drop it"
const fn canonicalize(c: char) -> Option<char> {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{2032}' | '\u{02BC}' => Some('\''),
        '\u{201C}' | '\u{201D}' => Some('"'),
        '\u{2013}' | '\u{2014}' => Some('-'),
        '\u{00A0}' => Some(' '),
        '\u{FFFD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{FEFF}' => None,
        other => Some(other),
    }
}

/// Windows-1252 characters for bytes 0x80..=0x9F, `None` where the byte is unassigned
const WINDOWS_1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'), None, Some('\u{201A}'), Some('\u{0192}'),
    Some('\u{201E}'), Some('\u{2026}'), Some('\u{2020}'), Some('\u{2021}'),
    Some('\u{02C6}'), Some('\u{2030}'), Some('\u{0160}'), Some('\u{2039}'),
    Some('\u{0152}'), None, Some('\u{017D}'), None,
    None, Some('\u{2018}'), Some('\u{2019}'), Some('\u{201C}'),
    Some('\u{201D}'), Some('\u{2022}'), Some('\u{2013}'), Some('\u{2014}'),
    Some('\u{02DC}'), Some('\u{2122}'), Some('\u{0161}'), Some('\u{203A}'),
    Some('\u{0153}'), None, Some('\u{017E}'), Some('\u{0178}'),
];

/// Byte a char came from when text was decoded as Windows-1252 or Latin-1
fn single_byte(c: char) -> Option<u8> {
    if let Ok(byte) = u8::try_from(u32::from(c)) {
        return Some(byte);
    }
    WINDOWS_1252_HIGH
        .iter()
        .position(|&mapped| mapped == Some(c))
        .and_then(|offset| u8::try_from(0x80 + offset).ok())
}

/// Undo UTF-8 that was decoded one byte per char (`â€™` and friends).
///
/// Every char must map back to a single Windows-1252 or Latin-1 byte. Anything
/// that does not decode cleanly is returned untouched.
fn redecode_utf8(text: &str) -> Option<String> {
    if text.is_ascii() {
        return None;
    }

    let bytes = text.chars().map(single_byte).collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}

/// Repair and prune the characters of a raw body.
///
/// Line structure is preserved; characters are only replaced or removed.
/// Removed symbols leave their surrounding spaces in place.
#[must_use]
pub fn normalize_unicode(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let repaired = redecode_utf8(raw);
    if repaired.is_some() {
        trace!("Re-decoded mis-encoded UTF-8 body");
    }
    let source = repaired.as_deref().unwrap_or(raw);

    source
        .chars()
        .filter_map(canonicalize)
        .filter(|&c| !is_pruned(c))
        .collect()
}
