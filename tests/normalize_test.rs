use email_clean::*;

#[test]
fn test_empty_input() {
    assert_eq!(normalize_unicode(""), "");
}

#[test]
fn test_emoji_removed_check_mark_kept() {
    // Removed symbols leave their spacing behind
    assert_eq!(normalize_unicode("Great job! ✓ 🎉"), "Great job! ✓ ");
}

#[test]
fn test_punctuation_canonicalized() {
    let raw = "\u{201C}It\u{2019}s done\u{201D} \u{2014} Bob\u{2032}s call \u{2013} 5\u{02BC}";
    assert_eq!(normalize_unicode(raw), "\"It's done\" - Bob's call - 5'");
}

#[test]
fn test_invisible_characters_removed() {
    assert_eq!(normalize_unicode("a\u{00A0}b\u{200B}c\u{200D}d\u{FEFF}e\u{FFFD}"), "a bcde");
}

#[test]
fn test_symbol_blocks_pruned() {
    assert_eq!(normalize_unicode("Sun \u{2600}\u{FE0F} and \u{2605}"), "Sun  and \u{2605}");
    assert_eq!(normalize_unicode("cut \u{2702} here"), "cut  here");
}

#[test]
fn test_whitelist_survives() {
    let raw = "\u{2022} one \u{2192} two \u{2714} \u{2718} \u{2606} \u{25E6}";
    assert_eq!(normalize_unicode(raw), raw);
}

#[test]
fn test_whitelist_membership() {
    assert!(is_whitelisted_symbol('✓'));
    assert!(is_whitelisted_symbol('★'));
    assert!(!is_whitelisted_symbol('☀'));
    assert_eq!(SYMBOL_WHITELIST.len(), 14);
}

#[test]
fn test_mojibake_repaired() {
    // UTF-8 for U+2019 read as three Latin-1 chars
    assert_eq!(normalize_unicode("It\u{00E2}\u{0080}\u{0099}s"), "It's");
    assert_eq!(normalize_unicode("\u{00C2}\u{00A3}5"), "£5");
}

#[test]
fn test_windows_1252_mojibake_repaired() {
    // UTF-8 for U+2019 read as Windows-1252: `â€™`
    assert_eq!(normalize_unicode("It\u{00E2}\u{20AC}\u{2122}s done"), "It's done");
    // U+201C/U+201D read the same way: `â€œ` / `â€\u{9D}`
    assert_eq!(
        normalize_unicode("\u{00E2}\u{20AC}\u{0153}Hi\u{00E2}\u{20AC}\u{009D}"),
        "\"Hi\""
    );
    assert_eq!(normalize_unicode("caf\u{00C3}\u{00A9}"), "café");
}

#[test]
fn test_genuine_windows_1252_text_untouched() {
    assert_eq!(normalize_unicode("5 \u{20AC} \u{2014} fine"), "5 \u{20AC} - fine");
}

#[test]
fn test_genuine_latin1_untouched() {
    assert_eq!(normalize_unicode("café au lait"), "café au lait");
}

#[test]
fn test_line_structure_kept() {
    assert_eq!(normalize_unicode("a\n\u{2600}\nb"), "a\n\nb");
}
