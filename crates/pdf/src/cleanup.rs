use unicode_normalization::UnicodeNormalization;

const LIGATURES: [(char, &str); 5] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
];

/// Clean up extracted page text.
///
/// Applies NFC normalization, expands the Latin ligatures U+FB00..=U+FB04 and
/// drops U+FFFD left behind by undecodable glyphs. Line structure is kept
/// untouched so paragraph breaks survive.
pub fn cleanup_page_text(text: &str) -> String {
    let normalized: String = text.nfc().collect();

    let mut out = String::with_capacity(normalized.len());
    for ch in normalized.chars() {
        if ch == '\u{FFFD}' {
            continue;
        }
        match LIGATURES.iter().find(|(lig, _)| *lig == ch) {
            Some((_, replacement)) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
    out
}
