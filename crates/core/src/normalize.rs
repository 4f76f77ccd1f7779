use std::sync::LazyLock;

use regex::Regex;

use crate::paragraph::Paragraph;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s]").expect("literal pattern compiles"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("literal pattern compiles"));

/// Join matched paragraphs with a single space, in matched order.
pub fn join_paragraphs(paragraphs: &[Paragraph]) -> String {
    paragraphs
        .iter()
        .map(Paragraph::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, replace anything outside `[a-z0-9\s]` with a space, then
/// collapse whitespace runs to one space.
///
/// Replacement happens before collapsing so removed punctuation cannot leave
/// double spaces behind. Leading or trailing single spaces are kept.
pub fn normalize_text(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = DISALLOWED.replace_all(&lowered, " ");
    WHITESPACE_RUN.replace_all(&replaced, " ").into_owned()
}
