//! Paragraph extraction from per-page text.
//!
//! A paragraph is a maximal run of text separated by blank lines within a
//! single page. Pages are split independently, so a paragraph never spans a
//! page boundary.

use std::fmt;

use serde::Serialize;

/// Separator between paragraphs: two newlines. Longer runs leave only
/// newline-only fragments behind, which trimming discards.
const BLANK_LINE: &str = "\n\n";

/// A trimmed, non-empty unit of text in document reading order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    text: String,
    page: usize,
}

impl Paragraph {
    /// Trim `text` and wrap it, or return `None` when nothing is left.
    pub fn new(text: &str, page: usize) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Paragraph {
            text: trimmed.to_string(),
            page,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// 1-based page number the paragraph was found on.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Length in characters (Unicode scalar values), not bytes.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Split every page on blank lines and concatenate the results in page order.
///
/// `None` entries are pages whose text could not be extracted; they
/// contribute nothing.
pub fn extract_paragraphs(pages: &[Option<String>]) -> Vec<Paragraph> {
    let paragraphs: Vec<Paragraph> = pages
        .iter()
        .enumerate()
        .flat_map(|(idx, text)| split_page(text.as_deref().unwrap_or(""), idx + 1))
        .collect();

    log::debug!(
        "extracted {} paragraphs from {} pages",
        paragraphs.len(),
        pages.len()
    );

    paragraphs
}

fn split_page(text: &str, page: usize) -> impl Iterator<Item = Paragraph> + '_ {
    text.split(BLANK_LINE)
        .filter_map(move |fragment| Paragraph::new(fragment, page))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pages(texts: &[&str]) -> Vec<Option<String>> {
        texts.iter().map(|t| Some(t.to_string())).collect()
    }

    fn texts(paragraphs: &[Paragraph]) -> Vec<&str> {
        paragraphs.iter().map(Paragraph::as_str).collect()
    }

    #[test]
    fn test_paragraph_new_trims() {
        let p = Paragraph::new("  hello world \n", 1).unwrap();
        assert_eq!(p.as_str(), "hello world");
        assert_eq!(p.page(), 1);
    }

    #[test]
    fn test_paragraph_new_rejects_whitespace() {
        assert!(Paragraph::new("", 1).is_none());
        assert!(Paragraph::new(" \n\t ", 1).is_none());
    }

    #[test]
    fn test_char_len_counts_characters() {
        let p = Paragraph::new("café", 1).unwrap();
        assert_eq!(p.char_len(), 4);
    }

    #[test]
    fn test_paragraphs_do_not_cross_pages() {
        let result = extract_paragraphs(&pages(&["A\n\nB", "C"]));
        assert_eq!(texts(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_page_numbers_are_one_based() {
        let result = extract_paragraphs(&pages(&["A\n\nB", "C"]));
        let numbers: Vec<usize> = result.iter().map(Paragraph::page).collect();
        assert_eq!(numbers, vec![1, 1, 2]);
    }

    #[test]
    fn test_single_newline_does_not_split() {
        let result = extract_paragraphs(&pages(&["line one\nline two"]));
        assert_eq!(texts(&result), vec!["line one\nline two"]);
    }

    #[test]
    fn test_long_newline_runs_split_once() {
        let result = extract_paragraphs(&pages(&["A\n\n\nB\n\n\n\n\nC"]));
        assert_eq!(texts(&result), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_blank_line_with_spaces_is_not_a_break() {
        // Only consecutive newline characters separate paragraphs.
        let result = extract_paragraphs(&pages(&["A\n \nB"]));
        assert_eq!(texts(&result), vec!["A\n \nB"]);
    }

    #[test]
    fn test_missing_and_empty_pages_contribute_nothing() {
        let input = vec![None, Some(String::new()), Some("  \n\n ".to_string())];
        assert!(extract_paragraphs(&input).is_empty());
    }

    #[test]
    fn test_page_without_breaks_is_one_paragraph() {
        let result = extract_paragraphs(&pages(&["  Whole page text.  "]));
        assert_eq!(texts(&result), vec!["Whole page text."]);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let input = pages(&["Intro.\n\nBody text.", "Second page\n\nEnd."]);
        assert_eq!(extract_paragraphs(&input), extract_paragraphs(&input));
    }
}
