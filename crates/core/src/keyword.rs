//! Keyword parsing and the keyword/minimum-length paragraph filter.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::paragraph::Paragraph;

/// Keywords used when none are supplied.
pub const DEFAULT_KEYWORDS: &str = "semiconductor, aerospace, xEV, orderbook";

/// Default minimum paragraph length, in characters.
pub const DEFAULT_MIN_LENGTH: usize = 50;

/// Lower bound the shell enforces on the minimum paragraph length.
pub const MIN_MIN_LENGTH: usize = 20;

/// Upper bound the shell enforces on the minimum paragraph length.
pub const MAX_MIN_LENGTH: usize = 2000;

/// A trimmed, lowercased, non-empty keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Keyword(trimmed.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered, non-empty list of keywords. Duplicates are kept; they never
/// change which paragraphs match.
///
/// Serialized as a plain list of strings. Deserializing goes through
/// [`KeywordSet::from_iter_checked`], so a blank list is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet {
    keywords: Vec<Keyword>,
}

impl KeywordSet {
    /// Parse comma-separated user input such as `"semiconductor, xEV"`.
    ///
    /// Fails with [`AnalysisError::InvalidInput`] when no keyword survives
    /// trimming (e.g. `"   ,  ,"`).
    pub fn parse(input: &str) -> Result<Self, AnalysisError> {
        Self::from_iter_checked(input.split(','))
    }

    /// Build from already-separated keywords, applying the same validation.
    pub fn from_iter_checked<'a, I>(raw: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let keywords: Vec<Keyword> = raw.into_iter().filter_map(Keyword::new).collect();
        if keywords.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "enter at least one keyword".to_string(),
            ));
        }
        Ok(KeywordSet { keywords })
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyword> {
        self.keywords.iter()
    }

    /// Case-insensitive substring test against any keyword.
    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| haystack.contains(keyword.as_str()))
    }
}

impl TryFrom<Vec<String>> for KeywordSet {
    type Error = AnalysisError;

    fn try_from(raw: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_iter_checked(raw.iter().map(String::as_str))
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.keywords.into_iter().map(|k| k.0).collect()
    }
}

/// Keep paragraphs at least `min_length` characters long that contain at
/// least one keyword. Order is preserved.
pub fn filter_paragraphs(
    paragraphs: &[Paragraph],
    keywords: &KeywordSet,
    min_length: usize,
) -> Vec<Paragraph> {
    let matched: Vec<Paragraph> = paragraphs
        .iter()
        .filter(|p| p.char_len() >= min_length && keywords.matches(p.as_str()))
        .cloned()
        .collect();

    log::debug!(
        "{} of {} paragraphs matched {} keywords (min length {})",
        matched.len(),
        paragraphs.len(),
        keywords.len(),
        min_length
    );

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraphs(texts: &[&str]) -> Vec<Paragraph> {
        texts
            .iter()
            .filter_map(|t| Paragraph::new(t, 1))
            .collect()
    }

    #[test]
    fn test_parse_trims_and_lowercases() {
        let set = KeywordSet::parse(" Semiconductor ,xEV,  ").unwrap();
        let words: Vec<&str> = set.iter().map(Keyword::as_str).collect();
        assert_eq!(words, vec!["semiconductor", "xev"]);
    }

    #[test]
    fn test_parse_default_keywords() {
        let set = KeywordSet::parse(DEFAULT_KEYWORDS).unwrap();
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_parse_only_separators_is_invalid() {
        let result = KeywordSet::parse("   ,  ,");
        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_empty_is_invalid() {
        assert!(KeywordSet::parse("").is_err());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let set = KeywordSet::parse("gear, gear").unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_deserialize_applies_parse_rules() {
        let set: KeywordSet = serde_json::from_str(r#"[" Semiconductor ", "", "xEV"]"#).unwrap();
        assert_eq!(set, KeywordSet::parse("semiconductor, xev").unwrap());
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"["semiconductor","xev"]"#
        );
    }

    #[test]
    fn test_deserialize_blank_list_is_rejected() {
        assert!(serde_json::from_str::<KeywordSet>(r#"["  ", ""]"#).is_err());
        assert!(serde_json::from_str::<KeywordSet>("[]").is_err());
    }

    #[test]
    fn test_request_deserialize_validates_keywords() {
        let json = r#"{"keywords": ["   "], "min_length": 50, "top_n": 50}"#;
        assert!(serde_json::from_str::<crate::AnalysisRequest>(json).is_err());
    }

    #[test]
    fn test_matches_case_insensitive() {
        let set = KeywordSet::parse("XeV").unwrap();
        assert!(set.matches("the xev platform"));
        assert!(set.matches("The XEV platform"));
        assert!(!set.matches("the ev platform"));
    }

    #[test]
    fn test_matches_substring() {
        let set = KeywordSet::parse("semi").unwrap();
        assert!(set.matches("Semiconductors are growing"));
    }

    #[test]
    fn test_filter_requires_keyword_and_length() {
        let input = paragraphs(&[
            "Semiconductor growth is strong.",
            "Semi.",
            "Unrelated but very long paragraph of text.",
        ]);
        let set = KeywordSet::parse("semi").unwrap();
        let matched = filter_paragraphs(&input, &set, 10);
        let texts: Vec<&str> = matched.iter().map(Paragraph::as_str).collect();
        assert_eq!(texts, vec!["Semiconductor growth is strong."]);
    }

    #[test]
    fn test_filter_length_is_inclusive() {
        let input = paragraphs(&["abc gear"]);
        let set = KeywordSet::parse("gear").unwrap();
        assert_eq!(filter_paragraphs(&input, &set, 8).len(), 1);
        assert_eq!(filter_paragraphs(&input, &set, 9).len(), 0);
    }

    #[test]
    fn test_filter_preserves_order() {
        let input = paragraphs(&["b gear", "a gear", "c gear"]);
        let set = KeywordSet::parse("gear").unwrap();
        let matched = filter_paragraphs(&input, &set, 1);
        let texts: Vec<&str> = matched.iter().map(Paragraph::as_str).collect();
        assert_eq!(texts, vec!["b gear", "a gear", "c gear"]);
    }

    #[test]
    fn test_filter_is_monotonic_in_min_length() {
        let input = paragraphs(&[
            "gear",
            "gear box",
            "gear box assembly",
            "gear box assembly line expansion",
        ]);
        let set = KeywordSet::parse("gear").unwrap();
        let mut previous = usize::MAX;
        for min_length in 0..40 {
            let count = filter_paragraphs(&input, &set, min_length).len();
            assert!(count <= previous, "min_length {min_length} grew the match set");
            previous = count;
        }
    }
}
