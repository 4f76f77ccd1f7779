//! Stopword data and configuration.
//!
//! The language list comes from a [`StopwordProvider`]; the custom domain
//! list is configuration layered on top. Both are merged into an immutable
//! [`StopwordSet`] that is handed to the tokenizer explicitly.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Domain terms that dominate annual-report style documents without carrying
/// meaning. Document-specific proper nouns are added by the caller.
pub const DEFAULT_DOMAIN_STOPWORDS: &[&str] = &[
    "company",
    "annual",
    "report",
    "page",
    "engineering",
    "limited",
    "note",
    "notes",
    "figure",
    "table",
    "financial",
];

/// The standard English stopword list (NLTK corpus).
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::English => write!(f, "english"),
        }
    }
}

/// Source of standard stopwords for a language.
///
/// Implementations must be ready before first use; the core never triggers
/// downloads or other initialization on its own.
pub trait StopwordProvider {
    fn get_stopwords(&self, language: Language) -> HashSet<String>;
}

/// Stopword lists compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinStopwords;

impl StopwordProvider for BuiltinStopwords {
    fn get_stopwords(&self, language: Language) -> HashSet<String> {
        match language {
            Language::English => ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// The combined language + domain stopword set used by the tokenizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Start from the provider's list for `language`.
    pub fn from_provider(provider: &dyn StopwordProvider, language: Language) -> Self {
        StopwordSet {
            words: provider.get_stopwords(language),
        }
    }

    /// English stopwords plus [`DEFAULT_DOMAIN_STOPWORDS`].
    pub fn english_with_domain_defaults() -> Self {
        Self::from_provider(&BuiltinStopwords, Language::English)
            .with_words(DEFAULT_DOMAIN_STOPWORDS.iter().copied())
    }

    /// Add custom words. Entries are trimmed and lowercased; blanks are ignored.
    pub fn with_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parse a stopwords file body: one word per line, `#` starts a comment.
pub fn parse_stopword_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(Vec<&'static str>);

    impl StopwordProvider for FixedProvider {
        fn get_stopwords(&self, _language: Language) -> HashSet<String> {
            self.0.iter().map(|w| w.to_string()).collect()
        }
    }

    #[test]
    fn test_builtin_english_has_common_words() {
        let words = BuiltinStopwords.get_stopwords(Language::English);
        assert_eq!(words.len(), 179);
        assert!(words.contains("the"));
        assert!(words.contains("ourselves"));
        assert!(!words.contains("semiconductor"));
    }

    #[test]
    fn test_domain_defaults_are_included() {
        let set = StopwordSet::english_with_domain_defaults();
        assert!(set.contains("report"));
        assert!(set.contains("financial"));
        assert!(set.contains("the"));
    }

    #[test]
    fn test_with_words_normalizes_entries() {
        let set = StopwordSet::from_provider(&FixedProvider(vec![]), Language::English)
            .with_words(["  Sansera ", "", "   "]);
        assert_eq!(set.len(), 1);
        assert!(set.contains("sansera"));
    }

    #[test]
    fn test_from_provider_uses_injected_list() {
        let set = StopwordSet::from_provider(&FixedProvider(vec!["alpha"]), Language::English);
        assert!(set.contains("alpha"));
        assert!(!set.contains("the"));
    }

    #[test]
    fn test_parse_stopword_list() {
        let contents = "# proper nouns\nSansera\n\n  gearbox  # product line\n#ignored\n";
        assert_eq!(parse_stopword_list(contents), vec!["sansera", "gearbox"]);
    }

    #[test]
    fn test_language_display() {
        assert_eq!(Language::English.to_string(), "english");
    }
}
