use unicode_segmentation::UnicodeSegmentation;

use crate::stopwords::StopwordSet;

/// Tokens must be longer than this many characters.
const MAX_DISCARDED_LEN: usize = 2;

/// Splits text into candidate words.
pub trait WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Word boundaries per Unicode Standard Annex #29.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl WordTokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_string).collect()
    }
}

/// Turns normalized text into frequency-ready tokens.
///
/// A word is kept when it is entirely alphanumeric, longer than two
/// characters and not a stopword. Order and duplicates are preserved.
#[derive(Debug, Clone)]
pub struct Tokenizer<W = UnicodeWordTokenizer> {
    words: W,
    stopwords: StopwordSet,
}

impl Tokenizer<UnicodeWordTokenizer> {
    pub fn new(stopwords: StopwordSet) -> Self {
        Self::with_word_tokenizer(UnicodeWordTokenizer, stopwords)
    }
}

impl<W: WordTokenizer> Tokenizer<W> {
    pub fn with_word_tokenizer(words: W, stopwords: StopwordSet) -> Self {
        Tokenizer { words, stopwords }
    }

    pub fn stopwords(&self) -> &StopwordSet {
        &self.stopwords
    }

    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.words
            .tokenize(text)
            .into_iter()
            .filter(|word| self.keep(word))
            .collect()
    }

    fn keep(&self, word: &str) -> bool {
        word.chars().count() > MAX_DISCARDED_LEN
            && word.chars().all(char::is_alphanumeric)
            && !self.stopwords.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords::{BuiltinStopwords, Language};

    struct WhitespaceTokenizer;

    impl WordTokenizer for WhitespaceTokenizer {
        fn tokenize(&self, text: &str) -> Vec<String> {
            text.split_whitespace().map(str::to_string).collect()
        }
    }

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(StopwordSet::english_with_domain_defaults())
    }

    #[test]
    fn test_drops_short_tokens() {
        assert_eq!(tokenizer().tokenize("it is ev growth"), vec!["growth"]);
    }

    #[test]
    fn test_drops_language_and_domain_stopwords() {
        let tokens = tokenizer().tokenize("the annual report shows strong orderbook growth");
        assert_eq!(tokens, vec!["shows", "strong", "orderbook", "growth"]);
    }

    #[test]
    fn test_it_and_report_never_appear() {
        let tokens = tokenizer().tokenize("it report it report semiconductor");
        assert!(!tokens.iter().any(|t| t == "it" || t == "report"));
        assert_eq!(tokens, vec!["semiconductor"]);
    }

    #[test]
    fn test_keeps_duplicates_in_order() {
        let tokens = tokenizer().tokenize("gear shaft gear gear");
        assert_eq!(tokens, vec!["gear", "shaft", "gear", "gear"]);
    }

    #[test]
    fn test_keeps_numbers_longer_than_two() {
        assert_eq!(tokenizer().tokenize("fy 2024 12"), vec!["2024"]);
    }

    #[test]
    fn test_custom_stopwords_are_configuration() {
        let stopwords = StopwordSet::from_provider(&BuiltinStopwords, Language::English)
            .with_words(["sansera"]);
        let tokens = Tokenizer::new(stopwords).tokenize("sansera report growth");
        // "report" is only a stopword when the domain defaults are added.
        assert_eq!(tokens, vec!["report", "growth"]);
    }

    #[test]
    fn test_non_alphanumeric_words_are_dropped() {
        let t = Tokenizer::with_word_tokenizer(WhitespaceTokenizer, StopwordSet::default());
        assert_eq!(t.tokenize("xev-platform growth"), vec!["growth"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenizer().tokenize("").is_empty());
        assert!(tokenizer().tokenize(" ").is_empty());
    }
}
