//! End-to-end analysis over a document's page texts.
//!
//! Each stage consumes its whole input before the next begins. Nothing is
//! cached between runs; a parameter change means calling [`analyze`] again.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::frequency::{cloud_weights, rank_tokens, CloudWord, TokenCount, DEFAULT_TOP_N};
use crate::keyword::{filter_paragraphs, KeywordSet, DEFAULT_MIN_LENGTH};
use crate::normalize::{join_paragraphs, normalize_text};
use crate::paragraph::{extract_paragraphs, Paragraph};
use crate::tokenize::{Tokenizer, WordTokenizer};

/// Validated parameters for one run. Deserializing validates the keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub keywords: KeywordSet,
    pub min_length: usize,
    pub top_n: usize,
}

impl AnalysisRequest {
    pub fn new(keywords: KeywordSet, min_length: usize) -> Self {
        AnalysisRequest {
            keywords,
            min_length,
            top_n: DEFAULT_TOP_N,
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

impl From<KeywordSet> for AnalysisRequest {
    fn from(keywords: KeywordSet) -> Self {
        AnalysisRequest::new(keywords, DEFAULT_MIN_LENGTH)
    }
}

/// Token statistics over the matched paragraphs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frequencies {
    /// Tokens kept after stopword and length filtering, before ranking.
    pub total_tokens: usize,
    pub top_tokens: Vec<TokenCount>,
    pub cloud: Vec<CloudWord>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub paragraph_count: usize,
    pub keyword_count: usize,
    pub matched: Vec<Paragraph>,
    /// `None` when no paragraph matched: token statistics are skipped.
    pub frequencies: Option<Frequencies>,
}

impl Analysis {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// True for the zero-match outcome, which is a result and not an error.
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }
}

/// Reject absent or empty PDF input before any parsing happens.
pub fn require_input(bytes: Option<&[u8]>) -> Result<&[u8], AnalysisError> {
    match bytes {
        Some(bytes) if !bytes.is_empty() => Ok(bytes),
        _ => Err(AnalysisError::MissingInput),
    }
}

/// Run the full pipeline: paragraphs, keyword filter, normalization,
/// tokenization and ranking.
pub fn analyze<W: WordTokenizer>(
    pages: &[Option<String>],
    request: &AnalysisRequest,
    tokenizer: &Tokenizer<W>,
) -> Analysis {
    let paragraphs = extract_paragraphs(pages);
    let matched = filter_paragraphs(&paragraphs, &request.keywords, request.min_length);

    let frequencies = if matched.is_empty() {
        log::debug!("no paragraphs matched; skipping token statistics");
        None
    } else {
        Some(frequencies(&matched, request.top_n, tokenizer))
    };

    Analysis {
        paragraph_count: paragraphs.len(),
        keyword_count: request.keywords.len(),
        matched,
        frequencies,
    }
}

fn frequencies<W: WordTokenizer>(
    matched: &[Paragraph],
    top_n: usize,
    tokenizer: &Tokenizer<W>,
) -> Frequencies {
    let normalized = normalize_text(&join_paragraphs(matched));
    let tokens = tokenizer.tokenize(&normalized);
    let top_tokens = rank_tokens(&tokens, top_n);
    let cloud = cloud_weights(&top_tokens);

    log::debug!(
        "{} tokens, {} distinct in top {}",
        tokens.len(),
        top_tokens.len(),
        top_n
    );

    Frequencies {
        total_tokens: tokens.len(),
        top_tokens,
        cloud,
    }
}
