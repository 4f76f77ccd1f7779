//! Core library for parascope
//!
//! This crate implements the **Functional Core** of the parascope application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The parascope project uses a three-crate architecture to enforce separation of concerns:
//!
//! - **`parascope_core`** (this crate): Pure transformation functions with zero I/O
//! - **`pdf`**: The page text source, turning PDF bytes into per-page text
//! - **`parascope`**: I/O operations and presentation (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no process-wide caches of mutable state
//! - **Deterministic**: Ties in frequency ranking resolve by first occurrence
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Pipeline
//!
//! ```text
//! page texts -> paragraphs -> matched paragraphs -> normalized text -> tokens -> ranked tokens
//!               paragraph     keyword               normalize          tokenize   frequency
//! ```
//!
//! # Module Organization
//!
//! - [`paragraph`]: Splitting page text into paragraphs on blank lines
//! - [`keyword`]: Keyword parsing and the keyword/min-length filter
//! - [`normalize`]: Lowercasing and punctuation stripping
//! - [`stopwords`]: Language stopwords and the custom domain list
//! - [`tokenize`]: Word tokenization with length and stopword filtering
//! - [`frequency`]: Token counting, top-N ranking and word-cloud weights
//! - [`export`]: CSV rendering of matched paragraphs
//! - [`pipeline`]: The end-to-end analysis over a document's page texts
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use parascope_core::{analyze, AnalysisRequest, KeywordSet, StopwordSet, Tokenizer};
//!
//! let pages = vec![Some("Intro.\n\nSemiconductor growth is strong.".to_string())];
//! let request = AnalysisRequest::new(KeywordSet::parse("semiconductor")?, 10);
//! let tokenizer = Tokenizer::new(StopwordSet::english_with_domain_defaults());
//!
//! let analysis = analyze(&pages, &request, &tokenizer);
//! assert_eq!(analysis.matched.len(), 1);
//! ```

pub mod error;
pub mod export;
pub mod frequency;
pub mod keyword;
pub mod normalize;
pub mod paragraph;
pub mod pipeline;
pub mod stopwords;
pub mod tokenize;

pub use error::AnalysisError;
pub use export::matched_paragraphs_csv;
pub use frequency::{rank_tokens, CloudWord, TokenCount, DEFAULT_TOP_N};
pub use keyword::{
    filter_paragraphs, Keyword, KeywordSet, DEFAULT_KEYWORDS, DEFAULT_MIN_LENGTH,
    MAX_MIN_LENGTH, MIN_MIN_LENGTH,
};
pub use normalize::normalize_text;
pub use paragraph::{extract_paragraphs, Paragraph};
pub use pipeline::{analyze, require_input, Analysis, AnalysisRequest, Frequencies};
pub use stopwords::{BuiltinStopwords, Language, StopwordProvider, StopwordSet};
pub use tokenize::{Tokenizer, UnicodeWordTokenizer, WordTokenizer};
