//! Token frequency ranking.
//!
//! Counts are ordered by count descending. Ties keep the order in which each
//! token first appeared, so identical input always ranks identically.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Number of tokens kept in the frequency table.
pub const DEFAULT_TOP_N: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

/// A word-cloud entry: the token, its count and its size relative to the
/// most frequent token, in `(0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudWord {
    pub token: String,
    pub count: usize,
    pub weight: f64,
}

/// Count tokens and return the `top_n` most frequent.
pub fn rank_tokens<S: AsRef<str>>(tokens: &[S], top_n: usize) -> Vec<TokenCount> {
    // Vec keeps first-seen order, the map only locates a token's slot.
    let mut counts: Vec<TokenCount> = Vec::new();
    let mut slots: HashMap<&str, usize> = HashMap::new();

    for token in tokens {
        let token = token.as_ref();
        match slots.get(token) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(token, counts.len());
                counts.push(TokenCount {
                    token: token.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(top_n);
    counts
}

/// Scale ranked counts against the largest one.
pub fn cloud_weights(ranked: &[TokenCount]) -> Vec<CloudWord> {
    let max = ranked.iter().map(|t| t.count).max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }

    ranked
        .iter()
        .map(|t| CloudWord {
            token: t.token.clone(),
            count: t.count,
            weight: t.count as f64 / max as f64,
        })
        .collect()
}
