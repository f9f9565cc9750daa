//! Vocabulary-overlap similarity between users.
//!
//! A user's vocabulary is the set of distinct lowercase whitespace-delimited
//! tokens across all of their post content. Two users are similar when their
//! vocabularies share at least `min_common_words` tokens.

use std::collections::HashSet;

use crate::model::{SimilarityEdge, UserContent};

/// Policy knobs for a similarity rebuild.
#[derive(Debug, Clone)]
pub struct SimilarityPolicy {
    /// Minimum number of distinct shared tokens for a pair to qualify.
    /// At the default of 1, any single shared token (stopwords included)
    /// links two users.
    pub min_common_words: usize,
}

impl Default for SimilarityPolicy {
    fn default() -> Self {
        Self { min_common_words: 1 }
    }
}

/// Build one user's vocabulary set.
///
/// Contents are joined with single spaces, lowercased, and split on
/// whitespace; duplicates collapse into the set.
pub fn vocabulary(contents: &[String]) -> HashSet<String> {
    contents
        .join(" ")
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

/// Compute the full directed similarity edge set for a corpus.
///
/// Every unordered pair of distinct users whose vocabularies overlap by at
/// least the policy threshold contributes both directions. Pairs are
/// compared exhaustively: cost is O(U² · avg-vocabulary-size), which is the
/// system's dominant scalability ceiling and the price of always rebuilding
/// from scratch.
pub fn similarity_edges(corpus: &[UserContent], policy: &SimilarityPolicy) -> Vec<SimilarityEdge> {
    let vocabularies: Vec<(&str, HashSet<String>)> = corpus
        .iter()
        .map(|user| (user.user_id.as_str(), vocabulary(&user.contents)))
        .collect();

    let mut edges = Vec::new();
    for i in 0..vocabularies.len() {
        for j in (i + 1)..vocabularies.len() {
            let (left_id, left) = &vocabularies[i];
            let (right_id, right) = &vocabularies[j];

            let shared = left.intersection(right).count();
            if shared >= policy.min_common_words {
                edges.push(SimilarityEdge::new(*left_id, *right_id));
                edges.push(SimilarityEdge::new(*right_id, *left_id));
            }
        }
    }

    edges
}
