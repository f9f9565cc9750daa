//! Lexicon-based sentiment classification.
//!
//! Tokens are lowercased and matched verbatim against two small curated
//! word sets. No stemming, no negation handling, no phrases.

use crate::model::Sentiment;

/// Tokens that count toward a positive classification.
const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "awesome",
    "excellent",
    "happy",
    "love",
    "wonderful",
    "amazing",
];

/// Tokens that count toward a negative classification.
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "hate", "sad", "angry", "poor",
];

/// Classify post content by lexicon token counts.
///
/// Every occurrence counts, with repetition. The larger count wins; ties
/// (including text with no lexicon hits at all) are neutral.
pub fn classify(content: &str) -> Sentiment {
    let lowered = content.to_lowercase();

    let mut positive = 0usize;
    let mut negative = 0usize;
    for token in lowered.split_whitespace() {
        if POSITIVE_WORDS.contains(&token) {
            positive += 1;
        } else if NEGATIVE_WORDS.contains(&token) {
            negative += 1;
        }
    }

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}
