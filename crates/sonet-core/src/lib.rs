//! Sonet Core Library
//!
//! Pure domain layer shared by the store and service crates: models,
//! sentiment classification, and vocabulary-overlap similarity. No I/O.

pub mod model;
pub mod sentiment;
pub mod similarity;

pub use model::{FeedEntry, Post, Sentiment, SimilarityEdge, User, UserContent};
pub use sentiment::classify;
pub use similarity::{similarity_edges, vocabulary, SimilarityPolicy};
