//! Domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentiment tag assigned to a post when it is created.
///
/// The tag is a pure function of the content at creation time and is never
/// recomputed, even if the lexicons change later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Stable string form stored on the Post node.
    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Parse the stored tag. Unknown tags read back as neutral.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "positive" => Sentiment::Positive,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub name: String,
}

/// A published post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub post_id: String,
    pub user_id: String,
    pub content: String,
    pub sentiment: Sentiment,
    /// RFC 3339 UTC timestamp assigned at creation; used for ordering.
    pub created_at: String,
}

/// A post joined with its author, as returned by the recent-posts feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedEntry {
    pub post: Post,
    pub user_name: String,
}

/// One user's post content strings, as fetched for a similarity rebuild.
///
/// Users with no posts never appear in the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserContent {
    pub user_id: String,
    pub contents: Vec<String>,
}

/// A directed similarity relation between two users.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimilarityEdge {
    pub source: String,
    pub target: String,
}

impl SimilarityEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}
