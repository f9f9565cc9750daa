//! # Sonet Graph
//!
//! Neo4j integration for Sonet.
//!
//! Provides the connection client with a bounded retry policy, schema
//! initialization, and the social graph store (users, posts, and the
//! derived SIMILAR_CONTENT relation).

pub mod client;
pub mod error;
pub mod retry;
pub mod schema;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphCounts};
pub use error::{GraphError, GraphResult};
pub use retry::RetryPolicy;
pub use store::{Neo4jStore, SocialGraphStore, DEFAULT_FEED_LIMIT};
