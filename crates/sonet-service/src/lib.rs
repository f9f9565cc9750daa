//! # Sonet Service
//!
//! Orchestration over the social graph store: the post-ingestion pipeline
//! and the relationship recomputer. Generic over [`sonet_graph::SocialGraphStore`],
//! so the logic is testable without a running Neo4j.

pub mod recompute;
pub mod service;

#[cfg(test)]
mod testing;

pub use recompute::{RecomputeOutcome, RelationshipRecomputer};
pub use service::SocialGraphService;
