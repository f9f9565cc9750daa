//! Full rebuild of the similarity relation.

use std::sync::Arc;

use tracing::{debug, info};

use sonet_core::similarity::{similarity_edges, SimilarityPolicy};
use sonet_graph::{GraphResult, SocialGraphStore};

/// Summary of one completed rebuild.
#[derive(Debug, Clone, Default)]
pub struct RecomputeOutcome {
    pub users_scanned: usize,
    pub edges_written: usize,
}

/// Rebuilds the SIMILAR_CONTENT relation from the full post corpus.
///
/// The edge set is derived state with no independent lifecycle: every run
/// recomputes it from scratch, so there is no drift from partial updates.
/// The rebuild is two-phase (clear, then write) — a read between the phases
/// can observe an empty or partial edge set, and two concurrent rebuilds
/// are not serialized against each other; whichever finishes last wins.
/// Each individual rebuild is exact when uncontended.
pub struct RelationshipRecomputer<S> {
    store: Arc<S>,
    policy: SimilarityPolicy,
}

impl<S: SocialGraphStore> RelationshipRecomputer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, SimilarityPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: SimilarityPolicy) -> Self {
        Self { store, policy }
    }

    /// Run one full rebuild.
    ///
    /// With fewer than two content-bearing users there is nothing to
    /// relate, and the existing edge set is left untouched — no clear, no
    /// write.
    pub async fn recompute(&self) -> GraphResult<RecomputeOutcome> {
        let corpus = self.store.fetch_authored_content().await?;

        if corpus.len() < 2 {
            debug!(users = corpus.len(), "Similarity rebuild skipped");
            return Ok(RecomputeOutcome {
                users_scanned: corpus.len(),
                edges_written: 0,
            });
        }

        let edges = similarity_edges(&corpus, &self.policy);

        self.store.clear_similarity_edges().await?;
        if !edges.is_empty() {
            self.store.write_similarity_edges(&edges).await?;
        }

        info!(
            users = corpus.len(),
            edges = edges.len(),
            "Similarity relation rebuilt"
        );

        Ok(RecomputeOutcome {
            users_scanned: corpus.len(),
            edges_written: edges.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use sonet_core::{classify, SimilarityEdge};

    use crate::testing::MemoryStore;

    async fn seed_post(store: &MemoryStore, user_id: &str, name: &str, content: &str) {
        store.upsert_user(user_id, name).await.unwrap();
        store
            .create_post(user_id, content, classify(content), "2026-08-07T00:00:00+00:00")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_rebuild_matches_corpus_overlap() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "alice", "Alice", "I love dogs").await;
        seed_post(&store, "bob", "Bob", "I love cats").await;
        seed_post(&store, "carol", "Carol", "totally unrelated topic").await;

        let recomputer = RelationshipRecomputer::new(Arc::clone(&store));
        let outcome = recomputer.recompute().await.unwrap();

        assert_eq!(outcome.users_scanned, 3);
        assert_eq!(outcome.edges_written, 2);
        assert_eq!(
            store.edges(),
            vec![
                SimilarityEdge::new("alice", "bob"),
                SimilarityEdge::new("bob", "alice"),
            ]
        );
    }

    #[tokio::test]
    async fn test_rebuild_replaces_stale_edges() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "alice", "Alice", "apples every day").await;
        seed_post(&store, "bob", "Bob", "apples and pears").await;

        // A leftover edge from an earlier corpus must not survive.
        store
            .write_similarity_edges(&[SimilarityEdge::new("ghost", "alice")])
            .await
            .unwrap();

        let recomputer = RelationshipRecomputer::new(Arc::clone(&store));
        recomputer.recompute().await.unwrap();

        assert_eq!(
            store.edges(),
            vec![
                SimilarityEdge::new("alice", "bob"),
                SimilarityEdge::new("bob", "alice"),
            ]
        );
    }

    #[tokio::test]
    async fn test_fewer_than_two_users_touches_nothing() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "alice", "Alice", "talking to myself").await;

        // Pre-existing edges must survive a skipped rebuild untouched.
        store
            .write_similarity_edges(&[SimilarityEdge::new("x", "y")])
            .await
            .unwrap();

        let recomputer = RelationshipRecomputer::new(Arc::clone(&store));
        let outcome = recomputer.recompute().await.unwrap();

        assert_eq!(outcome.users_scanned, 1);
        assert_eq!(outcome.edges_written, 0);
        assert_eq!(store.edges(), vec![SimilarityEdge::new("x", "y")]);
    }

    #[tokio::test]
    async fn test_policy_threshold_is_respected() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "alice", "Alice", "rust is fun").await;
        seed_post(&store, "bob", "Bob", "rust sometimes").await;

        let policy = SimilarityPolicy { min_common_words: 2 };
        let recomputer = RelationshipRecomputer::with_policy(Arc::clone(&store), policy);
        let outcome = recomputer.recompute().await.unwrap();

        // Only "rust" is shared — below the threshold of 2.
        assert_eq!(outcome.edges_written, 0);
        assert!(store.edges().is_empty());
    }

    #[tokio::test]
    async fn test_users_without_posts_are_not_in_the_corpus() {
        let store = Arc::new(MemoryStore::new());
        seed_post(&store, "alice", "Alice", "hello world").await;
        store.upsert_user("mute", "Mute").await.unwrap();

        let recomputer = RelationshipRecomputer::new(Arc::clone(&store));
        let outcome = recomputer.recompute().await.unwrap();

        // Only one content-bearing user: rebuild is skipped entirely.
        assert_eq!(outcome.users_scanned, 1);
        assert!(store.edges().is_empty());
    }
}
