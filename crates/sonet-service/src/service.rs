//! Caller-facing operations over the social graph.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use sonet_core::{classify, FeedEntry, Post, SimilarityPolicy, User};
use sonet_graph::{GraphResult, SocialGraphStore, DEFAULT_FEED_LIMIT};

use crate::recompute::RelationshipRecomputer;

/// The service layer: user registration, post ingestion, and read queries.
///
/// Holds an injected store handle; no graph state is cached in-process
/// between requests.
pub struct SocialGraphService<S> {
    store: Arc<S>,
    recomputer: RelationshipRecomputer<S>,
}

impl<S: SocialGraphStore> SocialGraphService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_policy(store, SimilarityPolicy::default())
    }

    pub fn with_policy(store: Arc<S>, policy: SimilarityPolicy) -> Self {
        let recomputer = RelationshipRecomputer::with_policy(Arc::clone(&store), policy);
        Self { store, recomputer }
    }

    /// Create-or-update a user. Re-registering an id keeps one record with
    /// the latest name.
    pub async fn register_user(&self, user_id: &str, name: &str) -> GraphResult<User> {
        let user = self.store.upsert_user(user_id, name).await?;
        info!(user_id = %user.user_id, "User registered");
        Ok(user)
    }

    /// Publish a post: classify its sentiment, persist it, then rebuild the
    /// similarity relation.
    ///
    /// The post is committed before the rebuild starts, so a rebuild
    /// failure is logged and swallowed — it never fails the creation that
    /// triggered it, and it is not retried until the next post arrives.
    pub async fn create_post(&self, user_id: &str, content: &str) -> GraphResult<Post> {
        let sentiment = classify(content);
        let post = self
            .store
            .create_post(user_id, content, sentiment, &Utc::now().to_rfc3339())
            .await?;

        info!(
            post_id = %post.post_id,
            user_id,
            sentiment = %post.sentiment,
            "Post created"
        );

        if let Err(e) = self.recomputer.recompute().await {
            error!(error = %e, "Similarity rebuild failed after post creation");
        }

        Ok(post)
    }

    /// One user's posts, newest first.
    pub async fn user_posts(&self, user_id: &str) -> GraphResult<Vec<Post>> {
        self.store.user_posts(user_id).await
    }

    /// The newest posts across all users, soft-deleted posts excluded.
    /// `None` means the default limit of 10.
    pub async fn recent_posts(&self, limit: Option<usize>) -> GraphResult<Vec<FeedEntry>> {
        self.store
            .recent_posts(limit.unwrap_or(DEFAULT_FEED_LIMIT))
            .await
    }

    /// All users, ordered by name.
    pub async fn list_users(&self) -> GraphResult<Vec<User>> {
        self.store.list_users().await
    }

    /// Soft-delete a post: it disappears from the recent feed but keeps its
    /// storage record.
    pub async fn delete_post(&self, post_id: &str) -> GraphResult<()> {
        self.store.mark_post_deleted(post_id).await?;
        info!(post_id, "Post soft-deleted");
        Ok(())
    }
}
