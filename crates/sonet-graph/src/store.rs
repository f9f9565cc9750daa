//! The social graph store: users, posts, and the similarity relation.
//!
//! Graph shape:
//!
//! - (:User {user_id, name})
//! - (:Post {post_id, content, sentiment, created_at, deleted?})-[:POSTED_BY]->(:User)
//! - (:User)-[:SIMILAR_CONTENT]->(:User)   (derived, rebuilt wholesale)

use async_trait::async_trait;
use neo4rs::Query;
use tracing::debug;
use uuid::Uuid;

use sonet_core::{FeedEntry, Post, Sentiment, SimilarityEdge, User, UserContent};

use crate::client::GraphClient;
use crate::error::{GraphError, GraphResult};

/// Default number of entries returned by the recent-posts feed.
pub const DEFAULT_FEED_LIMIT: usize = 10;

/// The narrow store contract the service layer depends on.
///
/// Implemented by [`Neo4jStore`]; service tests run against an in-memory
/// implementation with the same semantics.
#[async_trait]
pub trait SocialGraphStore: Send + Sync {
    /// Create-or-update a user. The name is last-write-wins: re-registering
    /// an id leaves exactly one record with the latest name.
    async fn upsert_user(&self, user_id: &str, name: &str) -> GraphResult<User>;

    /// All users, ordered by name.
    async fn list_users(&self) -> GraphResult<Vec<User>>;

    /// Store a post for an existing user.
    ///
    /// Fails with [`GraphError::UserNotFound`] when the user is missing;
    /// no post is created in that case.
    async fn create_post(
        &self,
        user_id: &str,
        content: &str,
        sentiment: Sentiment,
        created_at: &str,
    ) -> GraphResult<Post>;

    /// One user's posts, newest first.
    async fn user_posts(&self, user_id: &str) -> GraphResult<Vec<Post>>;

    /// The newest posts across all users with their authors, soft-deleted
    /// posts excluded. Returns at most `limit` entries.
    async fn recent_posts(&self, limit: usize) -> GraphResult<Vec<FeedEntry>>;

    /// Set the soft-delete marker on a post. The record is kept; only the
    /// recent-posts feed filters on the marker.
    async fn mark_post_deleted(&self, post_id: &str) -> GraphResult<()>;

    /// Post content per user, one entry per user with at least one post.
    /// Users without posts never appear.
    async fn fetch_authored_content(&self) -> GraphResult<Vec<UserContent>>;

    /// Drop every SIMILAR_CONTENT relationship, and only those.
    async fn clear_similarity_edges(&self) -> GraphResult<()>;

    /// Ensure the given directed edges are present. Re-inserting an
    /// existing edge is a no-op.
    async fn write_similarity_edges(&self, edges: &[SimilarityEdge]) -> GraphResult<()>;
}

/// Neo4j-backed store.
#[derive(Clone)]
pub struct Neo4jStore {
    client: GraphClient,
}

impl Neo4jStore {
    pub fn new(client: GraphClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SocialGraphStore for Neo4jStore {
    async fn upsert_user(&self, user_id: &str, name: &str) -> GraphResult<User> {
        let rows = self
            .client
            .query_retrying("upsert_user", || {
                Query::new(
                    "MERGE (u:User {user_id: $user_id})
                     ON CREATE SET u.name = $name
                     ON MATCH SET u.name = $name
                     RETURN u.user_id AS user_id, u.name AS name"
                        .to_string(),
                )
                .param("user_id", user_id)
                .param("name", name)
            })
            .await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::malformed("upsert_user returned no row"))?;

        Ok(User {
            user_id: row.get("user_id").unwrap_or_default(),
            name: row.get("name").unwrap_or_default(),
        })
    }

    async fn list_users(&self) -> GraphResult<Vec<User>> {
        let rows = self
            .client
            .query_retrying("list_users", || {
                Query::new(
                    "MATCH (u:User)
                     RETURN u.user_id AS user_id, u.name AS name
                     ORDER BY u.name"
                        .to_string(),
                )
            })
            .await?;

        let mut users = Vec::new();
        for row in rows {
            let user_id: String = row.get("user_id").unwrap_or_default();
            if !user_id.is_empty() {
                users.push(User {
                    user_id,
                    name: row.get("name").unwrap_or_default(),
                });
            }
        }
        Ok(users)
    }

    async fn create_post(
        &self,
        user_id: &str,
        content: &str,
        sentiment: Sentiment,
        created_at: &str,
    ) -> GraphResult<Post> {
        let post_id = Uuid::new_v4().to_string();

        // CREATE with a client-generated id is not idempotent, so this is a
        // single attempt — never routed through the retry policy.
        let rows = self
            .client
            .query(
                Query::new(
                    "MATCH (u:User {user_id: $user_id})
                     CREATE (p:Post {
                         post_id: $post_id,
                         content: $content,
                         sentiment: $sentiment,
                         created_at: $created_at
                     })-[:POSTED_BY]->(u)
                     RETURN p.post_id AS post_id"
                        .to_string(),
                )
                .param("user_id", user_id)
                .param("post_id", post_id.as_str())
                .param("content", content)
                .param("sentiment", sentiment.as_str())
                .param("created_at", created_at),
            )
            .await?;

        // MATCH on a missing user produces no row and nothing is created.
        if rows.is_empty() {
            return Err(GraphError::UserNotFound(user_id.to_string()));
        }

        debug!(post_id = %post_id, user_id, sentiment = %sentiment, "Post stored");

        Ok(Post {
            post_id,
            user_id: user_id.to_string(),
            content: content.to_string(),
            sentiment,
            created_at: created_at.to_string(),
        })
    }

    async fn user_posts(&self, user_id: &str) -> GraphResult<Vec<Post>> {
        let rows = self
            .client
            .query_retrying("user_posts", || {
                Query::new(
                    "MATCH (p:Post)-[:POSTED_BY]->(u:User {user_id: $user_id})
                     RETURN p.post_id AS post_id,
                            p.content AS content,
                            p.sentiment AS sentiment,
                            p.created_at AS created_at
                     ORDER BY p.created_at DESC"
                        .to_string(),
                )
                .param("user_id", user_id)
            })
            .await?;

        let mut posts = Vec::new();
        for row in rows {
            let post_id: String = row.get("post_id").unwrap_or_default();
            if post_id.is_empty() {
                continue;
            }
            posts.push(Post {
                post_id,
                user_id: user_id.to_string(),
                content: row.get("content").unwrap_or_default(),
                sentiment: Sentiment::from_tag(
                    &row.get::<String>("sentiment").unwrap_or_default(),
                ),
                created_at: row.get("created_at").unwrap_or_default(),
            });
        }
        Ok(posts)
    }

    async fn recent_posts(&self, limit: usize) -> GraphResult<Vec<FeedEntry>> {
        let rows = self
            .client
            .query_retrying("recent_posts", || {
                Query::new(
                    "MATCH (p:Post)-[:POSTED_BY]->(u:User)
                     WHERE p.deleted IS NULL
                     RETURN p.post_id AS post_id,
                            p.content AS content,
                            p.sentiment AS sentiment,
                            p.created_at AS created_at,
                            u.user_id AS user_id,
                            u.name AS user_name
                     ORDER BY p.created_at DESC
                     LIMIT $limit"
                        .to_string(),
                )
                .param("limit", limit as i64)
            })
            .await?;

        let mut entries = Vec::new();
        for row in rows {
            let post_id: String = row.get("post_id").unwrap_or_default();
            if post_id.is_empty() {
                continue;
            }
            entries.push(FeedEntry {
                post: Post {
                    post_id,
                    user_id: row.get("user_id").unwrap_or_default(),
                    content: row.get("content").unwrap_or_default(),
                    sentiment: Sentiment::from_tag(
                        &row.get::<String>("sentiment").unwrap_or_default(),
                    ),
                    created_at: row.get("created_at").unwrap_or_default(),
                },
                user_name: row.get("user_name").unwrap_or_default(),
            });
        }
        Ok(entries)
    }

    async fn mark_post_deleted(&self, post_id: &str) -> GraphResult<()> {
        let rows = self
            .client
            .query_retrying("mark_post_deleted", || {
                Query::new(
                    "MATCH (p:Post {post_id: $post_id})
                     SET p.deleted = true
                     RETURN p.post_id AS post_id"
                        .to_string(),
                )
                .param("post_id", post_id)
            })
            .await?;

        if rows.is_empty() {
            return Err(GraphError::PostNotFound(post_id.to_string()));
        }

        debug!(post_id, "Post soft-deleted");
        Ok(())
    }

    async fn fetch_authored_content(&self) -> GraphResult<Vec<UserContent>> {
        // collect() skips nulls, so users without posts come back with an
        // empty list and are filtered by the size() guard.
        let rows = self
            .client
            .query_retrying("fetch_authored_content", || {
                Query::new(
                    "MATCH (u:User)
                     OPTIONAL MATCH (u)<-[:POSTED_BY]-(p:Post)
                     WITH u, collect(p.content) AS contents
                     WHERE size(contents) > 0
                     RETURN u.user_id AS user_id, contents"
                        .to_string(),
                )
            })
            .await?;

        let mut corpus = Vec::new();
        for row in rows {
            let user_id: String = row.get("user_id").unwrap_or_default();
            if user_id.is_empty() {
                continue;
            }
            corpus.push(UserContent {
                user_id,
                contents: row.get("contents").unwrap_or_default(),
            });
        }
        Ok(corpus)
    }

    async fn clear_similarity_edges(&self) -> GraphResult<()> {
        self.client
            .execute_retrying("clear_similarity_edges", || {
                Query::new("MATCH ()-[r:SIMILAR_CONTENT]->() DELETE r".to_string())
            })
            .await
    }

    async fn write_similarity_edges(&self, edges: &[SimilarityEdge]) -> GraphResult<()> {
        if edges.is_empty() {
            return Ok(());
        }

        let sources: Vec<String> = edges.iter().map(|e| e.source.clone()).collect();
        let targets: Vec<String> = edges.iter().map(|e| e.target.clone()).collect();

        self.client
            .execute_retrying("write_similarity_edges", || {
                Query::new(
                    "UNWIND range(0, size($sources) - 1) AS i
                     MATCH (a:User {user_id: $sources[i]})
                     MATCH (b:User {user_id: $targets[i]})
                     MERGE (a)-[:SIMILAR_CONTENT]->(b)"
                        .to_string(),
                )
                .param("sources", sources.clone())
                .param("targets", targets.clone())
            })
            .await?;

        debug!(edges = edges.len(), "Similarity edges written");
        Ok(())
    }
}
