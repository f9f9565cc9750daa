//! In-memory store for the service test suites.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use sonet_core::{FeedEntry, Post, Sentiment, SimilarityEdge, User, UserContent};
use sonet_graph::{GraphError, GraphResult, SocialGraphStore};

#[derive(Default)]
struct State {
    /// user_id -> display name
    users: BTreeMap<String, String>,
    posts: Vec<StoredPost>,
    edges: Vec<SimilarityEdge>,
}

struct StoredPost {
    post: Post,
    deleted: bool,
    seq: u64,
}

/// Mirror of the Neo4j store semantics, plus failure switches for the
/// error-swallowing tests.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    next_seq: AtomicU64,
    clear_fails: AtomicBool,
    write_fails: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `clear_similarity_edges` fail until switched back off.
    pub fn fail_clear(&self, fail: bool) {
        self.clear_fails.store(fail, Ordering::SeqCst);
    }

    /// Make `write_similarity_edges` fail until switched back off.
    pub fn fail_write(&self, fail: bool) {
        self.write_fails.store(fail, Ordering::SeqCst);
    }

    /// Sorted snapshot of the similarity edge set.
    pub fn edges(&self) -> Vec<SimilarityEdge> {
        let state = self.state.lock().unwrap();
        let mut edges = state.edges.clone();
        edges.sort();
        edges
    }

    /// Total stored posts, soft-deleted included.
    pub fn post_count(&self) -> usize {
        self.state.lock().unwrap().posts.len()
    }
}

#[async_trait]
impl SocialGraphStore for MemoryStore {
    async fn upsert_user(&self, user_id: &str, name: &str) -> GraphResult<User> {
        let mut state = self.state.lock().unwrap();
        state.users.insert(user_id.to_string(), name.to_string());
        Ok(User {
            user_id: user_id.to_string(),
            name: name.to_string(),
        })
    }

    async fn list_users(&self) -> GraphResult<Vec<User>> {
        let state = self.state.lock().unwrap();
        let mut users: Vec<User> = state
            .users
            .iter()
            .map(|(user_id, name)| User {
                user_id: user_id.clone(),
                name: name.clone(),
            })
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(users)
    }

    async fn create_post(
        &self,
        user_id: &str,
        content: &str,
        sentiment: Sentiment,
        created_at: &str,
    ) -> GraphResult<Post> {
        let mut state = self.state.lock().unwrap();
        if !state.users.contains_key(user_id) {
            return Err(GraphError::UserNotFound(user_id.to_string()));
        }

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        let post = Post {
            post_id: format!("post-{seq}"),
            user_id: user_id.to_string(),
            content: content.to_string(),
            sentiment,
            created_at: created_at.to_string(),
        };
        state.posts.push(StoredPost {
            post: post.clone(),
            deleted: false,
            seq,
        });
        Ok(post)
    }

    async fn user_posts(&self, user_id: &str) -> GraphResult<Vec<Post>> {
        let state = self.state.lock().unwrap();
        let mut stored: Vec<&StoredPost> = state
            .posts
            .iter()
            .filter(|p| p.post.user_id == user_id)
            .collect();
        stored.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(stored.into_iter().map(|p| p.post.clone()).collect())
    }

    async fn recent_posts(&self, limit: usize) -> GraphResult<Vec<FeedEntry>> {
        let state = self.state.lock().unwrap();
        let mut stored: Vec<&StoredPost> = state.posts.iter().filter(|p| !p.deleted).collect();
        stored.sort_by(|a, b| b.seq.cmp(&a.seq));
        Ok(stored
            .into_iter()
            .take(limit)
            .map(|p| FeedEntry {
                post: p.post.clone(),
                user_name: state.users.get(&p.post.user_id).cloned().unwrap_or_default(),
            })
            .collect())
    }

    async fn mark_post_deleted(&self, post_id: &str) -> GraphResult<()> {
        let mut state = self.state.lock().unwrap();
        match state.posts.iter_mut().find(|p| p.post.post_id == post_id) {
            Some(stored) => {
                stored.deleted = true;
                Ok(())
            }
            None => Err(GraphError::PostNotFound(post_id.to_string())),
        }
    }

    async fn fetch_authored_content(&self) -> GraphResult<Vec<UserContent>> {
        let state = self.state.lock().unwrap();
        let mut corpus = Vec::new();
        for user_id in state.users.keys() {
            // Soft-deleted posts still contribute, as in the real store.
            let contents: Vec<String> = state
                .posts
                .iter()
                .filter(|p| &p.post.user_id == user_id)
                .map(|p| p.post.content.clone())
                .collect();
            if !contents.is_empty() {
                corpus.push(UserContent {
                    user_id: user_id.clone(),
                    contents,
                });
            }
        }
        Ok(corpus)
    }

    async fn clear_similarity_edges(&self) -> GraphResult<()> {
        if self.clear_fails.load(Ordering::SeqCst) {
            return Err(GraphError::malformed("injected clear failure"));
        }
        self.state.lock().unwrap().edges.clear();
        Ok(())
    }

    async fn write_similarity_edges(&self, edges: &[SimilarityEdge]) -> GraphResult<()> {
        if self.write_fails.load(Ordering::SeqCst) {
            return Err(GraphError::malformed("injected write failure"));
        }
        let mut state = self.state.lock().unwrap();
        for edge in edges {
            if !state.edges.contains(edge) {
                state.edges.push(edge.clone());
            }
        }
        Ok(())
    }
}
