//! Neo4j connection client.

use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{GraphError, GraphResult};
use crate::retry::RetryPolicy;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "sonet_dev".to_string(),
        }
    }
}

/// Client for the social graph.
///
/// Wraps the neo4rs connection pool, so cloning is cheap and a single
/// client can be shared across concurrent requests. The client is meant to
/// be constructed once and injected into the store — there is no global
/// connection state.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    retry: RetryPolicy,
}

impl GraphClient {
    /// Connect with the default retry policy.
    pub async fn connect(config: &GraphConfig) -> GraphResult<Self> {
        Self::connect_with(config, RetryPolicy::default()).await
    }

    /// Connect and verify the store answers queries.
    ///
    /// neo4rs uses a lazy pool — `Graph::connect` only creates the pool
    /// object and does NOT establish a real bolt connection yet. We ping
    /// with `RETURN 1` under the retry budget so an unreachable store fails
    /// here with [`GraphError::Connectivity`] instead of on the first real
    /// query.
    pub async fn connect_with(config: &GraphConfig, retry: RetryPolicy) -> GraphResult<Self> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db("neo4j")
            .max_connections(4)
            .fetch_size(20)
            .build()?;

        let graph = Graph::connect(neo4j_config).await?;

        let client = Self { graph, retry };
        client.health_check().await?;
        info!(uri = %config.uri, "Connected to Neo4j");

        Ok(client)
    }

    /// Verify the store answers a trivial query, retrying within the budget.
    pub async fn health_check(&self) -> GraphResult<()> {
        let graph = self.graph.clone();
        self.retry
            .run("health_check", || {
                let graph = graph.clone();
                async move { graph.run(Query::new("RETURN 1".to_string())).await }
            })
            .await
    }

    /// Execute a query that returns no results. Single attempt.
    pub async fn execute(&self, query: Query) -> GraphResult<()> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a query and return results as rows. Single attempt.
    pub async fn query(&self, query: Query) -> GraphResult<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(query).await?;

        let mut rows = Vec::new();
        while let Ok(Some(row)) = result.next().await {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Like [`execute`](Self::execute), but retried under the policy.
    /// Only for idempotent queries.
    pub async fn execute_retrying<F>(&self, op_name: &str, make_query: F) -> GraphResult<()>
    where
        F: Fn() -> Query,
    {
        let graph = self.graph.clone();
        self.retry
            .run(op_name, || {
                let graph = graph.clone();
                let query = make_query();
                async move { graph.run(query).await }
            })
            .await
    }

    /// Like [`query`](Self::query), but retried under the policy.
    /// Only for idempotent queries.
    pub async fn query_retrying<F>(&self, op_name: &str, make_query: F) -> GraphResult<Vec<neo4rs::Row>>
    where
        F: Fn() -> Query,
    {
        let graph = self.graph.clone();
        self.retry
            .run(op_name, || {
                let graph = graph.clone();
                let query = make_query();
                async move {
                    let mut result = graph.execute(query).await?;

                    let mut rows = Vec::new();
                    while let Ok(Some(row)) = result.next().await {
                        rows.push(row);
                    }
                    Ok(rows)
                }
            })
            .await
    }

    /// Execute a query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(
        &self,
        query: Query,
        field: &str,
    ) -> GraphResult<Option<T>> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row
                .get(field)
                .map_err(|e| GraphError::malformed(format!("missing field '{}': {:?}", field, e)))?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }

    /// Node and relationship counts for status display.
    pub async fn counts(&self) -> GraphResult<GraphCounts> {
        let users: i64 = self
            .query_scalar(
                Query::new("MATCH (u:User) RETURN count(u) as count".to_string()),
                "count",
            )
            .await?
            .unwrap_or(0);
        let posts: i64 = self
            .query_scalar(
                Query::new("MATCH (p:Post) RETURN count(p) as count".to_string()),
                "count",
            )
            .await?
            .unwrap_or(0);
        let similarity_edges: i64 = self
            .query_scalar(
                Query::new("MATCH ()-[r:SIMILAR_CONTENT]->() RETURN count(r) as count".to_string()),
                "count",
            )
            .await?
            .unwrap_or(0);

        Ok(GraphCounts {
            users: users as usize,
            posts: posts as usize,
            similarity_edges: similarity_edges as usize,
        })
    }

    /// Consume the client, dropping the connection pool.
    ///
    /// neo4rs has no explicit shutdown; dropping the last pool handle
    /// closes idle connections.
    pub fn close(self) {}
}

/// Node and relationship counts.
#[derive(Debug, Clone)]
pub struct GraphCounts {
    pub users: usize,
    pub posts: usize,
    pub similarity_edges: usize,
}
