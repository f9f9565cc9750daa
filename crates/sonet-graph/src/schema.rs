//! Neo4j schema initialization (constraints and indexes).

use neo4rs::Query;
use tracing::info;

use crate::client::GraphClient;
use crate::error::GraphResult;

/// Cypher statements for schema initialization.
const SCHEMA_STATEMENTS: &[&str] = &[
    // Uniqueness constraints
    "CREATE CONSTRAINT user_id IF NOT EXISTS FOR (u:User) REQUIRE u.user_id IS UNIQUE",
    "CREATE CONSTRAINT post_id IF NOT EXISTS FOR (p:Post) REQUIRE p.post_id IS UNIQUE",
    // Ordered post queries scan by creation time
    "CREATE INDEX post_created_at IF NOT EXISTS FOR (p:Post) ON (p.created_at)",
];

/// Initialize the schema with constraints and indexes.
///
/// Safe to run multiple times - uses IF NOT EXISTS clauses.
pub async fn initialize_schema(client: &GraphClient) -> GraphResult<()> {
    for statement in SCHEMA_STATEMENTS {
        client
            .execute_retrying("initialize_schema", || Query::new(statement.to_string()))
            .await?;
    }

    info!("Schema initialized ({} statements)", SCHEMA_STATEMENTS.len());
    Ok(())
}
