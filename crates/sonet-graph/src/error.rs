//! Typed errors for store operations.

use thiserror::Error;

/// Error type for social graph store operations.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("post not found: {0}")]
    PostNotFound(String),

    /// The store stayed unreachable for the whole retry budget.
    #[error("store unreachable: {op} gave up after {attempts} attempts: {source}")]
    Connectivity {
        op: String,
        attempts: u32,
        #[source]
        source: neo4rs::Error,
    },

    #[error("Neo4j driver error: {0}")]
    Driver(#[from] neo4rs::Error),

    #[error("malformed result row: {0}")]
    Malformed(String),
}

/// Result type for store operations.
pub type GraphResult<T> = Result<T, GraphError>;

impl GraphError {
    /// Create a malformed-row error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub(crate) fn connectivity(op: &str, attempts: u32, source: neo4rs::Error) -> Self {
        Self::Connectivity {
            op: op.to_string(),
            attempts,
            source,
        }
    }
}
