//! Graph database error types.

use thiserror::Error;

/// Errors raised while talking to Neo4j.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The response body was not a JSON object.
    #[error("Unexpected Neo4j response ({status}): {snippet}")]
    Protocol { status: u16, snippet: String },

    /// Neo4j rejected the statement. Carries the database's own message.
    #[error("{0}")]
    Query(String),

    #[error("Neo4j request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to read schema file: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;
