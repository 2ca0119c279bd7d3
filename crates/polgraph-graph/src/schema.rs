//! Neo4j schema application (constraints and indexes).
//!
//! Schema files are plain Cypher: lines starting with `//` are comments and
//! statements end with a semicolon at the end of a line.

use std::path::Path;

use tracing::info;

use crate::client::{CypherRunner, Parameters};
use crate::error::GraphResult;

/// Schema shipped with the crate, used when no file is given.
pub const DEFAULT_SCHEMA: &str = include_str!("../schema/neo4j.cypher");

/// Split schema text into executable statements, in file order.
pub fn parse_statements(contents: &str) -> Vec<String> {
    let body = contents
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n");

    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in body.match_indices(';') {
        let rest = &body[idx + 1..];
        let gap = &rest[..rest.len() - rest.trim_start().len()];
        if gap.contains('\n') {
            pieces.push(&body[start..idx]);
            start = idx + 1;
        }
    }
    pieces.push(&body[start..]);

    pieces
        .into_iter()
        .map(|piece| piece.trim().trim_end_matches(';').trim_end().to_string())
        .filter(|statement| !statement.is_empty())
        .collect()
}

/// Read and parse a schema file.
pub fn load_statements(path: &Path) -> GraphResult<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(parse_statements(&contents))
}

/// Execute schema statements one by one, stopping at the first failure.
///
/// Safe to run repeatedly when the statements use `IF NOT EXISTS`.
pub async fn apply_schema<R>(runner: &R, statements: &[String]) -> GraphResult<usize>
where
    R: CypherRunner + ?Sized,
{
    info!(statements = statements.len(), "Applying Neo4j schema");

    for statement in statements {
        runner.run(statement, Parameters::new()).await?;
    }

    info!("Neo4j schema applied ({} statements)", statements.len());
    Ok(statements.len())
}
