//! Neo4j transactional HTTP client.
//!
//! Every call is a single auto-committed transaction:
//! `POST {endpoint}/db/{database}/tx/commit` with one statement.

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::debug;

use crate::error::{GraphError, GraphResult};

/// Named statement parameters. Always serialises as a JSON object, `{}` when
/// empty, which is the only shape Neo4j accepts.
pub type Parameters = Map<String, Value>;

/// Maximum number of characters of a malformed body kept for diagnostics.
pub const RESPONSE_SNIPPET_LEN: usize = 400;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:7474".to_string(),
            username: "neo4j".to_string(),
            password: "polgraph_dev".to_string(),
            database: "neo4j".to_string(),
        }
    }
}

impl GraphConfig {
    /// URL of the auto-commit transaction endpoint.
    pub fn commit_url(&self) -> String {
        format!(
            "{}/db/{}/tx/commit",
            self.endpoint.trim_end_matches('/'),
            self.database
        )
    }
}

/// Executes Cypher statements.
///
/// The upsert orchestrator and schema application only ever talk to Neo4j
/// through this trait.
#[async_trait]
pub trait CypherRunner: Send + Sync {
    /// Run one statement and return the decoded response body.
    async fn run(&self, statement: &str, parameters: Parameters) -> GraphResult<Map<String, Value>>;
}

/// Build a [`Parameters`] map from name/value pairs.
pub fn parameters<const N: usize>(pairs: [(&str, Value); N]) -> Parameters {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Request body for a single-statement transaction.
pub fn build_request_body(statement: &str, parameters: &Parameters) -> Value {
    json!({
        "statements": [
            {
                "statement": statement,
                "parameters": parameters,
            }
        ]
    })
}

/// Decode a transaction response.
///
/// Anything that is not a JSON object is a protocol error. A top-level
/// `errors` value that is present and not empty is a query error carrying the
/// first message, or a generic one when no message can be found.
pub fn decode_response(status: u16, body: &str) -> GraphResult<Map<String, Value>> {
    let data = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => {
            return Err(GraphError::Protocol {
                status,
                snippet: snippet(body),
            })
        }
    };

    if let Some(errors) = data.get("errors").filter(|errors| !is_empty_value(errors)) {
        let first = match errors {
            Value::Array(items) => items.first(),
            other => Some(other),
        };
        let message = first
            .and_then(|error| error.get("message"))
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_ERROR_MESSAGE);
        return Err(GraphError::Query(message.to_string()));
    }

    Ok(data)
}

const UNKNOWN_ERROR_MESSAGE: &str = "Unknown Neo4j error.";

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn snippet(body: &str) -> String {
    let head: String = body.chars().take(RESPONSE_SNIPPET_LEN).collect();
    let head = head.trim();
    if head.is_empty() {
        "empty response".to_string()
    } else {
        head.to_string()
    }
}

/// First cell of the first row of the first result, if any.
pub fn first_scalar(response: &Map<String, Value>) -> Option<&Value> {
    response
        .get("results")?
        .get(0)?
        .get("data")?
        .get(0)?
        .get("row")?
        .get(0)
}

/// Client for the Neo4j HTTP API.
#[derive(Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    commit_url: String,
    username: String,
    password: String,
}

impl GraphClient {
    /// Create a client. No connection is made until the first statement runs.
    pub fn new(config: &GraphConfig) -> GraphResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("polgraph/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            commit_url: config.commit_url(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn commit_url(&self) -> &str {
        &self.commit_url
    }

    /// Get node and relationship counts for status display.
    pub async fn get_counts(&self) -> GraphResult<GraphCounts> {
        let nodes = self
            .run("MATCH (n) RETURN count(n) AS count", Parameters::new())
            .await?;
        let relationships = self
            .run("MATCH ()-[r]->() RETURN count(r) AS count", Parameters::new())
            .await?;

        let count = |response: &Map<String, Value>| {
            first_scalar(response).and_then(Value::as_u64).unwrap_or(0) as usize
        };

        Ok(GraphCounts {
            nodes: count(&nodes),
            relationships: count(&relationships),
        })
    }
}

#[async_trait]
impl CypherRunner for GraphClient {
    async fn run(&self, statement: &str, parameters: Parameters) -> GraphResult<Map<String, Value>> {
        let body = build_request_body(statement, &parameters);

        let response = self
            .http
            .post(&self.commit_url)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(status, bytes = text.len(), "Neo4j responded");

        decode_response(status, &text)
    }
}

/// Node and relationship counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphCounts {
    pub nodes: usize,
    pub relationships: usize,
}
