//! Idempotent upserts of one ingestion unit.
//!
//! Order matters: the relationship statement `MATCH`es both endpoints, so the
//! person and organization are merged first.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::json;
use tracing::debug;

use polgraph_core::graph::{IngestionUnit, OrganizationNode, PersonNode, Relationship};

use crate::client::{parameters, CypherRunner};
use crate::error::GraphResult;

const UPSERT_PERSON: &str = "MERGE (p:Person {personId: $personId})
SET p.name = $name,
    p.slug = $slug,
    p.role = $role,
    p.wikipediaUrl = $wikipediaUrl,
    p.summary = $summary,
    p.updatedAt = datetime($updatedAt)";

const UPSERT_ORGANIZATION: &str = "MERGE (o:Organization {orgId: $orgId})
SET o.name = $name,
    o.updatedAt = datetime($updatedAt)";

/// Writes a whole unit to the graph.
#[async_trait]
pub trait UnitWriter: Send + Sync {
    async fn write(&self, unit: &IngestionUnit) -> GraphResult<()>;
}

/// Upsert orchestrator over any [`CypherRunner`].
pub struct GraphIngestor<R> {
    runner: R,
}

impl<R: CypherRunner> GraphIngestor<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Apply a unit: person, then organization, then relationship.
    ///
    /// The first failing statement aborts the rest of the unit. Earlier
    /// statements are not rolled back; re-running the unit converges.
    pub async fn ingest(&self, unit: &IngestionUnit) -> GraphResult<()> {
        self.upsert_person(unit.person()).await?;

        if let Some(organization) = unit.organization() {
            self.upsert_organization(organization).await?;
        }

        if let Some(relationship) = unit.relationship() {
            self.upsert_relationship(relationship).await?;
        }

        debug!(
            person_id = unit.person().person_id(),
            org_id = unit.organization().map(|o| o.org_id()),
            "Ingested unit"
        );
        Ok(())
    }

    async fn upsert_person(&self, person: &PersonNode) -> GraphResult<()> {
        let params = parameters([
            ("personId", json!(person.person_id())),
            ("name", json!(person.name())),
            ("slug", json!(person.slug())),
            ("role", json!(person.role())),
            ("wikipediaUrl", json!(person.wikipedia_url())),
            ("summary", json!(person.summary())),
            ("updatedAt", json!(timestamp(person.updated_at()))),
        ]);

        self.runner.run(UPSERT_PERSON, params).await?;
        Ok(())
    }

    async fn upsert_organization(&self, organization: &OrganizationNode) -> GraphResult<()> {
        let params = parameters([
            ("orgId", json!(organization.org_id())),
            ("name", json!(organization.name())),
            ("updatedAt", json!(timestamp(organization.updated_at()))),
        ]);

        self.runner.run(UPSERT_ORGANIZATION, params).await?;
        Ok(())
    }

    async fn upsert_relationship(&self, relationship: &Relationship) -> GraphResult<()> {
        let params = parameters([
            ("fromId", json!(relationship.from_id())),
            ("toId", json!(relationship.to_id())),
            ("source", json!(relationship.source())),
            ("confidence", json!(relationship.confidence())),
            ("updatedAt", json!(timestamp(relationship.updated_at()))),
        ]);

        self.runner.run(&relationship_statement(relationship), params).await?;
        Ok(())
    }
}

#[async_trait]
impl<R: CypherRunner> UnitWriter for GraphIngestor<R> {
    async fn write(&self, unit: &IngestionUnit) -> GraphResult<()> {
        self.ingest(unit).await
    }
}

/// Relationship labels cannot be bound as parameters, so the label is spliced
/// into the text. It only ever comes from the closed `RelationshipType` enum.
fn relationship_statement(relationship: &Relationship) -> String {
    format!(
        "MATCH (from:Person {{personId: $fromId}})
MATCH (to:Organization {{orgId: $toId}})
MERGE (from)-[r:{label}]->(to)
SET r.source = $source,
    r.confidence = $confidence,
    r.updatedAt = datetime($updatedAt)",
        label = relationship.rel_type().cypher_label()
    )
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}
