//! Deterministic synthetic units for exercising the pipeline without a
//! populated source database.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::PolgraphResult;
use crate::person::model::PoliticalRole;

use super::model::{IngestionUnit, OrganizationNode, PersonNode, Relationship, RelationshipType};

pub const SAMPLE_ORG_ID: &str = "org:sample-party";
pub const SAMPLE_ORG_NAME: &str = "Sample Party";
pub const SAMPLE_SOURCE: &str = "sample";
pub const SAMPLE_CONFIDENCE: f64 = 0.5;

/// Stable person id for the `index`-th sample person.
pub fn sample_person_id(index: usize) -> String {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, format!("polgraph:sample-person-{}", index).as_bytes()).to_string()
}

/// Build exactly `limit` sample units, all members of the same sample party.
pub fn sample_units(limit: usize, now: DateTime<Utc>) -> PolgraphResult<Vec<IngestionUnit>> {
    (1..=limit).map(|i| sample_unit(i, now)).collect()
}

fn sample_unit(index: usize, now: DateTime<Utc>) -> PolgraphResult<IngestionUnit> {
    let person_id = sample_person_id(index);

    let person = PersonNode::new(
        &person_id,
        &format!("Sample Person {}", index),
        &format!("sample-person-{}", index),
        PoliticalRole::Minister.as_str(),
        None,
        Some("Sample DTO for pipeline validation."),
        now,
    )?;
    let organization = OrganizationNode::new(SAMPLE_ORG_ID, SAMPLE_ORG_NAME, now)?;
    let relationship = Relationship::new(
        &person_id,
        SAMPLE_ORG_ID,
        RelationshipType::MemberOf,
        Some(SAMPLE_SOURCE),
        Some(SAMPLE_CONFIDENCE),
        now,
    )?;

    IngestionUnit::new(person, Some(organization), Some(relationship))
}
