//! Validated graph value objects.
//!
//! Every type here checks its invariants once, in its constructor, and keeps
//! its fields private afterwards. Holding an instance is proof it is valid.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{PolgraphError, PolgraphResult};

/// Return the trimmed value, or a validation error naming `owner` and `field`.
fn require_non_empty(value: &str, owner: &str, field: &str) -> PolgraphResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PolgraphError::validation(format!(
            "{} {} cannot be empty.",
            owner, field
        )));
    }
    Ok(trimmed.to_string())
}

/// Blank optional strings become `None`.
fn optional(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).map(str::to_string)
}

/// A political actor as a `:Person` vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonNode {
    person_id: String,
    name: String,
    slug: String,
    role: String,
    wikipedia_url: Option<String>,
    summary: Option<String>,
    updated_at: DateTime<Utc>,
}

impl PersonNode {
    pub fn new(
        person_id: &str,
        name: &str,
        slug: &str,
        role: &str,
        wikipedia_url: Option<&str>,
        summary: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> PolgraphResult<Self> {
        Ok(Self {
            person_id: require_non_empty(person_id, "PersonNode", "personId")?,
            name: require_non_empty(name, "PersonNode", "name")?,
            slug: require_non_empty(slug, "PersonNode", "slug")?,
            role: require_non_empty(role, "PersonNode", "role")?,
            wikipedia_url: optional(wikipedia_url),
            summary: optional(summary),
            updated_at,
        })
    }

    pub fn person_id(&self) -> &str {
        &self.person_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn wikipedia_url(&self) -> Option<&str> {
        self.wikipedia_url.as_deref()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// An affiliation as an `:Organization` vertex.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrganizationNode {
    org_id: String,
    name: String,
    updated_at: DateTime<Utc>,
}

impl OrganizationNode {
    pub fn new(org_id: &str, name: &str, updated_at: DateTime<Utc>) -> PolgraphResult<Self> {
        Ok(Self {
            org_id: require_non_empty(org_id, "OrganizationNode", "orgId")?,
            name: require_non_empty(name, "OrganizationNode", "name")?,
            updated_at,
        })
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Edge types between a person and an organization.
///
/// This is the only source of relationship label text that ever reaches a
/// Cypher statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    MemberOf,
    AllyOf,
    FamilyOf,
    HoldsPosition,
    MentionedIn,
}

impl RelationshipType {
    pub const ALL: [RelationshipType; 5] = [
        Self::MemberOf,
        Self::AllyOf,
        Self::FamilyOf,
        Self::HoldsPosition,
        Self::MentionedIn,
    ];

    /// Relationship label as written in Cypher.
    pub fn cypher_label(&self) -> &'static str {
        match self {
            Self::MemberOf => "MEMBER_OF",
            Self::AllyOf => "ALLY_OF",
            Self::FamilyOf => "FAMILY_OF",
            Self::HoldsPosition => "HOLDS_POSITION",
            Self::MentionedIn => "MENTIONED_IN",
        }
    }

    /// Human-readable kind of tie.
    pub fn description(&self) -> &'static str {
        match self {
            Self::MemberOf => "membership",
            Self::AllyOf => "alliance",
            Self::FamilyOf => "family",
            Self::HoldsPosition => "position-holder",
            Self::MentionedIn => "mentioned-in",
        }
    }
}

/// A directed, typed edge from a person to an organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    from_id: String,
    to_id: String,
    rel_type: RelationshipType,
    source: Option<String>,
    confidence: Option<f64>,
    updated_at: DateTime<Utc>,
}

impl Relationship {
    /// Build a relationship. A `confidence` outside `[0, 1]` (or NaN) is
    /// rejected, never clamped.
    pub fn new(
        from_id: &str,
        to_id: &str,
        rel_type: RelationshipType,
        source: Option<&str>,
        confidence: Option<f64>,
        updated_at: DateTime<Utc>,
    ) -> PolgraphResult<Self> {
        let from_id = require_non_empty(from_id, "Relationship", "fromId")?;
        let to_id = require_non_empty(to_id, "Relationship", "toId")?;

        if let Some(value) = confidence {
            if !(0.0..=1.0).contains(&value) {
                return Err(PolgraphError::validation(format!(
                    "Relationship confidence must be between 0 and 1, got {}.",
                    value
                )));
            }
        }

        Ok(Self {
            from_id,
            to_id,
            rel_type,
            source: optional(source),
            confidence,
            updated_at,
        })
    }

    pub fn from_id(&self) -> &str {
        &self.from_id
    }

    pub fn to_id(&self) -> &str {
        &self.to_id
    }

    pub fn rel_type(&self) -> RelationshipType {
        self.rel_type
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn confidence(&self) -> Option<f64> {
        self.confidence
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// One unit of ingestion work: a person, and optionally the organization it
/// belongs to and the edge between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestionUnit {
    person: PersonNode,
    organization: Option<OrganizationNode>,
    relationship: Option<Relationship>,
}

impl IngestionUnit {
    /// A unit with no affiliation.
    pub fn person_only(person: PersonNode) -> Self {
        Self {
            person,
            organization: None,
            relationship: None,
        }
    }

    /// Assemble a unit. A relationship must start at the unit's person and,
    /// when the unit carries an organization, end at it.
    pub fn new(
        person: PersonNode,
        organization: Option<OrganizationNode>,
        relationship: Option<Relationship>,
    ) -> PolgraphResult<Self> {
        if let Some(rel) = &relationship {
            if rel.from_id() != person.person_id() {
                return Err(PolgraphError::validation(format!(
                    "Relationship starts at '{}' but the unit's person is '{}'.",
                    rel.from_id(),
                    person.person_id()
                )));
            }
            if let Some(org) = &organization {
                if rel.to_id() != org.org_id() {
                    return Err(PolgraphError::validation(format!(
                        "Relationship targets '{}' but the unit's organization is '{}'.",
                        rel.to_id(),
                        org.org_id()
                    )));
                }
            }
        }

        Ok(Self {
            person,
            organization,
            relationship,
        })
    }

    pub fn person(&self) -> &PersonNode {
        &self.person
    }

    pub fn organization(&self) -> Option<&OrganizationNode> {
        self.organization.as_ref()
    }

    pub fn relationship(&self) -> Option<&Relationship> {
        self.relationship.as_ref()
    }
}
