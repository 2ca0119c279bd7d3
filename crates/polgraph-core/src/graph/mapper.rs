//! Political person to graph unit mapping.

use chrono::{DateTime, Utc};

use crate::error::{PolgraphError, PolgraphResult};
use crate::person::model::PoliticalPerson;
use crate::slug::slugify;

use super::model::{IngestionUnit, OrganizationNode, PersonNode, Relationship, RelationshipType};

/// Namespace of organization ids derived from affiliation text.
pub const ORG_ID_PREFIX: &str = "org:";

/// Provenance recorded on affiliation edges.
pub const AFFILIATION_SOURCE: &str = "wikipedia";

/// Confidence recorded on affiliation edges.
pub const AFFILIATION_CONFIDENCE: f64 = 0.6;

/// Synthetic organization id for an affiliation text.
pub fn org_id_for(affiliation: &str) -> String {
    format!("{}{}", ORG_ID_PREFIX, slugify(affiliation))
}

/// Map a person record to an ingestion unit.
///
/// `now` stands in for a missing update timestamp. A blank affiliation yields
/// a person-only unit.
pub fn map_person(person: &PoliticalPerson, now: DateTime<Utc>) -> PolgraphResult<IngestionUnit> {
    let person_id = person
        .id
        .as_deref()
        .ok_or_else(|| PolgraphError::mapping("Political person must have an ID before ingestion."))?;
    let role = person
        .role
        .ok_or_else(|| PolgraphError::mapping("Political person must have a role before ingestion."))?;

    let updated_at = person.updated_at.unwrap_or(now);
    let node = PersonNode::new(
        person_id,
        &person.name,
        &person.slug,
        role.as_str(),
        person.wikipedia_url.as_deref(),
        person.summary.as_deref(),
        updated_at,
    )?;

    let affiliation = match person.affiliation.as_deref() {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Ok(IngestionUnit::person_only(node)),
    };

    let org_id = org_id_for(affiliation);
    let organization = OrganizationNode::new(&org_id, affiliation, updated_at)?;
    let relationship = Relationship::new(
        node.person_id(),
        &org_id,
        RelationshipType::MemberOf,
        Some(AFFILIATION_SOURCE),
        Some(AFFILIATION_CONFIDENCE),
        updated_at,
    )?;

    IngestionUnit::new(node, Some(organization), Some(relationship))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::model::PoliticalRole;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 30, 0).unwrap()
    }

    fn record(affiliation: Option<&str>) -> PoliticalPerson {
        PoliticalPerson {
            id: Some("0194f6a2-6c1e-7d4b-9a53-1f0c2e8b7a10".into()),
            name: "Jane Doe".into(),
            slug: "jane-doe".into(),
            role: Some(PoliticalRole::Minister),
            wikipedia_url: Some("https://en.wikipedia.org/wiki/Jane_Doe".into()),
            summary: None,
            affiliation: affiliation.map(str::to_string),
            updated_at: Some(Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_blank_affiliation_yields_person_only() {
        for affiliation in [None, Some(""), Some("   \t")] {
            let unit = map_person(&record(affiliation), now()).unwrap();
            assert!(unit.organization().is_none());
            assert!(unit.relationship().is_none());
            assert_eq!(unit.person().role(), "minister");
        }
    }

    #[test]
    fn test_affiliation_yields_membership() {
        let unit = map_person(&record(Some("Some Party!!")), now()).unwrap();

        let org = unit.organization().unwrap();
        assert_eq!(org.org_id(), format!("{}some-party", ORG_ID_PREFIX));
        assert_eq!(org.name(), "Some Party!!");

        let rel = unit.relationship().unwrap();
        assert_eq!(rel.rel_type(), RelationshipType::MemberOf);
        assert_eq!(rel.rel_type().description(), "membership");
        assert_eq!(rel.confidence(), Some(0.6));
        assert_eq!(rel.source(), Some("wikipedia"));
        assert_eq!(rel.from_id(), unit.person().person_id());
        assert_eq!(rel.to_id(), org.org_id());
        assert_eq!(rel.updated_at(), unit.person().updated_at());
        assert_eq!(org.updated_at(), unit.person().updated_at());
    }

    #[test]
    fn test_symbol_only_affiliation_uses_fallback_id() {
        let unit = map_person(&record(Some("???")), now()).unwrap();
        assert_eq!(unit.organization().unwrap().org_id(), "org:unknown");
    }

    #[test]
    fn test_non_latin_affiliations_map_to_distinct_organizations() {
        let united = map_person(&record(Some("Единая Россия")), now()).unwrap();
        let just = map_person(&record(Some("Справедливая Россия")), now()).unwrap();

        let united_id = united.organization().unwrap().org_id();
        let just_id = just.organization().unwrap().org_id();
        assert_ne!(united_id, "org:unknown");
        assert_ne!(united_id, just_id);

        let greens = map_person(&record(Some("Europe Écologie Les Verts")), now()).unwrap();
        assert_eq!(greens.organization().unwrap().org_id(), "org:europe-ecologie-les-verts");
    }

    #[test]
    fn test_missing_timestamp_uses_now() {
        let mut person = record(None);
        person.updated_at = None;
        let unit = map_person(&person, now()).unwrap();
        assert_eq!(unit.person().updated_at(), now());
    }

    #[test]
    fn test_missing_id_or_role_is_mapping_error() {
        let mut no_id = record(None);
        no_id.id = None;
        assert!(matches!(map_person(&no_id, now()), Err(PolgraphError::Mapping(_))));

        let mut no_role = record(None);
        no_role.role = None;
        assert!(matches!(map_person(&no_role, now()), Err(PolgraphError::Mapping(_))));
    }

    #[test]
    fn test_blank_name_is_validation_error() {
        let mut person = record(None);
        person.name = "  ".into();
        assert!(matches!(map_person(&person, now()), Err(PolgraphError::Validation(_))));
    }
}
