//! Graph representation of political persons.

pub mod mapper;
pub mod model;
pub mod sample;

pub use mapper::{map_person, org_id_for, AFFILIATION_CONFIDENCE, AFFILIATION_SOURCE, ORG_ID_PREFIX};
pub use model::{IngestionUnit, OrganizationNode, PersonNode, Relationship, RelationshipType};
pub use sample::sample_units;
