//! Political person domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use polgraph_db::queries::persons::PersonRow;
use serde::{Deserialize, Serialize};

use crate::error::{PolgraphError, PolgraphResult};

/// Office a political person holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliticalRole {
    President,
    PrimeMinister,
    Minister,
    Deputy,
    Senator,
}

impl PoliticalRole {
    pub const ALL: [PoliticalRole; 5] = [
        Self::President,
        Self::PrimeMinister,
        Self::Minister,
        Self::Deputy,
        Self::Senator,
    ];

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::President => "president",
            Self::PrimeMinister => "prime_minister",
            Self::Minister => "minister",
            Self::Deputy => "deputy",
            Self::Senator => "senator",
        }
    }

    /// Comma-separated list of accepted values, for error messages and help text.
    pub fn variants() -> String {
        Self::ALL.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl FromStr for PoliticalRole {
    type Err = PolgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                PolgraphError::input(format!("Unknown role '{}'. Use one of: {}.", s, Self::variants()))
            })
    }
}

impl fmt::Display for PoliticalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A political person as stored on the relational side.
///
/// `id` and `role` are optional because records may exist before they are
/// fit for graph export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoliticalPerson {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
    pub role: Option<PoliticalRole>,
    pub wikipedia_url: Option<String>,
    pub summary: Option<String>,
    pub affiliation: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PoliticalPerson {
    /// Create from database row.
    ///
    /// A stored role or timestamp that does not parse is an
    /// [`PolgraphError::InvalidRecord`], never silently dropped.
    pub fn from_row(row: PersonRow) -> PolgraphResult<Self> {
        let role = match row.role.as_deref() {
            Some(value) => Some(value.parse::<PoliticalRole>().map_err(|_| {
                PolgraphError::invalid_record(format!(
                    "Person {} has unknown role '{}'.",
                    row.id, value
                ))
            })?),
            None => None,
        };

        let updated_at = match row.updated_at.as_deref() {
            Some(value) => Some(
                DateTime::parse_from_rfc3339(value)
                    .map_err(|e| {
                        PolgraphError::invalid_record(format!(
                            "Person {} has malformed updated_at '{}': {}",
                            row.id, value, e
                        ))
                    })?
                    .with_timezone(&Utc),
            ),
            None => None,
        };

        Ok(Self {
            id: Some(row.id),
            name: row.name,
            slug: row.slug,
            role,
            wikipedia_url: row.wikipedia_url,
            summary: row.summary,
            affiliation: row.affiliation,
            updated_at,
        })
    }
}

/// Input for creating or replacing a stored person.
///
/// Missing `id`, `slug` and `updated_at` are filled in on save.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPoliticalPerson {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub role: Option<PoliticalRole>,
    #[serde(default)]
    pub wikipedia_url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub affiliation: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
