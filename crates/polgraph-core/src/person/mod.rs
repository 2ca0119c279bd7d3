//! Political persons: the relational source of graph ingestion.

pub mod model;

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use polgraph_db::queries::persons::{self as queries, NewPersonRow};
use polgraph_db::DbPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{PolgraphError, PolgraphResult};
use crate::slug::slugify;
use model::{NewPoliticalPerson, PoliticalPerson, PoliticalRole};

/// Anything that can hand out person records for ingestion.
pub trait PersonSource {
    /// Up to `limit` records. With a role filter the records are ordered by
    /// name, otherwise most recently updated first.
    fn list_for_ingestion(
        &self,
        role: Option<PoliticalRole>,
        limit: usize,
    ) -> PolgraphResult<Vec<PoliticalPerson>>;
}

impl PersonSource for DbPool {
    fn list_for_ingestion(
        &self,
        role: Option<PoliticalRole>,
        limit: usize,
    ) -> PolgraphResult<Vec<PoliticalPerson>> {
        list_for_ingestion(self, role, limit)
    }
}

/// In-memory records, ordered the same way as the database source.
impl PersonSource for [PoliticalPerson] {
    fn list_for_ingestion(
        &self,
        role: Option<PoliticalRole>,
        limit: usize,
    ) -> PolgraphResult<Vec<PoliticalPerson>> {
        let mut persons: Vec<PoliticalPerson> = self
            .iter()
            .filter(|p| role.is_none() || p.role == role)
            .cloned()
            .collect();

        if role.is_some() {
            persons.sort_by(|a, b| a.name.cmp(&b.name));
        } else {
            // Newest first; records without a timestamp go last.
            persons.sort_by(|a, b| match (a.updated_at, b.updated_at) {
                (Some(x), Some(y)) => y.cmp(&x),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.name.cmp(&b.name),
            });
        }

        persons.truncate(limit);
        Ok(persons)
    }
}

/// Create or replace a person, stamping `now` as its update time unless the
/// input carries one.
pub fn save_person(
    pool: &DbPool,
    input: &NewPoliticalPerson,
    now: DateTime<Utc>,
) -> PolgraphResult<PoliticalPerson> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(PolgraphError::validation("Political person name cannot be empty."));
    }

    let id = input
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let base_slug = input
        .slug
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(slugify)
        .unwrap_or_else(|| slugify(name));
    let slug = unique_slug(pool, &base_slug, &id)?;
    let updated_at = input
        .updated_at
        .unwrap_or(now)
        .to_rfc3339_opts(SecondsFormat::Secs, true);

    queries::upsert_person(
        pool,
        &NewPersonRow {
            id: &id,
            name,
            slug: &slug,
            role: input.role.map(|r| r.as_str()),
            wikipedia_url: input.wikipedia_url.as_deref(),
            summary: input.summary.as_deref(),
            affiliation: input.affiliation.as_deref(),
            updated_at: Some(&updated_at),
        },
    )?;
    debug!(person_id = %id, slug = %slug, "Saved political person");

    get_person(pool, &id)
}

/// First of `base`, `base-2`, `base-3`, ... not held by another person.
fn unique_slug(pool: &DbPool, base: &str, id: &str) -> PolgraphResult<String> {
    let mut candidate = base.to_string();
    let mut suffix = 2;
    while queries::slug_taken(pool, &candidate, id)? {
        candidate = format!("{}-{}", base, suffix);
        suffix += 1;
    }
    Ok(candidate)
}

/// Get a person by ID.
pub fn get_person(pool: &DbPool, id: &str) -> PolgraphResult<PoliticalPerson> {
    let row = queries::get_person(pool, id)?;
    PoliticalPerson::from_row(row)
}

/// List persons in ingestion order.
pub fn list_for_ingestion(
    pool: &DbPool,
    role: Option<PoliticalRole>,
    limit: usize,
) -> PolgraphResult<Vec<PoliticalPerson>> {
    let rows = match role {
        Some(role) => queries::list_persons_by_role(pool, role.as_str(), limit)?,
        None => queries::list_recent_persons(pool, limit)?,
    };
    rows.into_iter().map(PoliticalPerson::from_row).collect()
}

/// Number of stored persons.
pub fn count_persons(pool: &DbPool) -> PolgraphResult<usize> {
    Ok(queries::count_persons(pool)?)
}

/// Load a JSON array of persons from `path` and save each one.
///
/// Stops at the first invalid entry; entries before it stay saved.
pub fn import_persons(
    pool: &DbPool,
    path: &Path,
    now: DateTime<Utc>,
) -> PolgraphResult<Vec<PoliticalPerson>> {
    let contents = std::fs::read_to_string(path)?;
    let inputs: Vec<NewPoliticalPerson> = serde_json::from_str(&contents)?;

    inputs
        .iter()
        .map(|input| save_person(pool, input, now))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use polgraph_db::migrations::run_migrations;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    fn input(name: &str, role: PoliticalRole) -> NewPoliticalPerson {
        NewPoliticalPerson {
            name: name.to_string(),
            role: Some(role),
            ..Default::default()
        }
    }

    #[test]
    fn test_save_fills_defaults() {
        let pool = pool();
        let saved = save_person(&pool, &input("Jane Doe", PoliticalRole::Minister), now()).unwrap();

        assert!(saved.id.is_some());
        assert_eq!(saved.slug, "jane-doe");
        assert_eq!(saved.updated_at, Some(now()));
        assert_eq!(saved.role, Some(PoliticalRole::Minister));
    }

    #[test]
    fn test_save_rejects_blank_name() {
        let pool = pool();
        let result = save_person(&pool, &input("  ", PoliticalRole::Minister), now());
        assert!(matches!(result, Err(PolgraphError::Validation(_))));
    }

    #[test]
    fn test_save_with_explicit_id_replaces() {
        let pool = pool();
        let mut first = input("Jane Doe", PoliticalRole::Deputy);
        first.id = Some("p-1".into());
        save_person(&pool, &first, now()).unwrap();

        let mut second = input("Jane Doe", PoliticalRole::Senator);
        second.id = Some("p-1".into());
        second.affiliation = Some("Some Party".into());
        let saved = save_person(&pool, &second, now()).unwrap();

        assert_eq!(saved.role, Some(PoliticalRole::Senator));
        assert_eq!(saved.affiliation.as_deref(), Some("Some Party"));
    }

    #[test]
    fn test_same_name_gets_suffixed_slug() {
        let pool = pool();
        let first = save_person(&pool, &input("Jean Dupont", PoliticalRole::Deputy), now()).unwrap();
        let second = save_person(&pool, &input("Jean Dupont", PoliticalRole::Senator), now()).unwrap();
        let third = save_person(&pool, &input("Jean Dupont", PoliticalRole::Minister), now()).unwrap();

        assert_eq!(first.slug, "jean-dupont");
        assert_eq!(second.slug, "jean-dupont-2");
        assert_eq!(third.slug, "jean-dupont-3");
        assert_ne!(first.id, second.id);
        assert_eq!(count_persons(&pool).unwrap(), 3);
    }

    #[test]
    fn test_resave_keeps_own_slug() {
        let pool = pool();
        let mut person = input("Jean Dupont", PoliticalRole::Deputy);
        person.id = Some("p-1".into());
        save_person(&pool, &person, now()).unwrap();

        person.summary = Some("Updated".into());
        let saved = save_person(&pool, &person, now()).unwrap();
        assert_eq!(saved.slug, "jean-dupont");
    }

    #[test]
    fn test_import_with_homonyms_saves_every_entry() {
        let pool = pool();
        let path = std::env::temp_dir().join(format!("polgraph-homonyms-{}.json", Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[
                {"name": "Jean Dupont", "role": "deputy"},
                {"name": "Jean Dupont", "role": "senator"}
            ]"#,
        )
        .unwrap();

        let saved = import_persons(&pool, &path, now()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(saved.len(), 2);
        assert_eq!(count_persons(&pool).unwrap(), 2);
    }

    #[test]
    fn test_malformed_stored_timestamp_is_reported() {
        let pool = pool();
        queries::upsert_person(
            &pool,
            &NewPersonRow {
                id: "p-bad",
                name: "Jane Doe",
                slug: "jane-doe",
                role: Some("deputy"),
                updated_at: Some("last tuesday"),
                ..Default::default()
            },
        )
        .unwrap();

        let result = pool.list_for_ingestion(None, 10);
        assert!(matches!(result, Err(PolgraphError::InvalidRecord(_))));
    }

    #[test]
    fn test_source_filters_by_role() {
        let pool = pool();
        save_person(&pool, &input("Zed", PoliticalRole::Senator), now()).unwrap();
        save_person(&pool, &input("Amy", PoliticalRole::Senator), now()).unwrap();
        save_person(&pool, &input("Bob", PoliticalRole::Deputy), now()).unwrap();

        let senators = pool.list_for_ingestion(Some(PoliticalRole::Senator), 50).unwrap();
        let names: Vec<_> = senators.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Amy", "Zed"]);

        assert_eq!(pool.list_for_ingestion(None, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_in_memory_source_matches_database_order() {
        let record = |name: &str, role, day: Option<u32>| PoliticalPerson {
            id: Some(name.to_lowercase()),
            name: name.to_string(),
            slug: name.to_lowercase(),
            role: Some(role),
            wikipedia_url: None,
            summary: None,
            affiliation: None,
            updated_at: day.map(|d| Utc.with_ymd_and_hms(2026, 1, d, 0, 0, 0).unwrap()),
        };
        let records = vec![
            record("Old", PoliticalRole::Deputy, Some(1)),
            record("Undated", PoliticalRole::Senator, None),
            record("New", PoliticalRole::Senator, Some(20)),
            record("Mid", PoliticalRole::Deputy, Some(10)),
        ];

        let recent: Vec<_> = records
            .list_for_ingestion(None, 10)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(recent, vec!["New", "Mid", "Old", "Undated"]);

        let senators: Vec<_> = records
            .list_for_ingestion(Some(PoliticalRole::Senator), 1)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(senators, vec!["New"]);
    }

    #[test]
    fn test_import_from_json_file() {
        let pool = pool();
        let path = std::env::temp_dir().join(format!("polgraph-import-{}.json", Uuid::new_v4()));
        std::fs::write(
            &path,
            r#"[
                {"name": "Jane Doe", "role": "minister", "affiliation": "Some Party"},
                {"id": "fixed", "name": "John Roe", "role": "deputy"}
            ]"#,
        )
        .unwrap();

        let saved = import_persons(&pool, &path, now()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(saved.len(), 2);
        assert_eq!(get_person(&pool, "fixed").unwrap().name, "John Roe");
    }
}
