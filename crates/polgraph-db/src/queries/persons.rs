//! Political person queries.

use crate::pool::{DbError, DbPool, DbResult};
use rusqlite::{params, Row};

/// Political person row from database.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub role: Option<String>,
    pub wikipedia_url: Option<String>,
    pub summary: Option<String>,
    pub affiliation: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Column values for inserting or replacing a person.
#[derive(Debug, Clone, Default)]
pub struct NewPersonRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub slug: &'a str,
    pub role: Option<&'a str>,
    pub wikipedia_url: Option<&'a str>,
    pub summary: Option<&'a str>,
    pub affiliation: Option<&'a str>,
    pub updated_at: Option<&'a str>,
}

const SELECT_COLUMNS: &str = "SELECT id, name, slug, role, wikipedia_url, summary, affiliation,
                                     created_at, updated_at
                              FROM political_persons";

fn map_row(row: &Row<'_>) -> rusqlite::Result<PersonRow> {
    Ok(PersonRow {
        id: row.get(0)?,
        name: row.get(1)?,
        slug: row.get(2)?,
        role: row.get(3)?,
        wikipedia_url: row.get(4)?,
        summary: row.get(5)?,
        affiliation: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

/// Insert a person, or overwrite every column of the row with the same id.
pub fn upsert_person(pool: &DbPool, person: &NewPersonRow<'_>) -> DbResult<()> {
    pool.with_conn(|conn| {
        conn.execute(
            "INSERT INTO political_persons
                 (id, name, slug, role, wikipedia_url, summary, affiliation, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 slug = excluded.slug,
                 role = excluded.role,
                 wikipedia_url = excluded.wikipedia_url,
                 summary = excluded.summary,
                 affiliation = excluded.affiliation,
                 updated_at = excluded.updated_at",
            params![
                person.id,
                person.name,
                person.slug,
                person.role,
                person.wikipedia_url,
                person.summary,
                person.affiliation,
                person.updated_at,
            ],
        )?;
        Ok(())
    })
}

/// Get a person by ID.
pub fn get_person(pool: &DbPool, id: &str) -> DbResult<PersonRow> {
    pool.with_conn(|conn| {
        conn.query_row(
            &format!("{} WHERE id = ?1", SELECT_COLUMNS),
            params![id],
            map_row,
        )
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound(format!("Political person: {}", id)),
            e => DbError::Connection(e),
        })
    })
}

/// List the most recently updated persons.
///
/// Rows without an `updated_at` sort last.
pub fn list_recent_persons(pool: &DbPool, limit: usize) -> DbResult<Vec<PersonRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "{} ORDER BY updated_at IS NULL, updated_at DESC, name ASC LIMIT ?1",
            SELECT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![limit as i64], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// List persons holding `role`, alphabetically by name.
pub fn list_persons_by_role(pool: &DbPool, role: &str, limit: usize) -> DbResult<Vec<PersonRow>> {
    pool.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!(
            "{} WHERE role = ?1 ORDER BY name ASC LIMIT ?2",
            SELECT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![role, limit as i64], map_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    })
}

/// Whether `slug` belongs to a person other than `id`.
pub fn slug_taken(pool: &DbPool, slug: &str, id: &str) -> DbResult<bool> {
    pool.with_conn(|conn| {
        let taken: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM political_persons WHERE slug = ?1 AND id != ?2)",
            params![slug, id],
            |row| row.get(0),
        )?;
        Ok(taken)
    })
}

/// Count stored persons.
pub fn count_persons(pool: &DbPool) -> DbResult<usize> {
    pool.with_conn(|conn| {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM political_persons", [], |row| row.get(0))?;
        Ok(count as usize)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migrations::run_migrations;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        run_migrations(&pool).unwrap();
        pool
    }

    fn insert(pool: &DbPool, id: &str, name: &str, role: &str, updated_at: Option<&str>) {
        let slug = name.to_lowercase().replace(' ', "-");
        upsert_person(
            pool,
            &NewPersonRow {
                id,
                name,
                slug: &slug,
                role: Some(role),
                updated_at,
                ..Default::default()
            },
        )
        .unwrap();
    }

    #[test]
    fn test_upsert_and_get() {
        let pool = pool();
        upsert_person(
            &pool,
            &NewPersonRow {
                id: "p1",
                name: "Ada Lovelace",
                slug: "ada-lovelace",
                role: Some("senator"),
                affiliation: Some("Analytical Party"),
                updated_at: Some("2026-01-01T00:00:00Z"),
                ..Default::default()
            },
        )
        .unwrap();

        let row = get_person(&pool, "p1").unwrap();
        assert_eq!(row.name, "Ada Lovelace");
        assert_eq!(row.role.as_deref(), Some("senator"));
        assert_eq!(row.affiliation.as_deref(), Some("Analytical Party"));
        assert_eq!(row.wikipedia_url, None);
    }

    #[test]
    fn test_upsert_overwrites_existing_row() {
        let pool = pool();
        insert(&pool, "p1", "Ada Lovelace", "senator", None);
        insert(&pool, "p1", "Ada King", "minister", Some("2026-02-01T00:00:00Z"));

        assert_eq!(count_persons(&pool).unwrap(), 1);
        let row = get_person(&pool, "p1").unwrap();
        assert_eq!(row.name, "Ada King");
        assert_eq!(row.role.as_deref(), Some("minister"));
    }

    #[test]
    fn test_slug_taken_ignores_own_row() {
        let pool = pool();
        insert(&pool, "p1", "Ada Lovelace", "senator", None);

        assert!(!slug_taken(&pool, "ada-lovelace", "p1").unwrap());
        assert!(slug_taken(&pool, "ada-lovelace", "p2").unwrap());
        assert!(!slug_taken(&pool, "ada-king", "p2").unwrap());
    }

    #[test]
    fn test_get_missing_person() {
        let pool = pool();
        assert!(matches!(get_person(&pool, "nope"), Err(DbError::NotFound(_))));
    }

    #[test]
    fn test_list_recent_orders_by_updated_at_desc() {
        let pool = pool();
        insert(&pool, "p1", "Alpha", "deputy", Some("2026-01-01T00:00:00Z"));
        insert(&pool, "p2", "Bravo", "deputy", Some("2026-03-01T00:00:00Z"));
        insert(&pool, "p3", "Charlie", "deputy", None);
        insert(&pool, "p4", "Delta", "deputy", Some("2026-02-01T00:00:00Z"));

        let ids: Vec<_> = list_recent_persons(&pool, 10).unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["p2", "p4", "p1", "p3"]);

        assert_eq!(list_recent_persons(&pool, 2).unwrap().len(), 2);
    }

    #[test]
    fn test_list_by_role_orders_by_name() {
        let pool = pool();
        insert(&pool, "p1", "Zeta", "senator", Some("2026-03-01T00:00:00Z"));
        insert(&pool, "p2", "Alpha", "senator", Some("2026-01-01T00:00:00Z"));
        insert(&pool, "p3", "Mid", "deputy", Some("2026-02-01T00:00:00Z"));

        let names: Vec<_> = list_persons_by_role(&pool, "senator", 10)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
    }
}
