//! Map repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD over the `maps` table.
//! - Own the map-overview projection with per-map account counts.
//!
//! # Invariants
//! - Names are trimmed before storage and compared case-insensitively.
//! - Deleting a map removes every owned account through the cascading
//!   foreign key in the same statement.

use crate::model::map::Map;
use crate::repo::{write_violation, RepoError, RepoResult, WriteViolation};
use rusqlite::{params, Connection, Row};
use serde::Serialize;

const MAP_SELECT_SQL: &str = "SELECT id, name, created_at FROM maps";

/// Read model pairing a map with the number of accounts it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapWithAccountCount {
    pub map: Map,
    pub account_count: u32,
}

/// Repository interface for map CRUD and the overview projection.
pub trait MapRepository {
    /// Creates a map from a trimmed, non-empty name and returns it.
    fn create_map(&self, name: &str) -> RepoResult<Map>;
    /// Looks a map up by name, trimmed and case-insensitive.
    fn get_map_by_name(&self, name: &str) -> RepoResult<Option<Map>>;
    /// Looks a map up by surrogate id.
    fn get_map_by_id(&self, id: i64) -> RepoResult<Option<Map>>;
    /// Deletes a map and, via cascade, all its accounts. Returns rows
    /// affected; deleting a nonexistent id is a no-op, not an error.
    fn delete_map(&self, id: i64) -> RepoResult<usize>;
    /// Lists all maps with account counts, ordered by name ascending
    /// case-insensitively. Maps without accounts appear with count 0.
    fn list_maps_with_counts(&self) -> RepoResult<Vec<MapWithAccountCount>>;
}

/// SQLite-backed map repository.
pub struct SqliteMapRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMapRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MapRepository for SqliteMapRepository<'_> {
    fn create_map(&self, name: &str) -> RepoResult<Map> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RepoError::Validation(
                "map name must not be empty".to_string(),
            ));
        }

        self.conn
            .execute("INSERT INTO maps (name) VALUES (?1);", [name])
            .map_err(|err| match write_violation(&err) {
                Some(WriteViolation::Unique) => {
                    RepoError::Duplicate(format!("map `{name}` already exists"))
                }
                _ => err.into(),
            })?;

        let id = self.conn.last_insert_rowid();
        let map = self.conn.query_row(
            &format!("{MAP_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_map_row,
        )?;
        Ok(map)
    }

    fn get_map_by_name(&self, name: &str) -> RepoResult<Option<Map>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MAP_SELECT_SQL} WHERE name = ?1 COLLATE NOCASE;"))?;

        let mut rows = stmt.query([name.trim()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_map_row(row)?));
        }

        Ok(None)
    }

    fn get_map_by_id(&self, id: i64) -> RepoResult<Option<Map>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MAP_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_map_row(row)?));
        }

        Ok(None)
    }

    fn delete_map(&self, id: i64) -> RepoResult<usize> {
        let changed = self.conn.execute("DELETE FROM maps WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn list_maps_with_counts(&self) -> RepoResult<Vec<MapWithAccountCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                m.id,
                m.name,
                m.created_at,
                COUNT(a.id) AS account_count
             FROM maps m
             LEFT JOIN accounts a ON a.map_id = m.id
             GROUP BY m.id
             ORDER BY m.name COLLATE NOCASE ASC, m.id ASC;",
        )?;

        let mut rows = stmt.query(params![])?;
        let mut overview = Vec::new();

        while let Some(row) = rows.next()? {
            overview.push(MapWithAccountCount {
                map: parse_map_row(row)?,
                account_count: row.get("account_count")?,
            });
        }

        Ok(overview)
    }
}

fn parse_map_row(row: &Row<'_>) -> rusqlite::Result<Map> {
    Ok(Map {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}
