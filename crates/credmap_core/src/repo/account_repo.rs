//! Account repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide credential CRUD scoped to one map.
//! - Keep the legacy `name`/`data` columns synchronized on every write.
//!
//! # Invariants
//! - `(login, map_id)` is unique case-insensitively whenever `login` is
//!   non-null; legacy null-login rows are exempt.
//! - New writes always mirror the effective label into `name` and null out
//!   `data`.
//! - `created_at` is never touched after insert.

use crate::model::account::Account;
use crate::repo::{write_violation, RepoError, RepoResult, WriteViolation};
use rusqlite::{params, Connection, Row};

const ACCOUNT_SELECT_SQL: &str = "SELECT
    id,
    map_id,
    login,
    password,
    label,
    name,
    created_at
FROM accounts";

const ACCOUNTS_LIMIT_MAX: u32 = 500;

/// Repository interface for account CRUD and the per-map listing.
pub trait AccountRepository {
    /// Inserts one credential and returns the stored row.
    fn add_account(
        &self,
        map_id: i64,
        login: &str,
        password: &str,
        label: Option<&str>,
    ) -> RepoResult<Account>;
    /// Deletes at most one account matching the trimmed login within the
    /// map, case-insensitively. Returns rows affected (0 or 1).
    fn remove_account_by_login(&self, map_id: i64, login: &str) -> RepoResult<usize>;
    /// Deletes by surrogate id. Returns rows affected.
    fn remove_account_by_id(&self, id: i64) -> RepoResult<usize>;
    /// Looks an account up by surrogate id.
    fn get_account_by_id(&self, id: i64) -> RepoResult<Option<Account>>;
    /// Lists up to `limit` accounts of one map ordered by effective label
    /// ascending, case-insensitively. An empty map yields an empty Vec.
    fn list_accounts_by_map(&self, map_id: i64, limit: u32) -> RepoResult<Vec<Account>>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAccountRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn add_account(
        &self,
        map_id: i64,
        login: &str,
        password: &str,
        label: Option<&str>,
    ) -> RepoResult<Account> {
        let id = insert_account(self.conn, map_id, login, password, label)?;

        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(parse_account_row(row)?),
            None => Err(RepoError::NotFound(format!(
                "account {id} missing right after insert"
            ))),
        }
    }

    fn remove_account_by_login(&self, map_id: i64, login: &str) -> RepoResult<usize> {
        // Unique index guarantees at most one match for non-null logins;
        // the LIMIT keeps the contract explicit either way.
        let changed = self.conn.execute(
            "DELETE FROM accounts
             WHERE id IN (
                SELECT id FROM accounts
                WHERE map_id = ?1 AND login = ?2 COLLATE NOCASE
                ORDER BY id ASC
                LIMIT 1
             );",
            params![map_id, login.trim()],
        )?;
        Ok(changed)
    }

    fn remove_account_by_id(&self, id: i64) -> RepoResult<usize> {
        let changed = self
            .conn
            .execute("DELETE FROM accounts WHERE id = ?1;", [id])?;
        Ok(changed)
    }

    fn get_account_by_id(&self, id: i64) -> RepoResult<Option<Account>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ACCOUNT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_account_row(row)?));
        }

        Ok(None)
    }

    fn list_accounts_by_map(&self, map_id: i64, limit: u32) -> RepoResult<Vec<Account>> {
        let limit = limit.min(ACCOUNTS_LIMIT_MAX);
        let mut stmt = self.conn.prepare(&format!(
            "{ACCOUNT_SELECT_SQL}
             WHERE map_id = ?1
             ORDER BY COALESCE(label, login, name) COLLATE NOCASE ASC, id ASC
             LIMIT ?2;"
        ))?;

        let mut rows = stmt.query(params![map_id, limit])?;
        let mut accounts = Vec::new();

        while let Some(row) = rows.next()? {
            accounts.push(parse_account_row(row)?);
        }

        Ok(accounts)
    }
}

/// Inserts one account row, mirroring the legacy display column.
///
/// Shared by single-add and bulk import so both paths normalize input and
/// classify constraint violations identically.
pub(crate) fn insert_account(
    conn: &Connection,
    map_id: i64,
    login: &str,
    password: &str,
    label: Option<&str>,
) -> RepoResult<i64> {
    let login = login.trim();
    if login.is_empty() {
        return Err(RepoError::Validation("login must not be empty".to_string()));
    }

    let label = label.map(str::trim).filter(|value| !value.is_empty());
    let display = label.unwrap_or(login);

    conn.execute(
        "INSERT INTO accounts (map_id, login, password, label, name, data)
         VALUES (?1, ?2, ?3, ?4, ?5, NULL);",
        params![map_id, login, password, label, display],
    )
    .map_err(|err| match write_violation(&err) {
        Some(WriteViolation::Unique) => RepoError::Duplicate(format!(
            "login `{login}` already exists in map {map_id}"
        )),
        Some(WriteViolation::ForeignKey) => {
            RepoError::NotFound(format!("map {map_id} does not exist"))
        }
        None => err.into(),
    })?;

    Ok(conn.last_insert_rowid())
}

fn parse_account_row(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get("id")?,
        map_id: row.get("map_id")?,
        login: row.get("login")?,
        password: row.get("password")?,
        label: row.get("label")?,
        legacy_name: row.get("name")?,
        created_at: row.get("created_at")?,
    })
}
