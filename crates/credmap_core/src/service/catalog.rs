//! Catalog facade for presentation layers.
//!
//! # Responsibility
//! - Own the database connection and expose every catalog operation as
//!   plain-value methods.
//! - Replace hidden shared state with one explicitly constructed object
//!   front ends can hold and pass around.
//!
//! # Invariants
//! - All methods block until completion; there is no internal threading.
//! - The wrapped connection has been bootstrapped and migrated.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::account::{parse_credential_pair, Account};
use crate::model::map::Map;
use crate::repo::account_repo::{AccountRepository, SqliteAccountRepository};
use crate::repo::map_repo::{MapRepository, MapWithAccountCount, SqliteMapRepository};
use crate::repo::RepoResult;
use crate::service::import::{import_credentials, ImportOutcome};
use rusqlite::Connection;
use std::path::Path;

/// Synchronous facade over the map/account repositories and bulk importer.
pub struct CatalogService {
    conn: Connection,
}

impl CatalogService {
    /// Opens (and migrates) the catalog database at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self { conn: open_db(path)? })
    }

    /// Opens an in-memory catalog, mainly for tests and tooling.
    pub fn in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Wraps an already-bootstrapped connection.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn create_map(&self, name: &str) -> RepoResult<Map> {
        SqliteMapRepository::new(&self.conn).create_map(name)
    }

    pub fn get_map_by_name(&self, name: &str) -> RepoResult<Option<Map>> {
        SqliteMapRepository::new(&self.conn).get_map_by_name(name)
    }

    pub fn get_map_by_id(&self, id: i64) -> RepoResult<Option<Map>> {
        SqliteMapRepository::new(&self.conn).get_map_by_id(id)
    }

    pub fn delete_map(&self, id: i64) -> RepoResult<usize> {
        SqliteMapRepository::new(&self.conn).delete_map(id)
    }

    pub fn list_maps_with_counts(&self) -> RepoResult<Vec<MapWithAccountCount>> {
        SqliteMapRepository::new(&self.conn).list_maps_with_counts()
    }

    /// Parses a `login:password` pair and inserts it with an optional label.
    pub fn add_credential(
        &self,
        map_id: i64,
        pair_text: &str,
        label: Option<&str>,
    ) -> RepoResult<Account> {
        let pair = parse_credential_pair(pair_text)?;
        SqliteAccountRepository::new(&self.conn).add_account(
            map_id,
            &pair.login,
            &pair.password,
            label,
        )
    }

    pub fn add_account(
        &self,
        map_id: i64,
        login: &str,
        password: &str,
        label: Option<&str>,
    ) -> RepoResult<Account> {
        SqliteAccountRepository::new(&self.conn).add_account(map_id, login, password, label)
    }

    pub fn remove_account_by_login(&self, map_id: i64, login: &str) -> RepoResult<usize> {
        SqliteAccountRepository::new(&self.conn).remove_account_by_login(map_id, login)
    }

    pub fn remove_account_by_id(&self, id: i64) -> RepoResult<usize> {
        SqliteAccountRepository::new(&self.conn).remove_account_by_id(id)
    }

    pub fn get_account_by_id(&self, id: i64) -> RepoResult<Option<Account>> {
        SqliteAccountRepository::new(&self.conn).get_account_by_id(id)
    }

    pub fn list_accounts_by_map(&self, map_id: i64, limit: u32) -> RepoResult<Vec<Account>> {
        SqliteAccountRepository::new(&self.conn).list_accounts_by_map(map_id, limit)
    }

    /// Bulk-imports raw multi-line credential text into one map.
    pub fn import_credentials(&mut self, map_id: i64, text: &str) -> RepoResult<ImportOutcome> {
        import_credentials(&mut self.conn, map_id, text)
    }
}
