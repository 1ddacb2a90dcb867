//! Core domain logic for CredMap.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::account::{parse_credential_pair, Account, CredentialPair, CredentialParseError};
pub use model::map::Map;
pub use repo::account_repo::{AccountRepository, SqliteAccountRepository};
pub use repo::map_repo::{MapRepository, MapWithAccountCount, SqliteMapRepository};
pub use repo::{RepoError, RepoResult};
pub use service::catalog::CatalogService;
pub use service::import::{import_credentials, ImportLineError, ImportOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
