//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for maps and accounts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Constraint violations are classified from SQLite extended result
//!   codes, never from error message text.
//! - Optional lookups return `Ok(None)` and empty listings return an empty
//!   `Vec`; only operations that require existence surface `NotFound`.

use crate::db::DbError;
use crate::model::account::CredentialParseError;
use rusqlite::ffi;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod account_repo;
pub mod map_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error taxonomy shared by map and account persistence.
#[derive(Debug)]
pub enum RepoError {
    /// Empty or malformed required input.
    Validation(String),
    /// Uniqueness violated: map name, or login within one map.
    Duplicate(String),
    /// Operation requires a map or account that does not exist.
    NotFound(String),
    /// Underlying storage failure unrelated to application constraints.
    Store(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::Duplicate(message) => write!(f, "{message}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(DbError::Sqlite(value))
    }
}

impl From<CredentialParseError> for RepoError {
    fn from(value: CredentialParseError) -> Self {
        Self::Validation(value.to_string())
    }
}

/// Constraint class of a failed write, when the failure is a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum WriteViolation {
    Unique,
    ForeignKey,
}

/// Inspects a write failure for a structured constraint-violation signal.
///
/// Returns `None` for everything that is not a unique or foreign-key
/// violation; those failures stay `Store` errors at the call site.
pub(crate) fn write_violation(err: &rusqlite::Error) -> Option<WriteViolation> {
    let rusqlite::Error::SqliteFailure(failure, _) = err else {
        return None;
    };

    match failure.extended_code {
        ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
            Some(WriteViolation::Unique)
        }
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(WriteViolation::ForeignKey),
        _ => None,
    }
}
