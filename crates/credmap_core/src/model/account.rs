//! Account domain model and credential-pair parsing.
//!
//! # Responsibility
//! - Define the credential record owned by exactly one map.
//! - Parse `login:password` input shared by single-add and bulk import.
//! - Derive the effective display label.
//!
//! # Invariants
//! - `login`/`password`/`label` are authoritative; the legacy `name` column
//!   mirrors the effective label on every write and is only read as a last
//!   resort for rows migrated from the old schema.
//! - `login` may be null only in migrated legacy rows.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A single credential record owned by exactly one map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Surrogate integer identity, immutable.
    pub id: i64,
    /// Owning map; the foreign key cascades on map deletion.
    pub map_id: i64,
    /// Login half of the credential. `None` only for legacy rows.
    pub login: Option<String>,
    /// Password stored in clear form; encryption is an explicit non-goal.
    pub password: Option<String>,
    /// Optional display label.
    pub label: Option<String>,
    /// Legacy display field kept for backward-compatible readers.
    pub legacy_name: Option<String>,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl Account {
    /// Returns the display string: label, else login, else legacy name.
    pub fn effective_label(&self) -> &str {
        self.label
            .as_deref()
            .or(self.login.as_deref())
            .or(self.legacy_name.as_deref())
            .unwrap_or("")
    }
}

/// A parsed `login:password` input pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPair {
    pub login: String,
    pub password: String,
}

/// Rejection reasons for credential input that is not a usable pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialParseError {
    MissingSeparator,
    EmptyLogin,
    EmptyPassword,
}

impl Display for CredentialParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingSeparator => {
                write!(f, "expected `login:password`, no `:` separator found")
            }
            Self::EmptyLogin => write!(f, "login part is empty"),
            Self::EmptyPassword => write!(f, "password part is empty"),
        }
    }
}

impl Error for CredentialParseError {}

/// Splits credential input on the first colon into a trimmed pair.
///
/// The input is rejected when the separator is missing or either half is
/// empty after trimming. Single-add and bulk import both go through this
/// function, so its edge-case policy is authoritative for both paths.
pub fn parse_credential_pair(text: &str) -> Result<CredentialPair, CredentialParseError> {
    let Some((login, password)) = text.split_once(':') else {
        return Err(CredentialParseError::MissingSeparator);
    };

    let login = login.trim();
    let password = password.trim();
    if login.is_empty() {
        return Err(CredentialParseError::EmptyLogin);
    }
    if password.is_empty() {
        return Err(CredentialParseError::EmptyPassword);
    }

    Ok(CredentialPair {
        login: login.to_string(),
        password: password.to_string(),
    })
}
