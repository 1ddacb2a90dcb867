//! Map domain model.
//!
//! # Invariants
//! - `name` is stored trimmed and is unique under case-insensitive
//!   comparison.
//! - `created_at` is assigned at insert and never updated.

use serde::{Deserialize, Serialize};

/// A named container grouping credential records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    /// Surrogate integer identity, immutable.
    pub id: i64,
    /// Trimmed display name.
    pub name: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}
