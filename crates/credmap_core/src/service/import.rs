//! Transactional bulk credential import.
//!
//! # Responsibility
//! - Apply many `login:password` lines to one map in a single transaction.
//! - Classify every line as added, duplicate, or errored without aborting
//!   the batch.
//!
//! # Invariants
//! - Input order is preserved; classification is order-sensitive.
//! - A constraint violation on one line never rolls back prior inserts in
//!   the same call; only a failed commit discards them.

use crate::model::account::parse_credential_pair;
use crate::repo::account_repo::insert_account;
use crate::repo::{RepoError, RepoResult};
use log::info;
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;

/// One rejected input line with the reason it was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportLineError {
    /// The trimmed original line.
    pub line: String,
    pub message: String,
}

/// Per-line outcome summary of one bulk import call.
///
/// A successful call may still carry duplicates and errors; callers must
/// read the counts instead of assuming every line was added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub added: u32,
    pub duplicates: u32,
    pub errors: Vec<ImportLineError>,
}

/// Imports raw multi-line `login:password` text into one map.
///
/// Blank lines are skipped. Parse failures and non-duplicate insert
/// failures are folded into the outcome report and do not abort the batch;
/// the call itself only fails when the surrounding transaction cannot be
/// opened or committed, in which case nothing persists.
pub fn import_credentials(
    conn: &mut Connection,
    map_id: i64,
    text: &str,
) -> RepoResult<ImportOutcome> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut outcome = ImportOutcome::default();

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let pair = match parse_credential_pair(line) {
            Ok(pair) => pair,
            Err(err) => {
                outcome.errors.push(ImportLineError {
                    line: line.to_string(),
                    message: err.to_string(),
                });
                continue;
            }
        };

        match insert_account(&tx, map_id, &pair.login, &pair.password, None) {
            Ok(_) => outcome.added += 1,
            Err(RepoError::Duplicate(_)) => outcome.duplicates += 1,
            Err(err) => outcome.errors.push(ImportLineError {
                line: line.to_string(),
                message: err.to_string(),
            }),
        }
    }

    tx.commit()?;

    info!(
        "event=bulk_import module=service status=ok map_id={map_id} added={} duplicates={} errors={}",
        outcome.added,
        outcome.duplicates,
        outcome.errors.len()
    );
    Ok(outcome)
}
