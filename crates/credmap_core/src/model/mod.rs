//! Domain model for the credential catalog.
//!
//! # Responsibility
//! - Define the canonical structures shared by repositories and services.
//! - Own input normalization for credential pairs.
//!
//! # Invariants
//! - Identities are integer rowids, stable and never reused.
//! - Modern credential fields are authoritative; legacy columns are a
//!   write-synchronized projection for old readers.

pub mod account;
pub mod map;
