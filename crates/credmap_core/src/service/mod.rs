//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into the entry points front ends use.
//! - Keep presentation layers decoupled from storage details.

pub mod catalog;
pub mod import;
