//! Domain types for the herald pipeline.
//!
//! This module contains the core data structures:
//! - Person: roster identities and records
//! - Document: feed entries and their author resolution

pub mod document;
pub mod person;

// Re-export commonly used types
pub use document::{AuthorEntry, DocumentRecord, DocumentSeed, MatchResult};
pub use person::{PersonKey, PersonRecord, Role, Roster};
