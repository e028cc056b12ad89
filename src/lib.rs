//! arxiv-herald - department preprint digest
//!
//! Builds a daily mailing of new arXiv preprints authored by members of
//! a department, resolved by name against a scraped people directory and
//! corroborated by affiliation markers in the e-print source.
//!
//! # Pipeline
//!
//! Each run proceeds in stages:
//! - Scrape the department people pages into a roster
//! - Pull today's feed and parse new announcements
//! - Resolve each author name against the roster
//! - Gather affiliation evidence from the e-print source
//! - Classify, aggregate, render and deliver the digest
//!
//! # Modules
//!
//! - `adapters`: External system integrations (feed, directory, arXiv)
//! - `core`: Resolution and classification logic
//! - `domain`: Data structures (people, documents)
//! - `evidence`: Affiliation marker gathering
//! - `report`: Mailing rendering and delivery
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Build and deliver today's digest
//! arxiv-herald run
//!
//! # Dry run with artifacts written to out/
//! arxiv-herald run --demo
//!
//! # Debug a single author name
//! arxiv-herald match "J. D. Long"
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod evidence;
pub mod report;

// Re-export main types at crate root for convenience
pub use core::{build_digest, classify, lookup, Classification, Digest, EvidenceStage, Verdict};
pub use domain::{DocumentRecord, DocumentSeed, MatchResult, PersonKey, PersonRecord, Role, Roster};
pub use evidence::EvidenceGatherer;
