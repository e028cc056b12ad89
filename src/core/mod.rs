//! Identity-resolution and relevance-classification core.
//!
//! This module contains:
//! - Normalize: canonical form for name comparisons
//! - Name: the first/initial/last grammar
//! - Matcher: approximate lookup against the roster
//! - Classify: the two-stage accept/reject policy
//! - Aggregate: colleague collection over accepted documents
//! - Pipeline: per-run driver over all feed entries
//!
//! Everything here is a pure or near-pure function over explicit
//! `Roster` and document values; the one network dependency (evidence
//! gathering) is injected through the `EvidenceProvider` capability.

pub mod aggregate;
pub mod classify;
pub mod matcher;
pub mod name;
pub mod normalize;
pub mod pipeline;

// Re-export commonly used items
pub use aggregate::collect_colleagues;
pub use classify::{
    classify, decide, Classification, EvidenceProvider, EvidenceReport, EvidenceStage, Verdict,
};
pub use matcher::lookup;
pub use name::{is_initial_token, parse_name, strip_initials, NameParseError, ParsedName};
pub use normalize::normalize;
pub use pipeline::{build_digest, Digest};
