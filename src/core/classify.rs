//! Per-document accept/reject policy.
//!
//! The policy is two-stage: name scores first, then source-text evidence
//! to corroborate a weak or ambiguous name signal. It is written as an
//! explicit decision function over tagged outcomes so the policy can be
//! tested apart from the matching arithmetic.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{AuthorEntry, DocumentRecord, DocumentSeed, Roster};

use super::matcher::lookup;

/// Result of searching a document's source for affiliation markers.
///
/// `gathered: false` means the source could not be retrieved or parsed;
/// `count` is meaningless then and must be ignored, not read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceReport {
    pub count: usize,
    pub gathered: bool,
}

impl EvidenceReport {
    /// The source was searched; `count` markers were found.
    pub fn found(count: usize) -> Self {
        Self {
            count,
            gathered: true,
        }
    }

    /// The source could not be retrieved or parsed.
    pub fn unavailable() -> Self {
        Self {
            count: 0,
            gathered: false,
        }
    }
}

/// Capability to search a document's source text for affiliation markers.
///
/// Injected so tests can substitute a deterministic fake. Implementations
/// must swallow retrieval failures into `gathered: false`; a transient
/// network error must never abort the classification pipeline.
#[async_trait]
pub trait EvidenceProvider: Send + Sync {
    async fn gather(&self, document_id: &str) -> EvidenceReport;
}

/// How the classifier corroborates the name-level signal.
#[derive(Clone, Copy)]
pub enum EvidenceStage<'a> {
    /// Search the document's source for affiliation markers.
    Corroborate(&'a dyn EvidenceProvider),

    /// Diagnostic/offline mode: accept on name score alone. Always an
    /// explicit caller choice, never a silent fallback.
    NamesOnly,
}

/// Terminal classification outcome for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accepted,

    /// No author recognizably matches the roster.
    RejectedNoNameMatch,

    /// The source was searched and contains no affiliation markers;
    /// positive absence filters coincidental name collisions.
    RejectedNoEvidence,

    /// The source was unavailable and the name signal alone is too weak
    /// to trust (a single initial-level match).
    RejectedUncorroborated,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

/// A classified document: the enriched record plus its verdict.
#[derive(Debug, Clone)]
pub struct Classification {
    pub document: DocumentRecord,
    pub verdict: Verdict,
}

/// Resolve a document's authors and decide whether it is relevant.
///
/// The evidence stage is only invoked when at least one author matched;
/// a document whose every author fails to parse or match is rejected
/// without any retrieval.
pub async fn classify(
    seed: DocumentSeed,
    roster: &Roster,
    evidence: EvidenceStage<'_>,
) -> Classification {
    let authors: Vec<AuthorEntry> = seed
        .author_names
        .iter()
        .map(|name| AuthorEntry {
            raw_name: name.clone(),
            result: lookup(name, roster),
        })
        .collect();

    let document = DocumentRecord {
        title: seed.title,
        area: seed.area,
        abstract_text: seed.abstract_text,
        document_id: seed.document_id,
        authors,
    };

    let total_score = document.total_score();
    let verdict = if total_score < 1 {
        Verdict::RejectedNoNameMatch
    } else {
        match evidence {
            EvidenceStage::NamesOnly => Verdict::Accepted,
            EvidenceStage::Corroborate(provider) => {
                let report = provider.gather(&document.document_id).await;
                decide(total_score, report)
            }
        }
    };

    debug!(
        document_id = %document.document_id,
        total_score,
        ?verdict,
        "classified document"
    );

    Classification { document, verdict }
}

/// The evidence-stage decision, given a nonzero total name score.
///
/// Positive absence of evidence rejects outright; evidence that could not
/// be gathered only raises the required name-score bar to 2.
pub fn decide(total_score: u32, evidence: EvidenceReport) -> Verdict {
    if evidence.gathered && evidence.count == 0 {
        Verdict::RejectedNoEvidence
    } else if !evidence.gathered && total_score < 2 {
        Verdict::RejectedUncorroborated
    } else {
        Verdict::Accepted
    }
}
