//! Driving the per-document stages over one feed's worth of entries.

use tracing::{debug, info, instrument};

use crate::domain::{DocumentRecord, DocumentSeed, PersonRecord, Roster};

use super::aggregate::collect_colleagues;
use super::classify::{classify, EvidenceStage};

/// Everything one run produces: the accepted documents with resolved
/// authors, and the sorted colleague list for reporting.
#[derive(Debug, Clone)]
pub struct Digest {
    pub accepted: Vec<DocumentRecord>,
    pub colleagues: Vec<PersonRecord>,
}

/// Classify every seed against the roster and aggregate the results.
///
/// Documents are processed sequentially; counts are small and the final
/// colleague order depends only on the aggregate sort, never on
/// completion order. The roster is read-only throughout.
#[instrument(skip_all, fields(documents = seeds.len(), roster = roster.len()))]
pub async fn build_digest(
    seeds: Vec<DocumentSeed>,
    roster: &Roster,
    evidence: EvidenceStage<'_>,
) -> Digest {
    let total = seeds.len();
    let mut accepted = Vec::new();

    for seed in seeds {
        let classification = classify(seed, roster, evidence).await;
        if classification.verdict.is_accepted() {
            accepted.push(classification.document);
        } else {
            debug!(
                document_id = %classification.document.document_id,
                verdict = ?classification.verdict,
                "document excluded from digest"
            );
        }
    }

    let colleagues = collect_colleagues(&accepted, roster);
    info!(
        accepted = accepted.len(),
        rejected = total - accepted.len(),
        colleagues = colleagues.len(),
        "digest assembled"
    );

    Digest {
        accepted,
        colleagues,
    }
}
