//! Classification Pipeline Integration Tests
//!
//! Drives `classify` and `build_digest` with a deterministic evidence
//! provider to pin down the accept/reject policy and aggregation order.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use arxiv_herald::core::{
    build_digest, classify, EvidenceProvider, EvidenceReport, EvidenceStage, Verdict,
};
use arxiv_herald::domain::{DocumentSeed, PersonKey, PersonRecord, Role, Roster};

/// Evidence provider returning a fixed report and counting invocations.
struct FixedEvidence {
    report: EvidenceReport,
    calls: AtomicUsize,
}

impl FixedEvidence {
    fn new(report: EvidenceReport) -> Self {
        Self {
            report,
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EvidenceProvider for FixedEvidence {
    async fn gather(&self, _document_id: &str) -> EvidenceReport {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.report
    }
}

fn record(position: &str) -> PersonRecord {
    PersonRecord {
        role: Role::Faculty,
        position: position.to_string(),
        image_url: String::new(),
    }
}

fn department_roster() -> Roster {
    [
        (PersonKey::new("ferris", "edgar"), record("Professor")),
        (PersonKey::new("hausschuh", "georgina"), record("Lecturer")),
        (
            PersonKey::new("rodrigo", "marco navarro"),
            record("Postdoctoral Fellow"),
        ),
    ]
    .into_iter()
    .collect()
}

fn seed(document_id: &str, author_names: &[&str]) -> DocumentSeed {
    DocumentSeed {
        title: format!("Paper {document_id}"),
        area: "astro-ph".to_string(),
        abstract_text: "An abstract.".to_string(),
        document_id: document_id.to_string(),
        author_names: author_names.iter().map(|s| s.to_string()).collect(),
    }
}

#[tokio::test]
async fn test_unmatched_document_skips_evidence_stage() {
    let roster = department_roster();
    let provider = FixedEvidence::new(EvidenceReport::found(10));

    let outcome = classify(
        seed("2408.00001", &["Nobody Known", "Also Unknown"]),
        &roster,
        EvidenceStage::Corroborate(&provider),
    )
    .await;

    assert_eq!(outcome.verdict, Verdict::RejectedNoNameMatch);
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_zero_marker_count_rejects_despite_strong_names() {
    let roster = department_roster();
    let provider = FixedEvidence::new(EvidenceReport::found(0));

    let outcome = classify(
        seed("2408.00002", &["Edgar Ferris", "G. Hausschuh"]),
        &roster,
        EvidenceStage::Corroborate(&provider),
    )
    .await;

    assert_eq!(outcome.document.total_score(), 3);
    assert_eq!(outcome.verdict, Verdict::RejectedNoEvidence);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_unavailable_evidence_requires_confident_names() {
    let roster = department_roster();
    let provider = FixedEvidence::new(EvidenceReport::unavailable());

    let weak = classify(
        seed("2408.00003", &["G. Hausschuh"]),
        &roster,
        EvidenceStage::Corroborate(&provider),
    )
    .await;
    assert_eq!(weak.document.total_score(), 1);
    assert_eq!(weak.verdict, Verdict::RejectedUncorroborated);

    let strong = classify(
        seed("2408.00004", &["Edgar Ferris"]),
        &roster,
        EvidenceStage::Corroborate(&provider),
    )
    .await;
    assert_eq!(strong.document.total_score(), 2);
    assert_eq!(strong.verdict, Verdict::Accepted);
}

#[tokio::test]
async fn test_names_only_accepts_any_nonzero_score() {
    let roster = department_roster();

    let outcome = classify(
        seed("2408.00005", &["G. Hausschuh"]),
        &roster,
        EvidenceStage::NamesOnly,
    )
    .await;
    assert_eq!(outcome.verdict, Verdict::Accepted);

    let rejected = classify(
        seed("2408.00006", &["Nobody Known"]),
        &roster,
        EvidenceStage::NamesOnly,
    )
    .await;
    assert_eq!(rejected.verdict, Verdict::RejectedNoNameMatch);
}

#[tokio::test]
async fn test_digest_colleagues_sorted_regardless_of_document_order() {
    let roster = department_roster();
    let provider = FixedEvidence::new(EvidenceReport::found(2));

    // Documents deliberately ordered so the later one matches the
    // lexicographically smaller key.
    let seeds = vec![
        seed("2408.00010", &["M. Navarro Rodrigo"]),
        seed("2408.00011", &["Edgar Ferris", "Georgina Hausschuh"]),
    ];

    let digest = build_digest(seeds, &roster, EvidenceStage::Corroborate(&provider)).await;

    assert_eq!(digest.accepted.len(), 2);
    let positions: Vec<&str> = digest
        .colleagues
        .iter()
        .map(|c| c.position.as_str())
        .collect();
    assert_eq!(
        positions,
        vec!["Professor", "Lecturer", "Postdoctoral Fellow"]
    );
}

#[tokio::test]
async fn test_digest_keeps_duplicate_colleagues() {
    let roster = department_roster();
    let provider = FixedEvidence::new(EvidenceReport::found(1));

    let seeds = vec![
        seed("2408.00020", &["Edgar Ferris"]),
        seed("2408.00021", &["Edgar Ferris", "G. Hausschuh"]),
    ];

    let digest = build_digest(seeds, &roster, EvidenceStage::Corroborate(&provider)).await;

    // Ferris appears on both accepted documents and is listed twice.
    let professors = digest
        .colleagues
        .iter()
        .filter(|c| c.position == "Professor")
        .count();
    assert_eq!(professors, 2);
    assert_eq!(digest.colleagues.len(), 3);
}
