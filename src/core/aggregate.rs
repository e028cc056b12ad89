//! Collecting resolved colleagues across accepted documents.

use crate::domain::{DocumentRecord, PersonKey, PersonRecord, Roster};

/// Gather the roster records of every matched author on every accepted
/// document, sorted by (last name, first names).
///
/// Duplicates are kept: a person co-authoring several accepted documents
/// appears once per document. The sort is stable, so output does not
/// depend on document processing order.
pub fn collect_colleagues(accepted: &[DocumentRecord], roster: &Roster) -> Vec<PersonRecord> {
    let mut pairs: Vec<(PersonKey, PersonRecord)> = Vec::new();
    for document in accepted {
        for key in document.matched_keys() {
            if let Some(record) = roster.get(key) {
                pairs.push((key.clone(), record.clone()));
            }
        }
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    pairs.into_iter().map(|(_, record)| record).collect()
}
