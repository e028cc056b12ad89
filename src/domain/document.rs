//! Documents flowing through the pipeline and their author resolution.

use serde::{Deserialize, Serialize};

use super::person::PersonKey;

/// Outcome of matching one free-text author name against the roster.
///
/// A nonzero score always carries the matched key; score 0 never does.
/// Score 2 is a confident identity match, score 1 is last name plus a
/// consistent first initial only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub key: Option<PersonKey>,
    pub score: u8,
}

impl MatchResult {
    /// A confident or weak match against a roster entry.
    pub fn matched(key: PersonKey, score: u8) -> Self {
        debug_assert!(score == 1 || score == 2);
        Self {
            key: Some(key),
            score,
        }
    }

    /// No roster entry is consistent with the name.
    pub fn none() -> Self {
        Self { key: None, score: 0 }
    }
}

/// One author string on a document, with its resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorEntry {
    /// The author name exactly as it appeared in the feed
    pub raw_name: String,
    /// Roster resolution for that name
    pub result: MatchResult,
}

/// A feed entry before author resolution.
///
/// Produced by the feed adapter; the core never parses feed transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSeed {
    pub title: String,
    /// Primary subject area tag (e.g. "astro-ph")
    pub area: String,
    pub abstract_text: String,
    /// Identifier used to retrieve the document's source package
    pub document_id: String,
    /// Raw author name strings, in feed order
    pub author_names: Vec<String>,
}

/// A document with its authors resolved against the roster.
///
/// Immutable once built; discarded when the classifier rejects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub title: String,
    pub area: String,
    pub abstract_text: String,
    pub document_id: String,
    pub authors: Vec<AuthorEntry>,
}

impl DocumentRecord {
    /// Sum of all per-author match scores.
    pub fn total_score(&self) -> u32 {
        self.authors.iter().map(|a| a.result.score as u32).sum()
    }

    /// Keys of all authors that resolved to a roster entry, in author order.
    pub fn matched_keys(&self) -> impl Iterator<Item = &PersonKey> {
        self.authors.iter().filter_map(|a| a.result.key.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_score_sums_authors() {
        let doc = DocumentRecord {
            title: "t".into(),
            area: "astro-ph".into(),
            abstract_text: String::new(),
            document_id: "2401.00001".into(),
            authors: vec![
                AuthorEntry {
                    raw_name: "A".into(),
                    result: MatchResult::matched(PersonKey::new("a", "a"), 2),
                },
                AuthorEntry {
                    raw_name: "B".into(),
                    result: MatchResult::none(),
                },
                AuthorEntry {
                    raw_name: "C".into(),
                    result: MatchResult::matched(PersonKey::new("c", "c"), 1),
                },
            ],
        };

        assert_eq!(doc.total_score(), 3);
        assert_eq!(doc.matched_keys().count(), 2);
    }
}
