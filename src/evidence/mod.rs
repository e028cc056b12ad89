//! Affiliation-evidence gathering from document source packages.
//!
//! A weak name match is corroborated by searching the document's own
//! source text for institution markers (observatory name, department,
//! institutional mail domains). Retrieval and unpacking are delegated to
//! an injected `SourceFetcher`; any failure there is swallowed into
//! `gathered: false` so a flaky network can never abort a run.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::adapters::SourceFetcher;
use crate::core::{EvidenceProvider, EvidenceReport};

/// Compile the affiliation keyword list into one case-insensitive
/// alternation. Keywords are matched literally.
pub fn build_keyword_pattern(keywords: &[String]) -> Result<Regex> {
    anyhow::ensure!(!keywords.is_empty(), "affiliation keyword list is empty");
    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    RegexBuilder::new(&alternation)
        .case_insensitive(true)
        .build()
        .context("compiling affiliation keyword pattern")
}

/// Count non-overlapping pattern matches in one text member.
///
/// Lines whose first character is the TeX comment marker `%` are skipped
/// entirely; commented-out boilerplate must not count as evidence.
pub fn count_markers(text: &str, pattern: &Regex) -> usize {
    text.lines()
        .filter(|line| !line.starts_with('%'))
        .map(|line| pattern.find_iter(line).count())
        .sum()
}

/// Searches a document's packaged source for affiliation markers.
pub struct EvidenceGatherer<F> {
    fetcher: F,
    pattern: Regex,
    timeout: Duration,
}

impl<F: SourceFetcher> EvidenceGatherer<F> {
    pub fn new(fetcher: F, keywords: &[String], timeout: Duration) -> Result<Self> {
        Ok(Self {
            fetcher,
            pattern: build_keyword_pattern(keywords)?,
            timeout,
        })
    }
}

#[async_trait]
impl<F: SourceFetcher> EvidenceProvider for EvidenceGatherer<F> {
    async fn gather(&self, document_id: &str) -> EvidenceReport {
        let fetched = tokio::time::timeout(self.timeout, self.fetcher.fetch_source(document_id));
        let members = match fetched.await {
            Ok(Ok(members)) => members,
            Ok(Err(err)) => {
                warn!(%document_id, %err, "source retrieval failed; evidence unavailable");
                return EvidenceReport::unavailable();
            }
            Err(_) => {
                warn!(%document_id, "source retrieval timed out; evidence unavailable");
                return EvidenceReport::unavailable();
            }
        };

        let count = members
            .iter()
            .map(|member| count_markers(&member.text, &self.pattern))
            .sum();
        debug!(%document_id, count, members = members.len(), "evidence gathered");
        EvidenceReport::found(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern() -> Regex {
        build_keyword_pattern(&[
            "Steward Observatory".to_string(),
            "arizona.edu".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_counts_case_insensitive_matches() {
        let text = "We thank STEWARD OBSERVATORY.\nContact: jlong@as.arizona.edu\n";
        assert_eq!(count_markers(text, &pattern()), 2);
    }

    #[test]
    fn test_comment_lines_skipped() {
        let text = "% Steward Observatory preprint macros\nSteward Observatory\n";
        assert_eq!(count_markers(text, &pattern()), 1);
    }

    #[test]
    fn test_keywords_match_literally() {
        // The '.' in a domain keyword must not match any character.
        let text = "arizonaXedu\n";
        assert_eq!(count_markers(text, &pattern()), 0);
    }

    #[test]
    fn test_empty_keyword_list_rejected() {
        assert!(build_keyword_pattern(&[]).is_err());
    }
}
