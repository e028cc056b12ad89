//! Fetching the daily listing feed and shaping entries into seeds.
//!
//! The feed is RSS/Atom; titles carry the document id and area tag in a
//! fixed `Title (arXiv:ID [area])` format. Entries marked as updates are
//! dropped: the digest announces new documents only.

use std::sync::OnceLock;

use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::DocumentSeed;

/// Errors from the feed stage. Staleness aborts the run before any
/// classification happens, so the core never sees partial state.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed was last updated {updated} UTC, not today")]
    Stale { updated: NaiveDate },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?P<title>.+) \(arXiv:(?P<id>[^ \]]+) \[(?P<area>[^\]]+)\](?P<trailer>[^)]*)\)$")
            .unwrap()
    })
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").unwrap())
}

/// Fetch the feed and return one seed per announcement entry.
///
/// Returns `FeedError::Stale` when the feed's update date is not `today`.
pub async fn fetch_seeds(
    client: &reqwest::Client,
    feed_url: &str,
    today: NaiveDate,
) -> Result<Vec<DocumentSeed>, FeedError> {
    let bytes = client
        .get(feed_url)
        .send()
        .await
        .with_context(|| format!("requesting feed {feed_url}"))?
        .error_for_status()
        .with_context(|| format!("HTTP error for feed {feed_url}"))?
        .bytes()
        .await
        .with_context(|| format!("reading feed body from {feed_url}"))?;

    parse_seeds(&bytes, today)
}

/// Parse feed bytes into seeds, enforcing the staleness check.
pub fn parse_seeds(bytes: &[u8], today: NaiveDate) -> Result<Vec<DocumentSeed>, FeedError> {
    let feed = feed_rs::parser::parse(bytes).context("parsing feed XML")?;

    let updated = feed
        .updated
        .ok_or_else(|| anyhow!("feed carries no update timestamp"))?
        .date_naive();
    if updated != today {
        return Err(FeedError::Stale { updated });
    }

    let seeds: Vec<DocumentSeed> = feed
        .entries
        .iter()
        .filter_map(seed_from_entry)
        .collect();
    info!(entries = feed.entries.len(), seeds = seeds.len(), "feed parsed");
    Ok(seeds)
}

fn seed_from_entry(entry: &feed_rs::model::Entry) -> Option<DocumentSeed> {
    let raw_title = entry.title.as_ref()?.content.as_str();
    let caps = match title_re().captures(raw_title) {
        Some(caps) => caps,
        None => {
            warn!(title = raw_title, "feed entry title does not match expected format");
            return None;
        }
    };

    // Anything after the area tag marks a revision announcement.
    if !caps["trailer"].trim().is_empty() {
        debug!(title = raw_title, "skipping updated entry");
        return None;
    }

    // The canonical id is the final segment of the abstract-page link.
    let link = entry.links.first()?;
    let document_id = link.href.trim_end_matches('/').rsplit('/').next()?.to_string();

    // Keep the primary area component ("astro-ph.GA" -> "astro-ph").
    let full_area = &caps["area"];
    let area = full_area
        .rsplit_once('.')
        .map(|(primary, _)| primary)
        .unwrap_or(full_area)
        .to_string();

    let abstract_text = entry
        .summary
        .as_ref()
        .map(|s| strip_markup(&s.content))
        .unwrap_or_default();

    let author_names = author_names(entry);

    Some(DocumentSeed {
        title: caps["title"].to_string(),
        area,
        abstract_text,
        document_id,
        author_names,
    })
}

/// Drop markup tags from a summary and flatten it to one line.
fn strip_markup(html: &str) -> String {
    let text = tag_re().replace_all(html, "");
    text.replace('\n', " ").trim().to_string()
}

/// Author names from the entry; a single comma-joined credit line is
/// split into individual names.
fn author_names(entry: &feed_rs::model::Entry) -> Vec<String> {
    let names: Vec<String> = entry
        .authors
        .iter()
        .map(|p| p.name.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();

    if names.len() == 1 && names[0].contains(',') {
        return names[0]
            .split(',')
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();
    }
    names
}
