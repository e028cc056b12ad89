//! Building the roster from the department people pages.
//!
//! Faculty and postdoc pages head each card with "Last, First"; the
//! student page uses "First Last". Name parts are normalized before
//! keying so the matcher can compare with plain equality.

use anyhow::{anyhow, Context, Result};
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::core::normalize;
use crate::domain::{PersonKey, PersonRecord, Role, Roster};

/// URLs of the three people listings.
#[derive(Debug, Clone)]
pub struct PeoplePages {
    pub faculty_url: String,
    pub postdocs_url: String,
    pub students_url: String,
}

/// Scrape all three pages into one roster.
///
/// Insertion order is faculty, then postdocs, then students; a person
/// listed on more than one page keeps the later record.
pub async fn build_roster(client: &reqwest::Client, pages: &PeoplePages) -> Result<Roster> {
    let mut roster = Roster::new();

    let body = fetch_page(client, &pages.faculty_url).await?;
    scrape_people(&body, ".faculty_wrapper", Role::Faculty, &mut roster)?;

    let body = fetch_page(client, &pages.postdocs_url).await?;
    scrape_people(&body, ".view-people tr", Role::Postdoc, &mut roster)?;

    let body = fetch_page(client, &pages.students_url).await?;
    scrape_people(&body, ".view-people tr", Role::Student, &mut roster)?;

    if roster.is_empty() {
        return Err(anyhow!("people pages yielded an empty roster"));
    }
    info!(people = roster.len(), "roster built");
    Ok(roster)
}

async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    client
        .get(url)
        .send()
        .await
        .with_context(|| format!("requesting {url}"))?
        .error_for_status()
        .with_context(|| format!("HTTP error for {url}"))?
        .text()
        .await
        .with_context(|| format!("reading body of {url}"))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {css:?}: {e}"))
}

/// Extract people cards from one page into the roster.
pub fn scrape_people(body: &str, card_css: &str, role: Role, roster: &mut Roster) -> Result<()> {
    let document = Html::parse_document(body);
    let card_sel = selector(card_css)?;
    let heading_sel = selector("h4")?;
    let position_sel = selector("h5")?;
    let image_sel = selector("img")?;

    for card in document.select(&card_sel) {
        let Some(heading) = card.select(&heading_sel).next() else {
            continue;
        };
        let heading_text: String = heading.text().collect();
        let heading_text = heading_text.trim();

        let Some(key) = person_key(heading_text, role) else {
            warn!(heading = heading_text, ?role, "skipping unparseable people card");
            continue;
        };

        let position = card
            .select(&position_sel)
            .next()
            .map(|node| node.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let image_url = card
            .select(&image_sel)
            .next()
            .and_then(|node| node.value().attr("src"))
            .map(strip_query)
            .unwrap_or_default();

        roster.insert(
            key,
            PersonRecord {
                role,
                position,
                image_url,
            },
        );
    }

    Ok(())
}

/// Split a card heading into a normalized (last, firsts) key.
fn person_key(heading: &str, role: Role) -> Option<PersonKey> {
    let (last, firsts) = match role {
        // "Last, First M."
        Role::Faculty | Role::Postdoc => heading.split_once(',')?,
        // "First M. Last"
        Role::Student => {
            let (firsts, last) = heading.rsplit_once(' ')?;
            (last, firsts)
        }
    };
    Some(PersonKey::new(
        normalize(last.trim()),
        normalize(firsts.trim()),
    ))
}

/// Drop a cache-busting query string from an image URL.
fn strip_query(src: &str) -> String {
    src.split_once('?')
        .map(|(path, _)| path)
        .unwrap_or(src)
        .to_string()
}
