//! Command-line interface for the herald.
//!
//! Provides commands for building and delivering the daily digest,
//! inspecting the scraped roster, and debugging name resolution.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::adapters::{build_roster, fetch_seeds, ArxivSourceFetcher};
use crate::config::{self, ResolvedConfig};
use crate::core::{build_digest, lookup, Digest, EvidenceStage};
use crate::domain::{DocumentRecord, PersonRecord, Roster};
use crate::evidence::EvidenceGatherer;
use crate::report::{self, compose_mailing, send_mailing, MailSettings};

const USER_AGENT: &str = concat!("arxiv-herald/", env!("CARGO_PKG_VERSION"));

/// arxiv-herald - department preprint digest
#[derive(Parser, Debug)]
#[command(name = "arxiv-herald")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build today's digest and deliver it
    Run {
        /// Write mailing artifacts to the output directory instead of
        /// sending, and reuse a previous run's snapshot if present
        #[arg(short, long)]
        demo: bool,

        /// Skip the evidence stage and accept on name score alone
        /// (diagnostic mode)
        #[arg(long)]
        names_only: bool,

        /// Directory for demo artifacts and the run snapshot
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,
    },

    /// Scrape and print the people roster
    Roster,

    /// Resolve one author name against the roster
    Match {
        /// Raw author name, e.g. "J. D. Long"
        name: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run {
                demo,
                names_only,
                output_dir,
            } => run_digest(demo, names_only, output_dir).await,
            Commands::Roster => show_roster().await,
            Commands::Match { name } => match_name(&name).await,
            Commands::Config => show_config(),
        }
    }
}

/// Persisted state of one demo run (replaces a live scrape + fetch).
#[derive(Debug, Serialize, Deserialize)]
struct RunSnapshot {
    roster: Roster,
    accepted: Vec<DocumentRecord>,
    colleagues: Vec<PersonRecord>,
}

fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(60))
        .build()
        .context("building HTTP client")
}

async fn run_digest(demo: bool, names_only: bool, output_dir: PathBuf) -> Result<()> {
    let cfg = config::config()?;
    let client = http_client()?;
    let run_time = Utc::now()
        .with_timezone(&cfg.timezone)
        .format("%Y-%m-%d %H:%M %Z")
        .to_string();

    let snapshot_path = output_dir.join("demo-snapshot.json");
    let digest = if demo && snapshot_path.exists() {
        info!(path = %snapshot_path.display(), "reusing demo snapshot");
        let raw = std::fs::read_to_string(&snapshot_path)
            .with_context(|| format!("reading {}", snapshot_path.display()))?;
        let snapshot: RunSnapshot = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", snapshot_path.display()))?;
        Digest {
            accepted: snapshot.accepted,
            colleagues: snapshot.colleagues,
        }
    } else {
        let roster = build_roster(&client, &cfg.people_pages).await?;
        let seeds = fetch_seeds(&client, &cfg.feed_url, Utc::now().date_naive()).await?;

        let digest = if names_only {
            info!("names-only mode: evidence stage skipped");
            build_digest(seeds, &roster, EvidenceStage::NamesOnly).await
        } else {
            let fetcher = ArxivSourceFetcher::new(client.clone(), cfg.source_base_url.clone());
            let gatherer = EvidenceGatherer::new(fetcher, &cfg.keywords, cfg.evidence_timeout)?;
            build_digest(seeds, &roster, EvidenceStage::Corroborate(&gatherer)).await
        };

        if demo {
            let snapshot = RunSnapshot {
                roster,
                accepted: digest.accepted.clone(),
                colleagues: digest.colleagues.clone(),
            };
            std::fs::create_dir_all(&output_dir)
                .with_context(|| format!("creating {}", output_dir.display()))?;
            std::fs::write(&snapshot_path, serde_json::to_string_pretty(&snapshot)?)
                .with_context(|| format!("writing {}", snapshot_path.display()))?;
        }
        digest
    };

    let subject = report::subject(&digest);
    let text = report::render_text(&digest, &cfg.reader_base_url, &run_time);
    let html = report::render_html(&digest, &cfg.reader_base_url, &run_time);

    if demo {
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("creating {}", output_dir.display()))?;
        std::fs::write(output_dir.join("mailing.txt"), &text)?;
        std::fs::write(output_dir.join("mailing.html"), &html)?;

        // Compose with placeholder addresses when mail is unconfigured so
        // the .eml can still be inspected.
        let settings = cfg.mail_settings().unwrap_or_else(|_| MailSettings {
            server: String::new(),
            port: 0,
            username: "herald@example.edu".to_string(),
            password: String::new(),
            send_to: "herald@example.edu".to_string(),
            from_name: cfg.mail.from_name.clone(),
        });
        let message = compose_mailing(&settings, &subject, text, html)?;
        std::fs::write(output_dir.join("mailing.eml"), message.formatted())?;

        println!("{subject}");
        println!("Demo artifacts written to {}", output_dir.display());
        return Ok(());
    }

    let settings = cfg.mail_settings()?;
    let message = compose_mailing(&settings, &subject, text, html)?;
    send_mailing(&settings, message).await?;
    println!("{subject}");

    warm_reader_cache(&client, cfg, &digest).await;
    Ok(())
}

/// Touch the reader site for each accepted document so its cache is warm
/// when readers click through. Failures are irrelevant to the run.
async fn warm_reader_cache(client: &reqwest::Client, cfg: &ResolvedConfig, digest: &Digest) {
    for document in &digest.accepted {
        let url = format!(
            "{}/{}/",
            cfg.reader_base_url.trim_end_matches('/'),
            document.document_id
        );
        match client
            .get(&url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(_) => debug!(%url, "reader cache warmed"),
            Err(err) => debug!(%url, %err, "cache warm request failed"),
        }
    }
}

async fn show_roster() -> Result<()> {
    let cfg = config::config()?;
    let client = http_client()?;
    let roster = build_roster(&client, &cfg.people_pages).await?;

    for (key, record) in roster.iter() {
        let position = if record.position.is_empty() {
            String::new()
        } else {
            format!(" - {}", record.position)
        };
        println!("{}, {} [{:?}]{}", key.last, key.firsts, record.role, position);
    }
    println!("\n{} people", roster.len());
    Ok(())
}

async fn match_name(name: &str) -> Result<()> {
    let cfg = config::config()?;
    let client = http_client()?;
    let roster = build_roster(&client, &cfg.people_pages).await?;

    let result = lookup(name, &roster);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn show_config() -> Result<()> {
    let cfg = config::config()?;
    println!("{cfg:#?}");
    Ok(())
}
