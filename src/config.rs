//! Configuration for the herald.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (HERALD_FEED_URL, MAIL_SERVER, MAIL_PORT,
//!    MAIL_USERNAME, MAIL_SENDTO; MAIL_PASSWORD is env-only)
//! 2. Config file (.herald/config.yaml)
//! 3. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .herald/config.yaml,
//!   then falls back to ~/.herald/config.yaml

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::adapters::PeoplePages;
use crate::report::MailSettings;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
    #[serde(default)]
    pub evidence: EvidenceConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedConfig {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    pub faculty_url: Option<String>,
    pub postdocs_url: Option<String>,
    pub students_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvidenceConfig {
    /// Literal affiliation keywords, matched case-insensitively
    pub keywords: Option<Vec<String>>,
    pub source_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MailConfig {
    pub server: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub send_to: Option<String>,
    pub from_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    pub reader_base_url: Option<String>,
    /// IANA timezone for the digest's run timestamp
    pub timezone: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub feed_url: String,
    pub people_pages: PeoplePages,
    pub keywords: Vec<String>,
    pub source_base_url: String,
    pub evidence_timeout: Duration,
    pub reader_base_url: String,
    pub timezone: Tz,
    pub mail: MailOptions,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Mail settings as configured; completeness is only enforced when a
/// mailing is actually sent.
#[derive(Debug, Clone)]
pub struct MailOptions {
    pub server: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub send_to: Option<String>,
    pub from_name: String,
}

impl ResolvedConfig {
    /// Require complete delivery settings; the password comes from the
    /// MAIL_PASSWORD environment variable only.
    pub fn mail_settings(&self) -> Result<MailSettings> {
        let server = self
            .mail
            .server
            .clone()
            .context("mail server not configured (mail.server or MAIL_SERVER)")?;
        let username = self
            .mail
            .username
            .clone()
            .context("mail username not configured (mail.username or MAIL_USERNAME)")?;
        let send_to = self
            .mail
            .send_to
            .clone()
            .context("mail recipient not configured (mail.send_to or MAIL_SENDTO)")?;
        let password = std::env::var("MAIL_PASSWORD").context("MAIL_PASSWORD is not set")?;

        Ok(MailSettings {
            server,
            port: self.mail.port,
            username,
            password,
            send_to,
            from_name: self.mail.from_name.clone(),
        })
    }
}

pub fn default_keywords() -> Vec<String> {
    [
        "steward observatory",
        "university of arizona",
        "department of astronomy",
        "arizona.edu",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Find config file by searching current directory and parents, then the
/// home directory.
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(".herald").join("config.yaml");
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                break;
            }
        }
    }

    let home_config = dirs::home_dir()?.join(".herald").join("config.yaml");
    home_config.exists().then_some(home_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

fn env_or(var: &str, fallback: Option<String>) -> Option<String> {
    std::env::var(var).ok().or(fallback)
}

/// Resolve a parsed config file (or nothing) against env vars and defaults.
fn resolve(file: Option<(PathBuf, ConfigFile)>) -> Result<ResolvedConfig> {
    let (config_file, config) = match file {
        Some((path, config)) => (Some(path), config),
        None => (None, ConfigFile::default()),
    };

    let feed_url = env_or("HERALD_FEED_URL", config.feed.url)
        .unwrap_or_else(|| "https://arxiv.org/rss/astro-ph".to_string());

    let people_pages = PeoplePages {
        faculty_url: config
            .directory
            .faculty_url
            .unwrap_or_else(|| "https://www.as.arizona.edu/people/faculty".to_string()),
        postdocs_url: config
            .directory
            .postdocs_url
            .unwrap_or_else(|| "https://www.as.arizona.edu/people/postdoctoral".to_string()),
        students_url: config
            .directory
            .students_url
            .unwrap_or_else(|| "https://www.as.arizona.edu/people/grad_students".to_string()),
    };

    let keywords = config
        .evidence
        .keywords
        .filter(|k| !k.is_empty())
        .unwrap_or_else(default_keywords);
    let source_base_url = config
        .evidence
        .source_base_url
        .unwrap_or_else(|| "https://arxiv.org".to_string());
    let evidence_timeout = Duration::from_secs(config.evidence.timeout_seconds.unwrap_or(30));

    let reader_base_url = config
        .report
        .reader_base_url
        .unwrap_or_else(|| "https://www.arxiv-vanity.com/papers".to_string());
    let timezone_name = config
        .report
        .timezone
        .unwrap_or_else(|| "America/Phoenix".to_string());
    let timezone = Tz::from_str(&timezone_name)
        .map_err(|e| anyhow::anyhow!("invalid report.timezone {timezone_name:?}: {e}"))?;

    let port = match std::env::var("MAIL_PORT") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("invalid MAIL_PORT {raw:?}"))?,
        Err(_) => config.mail.port.unwrap_or(587),
    };
    let mail = MailOptions {
        server: env_or("MAIL_SERVER", config.mail.server),
        port,
        username: env_or("MAIL_USERNAME", config.mail.username),
        send_to: env_or("MAIL_SENDTO", config.mail.send_to),
        from_name: config
            .mail
            .from_name
            .unwrap_or_else(|| "Preprint Herald".to_string()),
    };

    Ok(ResolvedConfig {
        feed_url,
        people_pages,
        keywords,
        source_base_url,
        evidence_timeout,
        reader_base_url,
        timezone,
        mail,
        config_file,
    })
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let file = match find_config_file() {
        Some(path) => {
            let config = load_config_file(&path)?;
            Some((path, config))
        }
        None => None,
    };
    resolve(file)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
