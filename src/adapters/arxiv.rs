//! Retrieving and unpacking arXiv e-print source packages.
//!
//! An e-print is a gzipped tar of TeX sources, or occasionally a single
//! gzipped file. Binary members (figures) are dropped; only UTF-8 text
//! members reach the evidence scan.

use std::io::Read;

use anyhow::{Context, Result};
use async_trait::async_trait;
use flate2::read::GzDecoder;

use super::{SourceFetcher, SourceFile};

/// Fetches e-print source packages over HTTP.
pub struct ArxivSourceFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl ArxivSourceFetcher {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn eprint_url(&self, document_id: &str) -> String {
        format!(
            "{}/e-print/{}",
            self.base_url.trim_end_matches('/'),
            document_id
        )
    }
}

#[async_trait]
impl SourceFetcher for ArxivSourceFetcher {
    async fn fetch_source(&self, document_id: &str) -> Result<Vec<SourceFile>> {
        let url = self.eprint_url(document_id);
        let bytes = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()
            .with_context(|| format!("HTTP error for {url}"))?
            .bytes()
            .await
            .with_context(|| format!("reading body of {url}"))?;

        unpack_members(&bytes)
    }
}

/// Unpack a source package into its text members.
///
/// The package is gunzipped, then read as a tar archive; if it is not a
/// tar, the decompressed payload itself is treated as a single text file.
pub fn unpack_members(bytes: &[u8]) -> Result<Vec<SourceFile>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .context("decompressing source package")?;

    match untar_text_members(&decompressed) {
        Ok(members) => Ok(members),
        Err(_) => {
            let text = String::from_utf8(decompressed)
                .context("source package is neither a tar archive nor UTF-8 text")?;
            Ok(vec![SourceFile {
                name: "main.tex".to_string(),
                text,
            }])
        }
    }
}

fn untar_text_members(data: &[u8]) -> Result<Vec<SourceFile>> {
    let mut archive = tar::Archive::new(data);
    let mut members = Vec::new();

    for entry in archive.entries().context("opening tar archive")? {
        let mut entry = entry.context("reading tar member")?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry
            .path()
            .context("reading tar member path")?
            .display()
            .to_string();
        let mut buf = Vec::new();
        entry
            .read_to_end(&mut buf)
            .with_context(|| format!("reading tar member {name}"))?;
        // Figures and other binary members are not text-like; skip them.
        if let Ok(text) = String::from_utf8(buf) {
            members.push(SourceFile { name, text });
        }
    }

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn tar_of(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, data) in files {
            let mut header = tar::Header::new_gnu();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_cksum();
            builder.append_data(&mut header, name, *data).unwrap();
        }
        builder.into_inner().unwrap()
    }

    #[test]
    fn test_unpack_tarball_keeps_text_members() {
        let tarball = tar_of(&[
            ("paper.tex", b"\\documentclass{article}".as_slice()),
            ("figure.png", &[0xff, 0xfe, 0x00, 0x80]),
            ("refs.bbl", b"\\bibitem{x}".as_slice()),
        ]);
        let members = unpack_members(&gzip(&tarball)).unwrap();

        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["paper.tex", "refs.bbl"]);
        assert!(members[0].text.contains("documentclass"));
    }

    #[test]
    fn test_unpack_single_gzipped_file() {
        let members = unpack_members(&gzip(b"\\documentclass{article}\n")).unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "main.tex");
    }

    #[test]
    fn test_unpack_rejects_non_gzip() {
        assert!(unpack_members(b"%PDF-1.5 not a gzip stream").is_err());
    }

    #[test]
    fn test_eprint_url() {
        let fetcher =
            ArxivSourceFetcher::new(reqwest::Client::new(), "https://arxiv.org/");
        assert_eq!(
            fetcher.eprint_url("2608.01234"),
            "https://arxiv.org/e-print/2608.01234"
        );
    }
}
