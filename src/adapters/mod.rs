//! Adapter interfaces for external systems.
//!
//! Adapters wrap the network-facing concerns: the people directory, the
//! RSS feed, and the document source archive. The core never touches
//! transport or markup; it sees only the structured values these produce.

pub mod arxiv;
pub mod directory;
pub mod feed;

use anyhow::Result;
use async_trait::async_trait;

// Re-export the concrete adapters
pub use arxiv::ArxivSourceFetcher;
pub use directory::{build_roster, PeoplePages};
pub use feed::{fetch_seeds, FeedError};

/// One named text member of a document's source package.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

/// Capability to retrieve a document's packaged source as text members.
///
/// Errors mean the package was unreachable or unparsable; the evidence
/// gatherer converts them into `gathered: false`, never a pipeline abort.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    async fn fetch_source(&self, document_id: &str) -> Result<Vec<SourceFile>>;
}
