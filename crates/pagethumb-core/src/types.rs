//! Core data types produced by a run.
//!
//! One [`ThumbnailRecord`] is created per entity, and a [`RunSummary`] holds
//! all of them together with the archive that closed the run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which lookup strategy produced a thumbnail URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionTier {
    /// Exact title query with redirects followed
    Direct,
    /// Full-text search, top hit only
    Search,
}

impl std::fmt::Display for ResolutionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionTier::Direct => write!(f, "direct"),
            ResolutionTier::Search => write!(f, "search"),
        }
    }
}

/// A thumbnail URL found for an entity name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedThumbnail {
    /// Thumbnail source URL
    pub url: String,
    /// Tier that produced the URL
    pub tier: ResolutionTier,
    /// Title of the page carrying the thumbnail, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
}

/// Terminal state of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Thumbnail resolved, fetched and saved
    Resolved,
    /// Neither lookup tier returned a thumbnail
    NotFound,
    /// Lookup or download or decode failed
    FetchFailed,
    /// Saving the PNG failed
    WriteFailed,
}

/// What happened to one entity during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailRecord {
    /// Entity name as configured
    pub name: String,

    /// Slug used for the output filename
    pub slug: String,

    pub outcome: Outcome,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<ResolutionTier>,

    /// Saved PNG location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// BLAKE3 hash of the saved PNG bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_hash: Option<String>,

    /// Failure reason for `FetchFailed` / `WriteFailed`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ThumbnailRecord {
    pub fn new(name: &str, slug: String, outcome: Outcome) -> Self {
        Self {
            name: name.to_string(),
            slug,
            outcome,
            url: None,
            tier: None,
            path: None,
            content_hash: None,
            error: None,
        }
    }

    /// Attach the URL and tier the thumbnail was resolved through.
    pub fn with_source(mut self, resolved: &ResolvedThumbnail) -> Self {
        self.url = Some(resolved.url.clone());
        self.tier = Some(resolved.tier);
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn is_saved(&self) -> bool {
        self.outcome == Outcome::Resolved
    }
}

/// The archive written at the end of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Entry names in the order they were written
    pub entries: Vec<String>,
}

/// Result of a full run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// One record per entity, in input order
    pub records: Vec<ThumbnailRecord>,
    pub archive: ArchiveSummary,
}

impl RunSummary {
    pub fn saved(&self) -> usize {
        self.count(|o| o == Outcome::Resolved)
    }

    pub fn not_found(&self) -> usize {
        self.count(|o| o == Outcome::NotFound)
    }

    /// Entities that failed during fetch or write.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::FetchFailed | Outcome::WriteFailed))
    }

    fn count(&self, pred: impl Fn(Outcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(r.outcome)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serialization_skips_empty_fields() {
        let record = ThumbnailRecord::new("Yoda", "yoda".to_string(), Outcome::NotFound);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"outcome\":\"not_found\""));
        assert!(!json.contains("url"));
        assert!(!json.contains("error"));
    }

    #[test]
    fn test_record_builders() {
        let resolved = ResolvedThumbnail {
            url: "https://upload.example/rey.jpg".to_string(),
            tier: ResolutionTier::Search,
            page_title: None,
        };
        let record = ThumbnailRecord::new("Rey", "rey".to_string(), Outcome::FetchFailed)
            .with_source(&resolved)
            .with_error("HTTP 503");
        assert_eq!(record.url.as_deref(), Some("https://upload.example/rey.jpg"));
        assert_eq!(record.tier, Some(ResolutionTier::Search));
        assert_eq!(record.error.as_deref(), Some("HTTP 503"));
        assert!(!record.is_saved());
    }

    #[test]
    fn test_summary_counts() {
        let record = |name: &str, outcome| ThumbnailRecord::new(name, name.to_lowercase(), outcome);
        let saved = record("Yoda", Outcome::Resolved);
        let fetch = record("Han", Outcome::FetchFailed);
        let write = record("Chewbacca", Outcome::WriteFailed);
        let missing = record("Nobody", Outcome::NotFound);

        let summary = RunSummary {
            records: vec![saved, fetch, write, missing],
            archive: ArchiveSummary {
                path: PathBuf::from("out.zip"),
                entries: vec!["yoda.png".to_string()],
            },
        };
        assert_eq!(summary.saved(), 1);
        assert_eq!(summary.failed(), 2);
        assert_eq!(summary.not_found(), 1);
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(ResolutionTier::Direct.to_string(), "direct");
        assert_eq!(ResolutionTier::Search.to_string(), "search");
    }
}
