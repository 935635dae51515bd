//! MediaWiki `pageimages` query parameters and response shapes.

use indexmap::IndexMap;
use serde::Deserialize;

/// One `action=query` request asking for a page-image thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageQuery {
    /// Exact title lookup, redirects followed
    Title { title: String, width: u32 },
    /// Full-text search limited to the top-ranked page
    Search { term: String, width: u32 },
}

impl PageQuery {
    pub fn title(title: &str, width: u32) -> Self {
        Self::Title {
            title: title.to_string(),
            width,
        }
    }

    pub fn search(term: &str, width: u32) -> Self {
        Self::Search {
            term: term.to_string(),
            width,
        }
    }

    /// Query-string parameters for this request.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("action", "query".to_string())];
        let width = match self {
            PageQuery::Title { title, width } => {
                params.push(("titles", title.clone()));
                params.push(("redirects", "1".to_string()));
                *width
            }
            PageQuery::Search { term, width } => {
                params.push(("generator", "search".to_string()));
                params.push(("gsrsearch", term.clone()));
                params.push(("gsrlimit", "1".to_string()));
                *width
            }
        };
        params.push(("prop", "pageimages".to_string()));
        params.push(("format", "json".to_string()));
        params.push(("pithumbsize", width.to_string()));
        params
    }
}

/// Top-level `action=query` response.
///
/// `query` is absent when a search has no hits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: Option<QueryBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryBody {
    /// Page records keyed by page id, in response order.
    #[serde(default)]
    pub pages: IndexMap<String, PageRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub source: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl QueryResponse {
    /// The first page carrying a thumbnail, in the order the API listed them.
    pub fn first_thumbnail(&self) -> Option<(&PageRecord, &Thumbnail)> {
        self.query
            .as_ref()?
            .pages
            .values()
            .find_map(|page| page.thumbnail.as_ref().map(|thumb| (page, thumb)))
    }
}
