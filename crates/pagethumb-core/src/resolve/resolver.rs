//! Two-tier name resolution: direct title lookup, then top search hit.

use async_trait::async_trait;

use super::client::PageImageApi;
use super::query::{PageQuery, QueryResponse};
use crate::error::PipelineError;
use crate::types::{ResolutionTier, ResolvedThumbnail};

/// Turns an entity name into a thumbnail URL, if one exists.
#[async_trait]
pub trait ThumbnailResolver: Send + Sync {
    /// Resolve `name` to a thumbnail of the requested `width`.
    ///
    /// `Ok(None)` means no thumbnail could be found; errors are reserved for
    /// network and protocol failures.
    async fn resolve(
        &self,
        name: &str,
        width: u32,
    ) -> Result<Option<ResolvedThumbnail>, PipelineError>;
}

/// Resolver backed by a [`PageImageApi`].
///
/// Names are sent verbatim; the API's own redirect handling and search
/// ranking take care of disambiguation.
pub struct NameResolver<A> {
    api: A,
}

impl<A: PageImageApi> NameResolver<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}

fn extract(resp: &QueryResponse, tier: ResolutionTier) -> Option<ResolvedThumbnail> {
    resp.first_thumbnail().map(|(page, thumb)| ResolvedThumbnail {
        url: thumb.source.clone(),
        tier,
        page_title: page.title.clone(),
    })
}

#[async_trait]
impl<A: PageImageApi> ThumbnailResolver for NameResolver<A> {
    async fn resolve(
        &self,
        name: &str,
        width: u32,
    ) -> Result<Option<ResolvedThumbnail>, PipelineError> {
        let direct = self.api.query(&PageQuery::title(name, width)).await?;
        if let Some(found) = extract(&direct, ResolutionTier::Direct) {
            tracing::debug!("{name}: direct hit {}", found.url);
            return Ok(Some(found));
        }

        tracing::debug!("{name}: no direct thumbnail, falling back to search");
        let search = self.api.query(&PageQuery::search(name, width)).await?;
        let found = extract(&search, ResolutionTier::Search);
        match &found {
            Some(hit) => tracing::debug!(
                "{name}: search hit {} ({})",
                hit.url,
                hit.page_title.as_deref().unwrap_or("untitled")
            ),
            None => tracing::debug!("{name}: search returned no thumbnail"),
        }
        Ok(found)
    }
}
