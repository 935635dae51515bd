//! Entity name to thumbnail URL resolution.
//!
//! - **query**: request parameters and response shapes for `prop=pageimages`
//! - **client**: the HTTP transport behind the [`PageImageApi`] trait
//! - **resolver**: the direct-then-search lookup strategy

pub mod client;
pub mod query;
pub mod resolver;

pub use client::{build_http_client, MediaWikiClient, PageImageApi};
pub use query::{PageQuery, QueryResponse};
pub use resolver::{NameResolver, ThumbnailResolver};
