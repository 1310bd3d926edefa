//! Port traits for upstream collection providers.
//!
//! One fetcher exists per resource kind. Implementations live in
//! adapter crates (e.g. `folio-upstream`); the gateway only sees these
//! traits.
//!
//! # Contract
//!
//! The contract below is binding on the gateway's correctness. The
//! assembler can neither detect nor repair a violation:
//!
//! - Items arrive already in ascending display order for *both*
//!   directions. A backward fetch reverses internally so edges always
//!   read in consistent forward order.
//! - Exactly the boundary flag matching the requested direction is set
//!   (`has_next` for forward, `has_prev` for backward); the other stays
//!   false. A full fetch sets neither.
//!
//! `tests/fetcher_contract.rs` in the adapter crate verifies this
//! against each implementation.

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::models::{ArticleRecord, TagRecord};

use super::pagination::{Direction, Page};

/// Upstream provider for article records.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetch one page of articles for the resolved direction.
    async fn fetch_articles(&self, direction: &Direction) -> FetchResult<Page<ArticleRecord>>;

    /// Fetch a single article by id. Missing id is `Ok(None)`.
    async fn fetch_article(&self, id: &str) -> FetchResult<Option<ArticleRecord>>;
}

/// Upstream provider for tag records.
#[async_trait]
pub trait TagFetcher: Send + Sync {
    /// Fetch one page of tags for the resolved direction.
    async fn fetch_tags(&self, direction: &Direction) -> FetchResult<Page<TagRecord>>;

    /// Fetch a single tag by id. Missing id is `Ok(None)`.
    async fn fetch_tag(&self, id: &str) -> FetchResult<Option<TagRecord>>;
}
