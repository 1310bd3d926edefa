//! Upstream provider adapters for the Folio gateway.
//!
//! This crate implements the fetcher and command ports from
//! `folio-core` with an in-memory, fixture-backed catalog. It serves
//! two purposes:
//!
//! - Local development: run the full gateway against a JSON fixture
//!   file without any upstream services.
//! - Contract verification: `tests/fetcher_contract.rs` pins down the
//!   provider contract (ascending display order for both paging
//!   directions, direction-exclusive boundary flags) that any real
//!   transport adapter must also satisfy.
//!
//! # Usage
//!
//! ```ignore
//! use folio_upstream::{Fixture, FixtureCatalog};
//!
//! let fixture = Fixture::load("fixtures/demo.json")?;
//! let catalog = Arc::new(FixtureCatalog::from_fixture(fixture)?);
//! // catalog is an ArticleFetcher, a TagFetcher, and a CommandService
//! ```

mod catalog;
mod fixture;

pub use catalog::FixtureCatalog;
pub use fixture::{Fixture, FixtureArticle, FixtureError, FixtureTag};
