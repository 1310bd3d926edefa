//! GraphQL API for the Folio gateway.
//!
//! Exposes the aggregated article/tag collections as Relay-style
//! connections, plus command-forwarding mutations.
//!
//! # Building and serving a schema
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio_core::services::GatewayService;
//! use folio_graphql::{build_schema, serve_with_shutdown, ServerConfig};
//!
//! let service = Arc::new(GatewayService::new(articles, tags, commands));
//! let schema = build_schema(service);
//! serve_with_shutdown(schema, ServerConfig::default(), shutdown).await?;
//! ```

mod schema;
mod server;
mod types;

pub use schema::{
    build_schema, MutationRoot, PageInfo, QueryRoot, MAX_QUERY_COMPLEXITY, MAX_QUERY_DEPTH,
};
pub use server::{serve, serve_with_shutdown, ServerConfig};
pub use types::FolioSchema;
