//! Core domain layer for the Folio gateway.
//!
//! This crate contains the domain models, port traits (interfaces), and
//! the gateway service that turns flat upstream result pages into
//! nested, cursor-paginated connections. It follows hexagonal
//! architecture principles - this is the innermost layer with no
//! dependencies on infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      folio (binary)                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │        folio-graphql          │       folio-upstream        │
//! │          (API)                │    (provider adapters)      │
//! ├───────────────────────────────┴─────────────────────────────┤
//! │                     folio-core  ← YOU ARE HERE              │
//! │               (models, ports, gateway service)              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`models`] - Transport records and domain aggregates
//! - [`ports`] - Pagination, fetcher, and command interfaces
//! - [`services`] - The gateway service pipeline
//! - [`error`] - Domain error types
//!
//! # Key Concepts
//!
//! ## Pagination
//!
//! Client arguments (`first`/`last`/`after`/`before`) resolve into a
//! closed [`ports::Direction`] before anything else happens; illegal
//! combinations are a single validation error. Fetchers consume the
//! resolved direction, and [`ports::assemble`] turns the fetched page
//! into a connection with direction-gated boundary flags.
//!
//! ## Nested connections
//!
//! Every article carries its tags and every tag its articles as a
//! child collection. Child collections are assembled with the same
//! code path, direction fixed to unpaginated, during record
//! conversion.
//!
//! ## Request lifecycle
//!
//! 1. Resolve pagination arguments
//! 2. Fetch one page from the upstream provider
//! 3. Convert each record, building its nested connection
//! 4. Assemble the top-level connection

pub mod error;
pub mod models;
pub mod ports;
pub mod services;
