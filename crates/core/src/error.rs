//! Error types for the gateway domain layer.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`PaginationError`] - Illegal pagination argument combinations (client fault)
//! - [`FetchError`] - Upstream provider failures (collaborator fault)
//! - [`ConversionError`] - Per-record data faults during conversion
//! - [`CommandError`] - Command service failures
//! - [`GatewayError`] - Top-level gateway errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Nothing in this core
//! retries: retry policy belongs to the caller or to the upstream
//! collaborator.

use thiserror::Error;

// =============================================================================
// Pagination Errors
// =============================================================================

/// Illegal pagination argument combinations.
///
/// These are client faults, surfaced directly to the caller. They are
/// raised before any upstream call is made.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaginationError {
    /// `first` and `last` were both supplied.
    #[error("first and last cannot be combined in one request")]
    FirstAndLast,

    /// `after` was supplied without `first`.
    #[error("after requires first")]
    AfterWithoutFirst,

    /// `before` was supplied without `last`.
    #[error("before requires last")]
    BeforeWithoutLast,
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Upstream provider errors.
///
/// The gateway does not reinterpret these; it only carries them to the
/// caller with request context attached for observability. A missing
/// record is not an error - lookups return `Option`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider could not be reached.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with an error.
    #[error("upstream error (code {code}): {message}")]
    Upstream {
        /// Provider-reported status code.
        code: u32,
        /// Error details.
        message: String,
    },

    /// The provider returned a payload the adapter could not decode.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),
}

// =============================================================================
// Conversion Errors
// =============================================================================

/// Per-record data faults raised while converting an upstream record
/// into a domain aggregate.
///
/// A conversion failure is scoped to one record but fails the whole
/// request: no partial or degraded connections are ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// A timestamp field could not be parsed as RFC 3339.
    #[error("record {record_id}: invalid timestamp in {field}: {value}")]
    InvalidTimestamp {
        /// Id of the record that failed to convert.
        record_id: String,
        /// Field that held the bad value.
        field: &'static str,
        /// The unparseable value.
        value: String,
    },
}

// =============================================================================
// Command Errors
// =============================================================================

/// Errors from the write-side command service.
///
/// Commands are forwarded verbatim; the gateway adds no semantics.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The command service rejected the command.
    #[error("command rejected: {0}")]
    Rejected(String),

    /// The command referenced a resource that does not exist.
    #[error("unknown resource: {0}")]
    UnknownResource(String),

    /// The command service could not be reached.
    #[error("command service unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Gateway Errors
// =============================================================================

/// Top-level error type returned by [`crate::services::GatewayService`].
///
/// It wraps all lower-level errors so `?` composes across the
/// validate -> fetch -> convert -> assemble pipeline.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Illegal pagination arguments.
    #[error("pagination error: {0}")]
    Pagination(#[from] PaginationError),

    /// Upstream provider failure.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Record conversion failure.
    #[error("conversion error: {0}")]
    Conversion(#[from] ConversionError),

    /// Command service failure.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Result type for pagination validation.
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Result type for upstream fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type for record conversion.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Result type for command operations.
pub type CommandResult<T> = Result<T, CommandError>;
