//! Domain models for the gateway.
//!
//! Two families live here:
//!
//! - **Transport records** (`ArticleRecord`, `TagRecord`, ...) - the shapes
//!   upstream providers return: string ids, RFC 3339 string timestamps,
//!   embedded child summaries.
//! - **Domain aggregates** (`ArticleWithTags`, `TagWithArticles`, ...) - the
//!   converted form the gateway serves, with parsed timestamps and the
//!   child collection already assembled into a nested connection.
//!
//! All of these are request-scoped, immutable values: constructed fresh
//! per inbound call and discarded once the response is serialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, ConversionResult};
use crate::ports::{assemble_full, Connection, Identified};

// =============================================================================
// Transport Records (upstream wire shapes)
// =============================================================================

/// Tag summary as embedded in an upstream article record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSummaryRecord {
    pub id: String,
    pub name: String,
}

/// Article summary as embedded in an upstream tag record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleSummaryRecord {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    /// RFC 3339 timestamp, parsed during conversion.
    pub created_at: String,
    /// RFC 3339 timestamp, parsed during conversion.
    pub updated_at: String,
}

/// Full article record as returned by the article provider.
///
/// Carries the complete (unpaginated) list of the article's tags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub created_at: String,
    pub updated_at: String,
    pub tags: Vec<TagSummaryRecord>,
}

/// Full tag record as returned by the tag provider.
///
/// Carries the complete (unpaginated) list of articles under the tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagRecord {
    pub id: String,
    pub name: String,
    pub articles: Vec<ArticleSummaryRecord>,
}

// =============================================================================
// Domain Aggregates
// =============================================================================

/// An article with parsed timestamps.
#[derive(Debug, Clone)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A tag.
#[derive(Debug, Clone)]
pub struct TagSummary {
    pub id: String,
    pub name: String,
}

/// An article together with its full tag collection as a nested connection.
#[derive(Debug, Clone)]
pub struct ArticleWithTags {
    pub article: ArticleSummary,
    pub tags: Connection<TagSummary>,
}

/// A tag together with its full article collection as a nested connection.
#[derive(Debug, Clone)]
pub struct TagWithArticles {
    pub tag: TagSummary,
    pub articles: Connection<ArticleSummary>,
}

impl Identified for ArticleSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for TagSummary {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for ArticleWithTags {
    fn id(&self) -> &str {
        &self.article.id
    }
}

impl Identified for TagWithArticles {
    fn id(&self) -> &str {
        &self.tag.id
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Parse an RFC 3339 timestamp from a transport record field.
///
/// The record id and field name travel with the error so a single bad
/// record can be pinpointed in a large page.
fn parse_timestamp(
    record_id: &str,
    field: &'static str,
    value: &str,
) -> ConversionResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ConversionError::InvalidTimestamp {
            record_id: record_id.to_string(),
            field,
            value: value.to_string(),
        })
}

impl From<TagSummaryRecord> for TagSummary {
    fn from(r: TagSummaryRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
        }
    }
}

impl TryFrom<ArticleSummaryRecord> for ArticleSummary {
    type Error = ConversionError;

    fn try_from(r: ArticleSummaryRecord) -> ConversionResult<Self> {
        let created_at = parse_timestamp(&r.id, "created_at", &r.created_at)?;
        let updated_at = parse_timestamp(&r.id, "updated_at", &r.updated_at)?;
        Ok(Self {
            id: r.id,
            title: r.title,
            thumbnail_url: r.thumbnail_url,
            created_at,
            updated_at,
        })
    }
}

impl TryFrom<ArticleRecord> for ArticleWithTags {
    type Error = ConversionError;

    /// Convert a transport article into an aggregate, assembling the
    /// nested tag connection. Failure on any part fails this one record.
    fn try_from(r: ArticleRecord) -> ConversionResult<Self> {
        let created_at = parse_timestamp(&r.id, "created_at", &r.created_at)?;
        let updated_at = parse_timestamp(&r.id, "updated_at", &r.updated_at)?;

        let tags: Vec<TagSummary> = r.tags.into_iter().map(TagSummary::from).collect();

        Ok(Self {
            article: ArticleSummary {
                id: r.id,
                title: r.title,
                thumbnail_url: r.thumbnail_url,
                created_at,
                updated_at,
            },
            tags: assemble_full(tags),
        })
    }
}

impl TryFrom<TagRecord> for TagWithArticles {
    type Error = ConversionError;

    /// Convert a transport tag into an aggregate, assembling the nested
    /// article connection. One bad embedded article fails this record.
    fn try_from(r: TagRecord) -> ConversionResult<Self> {
        let articles: Vec<ArticleSummary> = r
            .articles
            .into_iter()
            .map(ArticleSummary::try_from)
            .collect::<ConversionResult<_>>()?;

        Ok(Self {
            tag: TagSummary {
                id: r.id,
                name: r.name,
            },
            articles: assemble_full(articles),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
