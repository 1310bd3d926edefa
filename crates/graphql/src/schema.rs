//! GraphQL schema definition.
//!
//! This module provides the query and mutation roots for the gateway,
//! the Relay-style connection wire types, and the mapping from domain
//! aggregates to the outbound wire shape. Pagination flags stay
//! optional on the wire: `hasNextPage` is only non-null on forward
//! pages and `hasPreviousPage` only on backward pages.

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Result, Schema};
use chrono::{DateTime, Utc};

use folio_core::ports::{Cursor, PageArgs};
use folio_core::services::GatewayService;

use crate::types::FolioSchema;

// -----------------------------------------------------------------------------
// Schema Configuration
// -----------------------------------------------------------------------------

/// Maximum query depth to prevent deeply nested queries (DoS protection).
/// Introspection needs depth ~13, so 15 leaves headroom for it.
pub const MAX_QUERY_DEPTH: usize = 15;

/// Maximum query complexity score (DoS protection).
/// Each field has a default complexity of 1, nested objects multiply.
pub const MAX_QUERY_COMPLEXITY: usize = 500;

/// Build the gateway schema with depth and complexity limits applied.
pub fn build_schema(service: Arc<GatewayService>) -> FolioSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .limit_depth(MAX_QUERY_DEPTH)
        .limit_complexity(MAX_QUERY_COMPLEXITY)
        .finish()
}

// -----------------------------------------------------------------------------
// Query Root
// -----------------------------------------------------------------------------

/// Query root for the gateway.
#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// List articles as a paginated connection.
    ///
    /// With no arguments the full collection is returned unpaginated.
    async fn articles<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<u32>,
        after: Option<String>,
        last: Option<u32>,
        before: Option<String>,
    ) -> Result<ArticleConnection> {
        let service = ctx.data::<Arc<GatewayService>>()?;
        let connection = service.articles(page_args(first, after, last, before)).await?;
        Ok(ArticleConnection::from(connection))
    }

    /// List tags as a paginated connection.
    async fn tags<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        first: Option<u32>,
        after: Option<String>,
        last: Option<u32>,
        before: Option<String>,
    ) -> Result<TagConnection> {
        let service = ctx.data::<Arc<GatewayService>>()?;
        let connection = service.tags(page_args(first, after, last, before)).await?;
        Ok(TagConnection::from(connection))
    }

    /// Get an article by id, with its full tag collection.
    async fn article<'ctx>(&self, ctx: &Context<'ctx>, id: String) -> Result<Option<Article>> {
        let service = ctx.data::<Arc<GatewayService>>()?;
        let article = service.article(&id).await?;
        Ok(article.map(Article::from))
    }

    /// Get a tag by id, with its full article collection.
    async fn tag<'ctx>(&self, ctx: &Context<'ctx>, id: String) -> Result<Option<Tag>> {
        let service = ctx.data::<Arc<GatewayService>>()?;
        let tag = service.tag(&id).await?;
        Ok(tag.map(Tag::from))
    }
}

/// Assemble raw client arguments; validation happens in the service.
fn page_args(
    first: Option<u32>,
    after: Option<String>,
    last: Option<u32>,
    before: Option<String>,
) -> PageArgs {
    PageArgs {
        first,
        after: after.map(Cursor::new),
        last,
        before: before.map(Cursor::new),
    }
}

// -----------------------------------------------------------------------------
// Mutation Root
// -----------------------------------------------------------------------------

/// Mutation root: every mutation is forwarded verbatim to the
/// command service and answers with the generated identifiers.
#[derive(Default)]
pub struct MutationRoot;

#[derive(async_graphql::InputObject)]
pub struct CreateArticleInput {
    pub title: String,
    pub thumbnail_url: String,
    #[graphql(default)]
    pub tag_ids: Vec<String>,
}

#[derive(async_graphql::InputObject)]
pub struct UpdateArticleInput {
    pub id: String,
    pub title: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(async_graphql::InputObject)]
pub struct CreateTagInput {
    pub name: String,
}

/// Identifiers generated by the command service.
#[derive(async_graphql::SimpleObject)]
pub struct CommandReceipt {
    pub event_id: String,
    pub resource_id: String,
}

impl From<folio_core::ports::CommandReceipt> for CommandReceipt {
    fn from(r: folio_core::ports::CommandReceipt) -> Self {
        Self {
            event_id: r.event_id,
            resource_id: r.resource_id,
        }
    }
}

#[Object]
impl MutationRoot {
    /// Create an article, optionally attaching tags.
    async fn create_article<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        input: CreateArticleInput,
    ) -> Result<CommandReceipt> {
        let service = ctx.data::<Arc<GatewayService>>()?;
        let receipt = service
            .create_article(folio_core::ports::CreateArticle {
                title: input.title,
                thumbnail_url: input.thumbnail_url,
                tag_ids: input.tag_ids,
            })
            .await?;
        Ok(receipt.into())
    }

    /// Update an article's title and/or thumbnail.
    async fn update_article<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        input: UpdateArticleInput,
    ) -> Result<CommandReceipt> {
        let service = ctx.data::<Arc<GatewayService>>()?;
        let receipt = service
            .update_article(folio_core::ports::UpdateArticle {
                id: input.id,
                title: input.title,
                thumbnail_url: input.thumbnail_url,
            })
            .await?;
        Ok(receipt.into())
    }

    /// Create a tag.
    async fn create_tag<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        input: CreateTagInput,
    ) -> Result<CommandReceipt> {
        let service = ctx.data::<Arc<GatewayService>>()?;
        let receipt = service
            .create_tag(folio_core::ports::CreateTag { name: input.name })
            .await?;
        Ok(receipt.into())
    }

    /// Attach tags to an article.
    async fn attach_tags<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        article_id: String,
        tag_ids: Vec<String>,
    ) -> Result<CommandReceipt> {
        let service = ctx.data::<Arc<GatewayService>>()?;
        let receipt = service.attach_tags(&article_id, &tag_ids).await?;
        Ok(receipt.into())
    }

    /// Detach one tag from an article.
    async fn detach_tag<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        article_id: String,
        tag_id: String,
    ) -> Result<CommandReceipt> {
        let service = ctx.data::<Arc<GatewayService>>()?;
        let receipt = service.detach_tag(&article_id, &tag_id).await?;
        Ok(receipt.into())
    }
}

// -----------------------------------------------------------------------------
// Node Types
// -----------------------------------------------------------------------------

/// Article with its full tag collection.
#[derive(async_graphql::SimpleObject)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// The article's tags as an unpaginated nested connection.
    pub tags: TagSummaryConnection,
}

impl From<folio_core::models::ArticleWithTags> for Article {
    fn from(a: folio_core::models::ArticleWithTags) -> Self {
        Self {
            id: a.article.id,
            title: a.article.title,
            thumbnail_url: a.article.thumbnail_url,
            created_at: a.article.created_at,
            updated_at: a.article.updated_at,
            tags: TagSummaryConnection::from(a.tags),
        }
    }
}

/// Tag with its full article collection.
#[derive(async_graphql::SimpleObject)]
pub struct Tag {
    pub id: String,
    pub name: String,
    /// The tag's articles as an unpaginated nested connection.
    pub articles: ArticleSummaryConnection,
}

impl From<folio_core::models::TagWithArticles> for Tag {
    fn from(t: folio_core::models::TagWithArticles) -> Self {
        Self {
            id: t.tag.id,
            name: t.tag.name,
            articles: ArticleSummaryConnection::from(t.articles),
        }
    }
}

/// Article summary as nested under a tag.
#[derive(async_graphql::SimpleObject)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<folio_core::models::ArticleSummary> for ArticleSummary {
    fn from(a: folio_core::models::ArticleSummary) -> Self {
        Self {
            id: a.id,
            title: a.title,
            thumbnail_url: a.thumbnail_url,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Tag summary as nested under an article.
#[derive(async_graphql::SimpleObject)]
pub struct TagSummary {
    pub id: String,
    pub name: String,
}

impl From<folio_core::models::TagSummary> for TagSummary {
    fn from(t: folio_core::models::TagSummary) -> Self {
        Self {
            id: t.id,
            name: t.name,
        }
    }
}

// -----------------------------------------------------------------------------
// Connection Types (Relay-style pagination)
// -----------------------------------------------------------------------------

/// Boundary metadata. The direction flags are nullable on purpose:
/// only the flag matching the fetch direction is ever populated.
#[derive(async_graphql::SimpleObject)]
pub struct PageInfo {
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub has_next_page: Option<bool>,
    pub has_previous_page: Option<bool>,
}

impl From<folio_core::ports::PageInfo> for PageInfo {
    fn from(info: folio_core::ports::PageInfo) -> Self {
        Self {
            start_cursor: info.start_cursor.map(|c| c.value),
            end_cursor: info.end_cursor.map(|c| c.value),
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
        }
    }
}

/// Generate Relay-style connection types (Edge + Connection) with From impl.
macro_rules! define_connection {
    ($node:ty, $model:ty, $edge:ident, $connection:ident) => {
        #[derive(async_graphql::SimpleObject)]
        pub struct $edge {
            pub node: $node,
            pub cursor: String,
        }

        #[derive(async_graphql::SimpleObject)]
        pub struct $connection {
            pub edges: Vec<$edge>,
            pub page_info: PageInfo,
            /// Number of items in this page, not a global count.
            pub total_count: i64,
        }

        impl From<folio_core::ports::Connection<$model>> for $connection {
            fn from(conn: folio_core::ports::Connection<$model>) -> Self {
                Self {
                    edges: conn
                        .edges
                        .into_iter()
                        .map(|e| $edge {
                            node: <$node>::from(e.node),
                            cursor: e.cursor.value,
                        })
                        .collect(),
                    page_info: PageInfo::from(conn.page_info),
                    total_count: conn.total_count,
                }
            }
        }
    };
}

define_connection!(
    Article,
    folio_core::models::ArticleWithTags,
    ArticleEdge,
    ArticleConnection
);
define_connection!(
    Tag,
    folio_core::models::TagWithArticles,
    TagEdge,
    TagConnection
);
define_connection!(
    ArticleSummary,
    folio_core::models::ArticleSummary,
    ArticleSummaryEdge,
    ArticleSummaryConnection
);
define_connection!(
    TagSummary,
    folio_core::models::TagSummary,
    TagSummaryEdge,
    TagSummaryConnection
);
