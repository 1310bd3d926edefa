//! Gateway service - orchestrates the read and write paths.
//!
//! The read path for a collection query is always the same pipeline:
//!
//! 1. Resolve the raw pagination arguments into a direction
//! 2. Fetch one page from the upstream provider
//! 3. Convert every record, assembling its nested child connection
//! 4. Assemble the top-level connection
//!
//! Validation failures never reach a fetcher. Conversion runs
//! per-record but is all-or-nothing per request: one bad record fails
//! the whole response rather than producing a partial connection.
//! Single-item lookups skip steps 1 and 4 but still run step 3.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::{ConversionResult, GatewayResult};
use crate::models::{ArticleWithTags, TagWithArticles};
use crate::ports::{
    assemble, ArticleFetcher, CommandReceipt, CommandService, Connection, CreateArticle,
    CreateTag, PageArgs, TagFetcher, UpdateArticle,
};

/// Main gateway service.
///
/// Holds one fetcher per resource kind plus the command service, all as
/// trait objects so the schema layer can carry a single handle. The
/// service itself is stateless; every call is request-scoped.
pub struct GatewayService {
    articles: Arc<dyn ArticleFetcher>,
    tags: Arc<dyn TagFetcher>,
    commands: Arc<dyn CommandService>,
}

impl GatewayService {
    pub fn new(
        articles: Arc<dyn ArticleFetcher>,
        tags: Arc<dyn TagFetcher>,
        commands: Arc<dyn CommandService>,
    ) -> Self {
        Self {
            articles,
            tags,
            commands,
        }
    }

    // -------------------------------------------------------------------------
    // Read path
    // -------------------------------------------------------------------------

    /// List articles as a paginated connection, each carrying its full
    /// tag collection as a nested connection.
    #[instrument(skip(self))]
    pub async fn articles(&self, args: PageArgs) -> GatewayResult<Connection<ArticleWithTags>> {
        let direction = args.resolve()?;
        let page = self.articles.fetch_articles(&direction).await?;
        debug!(items = page.items.len(), "Article page fetched");

        let (items, has_next, has_prev) = (page.items, page.has_next, page.has_prev);
        let converted: Vec<ArticleWithTags> = items
            .into_iter()
            .map(ArticleWithTags::try_from)
            .collect::<ConversionResult<_>>()?;

        Ok(assemble(
            &direction,
            crate::ports::Page {
                items: converted,
                has_next,
                has_prev,
            },
        ))
    }

    /// List tags as a paginated connection, each carrying its full
    /// article collection as a nested connection.
    #[instrument(skip(self))]
    pub async fn tags(&self, args: PageArgs) -> GatewayResult<Connection<TagWithArticles>> {
        let direction = args.resolve()?;
        let page = self.tags.fetch_tags(&direction).await?;
        debug!(items = page.items.len(), "Tag page fetched");

        let (items, has_next, has_prev) = (page.items, page.has_next, page.has_prev);
        let converted: Vec<TagWithArticles> = items
            .into_iter()
            .map(TagWithArticles::try_from)
            .collect::<ConversionResult<_>>()?;

        Ok(assemble(
            &direction,
            crate::ports::Page {
                items: converted,
                has_next,
                has_prev,
            },
        ))
    }

    /// Get a single article by id, with its nested tag connection.
    #[instrument(skip(self))]
    pub async fn article(&self, id: &str) -> GatewayResult<Option<ArticleWithTags>> {
        let record = self.articles.fetch_article(id).await?;
        Ok(record.map(ArticleWithTags::try_from).transpose()?)
    }

    /// Get a single tag by id, with its nested article connection.
    #[instrument(skip(self))]
    pub async fn tag(&self, id: &str) -> GatewayResult<Option<TagWithArticles>> {
        let record = self.tags.fetch_tag(id).await?;
        Ok(record.map(TagWithArticles::try_from).transpose()?)
    }

    // -------------------------------------------------------------------------
    // Write path (forwarded verbatim)
    // -------------------------------------------------------------------------

    /// Forward an article creation to the command service.
    #[instrument(skip(self, cmd), fields(title = %cmd.title))]
    pub async fn create_article(&self, cmd: CreateArticle) -> GatewayResult<CommandReceipt> {
        Ok(self.commands.create_article(cmd).await?)
    }

    /// Forward an article update to the command service.
    #[instrument(skip(self, cmd), fields(id = %cmd.id))]
    pub async fn update_article(&self, cmd: UpdateArticle) -> GatewayResult<CommandReceipt> {
        Ok(self.commands.update_article(cmd).await?)
    }

    /// Forward a tag creation to the command service.
    #[instrument(skip(self, cmd), fields(name = %cmd.name))]
    pub async fn create_tag(&self, cmd: CreateTag) -> GatewayResult<CommandReceipt> {
        Ok(self.commands.create_tag(cmd).await?)
    }

    /// Forward a tag attachment to the command service.
    #[instrument(skip(self))]
    pub async fn attach_tags(
        &self,
        article_id: &str,
        tag_ids: &[String],
    ) -> GatewayResult<CommandReceipt> {
        Ok(self.commands.attach_tags(article_id, tag_ids).await?)
    }

    /// Forward a tag detachment to the command service.
    #[instrument(skip(self))]
    pub async fn detach_tag(
        &self,
        article_id: &str,
        tag_id: &str,
    ) -> GatewayResult<CommandReceipt> {
        Ok(self.commands.detach_tag(article_id, tag_id).await?)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::error::{CommandError, CommandResult, FetchResult, GatewayError, PaginationError};
    use crate::models::{ArticleRecord, TagRecord, TagSummaryRecord};
    use crate::ports::{Direction, Page};

    /// Stub article provider with a canned page and a call counter.
    #[derive(Default)]
    struct StubArticles {
        page: Vec<ArticleRecord>,
        has_next: bool,
        has_prev: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ArticleFetcher for StubArticles {
        async fn fetch_articles(&self, _: &Direction) -> FetchResult<Page<ArticleRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Page {
                items: self.page.clone(),
                has_next: self.has_next,
                has_prev: self.has_prev,
            })
        }

        async fn fetch_article(&self, id: &str) -> FetchResult<Option<ArticleRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.page.iter().find(|a| a.id == id).cloned())
        }
    }

    #[derive(Default)]
    struct StubTags {
        page: Vec<TagRecord>,
    }

    #[async_trait]
    impl TagFetcher for StubTags {
        async fn fetch_tags(&self, _: &Direction) -> FetchResult<Page<TagRecord>> {
            Ok(Page::full(self.page.clone()))
        }

        async fn fetch_tag(&self, id: &str) -> FetchResult<Option<TagRecord>> {
            Ok(self.page.iter().find(|t| t.id == id).cloned())
        }
    }

    /// Stub command service echoing fixed ids.
    struct StubCommands;

    #[async_trait]
    impl CommandService for StubCommands {
        async fn create_article(&self, _: CreateArticle) -> CommandResult<CommandReceipt> {
            Ok(CommandReceipt {
                event_id: "evt-1".into(),
                resource_id: "article-new".into(),
            })
        }

        async fn update_article(&self, cmd: UpdateArticle) -> CommandResult<CommandReceipt> {
            if cmd.id == "missing" {
                return Err(CommandError::UnknownResource(cmd.id));
            }
            Ok(CommandReceipt {
                event_id: "evt-2".into(),
                resource_id: cmd.id,
            })
        }

        async fn create_tag(&self, _: CreateTag) -> CommandResult<CommandReceipt> {
            Ok(CommandReceipt {
                event_id: "evt-3".into(),
                resource_id: "tag-new".into(),
            })
        }

        async fn attach_tags(&self, article_id: &str, _: &[String]) -> CommandResult<CommandReceipt> {
            Ok(CommandReceipt {
                event_id: "evt-4".into(),
                resource_id: article_id.into(),
            })
        }

        async fn detach_tag(&self, article_id: &str, _: &str) -> CommandResult<CommandReceipt> {
            Ok(CommandReceipt {
                event_id: "evt-5".into(),
                resource_id: article_id.into(),
            })
        }
    }

    fn article(id: &str, tag_count: usize) -> ArticleRecord {
        ArticleRecord {
            id: id.to_string(),
            title: format!("Title {id}"),
            thumbnail_url: format!("https://cdn.example.com/{id}.png"),
            created_at: "2024-03-01T09:00:00Z".into(),
            updated_at: "2024-03-01T09:00:00Z".into(),
            tags: (0..tag_count)
                .map(|n| TagSummaryRecord {
                    id: format!("tag-{n}"),
                    name: format!("name-{n}"),
                })
                .collect(),
        }
    }

    fn service(articles: StubArticles) -> (GatewayService, Arc<StubArticles>) {
        let articles = Arc::new(articles);
        let svc = GatewayService::new(
            articles.clone(),
            Arc::new(StubTags::default()),
            Arc::new(StubCommands),
        );
        (svc, articles)
    }

    // Scenario: first=1 against an upstream with one article (two tags)
    // and more pages available.
    #[tokio::test]
    async fn forward_page_with_nested_tags() {
        let (svc, _) = service(StubArticles {
            page: vec![article("article-1", 2)],
            has_next: true,
            ..Default::default()
        });

        let conn = svc
            .articles(PageArgs {
                first: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(conn.edges.len(), 1);
        assert_eq!(conn.total_count, 1);
        assert_eq!(conn.page_info.has_next_page, Some(true));
        assert_eq!(conn.page_info.has_previous_page, None);
        assert_eq!(conn.edges[0].node.tags.total_count, 2);
    }

    // Scenario: no paging arguments against an empty upstream.
    #[tokio::test]
    async fn empty_unpaginated_fetch() {
        let (svc, _) = service(StubArticles::default());

        let conn = svc.articles(PageArgs::default()).await.unwrap();

        assert!(conn.edges.is_empty());
        assert_eq!(conn.total_count, 0);
        assert_eq!(conn.page_info.start_cursor, None);
        assert_eq!(conn.page_info.has_next_page, None);
        assert_eq!(conn.page_info.has_previous_page, None);
    }

    // Scenario: first=5 and last=5 together is rejected before any
    // upstream call.
    #[tokio::test]
    async fn first_with_last_rejected_without_fetch() {
        let (svc, articles) = service(StubArticles::default());

        let err = svc
            .articles(PageArgs {
                first: Some(5),
                last: Some(5),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Pagination(PaginationError::FirstAndLast)
        ));
        assert_eq!(articles.calls.load(Ordering::SeqCst), 0);
    }

    // Scenario: before without last is rejected before any upstream call.
    #[tokio::test]
    async fn before_without_last_rejected_without_fetch() {
        let (svc, articles) = service(StubArticles::default());

        let err = svc
            .articles(PageArgs {
                before: Some(crate::ports::Cursor::new("X")),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            GatewayError::Pagination(PaginationError::BeforeWithoutLast)
        ));
        assert_eq!(articles.calls.load(Ordering::SeqCst), 0);
    }

    // Nested count stays the full child count no matter how the parent
    // page was requested.
    #[tokio::test]
    async fn nested_count_independent_of_parent_paging() {
        let (svc, _) = service(StubArticles {
            page: vec![article("article-1", 3)],
            has_next: true,
            ..Default::default()
        });

        for args in [
            PageArgs::default(),
            PageArgs {
                first: Some(1),
                ..Default::default()
            },
            PageArgs {
                last: Some(1),
                ..Default::default()
            },
        ] {
            let conn = svc.articles(args).await.unwrap();
            assert_eq!(conn.edges[0].node.tags.total_count, 3);
        }
    }

    // One unconvertible record fails the whole request.
    #[tokio::test]
    async fn conversion_failure_is_all_or_nothing() {
        let mut bad = article("article-2", 0);
        bad.created_at = "tomorrow".into();
        let (svc, _) = service(StubArticles {
            page: vec![article("article-1", 1), bad],
            ..Default::default()
        });

        let err = svc.articles(PageArgs::default()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Conversion(_)));
    }

    #[tokio::test]
    async fn single_article_lookup_resolves_nested_connection() {
        let (svc, _) = service(StubArticles {
            page: vec![article("article-1", 2)],
            ..Default::default()
        });

        let found = svc.article("article-1").await.unwrap().unwrap();
        assert_eq!(found.tags.total_count, 2);

        assert!(svc.article("article-404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mutations_forward_and_return_receipts() {
        let (svc, _) = service(StubArticles::default());

        let receipt = svc
            .create_article(CreateArticle {
                title: "t".into(),
                thumbnail_url: "u".into(),
                tag_ids: vec![],
            })
            .await
            .unwrap();
        assert_eq!(receipt.event_id, "evt-1");
        assert_eq!(receipt.resource_id, "article-new");

        let err = svc
            .update_article(UpdateArticle {
                id: "missing".into(),
                title: None,
                thumbnail_url: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Command(_)));
    }
}
