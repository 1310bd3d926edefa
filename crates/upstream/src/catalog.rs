//! In-memory catalog implementing the fetcher and command ports.
//!
//! `FixtureCatalog` is the reference implementation of the upstream
//! provider contract: items are handed out in ascending display order
//! for both paging directions (a backward window is cut from the end
//! but never reversed), and exactly the boundary flag matching the
//! requested direction is set. Commands mutate the catalog so writes
//! are observable through subsequent queries.
//!
//! This adapter backs local development and the contract tests in
//! `tests/fetcher_contract.rs`. A production transport adapter must
//! satisfy the same contract.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use folio_core::error::{CommandError, CommandResult, FetchResult};
use folio_core::models::{
    ArticleRecord, ArticleSummaryRecord, TagRecord, TagSummaryRecord,
};
use folio_core::ports::{
    ArticleFetcher, CommandReceipt, CommandService, CreateArticle, CreateTag, Direction, Page,
    TagFetcher, UpdateArticle,
};

use crate::fixture::{Fixture, FixtureArticle, FixtureError, FixtureTag};

// =============================================================================
// Catalog State
// =============================================================================

#[derive(Debug, Default)]
struct State {
    /// Articles in display order (declaration/creation order).
    articles: Vec<FixtureArticle>,
    /// Tags in display order.
    tags: Vec<FixtureTag>,
    /// Counter for generated resource ids.
    next_resource: u64,
    /// Counter for generated event ids.
    next_event: u64,
}

impl State {
    fn next_event_id(&mut self) -> String {
        self.next_event += 1;
        format!("evt-{}", self.next_event)
    }

    fn next_resource_id(&mut self, kind: &str) -> String {
        self.next_resource += 1;
        format!("{kind}-{}", self.next_resource)
    }

    fn article_record(&self, article: &FixtureArticle) -> ArticleRecord {
        let tags = article
            .tag_ids
            .iter()
            .filter_map(|tag_id| self.tags.iter().find(|t| &t.id == tag_id))
            .map(|t| TagSummaryRecord {
                id: t.id.clone(),
                name: t.name.clone(),
            })
            .collect();

        ArticleRecord {
            id: article.id.clone(),
            title: article.title.clone(),
            thumbnail_url: article.thumbnail_url.clone(),
            created_at: article.created_at.clone(),
            updated_at: article.updated_at.clone(),
            tags,
        }
    }

    fn tag_record(&self, tag: &FixtureTag) -> TagRecord {
        let articles = self
            .articles
            .iter()
            .filter(|a| a.tag_ids.iter().any(|id| id == &tag.id))
            .map(|a| ArticleSummaryRecord {
                id: a.id.clone(),
                title: a.title.clone(),
                thumbnail_url: a.thumbnail_url.clone(),
                created_at: a.created_at.clone(),
                updated_at: a.updated_at.clone(),
            })
            .collect();

        TagRecord {
            id: tag.id.clone(),
            name: tag.name.clone(),
            articles,
        }
    }
}

// =============================================================================
// Windowing
// =============================================================================

/// Cut one page out of an ordered slice.
///
/// Forward: the window starts after the cursor (or at the front) and
/// `has_next` reports whether items remain past it. Backward: the
/// window ends before the cursor (or at the back) and `has_prev`
/// reports whether items remain in front of it. Items keep ascending
/// order in every case. An unknown cursor falls back to the matching
/// collection boundary.
fn window<'a, T>(
    items: &'a [T],
    id_of: impl Fn(&T) -> &str,
    direction: &Direction,
) -> (&'a [T], bool, bool) {
    match direction {
        Direction::Full => (items, false, false),
        Direction::Forward { limit, after } => {
            let start = after
                .as_ref()
                .and_then(|c| items.iter().position(|i| id_of(i) == c.value))
                .map_or(0, |pos| pos + 1);
            let end = (start + *limit as usize).min(items.len());
            (&items[start..end], end < items.len(), false)
        }
        Direction::Backward { limit, before } => {
            let end = before
                .as_ref()
                .and_then(|c| items.iter().position(|i| id_of(i) == c.value))
                .unwrap_or(items.len());
            let start = end.saturating_sub(*limit as usize);
            (&items[start..end], false, start > 0)
        }
    }
}

// =============================================================================
// FixtureCatalog
// =============================================================================

/// Fixture-backed provider implementing every upstream port.
pub struct FixtureCatalog {
    state: RwLock<State>,
}

impl FixtureCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    /// A catalog seeded from a validated fixture.
    pub fn from_fixture(fixture: Fixture) -> Result<Self, FixtureError> {
        fixture.validate()?;
        debug!(
            articles = fixture.articles.len(),
            tags = fixture.tags.len(),
            "Catalog seeded"
        );
        Ok(Self {
            state: RwLock::new(State {
                articles: fixture.articles,
                tags: fixture.tags,
                next_resource: 0,
                next_event: 0,
            }),
        })
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleFetcher for FixtureCatalog {
    async fn fetch_articles(&self, direction: &Direction) -> FetchResult<Page<ArticleRecord>> {
        let state = self.read();
        let (slice, has_next, has_prev) = window(&state.articles, |a| a.id.as_str(), direction);

        Ok(Page {
            items: slice.iter().map(|a| state.article_record(a)).collect(),
            has_next,
            has_prev,
        })
    }

    async fn fetch_article(&self, id: &str) -> FetchResult<Option<ArticleRecord>> {
        let state = self.read();
        Ok(state
            .articles
            .iter()
            .find(|a| a.id == id)
            .map(|a| state.article_record(a)))
    }
}

#[async_trait]
impl TagFetcher for FixtureCatalog {
    async fn fetch_tags(&self, direction: &Direction) -> FetchResult<Page<TagRecord>> {
        let state = self.read();
        let (slice, has_next, has_prev) = window(&state.tags, |t| t.id.as_str(), direction);

        Ok(Page {
            items: slice.iter().map(|t| state.tag_record(t)).collect(),
            has_next,
            has_prev,
        })
    }

    async fn fetch_tag(&self, id: &str) -> FetchResult<Option<TagRecord>> {
        let state = self.read();
        Ok(state
            .tags
            .iter()
            .find(|t| t.id == id)
            .map(|t| state.tag_record(t)))
    }
}

#[async_trait]
impl CommandService for FixtureCatalog {
    async fn create_article(&self, cmd: CreateArticle) -> CommandResult<CommandReceipt> {
        let mut state = self.write();

        for tag_id in &cmd.tag_ids {
            if !state.tags.iter().any(|t| &t.id == tag_id) {
                return Err(CommandError::UnknownResource(tag_id.clone()));
            }
        }

        let resource_id = state.next_resource_id("article");
        let now = Utc::now().to_rfc3339();
        state.articles.push(FixtureArticle {
            id: resource_id.clone(),
            title: cmd.title,
            thumbnail_url: cmd.thumbnail_url,
            created_at: now.clone(),
            updated_at: now,
            tag_ids: cmd.tag_ids,
        });

        Ok(CommandReceipt {
            event_id: state.next_event_id(),
            resource_id,
        })
    }

    async fn update_article(&self, cmd: UpdateArticle) -> CommandResult<CommandReceipt> {
        let mut state = self.write();
        let now = Utc::now().to_rfc3339();

        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == cmd.id)
            .ok_or_else(|| CommandError::UnknownResource(cmd.id.clone()))?;

        if let Some(title) = cmd.title {
            article.title = title;
        }
        if let Some(thumbnail_url) = cmd.thumbnail_url {
            article.thumbnail_url = thumbnail_url;
        }
        article.updated_at = now;

        Ok(CommandReceipt {
            event_id: state.next_event_id(),
            resource_id: cmd.id,
        })
    }

    async fn create_tag(&self, cmd: CreateTag) -> CommandResult<CommandReceipt> {
        let mut state = self.write();

        let resource_id = state.next_resource_id("tag");
        state.tags.push(FixtureTag {
            id: resource_id.clone(),
            name: cmd.name,
        });

        Ok(CommandReceipt {
            event_id: state.next_event_id(),
            resource_id,
        })
    }

    async fn attach_tags(
        &self,
        article_id: &str,
        tag_ids: &[String],
    ) -> CommandResult<CommandReceipt> {
        let mut state = self.write();

        for tag_id in tag_ids {
            if !state.tags.iter().any(|t| &t.id == tag_id) {
                return Err(CommandError::UnknownResource(tag_id.clone()));
            }
        }

        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == article_id)
            .ok_or_else(|| CommandError::UnknownResource(article_id.to_string()))?;

        for tag_id in tag_ids {
            if !article.tag_ids.contains(tag_id) {
                article.tag_ids.push(tag_id.clone());
            }
        }

        Ok(CommandReceipt {
            event_id: state.next_event_id(),
            resource_id: article_id.to_string(),
        })
    }

    async fn detach_tag(&self, article_id: &str, tag_id: &str) -> CommandResult<CommandReceipt> {
        let mut state = self.write();

        let article = state
            .articles
            .iter_mut()
            .find(|a| a.id == article_id)
            .ok_or_else(|| CommandError::UnknownResource(article_id.to_string()))?;

        article.tag_ids.retain(|id| id != tag_id);

        Ok(CommandReceipt {
            event_id: state.next_event_id(),
            resource_id: article_id.to_string(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> FixtureCatalog {
        let fixture = Fixture {
            tags: vec![
                FixtureTag {
                    id: "tag-a".into(),
                    name: "rust".into(),
                },
                FixtureTag {
                    id: "tag-b".into(),
                    name: "graphql".into(),
                },
            ],
            articles: ["one", "two", "three"]
                .iter()
                .enumerate()
                .map(|(n, title)| FixtureArticle {
                    id: format!("art-{n}"),
                    title: (*title).to_string(),
                    thumbnail_url: format!("https://cdn.example.com/{n}.png"),
                    created_at: "2024-03-01T09:00:00Z".into(),
                    updated_at: "2024-03-01T09:00:00Z".into(),
                    tag_ids: vec!["tag-a".into()],
                })
                .collect(),
        };
        FixtureCatalog::from_fixture(fixture).unwrap()
    }

    #[tokio::test]
    async fn articles_embed_their_tags() {
        let catalog = seeded();
        let page = catalog.fetch_articles(&Direction::Full).await.unwrap();

        assert_eq!(page.items.len(), 3);
        assert_eq!(page.items[0].tags.len(), 1);
        assert_eq!(page.items[0].tags[0].name, "rust");
    }

    #[tokio::test]
    async fn tags_embed_their_articles() {
        let catalog = seeded();

        let tag = catalog.fetch_tag("tag-a").await.unwrap().unwrap();
        assert_eq!(tag.articles.len(), 3);

        let unused = catalog.fetch_tag("tag-b").await.unwrap().unwrap();
        assert!(unused.articles.is_empty());
    }

    #[tokio::test]
    async fn created_article_appears_in_subsequent_queries() {
        let catalog = seeded();

        let receipt = catalog
            .create_article(CreateArticle {
                title: "four".into(),
                thumbnail_url: "https://cdn.example.com/4.png".into(),
                tag_ids: vec!["tag-b".into()],
            })
            .await
            .unwrap();
        assert_eq!(receipt.event_id, "evt-1");

        let fetched = catalog
            .fetch_article(&receipt.resource_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.title, "four");
        assert_eq!(fetched.tags[0].id, "tag-b");
    }

    #[tokio::test]
    async fn create_article_rejects_unknown_tag() {
        let catalog = seeded();

        let err = catalog
            .create_article(CreateArticle {
                title: "bad".into(),
                thumbnail_url: "u".into(),
                tag_ids: vec!["tag-nope".into()],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::UnknownResource(_)));
    }

    #[tokio::test]
    async fn attach_and_detach_are_observable() {
        let catalog = seeded();

        catalog
            .attach_tags("art-0", &["tag-b".into()])
            .await
            .unwrap();
        let article = catalog.fetch_article("art-0").await.unwrap().unwrap();
        assert_eq!(article.tags.len(), 2);

        catalog.detach_tag("art-0", "tag-a").await.unwrap();
        let article = catalog.fetch_article("art-0").await.unwrap().unwrap();
        assert_eq!(article.tags.len(), 1);
        assert_eq!(article.tags[0].id, "tag-b");
    }

    #[tokio::test]
    async fn attach_is_idempotent_per_tag() {
        let catalog = seeded();

        catalog
            .attach_tags("art-1", &["tag-a".into(), "tag-a".into()])
            .await
            .unwrap();
        let article = catalog.fetch_article("art-1").await.unwrap().unwrap();
        assert_eq!(article.tags.len(), 1);
    }

    #[tokio::test]
    async fn update_touches_only_supplied_fields() {
        let catalog = seeded();

        catalog
            .update_article(UpdateArticle {
                id: "art-2".into(),
                title: Some("renamed".into()),
                thumbnail_url: None,
            })
            .await
            .unwrap();

        let article = catalog.fetch_article("art-2").await.unwrap().unwrap();
        assert_eq!(article.title, "renamed");
        assert_eq!(article.thumbnail_url, "https://cdn.example.com/2.png");
    }
}
