//! Port trait for the write-side command service.
//!
//! The gateway forwards mutations verbatim: it adds no validation, no
//! retries, and no semantics of its own. The command service is the
//! event-sourced write path and returns the identifiers it generated.

use async_trait::async_trait;

use crate::error::CommandResult;

// =============================================================================
// Commands
// =============================================================================

/// Create a new article, optionally attaching tags in the same command.
#[derive(Debug, Clone)]
pub struct CreateArticle {
    pub title: String,
    pub thumbnail_url: String,
    pub tag_ids: Vec<String>,
}

/// Update fields of an existing article. `None` fields are untouched.
#[derive(Debug, Clone)]
pub struct UpdateArticle {
    pub id: String,
    pub title: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Create a new tag.
#[derive(Debug, Clone)]
pub struct CreateTag {
    pub name: String,
}

/// Identifiers generated by the command service for an accepted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReceipt {
    /// Id of the event appended to the write-side store.
    pub event_id: String,
    /// Id of the resource the command created or touched.
    pub resource_id: String,
}

// =============================================================================
// Port
// =============================================================================

/// Write-side command service.
#[async_trait]
pub trait CommandService: Send + Sync {
    /// Create an article.
    async fn create_article(&self, cmd: CreateArticle) -> CommandResult<CommandReceipt>;

    /// Update an article.
    async fn update_article(&self, cmd: UpdateArticle) -> CommandResult<CommandReceipt>;

    /// Create a tag.
    async fn create_tag(&self, cmd: CreateTag) -> CommandResult<CommandReceipt>;

    /// Attach tags to an article.
    async fn attach_tags(&self, article_id: &str, tag_ids: &[String])
        -> CommandResult<CommandReceipt>;

    /// Detach one tag from an article.
    async fn detach_tag(&self, article_id: &str, tag_id: &str) -> CommandResult<CommandReceipt>;
}
