//! JSON fixture format for seeding the in-memory catalog.
//!
//! A fixture declares tags and articles; articles reference tags by id.
//! Declaration order is display order, so forward pages read top-down
//! through the file.
//!
//! ```json
//! {
//!   "tags": [
//!     { "id": "tag-1", "name": "rust" }
//!   ],
//!   "articles": [
//!     {
//!       "id": "article-1",
//!       "title": "Hello",
//!       "thumbnail_url": "https://cdn.example.com/1.png",
//!       "created_at": "2024-03-01T09:00:00Z",
//!       "updated_at": "2024-03-01T09:00:00Z",
//!       "tag_ids": ["tag-1"]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a fixture file.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// The fixture file could not be read.
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    /// The fixture file is not valid JSON for the expected shape.
    #[error("failed to parse fixture: {0}")]
    Parse(#[from] serde_json::Error),

    /// An article references a tag the fixture never declares.
    #[error("article {article_id} references unknown tag {tag_id}")]
    UnknownTag {
        article_id: String,
        tag_id: String,
    },
}

/// One article entry in a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureArticle {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub tag_ids: Vec<String>,
}

/// One tag entry in a fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureTag {
    pub id: String,
    pub name: String,
}

/// A complete fixture: the catalog's seed data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub tags: Vec<FixtureTag>,
    #[serde(default)]
    pub articles: Vec<FixtureArticle>,
}

impl Fixture {
    /// Load and validate a fixture from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path)?;
        let fixture: Self = serde_json::from_str(&raw)?;
        fixture.validate()?;
        Ok(fixture)
    }

    /// Check that every article tag reference is declared.
    pub fn validate(&self) -> Result<(), FixtureError> {
        for article in &self.articles {
            for tag_id in &article.tag_ids {
                if !self.tags.iter().any(|t| &t.id == tag_id) {
                    return Err(FixtureError::UnknownTag {
                        article_id: article.id.clone(),
                        tag_id: tag_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_fixture() {
        let fixture: Fixture = serde_json::from_str(
            r#"{
                "tags": [{ "id": "tag-1", "name": "rust" }],
                "articles": [{
                    "id": "article-1",
                    "title": "Hello",
                    "thumbnail_url": "https://cdn.example.com/1.png",
                    "created_at": "2024-03-01T09:00:00Z",
                    "updated_at": "2024-03-01T09:00:00Z",
                    "tag_ids": ["tag-1"]
                }]
            }"#,
        )
        .unwrap();
        fixture.validate().unwrap();

        assert_eq!(fixture.articles.len(), 1);
        assert_eq!(fixture.tags.len(), 1);
    }

    #[test]
    fn empty_object_is_a_valid_empty_fixture() {
        let fixture: Fixture = serde_json::from_str("{}").unwrap();
        fixture.validate().unwrap();
        assert!(fixture.articles.is_empty());
        assert!(fixture.tags.is_empty());
    }

    #[test]
    fn dangling_tag_reference_is_rejected() {
        let fixture: Fixture = serde_json::from_str(
            r#"{
                "articles": [{
                    "id": "article-1",
                    "title": "Hello",
                    "thumbnail_url": "u",
                    "created_at": "2024-03-01T09:00:00Z",
                    "updated_at": "2024-03-01T09:00:00Z",
                    "tag_ids": ["tag-missing"]
                }]
            }"#,
        )
        .unwrap();

        let err = fixture.validate().unwrap_err();
        assert!(matches!(err, FixtureError::UnknownTag { .. }));
        assert!(err.to_string().contains("tag-missing"));
    }
}
