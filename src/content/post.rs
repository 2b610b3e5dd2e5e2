//! Post model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::FrontMatter;
use crate::helpers;

/// A blog post loaded from `<slug>.md` or `<slug>.mdx`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// File stem of the source file
    pub slug: String,

    /// Raw markdown body, without the front-matter block
    pub raw: String,

    /// Parsed front-matter
    pub front_matter: FrontMatter,

    /// Full source file path
    pub source: PathBuf,
}

impl Post {
    /// Create a post, collapsing repeated tags
    pub fn new(slug: String, raw: String, mut front_matter: FrontMatter, source: PathBuf) -> Self {
        let mut seen = std::collections::HashSet::new();
        front_matter.tags.retain(|t| seen.insert(t.clone()));

        Self {
            slug,
            raw,
            front_matter,
            source,
        }
    }

    pub fn title(&self) -> &str {
        &self.front_matter.title
    }

    pub fn description(&self) -> &str {
        &self.front_matter.description
    }

    pub fn tags(&self) -> &[String] {
        &self.front_matter.tags
    }

    pub fn author_name(&self) -> &str {
        &self.front_matter.author.name
    }

    /// Parsed publication date, if present and readable
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.front_matter.date.as_deref().and_then(helpers::parse_date)
    }

    /// Sort key: epoch milliseconds, 0 for missing or unparseable dates
    pub fn timestamp(&self) -> i64 {
        helpers::timestamp(self.front_matter.date.as_deref())
    }

    /// Whether the post carries `tag`, ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags().iter().any(|t| t.to_lowercase() == tag)
    }
}

/// A post together with its rendered HTML body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPost {
    #[serde(flatten)]
    pub post: Post,

    pub html: String,
}
