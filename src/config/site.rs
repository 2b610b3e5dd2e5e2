//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub posts_dir: String,
    pub authors_dir: String,

    // Writing
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Query
    #[serde(default)]
    pub search: SearchConfig,

    // Date format (Moment.js style)
    pub date_format: String,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Community Blog".to_string(),
            description: String::new(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            posts_dir: "content/posts".to_string(),
            authors_dir: "content/authors".to_string(),

            highlight: HighlightConfig::default(),
            search: SearchConfig::default(),

            date_format: "YYYY-MM-DD".to_string(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    /// Name of a bundled syntect theme
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Free-text search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// A query that matches any author profile's name matches every post
    pub match_author_profiles: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_author_profiles: true,
        }
    }
}
