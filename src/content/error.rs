//! Content loading errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing a front-matter block
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON front-matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unterminated JSON front-matter")]
    Unterminated,
}

/// Errors raised while loading posts and author profiles
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("invalid author profile {path:?}: {source}")]
    Author {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ContentError {
    /// The file the error refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. } | Self::FrontMatter { path, .. } | Self::Author { path, .. } => {
                path
            }
        }
    }
}
