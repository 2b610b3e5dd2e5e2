//! View models for the derived pages
//!
//! Each page is plain data assembled by [`Blog`](crate::Blog) from the
//! loader and the query layer. Rendering them into markup is left to the
//! caller.

use serde::Serialize;

use crate::content::{Author, Post, RenderedPost};

/// The blog index: every post plus the tag list for the filter bar
#[derive(Debug, Clone, Serialize)]
pub struct IndexPage {
    pub posts: Vec<Post>,
    pub tags: Vec<String>,
    pub authors: Vec<String>,
}

/// A single post with its rendered body
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub post: RenderedPost,
    /// Site-relative path of this page
    pub url: String,
    /// Absolute link built from the site url
    pub permalink: String,
    /// Link to the author page, when the post names an author
    pub author_url: Option<String>,
    /// (tag, url) pairs
    pub tag_urls: Vec<(String, String)>,
}

/// Posts carrying one tag, newest first
#[derive(Debug, Clone, Serialize)]
pub struct TagPage {
    pub tag: String,
    pub posts: Vec<Post>,
}

/// An author profile and the posts written by them
#[derive(Debug, Clone, Serialize)]
pub struct AuthorPage {
    pub author: Author,
    /// (label, url) pairs of external profiles
    pub social_links: Vec<(String, String)>,
    pub posts: Vec<Post>,
}

/// Free-text search results
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub query: String,
    pub results: Vec<Post>,
}

impl SearchPage {
    /// "Showing 1 result" / "Showing 3 results"
    pub fn summary(&self) -> String {
        let n = self.results.len();
        format!(
            "Showing {} result{} for \"{}\".",
            n,
            if n == 1 { "" } else { "s" },
            self.query
        )
    }
}
