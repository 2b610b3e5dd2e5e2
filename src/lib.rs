//! inkpost: markdown blog content with search, tag and author filtering
//!
//! Posts are markdown files with a front-matter block and authors are JSON
//! profiles. This crate loads both into memory, renders post bodies to HTML
//! with syntax highlighting, and answers the queries a blog front end needs.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod pages;
pub mod query;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use content::{Author, ContentLoader, MarkdownRenderer, Post};
use pages::{AuthorPage, IndexPage, PostPage, SearchPage, TagPage};
use query::SortOrder;

/// The main blog application
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory of markdown posts
    pub posts_dir: PathBuf,
    /// Directory of JSON author profiles
    pub authors_dir: PathBuf,
    loader: ContentLoader,
}

impl Blog {
    /// Create a new Blog instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a Blog with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let authors_dir = base_dir.join(&config.authors_dir);
        let renderer = MarkdownRenderer::from_config(&config.highlight);
        let loader = ContentLoader::new(&posts_dir, &authors_dir, renderer);

        Self {
            config,
            base_dir,
            posts_dir,
            authors_dir,
            loader,
        }
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Every post in the given order, with the tag and author lists
    pub fn index(&self, sort: SortOrder) -> IndexPage {
        let mut posts = self.loader.get_all_posts();
        query::sort_posts(&mut posts, sort);

        IndexPage {
            tags: query::all_tags(&posts),
            authors: query::all_author_names(&posts),
            posts,
        }
    }

    /// A single post, rendered; `None` when no such post exists
    pub fn post(&self, slug: &str) -> Result<Option<PostPage>> {
        let Some(post) = self
            .loader
            .get_post_by_slug(slug)
            .with_context(|| format!("Failed to load post {}", slug))?
        else {
            return Ok(None);
        };

        let author_url = Some(post.author_name())
            .filter(|n| !n.trim().is_empty())
            .map(|n| helpers::author_url(&self.config, n));
        let tag_urls = post
            .tags()
            .iter()
            .map(|t| (t.clone(), helpers::tag_url(&self.config, t)))
            .collect();

        Ok(Some(PostPage {
            url: helpers::post_url(&self.config, &post.slug),
            permalink: helpers::post_permalink(&self.config, &post.slug),
            post: self.loader.render_post(&post),
            author_url,
            tag_urls,
        }))
    }

    /// Posts carrying `tag`, newest first; the tag may be percent-encoded
    pub fn tag(&self, tag: &str) -> TagPage {
        let tag = helpers::decode_component(tag);
        let posts = self.loader.get_all_posts();
        let posts = query::posts_by_tag(&posts, &tag)
            .into_iter()
            .cloned()
            .collect();

        TagPage { tag, posts }
    }

    /// An author page; `None` when no profile matches `slug`
    pub fn author(&self, slug: &str) -> Result<Option<AuthorPage>> {
        let Some(author) = self
            .loader
            .get_author_by_slug(slug)
            .with_context(|| format!("Failed to load author {}", slug))?
        else {
            return Ok(None);
        };

        let all = self.loader.get_all_posts();
        let mut posts: Vec<Post> = query::posts_by_author(&all, &author.name)
            .into_iter()
            .cloned()
            .collect();
        // Posts may also name the author by the requested slug
        for post in query::posts_by_author(&all, slug) {
            if !posts.iter().any(|p| p.slug == post.slug) {
                posts.push(post.clone());
            }
        }
        query::sort_posts(&mut posts, SortOrder::DateDesc);

        let social_links = author
            .social_links()
            .into_iter()
            .map(|(label, url)| (label.to_string(), url))
            .collect();

        Ok(Some(AuthorPage {
            author,
            social_links,
            posts,
        }))
    }

    /// Free-text search, newest first
    pub fn search(&self, query_text: &str) -> SearchPage {
        let posts = self.loader.get_all_posts();
        let authors = if self.config.search.match_author_profiles {
            self.loader.list_authors()
        } else {
            Vec::new()
        };

        let results = query::search_posts(&posts, &authors, query_text)
            .into_iter()
            .cloned()
            .collect();

        SearchPage {
            query: query_text.trim().to_string(),
            results,
        }
    }

    /// All author profiles
    pub fn authors(&self) -> Vec<Author> {
        self.loader.list_authors()
    }

    /// All distinct tags, sorted
    pub fn tags(&self) -> Vec<String> {
        query::all_tags(&self.loader.get_all_posts())
    }
}
