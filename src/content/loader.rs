//! Content loader - loads posts and author profiles from their directories

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Author, ContentError, FrontMatter, MarkdownRenderer, Post, RenderedPost};
use crate::helpers::slugify;

/// Post file extensions, in lookup order
const POST_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Items loaded from a directory plus the files that had to be skipped
#[derive(Debug)]
pub struct LoadReport<T> {
    pub items: Vec<T>,
    pub skipped: Vec<ContentError>,
}

/// Loads content from the posts and authors directories
pub struct ContentLoader {
    posts_dir: PathBuf,
    authors_dir: PathBuf,
    renderer: MarkdownRenderer,
}

impl ContentLoader {
    /// Create a new content loader
    pub fn new(
        posts_dir: impl Into<PathBuf>,
        authors_dir: impl Into<PathBuf>,
        renderer: MarkdownRenderer,
    ) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            authors_dir: authors_dir.into(),
            renderer,
        }
    }

    /// Slugs of every post file, sorted; a missing directory has none
    pub fn list_post_slugs(&self) -> Vec<String> {
        let mut slugs: Vec<String> = list_files(&self.posts_dir, &POST_EXTENSIONS)
            .into_iter()
            .map(|(slug, _)| slug)
            .collect();
        // `a.md` and `a.mdx` resolve to the same post
        slugs.dedup();
        slugs
    }

    /// Load a single post; `Ok(None)` when no file exists for `slug`
    pub fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        if !is_safe_slug(slug) {
            return Ok(None);
        }

        for ext in POST_EXTENSIONS {
            let path = self.posts_dir.join(format!("{}.{}", slug, ext));
            match fs::read_to_string(&path) {
                Ok(content) => return parse_post(slug, &content, path).map(Some),
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => return Err(ContentError::Io { path, source }),
            }
        }

        Ok(None)
    }

    /// Load every post, newest first; unreadable files are skipped and logged
    pub fn get_all_posts(&self) -> Vec<Post> {
        self.load_posts_report().items
    }

    /// Load every post, newest first, reporting the files that were skipped
    pub fn load_posts_report(&self) -> LoadReport<Post> {
        let mut posts = Vec::new();
        let mut skipped = Vec::new();

        for slug in self.list_post_slugs() {
            match self.get_post_by_slug(&slug) {
                Ok(Some(post)) => posts.push(post),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Skipping post {}: {}", slug, e);
                    skipped.push(e);
                }
            }
        }

        // Stable sort keeps slug order between equal dates
        posts.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        tracing::debug!("Loaded {} posts from {:?}", posts.len(), self.posts_dir);

        LoadReport {
            items: posts,
            skipped,
        }
    }

    /// Load every author profile, sorted by slug
    pub fn list_authors(&self) -> Vec<Author> {
        self.load_authors_report().items
    }

    /// Load every author profile, reporting the files that were skipped
    pub fn load_authors_report(&self) -> LoadReport<Author> {
        let mut authors = Vec::new();
        let mut skipped = Vec::new();

        for (slug, path) in list_files(&self.authors_dir, &["json"]) {
            match load_author(slug, path) {
                Ok(author) => authors.push(author),
                Err(e) => {
                    tracing::warn!("Skipping author: {}", e);
                    skipped.push(e);
                }
            }
        }

        tracing::debug!(
            "Loaded {} authors from {:?}",
            authors.len(),
            self.authors_dir
        );

        LoadReport {
            items: authors,
            skipped,
        }
    }

    /// Look up an author by file slug, falling back to the slugified name
    pub fn get_author_by_slug(&self, slug: &str) -> Result<Option<Author>, ContentError> {
        if is_safe_slug(slug) {
            let path = self.authors_dir.join(format!("{}.json", slug));
            if path.is_file() {
                return load_author(slug.to_string(), path).map(Some);
            }
        }

        let target = slug.to_lowercase();
        Ok(self
            .list_authors()
            .into_iter()
            .find(|a| a.slug.to_lowercase() == target || slugify(&a.name) == target))
    }

    /// Render a post's markdown body; nothing is cached
    pub fn render_post(&self, post: &Post) -> RenderedPost {
        RenderedPost {
            html: self.renderer.render(&post.raw),
            post: post.clone(),
        }
    }
}

fn parse_post(slug: &str, content: &str, path: PathBuf) -> Result<Post, ContentError> {
    match FrontMatter::parse(content) {
        Ok((fm, body)) => Ok(Post::new(slug.to_string(), body.to_string(), fm, path)),
        Err(source) => Err(ContentError::FrontMatter { path, source }),
    }
}

fn load_author(slug: String, path: PathBuf) -> Result<Author, ContentError> {
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(source) => return Err(ContentError::Io { path, source }),
    };
    match serde_json::from_str::<Author>(&raw) {
        Ok(author) => Ok(author.finish(slug)),
        Err(source) => Err(ContentError::Author { path, source }),
    }
}

/// (stem, path) of the files directly inside `dir` with one of `extensions`,
/// sorted by stem
fn list_files(dir: &Path, extensions: &[&str]) -> Vec<(String, PathBuf)> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let mut files: Vec<(String, PathBuf)> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let path = e.into_path();
            let ext = path.extension()?.to_str()?;
            if !extensions.contains(&ext) {
                return None;
            }
            let stem = path.file_stem()?.to_str()?.to_string();
            Some((stem, path))
        })
        .collect();

    files.sort();
    files
}

/// Slugs name a file directly inside a content directory
fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\'])
        && !slug.contains('\0')
}
