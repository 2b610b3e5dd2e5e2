//! Query layer - pure filters over fully loaded posts and authors
//!
//! Every function here is a linear scan over the slices it is given; there
//! is no index and no hidden state, so callers decide where the content
//! comes from.

mod browse;
mod sort;

use std::collections::{BTreeSet, HashMap};

use crate::content::{Author, Post};
use crate::helpers::slugify;

pub use browse::{browse, BrowseFilter};
pub use sort::{sort_posts, SortOrder};

/// Posts carrying `tag`, compared case-insensitively
pub fn posts_by_tag<'a>(posts: &'a [Post], tag: &str) -> Vec<&'a Post> {
    posts.iter().filter(|p| p.has_tag(tag)).collect()
}

/// Posts whose author is `name_or_slug`
///
/// Matches the author name ignoring case, the name with whitespace runs
/// replaced by `-`, or the slugified name.
pub fn posts_by_author<'a>(posts: &'a [Post], name_or_slug: &str) -> Vec<&'a Post> {
    let target = name_or_slug.trim().to_lowercase();
    if target.is_empty() {
        return Vec::new();
    }

    posts
        .iter()
        .filter(|p| {
            let name = p.author_name().trim().to_lowercase();
            !name.is_empty()
                && (name == target
                    || name.split_whitespace().collect::<Vec<_>>().join("-") == target
                    || slugify(&name) == target)
        })
        .collect()
}

/// Free-text search over title, description, tags and author name
///
/// An empty (or whitespace-only) query finds nothing. When the query is a
/// substring of any profile in `authors`, every post matches; pass an empty
/// slice to search post fields only.
pub fn search_posts<'a>(posts: &'a [Post], authors: &[Author], query: &str) -> Vec<&'a Post> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    let author_match = authors.iter().any(|a| a.name.to_lowercase().contains(&q));
    if author_match {
        return posts.iter().collect();
    }

    posts.iter().filter(|p| matches_query(p, &q)).collect()
}

/// Whether the lowercased query is a substring of the post's searchable text
pub(crate) fn matches_query(post: &Post, lowercase_query: &str) -> bool {
    haystack(post).contains(lowercase_query)
}

fn haystack(post: &Post) -> String {
    std::iter::once(post.title())
        .chain(std::iter::once(post.description()))
        .chain(post.tags().iter().map(String::as_str))
        .chain(std::iter::once(post.author_name()))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}

/// Distinct tags across `posts`, sorted lexicographically
pub fn all_tags(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .flat_map(|p| p.tags().iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Tags with the number of posts carrying them, most used first
pub fn tag_counts(posts: &[Post]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in post.tags() {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Distinct non-empty author names referenced by `posts`, sorted
pub fn all_author_names(posts: &[Post]) -> Vec<String> {
    posts
        .iter()
        .map(|p| p.author_name().trim())
        .filter(|n| !n.is_empty())
        .map(String::from)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
