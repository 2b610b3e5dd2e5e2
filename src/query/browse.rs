//! Combined listing filter for the blog index

use super::{matches_query, sort_posts, SortOrder};
use crate::content::Post;

/// Query, tag, author and sort order applied together
///
/// Unlike [`search_posts`](super::search_posts), the query only looks at
/// the post's own fields, and the author must match the name exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseFilter {
    pub query: Option<String>,
    pub tag: Option<String>,
    pub author: Option<String>,
    pub sort: SortOrder,
}

impl BrowseFilter {
    pub fn is_empty(&self) -> bool {
        self.query.as_deref().map_or(true, |q| q.trim().is_empty())
            && self.tag.is_none()
            && self.author.is_none()
    }
}

/// Filter and sort `posts`; absent criteria match everything
pub fn browse<'a>(posts: &'a [Post], filter: &BrowseFilter) -> Vec<&'a Post> {
    let query = filter
        .query
        .as_deref()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty());

    let mut list: Vec<&Post> = posts
        .iter()
        .filter(|p| query.as_deref().map_or(true, |q| matches_query(p, q)))
        .filter(|p| filter.tag.as_deref().map_or(true, |t| p.has_tag(t)))
        .filter(|p| filter.author.as_deref().map_or(true, |a| p.author_name() == a))
        .collect();

    sort_posts(&mut list, filter.sort);
    list
}
