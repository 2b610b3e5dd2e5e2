//! Post ordering

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::content::Post;

/// Sort order for post listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first; missing or unparseable dates last
    #[default]
    DateDesc,
    DateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::DateDesc,
        SortOrder::DateAsc,
        SortOrder::TitleAsc,
        SortOrder::TitleDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date_desc",
            SortOrder::DateAsc => "date_asc",
            SortOrder::TitleAsc => "title_asc",
            SortOrder::TitleDesc => "title_desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|order| order.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown sort order '{}', expected one of: date_desc, date_asc, title_asc, title_desc",
                    s
                )
            })
    }
}

/// Sort posts in place; the sort is stable
///
/// Works on owned posts as well as on borrowed query results.
pub fn sort_posts<P: Borrow<Post>>(posts: &mut [P], order: SortOrder) {
    match order {
        SortOrder::DateDesc => {
            posts.sort_by(|a, b| as_post(b).timestamp().cmp(&as_post(a).timestamp()))
        }
        SortOrder::DateAsc => {
            posts.sort_by(|a, b| as_post(a).timestamp().cmp(&as_post(b).timestamp()))
        }
        SortOrder::TitleAsc => posts.sort_by(|a, b| compare_titles(as_post(a), as_post(b))),
        SortOrder::TitleDesc => posts.sort_by(|a, b| compare_titles(as_post(b), as_post(a))),
    }
}

fn as_post<P: Borrow<Post>>(p: &P) -> &Post {
    p.borrow()
}

/// Case-insensitive title order, exact bytes as the tie-break
fn compare_titles(a: &Post, b: &Post) -> Ordering {
    a.title()
        .to_lowercase()
        .cmp(&b.title().to_lowercase())
        .then_with(|| a.title().cmp(b.title()))
}
