//! Free-text search

use anyhow::Result;

use super::list::print_post_line;
use crate::Blog;

/// Search posts by title, description, tags, or author
pub fn run(blog: &Blog, query: &str) -> Result<()> {
    let page = blog.search(query);

    if page.query.is_empty() {
        println!("Type a query to search by title, description, tags, or author.");
        return Ok(());
    }

    println!("{}", page.summary());
    if page.results.is_empty() {
        println!("  No results found.");
    }
    for post in &page.results {
        print_post_line(blog, post);
    }

    Ok(())
}
