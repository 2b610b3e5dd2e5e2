//! Render a single post

use anyhow::Result;

use crate::Blog;

/// Print a post's rendered HTML, or the whole page as JSON
pub fn run(blog: &Blog, slug: &str, json: bool) -> Result<()> {
    let Some(page) = blog.post(slug)? else {
        anyhow::bail!("Post not found: {}", slug);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        println!("{}", page.post.html);
    }

    Ok(())
}
