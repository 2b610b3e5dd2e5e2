//! List site content

use anyhow::Result;

use crate::content::Post;
use crate::helpers;
use crate::query::{self, BrowseFilter};
use crate::Blog;

/// List site content by type
pub fn run(blog: &Blog, content_type: &str, filter: &BrowseFilter) -> Result<()> {
    match content_type {
        "post" | "posts" => {
            let posts = blog.loader().get_all_posts();
            let listed = query::browse(&posts, filter);
            if filter.is_empty() {
                println!("Posts ({}):", listed.len());
            } else {
                println!("Posts ({} of {}):", listed.len(), posts.len());
            }
            for post in listed {
                print_post_line(blog, post);
            }
        }
        "tag" | "tags" => {
            let posts = blog.loader().get_all_posts();
            let tags = query::tag_counts(&posts);
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "author" | "authors" => {
            let authors = blog.authors();
            println!("Authors ({}):", authors.len());
            for author in authors {
                println!(
                    "  {} [{}] {}",
                    author.name,
                    author.slug,
                    helpers::author_url(&blog.config, &author.name)
                );
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, author",
                content_type
            );
        }
    }

    Ok(())
}

/// List the posts carrying a tag
pub fn run_tag(blog: &Blog, tag: &str) -> Result<()> {
    let page = blog.tag(tag);
    println!("Tag: {} ({} posts)", page.tag, page.posts.len());
    if page.posts.is_empty() {
        println!("  No posts yet.");
    }
    for post in &page.posts {
        print_post_line(blog, post);
    }
    Ok(())
}

/// Show an author profile and their posts
pub fn run_author(blog: &Blog, slug: &str) -> Result<()> {
    let Some(page) = blog.author(slug)? else {
        anyhow::bail!("Author not found: {}", slug);
    };

    println!("{}", page.author.name);
    if !page.author.bio.is_empty() {
        println!("{}", page.author.bio);
    }
    if let Some(avatar) = &page.author.avatar {
        println!("Avatar: {}", avatar);
    }
    for (label, url) in &page.social_links {
        println!("{}: {}", label, url);
    }

    println!();
    println!("Posts by {} ({}):", page.author.name, page.posts.len());
    if page.posts.is_empty() {
        println!("  No posts yet.");
    }
    for post in &page.posts {
        print_post_line(blog, post);
    }
    Ok(())
}

/// One line per post: date, title, slug
pub(crate) fn print_post_line(blog: &Blog, post: &Post) {
    let date = post
        .date()
        .map(|d| helpers::format_date(&d, &blog.config.date_format))
        .unwrap_or_else(|| "undated".to_string());
    let title = if post.title().is_empty() {
        "(untitled)"
    } else {
        post.title()
    };

    if post.tags().is_empty() {
        println!("  {} - {} [{}]", date, title, post.slug);
    } else {
        println!(
            "  {} - {} [{}] #{}",
            date,
            title,
            post.slug,
            post.tags().join(" #")
        );
    }
}
