use std::fs;
use std::path::Path;

use inkpost::commands::check;
use inkpost::query::SortOrder;
use inkpost::Blog;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn post(title: &str, date: &str, tags: &str, author: &str) -> String {
    format!(
        "---\ntitle: {}\ndescription: About {}\ndate: {}\ntags: {}\nauthor:\n  name: {}\n---\n\nSee https://example.com for more.\n",
        title, title, date, tags, author
    )
}

fn site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let base = tmp.path();

    write(
        &base.join("_config.yml"),
        "title: Test Blog\nroot: /blog/\nposts_dir: posts\nauthors_dir: people\n",
    );
    write(
        &base.join("posts/go-basics.md"),
        &post("Go basics", "2025-01-01", "[go]", "Jane Doe"),
    );
    write(
        &base.join("posts/rust-and-go.md"),
        &post("Rust and Go", "2025-03-01", "[rust, go]", "Jane Doe"),
    );
    write(
        &base.join("posts/c-sharp.md"),
        &post("Hello C#", "2025-02-01", "[c#]", "Sachin Patel"),
    );
    write(
        &base.join("people/jdoe.json"),
        r#"{"name": "Jane Doe", "bio": "Writes about Go", "social": {"github": "jdoe", "twitter": "jd"}}"#,
    );
    write(
        &base.join("people/ghost.json"),
        r#"{"name": "Ghost Writer", "bio": "No posts"}"#,
    );

    tmp
}

fn slugs<'a>(posts: impl IntoIterator<Item = &'a inkpost::content::Post>) -> Vec<&'a str> {
    posts.into_iter().map(|p| p.slug.as_str()).collect()
}

#[test]
fn test_config_directories_are_used() {
    let tmp = site();
    let blog = Blog::new(tmp.path()).unwrap();
    assert_eq!(blog.config.title, "Test Blog");
    assert_eq!(blog.posts_dir, tmp.path().join("posts"));
    assert_eq!(blog.authors_dir, tmp.path().join("people"));
}

#[test]
fn test_index() {
    let tmp = site();
    let blog = Blog::new(tmp.path()).unwrap();

    let index = blog.index(SortOrder::DateDesc);
    assert_eq!(slugs(&index.posts), vec!["rust-and-go", "c-sharp", "go-basics"]);
    assert_eq!(index.tags, vec!["c#", "go", "rust"]);
    assert_eq!(index.authors, vec!["Jane Doe", "Sachin Patel"]);

    let by_title = blog.index(SortOrder::TitleAsc);
    assert_eq!(slugs(&by_title.posts), vec!["go-basics", "c-sharp", "rust-and-go"]);
}

#[test]
fn test_post_page() {
    let tmp = site();
    let blog = Blog::new(tmp.path()).unwrap();

    let page = blog.post("c-sharp").unwrap().unwrap();
    assert_eq!(page.post.post.slug, "c-sharp");
    assert_eq!(page.url, "/blog/posts/c-sharp/");
    assert_eq!(page.permalink, "http://example.com/blog/posts/c-sharp/");
    assert!(page
        .post
        .html
        .contains(r#"<a href="https://example.com">https://example.com</a>"#));
    assert_eq!(page.author_url.as_deref(), Some("/blog/authors/sachin-patel/"));
    assert_eq!(
        page.tag_urls,
        vec![("c#".to_string(), "/blog/tags/c%23/".to_string())]
    );

    assert!(blog.post("missing").unwrap().is_none());
}

#[test]
fn test_tag_page_accepts_encoded_tags() {
    let tmp = site();
    let blog = Blog::new(tmp.path()).unwrap();

    let page = blog.tag("c%23");
    assert_eq!(page.tag, "c#");
    assert_eq!(slugs(&page.posts), vec!["c-sharp"]);

    let go = blog.tag("Go");
    assert_eq!(slugs(&go.posts), vec!["rust-and-go", "go-basics"]);

    assert!(blog.tag("nonexistent").posts.is_empty());
}

#[test]
fn test_author_page() {
    let tmp = site();
    let blog = Blog::new(tmp.path()).unwrap();

    // File slug and slugified name both resolve
    for slug in ["jdoe", "jane-doe"] {
        let page = blog.author(slug).unwrap().unwrap();
        assert_eq!(page.author.name, "Jane Doe");
        assert_eq!(slugs(&page.posts), vec!["rust-and-go", "go-basics"]);
        assert_eq!(page.social_links.len(), 2);
    }

    let ghost = blog.author("ghost").unwrap().unwrap();
    assert!(ghost.posts.is_empty());

    assert!(blog.author("nobody").unwrap().is_none());
}

#[test]
fn test_search_page() {
    let tmp = site();
    let blog = Blog::new(tmp.path()).unwrap();

    let page = blog.search("rust");
    assert_eq!(slugs(&page.results), vec!["rust-and-go"]);
    assert_eq!(page.summary(), "Showing 1 result for \"rust\".");

    assert!(blog.search("").results.is_empty());

    // Matches the "Ghost Writer" profile, so everything comes back
    assert_eq!(blog.search("ghost").results.len(), 3);
}

#[test]
fn test_search_without_profile_widening() {
    let tmp = site();
    let mut config = inkpost::config::SiteConfig::load(tmp.path().join("_config.yml")).unwrap();
    config.search.match_author_profiles = false;
    let blog = Blog::with_config(tmp.path(), config);

    assert!(blog.search("ghost").results.is_empty());
}

#[test]
fn test_missing_content_directories_are_empty() {
    let tmp = TempDir::new().unwrap();
    let blog = Blog::new(tmp.path()).unwrap();

    assert!(blog.index(SortOrder::DateDesc).posts.is_empty());
    assert!(blog.tags().is_empty());
    assert!(blog.authors().is_empty());
    assert!(blog.search("anything").results.is_empty());
    assert!(blog.post("anything").unwrap().is_none());
}

#[test]
fn test_check_reports_problems() {
    let tmp = site();
    let blog = Blog::new(tmp.path()).unwrap();

    let clean = check::check(&blog);
    assert_eq!(clean.posts, 3);
    assert_eq!(clean.authors, 2);
    assert!(clean.problems.is_empty());

    write(&tmp.path().join("posts/bad-date.md"), "---\ntitle: Later\ndate: next week\n---\n");
    write(&tmp.path().join("people/broken.json"), "[1, 2");

    let summary = check::check(&blog);
    assert_eq!(summary.posts, 4);
    assert_eq!(summary.problems.len(), 2);
    assert!(check::run(&blog).is_err());
}
