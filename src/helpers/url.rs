//! URL and slug helper functions

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters left alone by `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Turn a name into a URL-safe slug
///
/// # Examples
/// ```ignore
/// slugify("Jane Doe")       // -> "jane-doe"
/// slugify("  C++ & Rust! ") // -> "c-rust"
/// ```
pub fn slugify(input: &str) -> String {
    slug::slugify(input)
}

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/tags/rust/") // -> "/blog/tags/rust/"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Path of a single post page
pub fn post_url(config: &SiteConfig, slug: &str) -> String {
    url_for(config, &post_path(slug))
}

/// Absolute link to a post, for feeds and sharing
pub fn post_permalink(config: &SiteConfig, slug: &str) -> String {
    full_url_for(config, &post_path(slug))
}

fn post_path(slug: &str) -> String {
    format!("posts/{}/", encode_component(slug))
}

/// Path of a tag page; the tag is percent-encoded, not slugified
pub fn tag_url(config: &SiteConfig, tag: &str) -> String {
    url_for(config, &format!("tags/{}/", encode_component(tag)))
}

/// Path of an author page, keyed by the slugified author name
pub fn author_url(config: &SiteConfig, name: &str) -> String {
    url_for(config, &format!("authors/{}/", slugify(name)))
}

/// Percent-encode a single path segment
pub fn encode_component(segment: &str) -> String {
    utf8_percent_encode(segment, COMPONENT).to_string()
}

/// Decode a percent-encoded path segment, keeping the input on invalid UTF-8
pub fn decode_component(segment: &str) -> String {
    percent_decode_str(segment)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| segment.to_string())
}
