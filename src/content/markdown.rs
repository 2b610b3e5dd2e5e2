//! Markdown rendering with syntax highlighting
//!
//! Rendering runs as a fixed pipeline over the pulldown-cmark event stream:
//! parse (CommonMark + GFM) → autolink bare URLs → keep raw HTML →
//! highlight fenced code → serialize.

use lazy_static::lazy_static;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
};
use regex::Regex;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{append_highlighted_html_for_styled_line, IncludeBackground};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;

lazy_static! {
    /// Bare URLs as recognised by GFM's extended autolinks
    static ref BARE_URL: Regex = Regex::new(r"(?:https?://|www\.)[^\s<>]+").unwrap();
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            highlight: true,
            line_numbers,
        }
    }

    /// Create from the site's highlight configuration
    pub fn from_config(config: &HighlightConfig) -> Self {
        let mut renderer = Self::with_options(&config.theme, config.line_number);
        renderer.highlight = config.enable;
        renderer
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        // Front-matter is stripped by FrontMatter::parse, so no metadata blocks here
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_GFM;
        let parser = TextMergeStream::new(Parser::new_ext(markdown, options));

        let events = self.highlight_code_blocks(autolink(parser));

        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    /// Replace every code block with pre-rendered HTML
    fn highlight_code_blocks<'a>(&self, events: Vec<Event<'a>>) -> Vec<Event<'a>> {
        let mut out = Vec::with_capacity(events.len());
        let mut code_block: Option<(Option<String>, String)> = None;

        for event in events {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, code)) = code_block.take() {
                        let rendered = self.highlight_code(&code, lang.as_deref());
                        out.push(Event::Html(CowStr::from(rendered)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, code)) = code_block.as_mut() {
                        code.push_str(&text);
                    }
                }
                other => out.push(other),
            }
        }

        out
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang_class = lang.unwrap_or("text");

        let theme = match self.theme() {
            Some(theme) if self.highlight => theme,
            _ => return plain_code_block(code, lang_class),
        };

        let syntax = lang
            .and_then(|l| {
                self.syntax_set
                    .find_syntax_by_token(l)
                    .or_else(|| self.syntax_set.find_syntax_by_extension(l))
            })
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut lines = Vec::new();
        for line in LinesWithEndings::from(code) {
            let highlighted = highlighter
                .highlight_line(line, &self.syntax_set)
                .and_then(|regions| {
                    let mut html = String::new();
                    append_highlighted_html_for_styled_line(
                        &regions[..],
                        IncludeBackground::No,
                        &mut html,
                    )?;
                    Ok(html)
                });
            match highlighted {
                Ok(html) => lines.push(html),
                Err(e) => {
                    tracing::debug!("Highlighting failed for {}: {}", lang_class, e);
                    return plain_code_block(code, lang_class);
                }
            }
        }

        let background = theme
            .settings
            .background
            .map(|c| format!(r#" style="background-color:#{:02x}{:02x}{:02x};""#, c.r, c.g, c.b))
            .unwrap_or_default();
        let lang_class = html_escape(lang_class);

        if self.line_numbers {
            add_line_numbers(&lines, &lang_class, &background)
        } else {
            format!(
                r#"<pre class="highlight"{}><code class="language-{}">{}</code></pre>"#,
                background,
                lang_class,
                lines.concat()
            )
        }
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn bare URLs in text into links, leaving links, code and raw HTML alone
fn autolink<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut link_depth = 0usize;
    let mut in_code_block = false;

    for event in events {
        match event {
            Event::Start(Tag::Link { .. }) | Event::Start(Tag::Image { .. }) => {
                link_depth += 1;
                out.push(event);
            }
            Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                link_depth = link_depth.saturating_sub(1);
                out.push(event);
            }
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                out.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                out.push(event);
            }
            Event::Text(text) if link_depth == 0 && !in_code_block => {
                push_linkified(&mut out, text);
            }
            other => out.push(other),
        }
    }

    out
}

fn push_linkified<'a>(out: &mut Vec<Event<'a>>, text: CowStr<'a>) {
    if !BARE_URL.is_match(&text) {
        out.push(Event::Text(text));
        return;
    }

    let mut last = 0;
    for m in BARE_URL.find_iter(&text) {
        let url = trim_url_tail(m.as_str());
        if url.is_empty() || url == "www." {
            continue;
        }
        let start = m.start();
        let end = start + url.len();

        if start > last {
            out.push(Event::Text(CowStr::from(text[last..start].to_string())));
        }
        let dest = if url.starts_with("www.") {
            format!("http://{}", url)
        } else {
            url.to_string()
        };
        out.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(dest),
            title: CowStr::from(""),
            id: CowStr::from(""),
        }));
        out.push(Event::Text(CowStr::from(url.to_string())));
        out.push(Event::End(TagEnd::Link));
        last = end;
    }

    if last < text.len() {
        out.push(Event::Text(CowStr::from(text[last..].to_string())));
    }
}

/// Drop trailing punctuation and unbalanced closing parens from a URL match
fn trim_url_tail(url: &str) -> &str {
    let mut url = url.trim_end_matches(['.', ',', ':', ';', '!', '?', '"', '\'', '*', '_', '~']);
    while url.ends_with(')') && url.matches(')').count() > url.matches('(').count() {
        url = &url[..url.len() - 1];
        url = url.trim_end_matches(['.', ',', ':', ';', '!', '?', '"', '\'']);
    }
    url
}

fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        html_escape(lang),
        html_escape(code)
    )
}

/// Lay highlighted lines out next to a line-number gutter
fn add_line_numbers(lines: &[String], lang: &str, background: &str) -> String {
    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    let code = lines
        .iter()
        .map(|l| l.trim_end_matches('\n'))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre{}>{}</pre></td></tr></table></figure>"#,
        lang, gutter, background, code
    )
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.");
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_gfm_table_and_strikethrough() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn test_render_task_list() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("- [x] done\n- [ ] todo\n");
        assert!(html.contains(r#"type="checkbox""#));
    }

    #[test]
    fn test_bare_urls_become_links() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("See https://hacktoberfest.com/participation. Or www.rust-lang.org");
        assert!(html.contains(
            r#"<a href="https://hacktoberfest.com/participation">https://hacktoberfest.com/participation</a>."#
        ));
        assert!(html.contains(r#"<a href="http://www.rust-lang.org">www.rust-lang.org</a>"#));
    }

    #[test]
    fn test_existing_links_and_code_untouched() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("[site](https://example.com) and `https://in.code`");
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains("<code>https://in.code</code>"));
    }

    #[test]
    fn test_url_in_parens() {
        assert_eq!(trim_url_tail("https://example.com)"), "https://example.com");
        assert_eq!(
            trim_url_tail("https://en.wikipedia.org/wiki/Rust_(language)"),
            "https://en.wikipedia.org/wiki/Rust_(language)"
        );
    }

    #[test]
    fn test_raw_html_preserved() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("<div class=\"note\">\n<b>hi</b>\n</div>\n\nText with <kbd>Ctrl</kbd>.");
        assert!(html.contains("<div class=\"note\">"));
        assert!(html.contains("<b>hi</b>"));
        assert!(html.contains("<kbd>Ctrl</kbd>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```");
        assert!(html.contains(r#"class="language-rust""#));
        assert!(html.contains("<span"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_code_block_html_is_escaped() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```\n<script>alert(1)</script>\n```");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_line_numbers() {
        let renderer = MarkdownRenderer::with_options("InspiredGitHub", true);
        let html = renderer.render("```python\na = 1\nb = 2\n```");
        assert!(html.contains(r#"<figure class="highlight python">"#));
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
        assert!(!html.contains(r#"<span class="line-number">3</span>"#));
    }

    #[test]
    fn test_highlight_disabled() {
        let config = HighlightConfig {
            enable: false,
            ..Default::default()
        };
        let renderer = MarkdownRenderer::from_config(&config);
        let html = renderer.render("```go\nx := 1\n```");
        assert_eq!(html, "<pre><code class=\"language-go\">x := 1\n</code></pre>");
    }

    #[test]
    fn test_render_is_idempotent() {
        let renderer = MarkdownRenderer::new();
        let markdown = "# Title\n\nVisit https://example.com\n\n```js\nconst a = 1;\n```\n\n<em>raw</em>\n";
        assert_eq!(renderer.render(markdown), renderer.render(markdown));
    }
}
