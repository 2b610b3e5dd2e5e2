//! Content module - handles posts, author profiles, and markdown rendering

mod author;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use author::{Author, Social};
pub use error::{ContentError, FrontMatterError};
pub use frontmatter::{AuthorRef, FrontMatter};
pub use loader::{ContentLoader, LoadReport};
pub use markdown::MarkdownRenderer;
pub use post::{Post, RenderedPost};
