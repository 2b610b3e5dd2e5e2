//! Helper functions shared by the content, query and command layers
//!
//! Date parsing and formatting, slugs, and the URL layout of the
//! derived pages (posts, tags, authors).

mod date;
mod url;

pub use date::*;
pub use url::*;
