//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use super::error::FrontMatterError;
use super::Social;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<Scalar>()? {
                vec.push(item.0);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// A scalar read as text, so `title: 2024` or `tags: [1, go]` still load
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(|s| s.0)
        .unwrap_or_default())
}

fn optional_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|s| s.0))
}

/// Author reference from a post's front-matter
///
/// Accepts `author: Jane Doe` as well as `author: { name: Jane Doe, link: ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorRef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl<'de> Deserialize<'de> for AuthorRef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Name(String),
            Full {
                #[serde(default)]
                name: String,
                #[serde(default)]
                link: Option<String>,
            },
        }

        Ok(match Option::<Repr>::deserialize(deserializer)? {
            Some(Repr::Name(name)) => AuthorRef { name, link: None },
            Some(Repr::Full { name, link }) => AuthorRef { name, link },
            None => AuthorRef::default(),
        })
    }
}

/// Front-matter data from a post
///
/// Every field is optional; absent text fields are empty, absent lists are
/// empty and absent optional fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "scalar_string")]
    pub title: String,
    #[serde(deserialize_with = "scalar_string")]
    pub description: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    pub author: AuthorRef,
    pub social: Option<Social>,
    /// Kept verbatim; parsed on demand by the query layer
    #[serde(deserialize_with = "optional_scalar")]
    pub date: Option<String>,
    pub cover: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let trimmed = content.trim_start();

        if trimmed.starts_with("---") {
            return Self::parse_yaml(trimmed);
        }

        if trimmed.starts_with(";;;") {
            return Self::parse_json(trimmed);
        }

        // A leading `{` is only front-matter when it is a complete JSON object;
        // MDX expressions and prose stay in the body
        if trimmed.starts_with('{') {
            if let Some(parsed) = Self::parse_bare_json(trimmed) {
                return Ok(parsed);
            }
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = find_closing_fence(rest) else {
            // No closing ---, treat as no front-matter
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos..];
        let remaining = remaining
            .trim_start_matches(['\n', '\r'])
            .trim_start_matches("---")
            .trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // A leading thematic break followed by prose is not front-matter
        if !has_yaml_structure(yaml_content) {
            return Ok((FrontMatter::default(), content));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        // JSON front-matter ends with ;;;
        let rest = content.strip_prefix(";;;").unwrap_or(content);
        let end_pos = rest.find(";;;").ok_or(FrontMatterError::Unterminated)?;
        let json_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 3..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        let fm: FrontMatter = serde_json::from_str(json_content)?;
        Ok((fm, remaining))
    }

    fn parse_bare_json(content: &str) -> Option<(Self, &str)> {
        // Find matching closing brace, ignoring braces inside strings
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        let mut end_pos = None;
        for (i, c) in content.char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => in_string = true,
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        end_pos = Some(i + 1);
                        break;
                    }
                }
                _ => {}
            }
        }

        let end_pos = end_pos?;
        let fm: FrontMatter = serde_json::from_str(&content[..end_pos]).ok()?;
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);
        Some((fm, remaining))
    }
}

/// Byte offset of the `\n---` line closing a YAML block, relative to `rest`
fn find_closing_fence(rest: &str) -> Option<usize> {
    // An immediately closed block (`---\n---`) has no leading newline
    if rest.starts_with("---") {
        return Some(0);
    }
    rest.find("\n---").map(|pos| pos + 1)
}

/// Valid YAML front-matter has at least one `key: value` line
fn has_yaml_structure(yaml: &str) -> bool {
    yaml.lines().any(|line| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return false;
        }
        let Some(colon_pos) = trimmed.find(':') else {
            return false;
        };
        let key = &trimmed[..colon_pos];
        let is_valid_key = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            && !matches!(key, "http" | "https" | "ftp");
        let after_colon = &trimmed[colon_pos + 1..];
        is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello Hacktoberfest
description: First steps
date: 2025-10-01
tags:
  - open-source
  - git
author:
  name: Jane Doe
  link: https://github.com/janedoe
cover: https://example.com/cover.png
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Hello Hacktoberfest");
        assert_eq!(fm.description, "First steps");
        assert_eq!(fm.date.as_deref(), Some("2025-10-01"));
        assert_eq!(fm.tags, vec!["open-source", "git"]);
        assert_eq!(fm.author.name, "Jane Doe");
        assert_eq!(
            fm.author.link.as_deref(),
            Some("https://github.com/janedoe")
        );
        assert_eq!(fm.cover.as_deref(), Some("https://example.com/cover.png"));
        assert!(remaining.starts_with("This is the content."));
    }

    #[test]
    fn test_missing_fields_default() {
        let (fm, remaining) = FrontMatter::parse("---\ntitle: Only a title\n---\nBody").unwrap();
        assert_eq!(fm.title, "Only a title");
        assert_eq!(fm.description, "");
        assert!(fm.tags.is_empty());
        assert_eq!(fm.author, AuthorRef::default());
        assert_eq!(fm.date, None);
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_author_as_plain_string() {
        let (fm, _) = FrontMatter::parse("---\nauthor: Sachin Patel\n---\n").unwrap();
        assert_eq!(fm.author.name, "Sachin Patel");
        assert_eq!(fm.author.link, None);
    }

    #[test]
    fn test_numeric_scalars_read_as_text() {
        let (fm, _) = FrontMatter::parse("---\ntitle: 2024\ntags: [1, go]\n---\n").unwrap();
        assert_eq!(fm.title, "2024");
        assert_eq!(fm.tags, vec!["1", "go"]);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test {Post}", "tags": ["a", "b"]}

This is content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "Test {Post}");
        assert_eq!(fm.tags, vec!["a", "b"]);
        assert!(remaining.starts_with("This is content."));
    }

    #[test]
    fn test_leading_brace_that_is_not_json_stays_in_body() {
        for content in ["{/* draft note */}\n\n# Hello\n", "{a, b} is a set.\n", "{ unclosed\n"] {
            let (fm, remaining) = FrontMatter::parse(content).unwrap();
            assert_eq!(fm, FrontMatter::default());
            assert_eq!(remaining, content);
        }
    }

    #[test]
    fn test_parse_single_string_tags() {
        let content = "---\ntitle: Single Tag Post\ntags: Notes\n---\n\nContent here.\n";

        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.tags, vec!["Notes"]);
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("# Just markdown\n").unwrap();
        assert_eq!(fm, FrontMatter::default());
        assert_eq!(remaining, "# Just markdown\n");
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title, "");
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\ntags: go\n---\nBody\n";
        assert!(matches!(
            FrontMatter::parse(content),
            Err(FrontMatterError::Yaml(_))
        ));
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        let content = "---\ntitle: Shape\ntags:\n  nested: map\n---\nBody\n";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_unterminated_json_is_an_error() {
        assert!(matches!(
            FrontMatter::parse(";;;\n{\"title\": \"x\"}\n"),
            Err(FrontMatterError::Unterminated)
        ));
    }
}
