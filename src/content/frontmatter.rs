//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Custom deserializer that reads any YAML scalar as its text and drops falsy values
///
/// `2024-01-15`, `42` and `true` all arrive as strings. Empty strings, `false`,
/// `0` and `null` are treated as if the key were missing.
fn truthy_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

fn value_to_text(value: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;

    match value {
        Value::Null => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Bool(false) => None,
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Sequence(items) => Some(
            items
                .iter()
                .map(|v| value_to_text(v).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Mapping(_) => None,
        Value::Tagged(tagged) => value_to_text(&tagged.value),
    }
}

/// Front-matter data from a content file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Section header (about.md, socials.md)
    #[serde(deserialize_with = "truthy_string")]
    pub header: Option<String>,
    #[serde(deserialize_with = "truthy_string")]
    pub date: Option<String>,
    #[serde(rename = "type", deserialize_with = "truthy_string")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "truthy_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "truthy_string")]
    pub accent: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), serde_yaml::Error> {
        // Without front-matter the text is returned as is; leading indentation matters to markdown
        let content = content.trim_start_matches('\u{feff}');

        if !content.starts_with("---") {
            return Ok((FrontMatter::default(), content));
        }

        // The opening delimiter must sit on its own line
        let rest = &content[3..];
        let rest = match rest.find('\n') {
            Some(pos) if rest[..pos].trim().is_empty() => &rest[pos + 1..],
            _ => return Ok((FrontMatter::default(), content)),
        };

        let (yaml_content, remaining) = match find_closing_delimiter(rest) {
            Some((start, end)) => (&rest[..start], &rest[end..]),
            // No closing ---, treat as no front-matter
            None => return Ok((FrontMatter::default(), content)),
        };
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content)?;
        Ok((fm, remaining))
    }
}

/// Locate a line consisting only of `---`; returns (line start, line end)
fn find_closing_delimiter(text: &str) -> Option<(usize, usize)> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "---" {
            return Some((offset, offset + line.len()));
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
date: 2024-03-02
type: thought
title: Hello
accent: pink
---

This is the content.
"#;

        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.date.as_deref(), Some("2024-03-02"));
        assert_eq!(fm.kind.as_deref(), Some("thought"));
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.accent.as_deref(), Some("pink"));
        assert_eq!(remaining, "This is the content.\n");
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = FrontMatter::parse("just **markdown**").unwrap();
        assert!(fm.header.is_none());
        assert_eq!(remaining, "just **markdown**");
    }

    #[test]
    fn test_no_frontmatter_keeps_indentation() {
        let content = "    let x = 1;\n";
        let (_, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(remaining, content);

        let (_, remaining) = FrontMatter::parse("\u{feff}\n\n  - item\n").unwrap();
        assert_eq!(remaining, "\n\n  - item\n");
    }

    #[test]
    fn test_scalars_read_as_text() {
        let content = "---\ntitle: 42\nheader: true\n---\nbody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("42"));
        assert_eq!(fm.header.as_deref(), Some("true"));
        assert_eq!(remaining, "body");
    }

    #[test]
    fn test_falsy_values_are_absent() {
        let content = "---\nheader: \"\"\ntitle: 0\naccent: false\ndate: ~\n---\nbody";
        let (fm, _) = FrontMatter::parse(content).unwrap();
        assert!(fm.header.is_none());
        assert!(fm.title.is_none());
        assert!(fm.accent.is_none());
        assert!(fm.date.is_none());
    }

    #[test]
    fn test_extra_fields_kept() {
        let content = "---\nheader: hi\nmood: sleepy\n---\n";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.header.as_deref(), Some("hi"));
        assert_eq!(
            fm.extra.get("mood").and_then(|v| v.as_str()),
            Some("sleepy")
        );
        assert_eq!(remaining, "");
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        assert!(FrontMatter::parse(content).is_err());
    }

    #[test]
    fn test_unclosed_block_is_content() {
        let content = "---\ntitle: nope\nstill going";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert!(fm.title.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_dashes_inside_yaml_value_do_not_close() {
        let content = "---\ntitle: a---b\n---\nbody";
        let (fm, remaining) = FrontMatter::parse(content).unwrap();
        assert_eq!(fm.title.as_deref(), Some("a---b"));
        assert_eq!(remaining, "body");
    }
}
