//! Doc comment block parser: summary, detail, and `@tag` map.
//!
//! Accepts `/** ... */` blocks (with or without leading `*` gutters),
//! `///` / `//!` line comments, or bare text. A tag runs from its `@name`
//! line up to the next tag line, so values may span several lines.

use crate::tags::TagMap;
use regex::Regex;
use std::sync::LazyLock;

// Gutter inside `/* */`: indentation, a run of `*`, then one blank.
static RE_BLOCK_GUTTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*\**[[:blank:]]?").unwrap());

// Gutter elsewhere: indentation, `///` or `//!`, then one blank.
static RE_LINE_GUTTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*(?:///|//!)?[[:blank:]]?").unwrap());

static RE_TAG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:blank:]]*@([A-Za-z0-9_]+)(.*)$").unwrap());

/// A parsed comment block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocComment {
    /// First non-blank line of the free text.
    pub summary: String,
    /// Remaining free text before the first tag, trimmed.
    pub detail: String,
    pub tags: TagMap,
}

impl DocComment {
    /// Parse a raw comment block. Never fails; unknown tags are kept as-is.
    pub fn parse(raw: &str) -> Self {
        let (body, block) = strip_delimiters(raw);
        let body = body.replace('\r', "");
        let gutter: &Regex = if block { &*RE_BLOCK_GUTTER } else { &*RE_LINE_GUTTER };

        let mut text: Vec<String> = Vec::new();
        let mut tags = TagMap::new();
        let mut current: Option<(String, Vec<String>)> = None;

        for line in body.lines() {
            let line = gutter.replace(line, "");
            let tag = RE_TAG_LINE
                .captures(&line)
                .map(|caps| (caps[1].to_string(), caps[2].to_string()));
            if let Some((name, rest)) = tag {
                if let Some((previous, value)) = current.take() {
                    tags.insert(previous, join_value(&value));
                }
                current = Some((name, vec![rest]));
            } else if let Some((_, value)) = current.as_mut() {
                value.push(line.into_owned());
            } else {
                text.push(line.into_owned());
            }
        }
        if let Some((name, value)) = current {
            tags.insert(name, join_value(&value));
        }

        let mut lines = text.into_iter().skip_while(|l| l.trim().is_empty());
        let summary = lines.next().map(|l| l.trim().to_string()).unwrap_or_default();
        let detail = lines.collect::<Vec<_>>().join("\n").trim().to_string();

        DocComment {
            summary,
            detail,
            tags,
        }
    }
}

/// Body of the comment, and whether it was a `/* */` block.
fn strip_delimiters(raw: &str) -> (&str, bool) {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix("/**")
        .or_else(|| trimmed.strip_prefix("/*"))
    {
        Some(body) => (body.strip_suffix("*/").unwrap_or(body), true),
        None => (trimmed, false),
    }
}

fn join_value(lines: &[String]) -> String {
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_block_comment() {
        let doc = DocComment::parse(
            "/**\n * Finds pets by status\n *\n * Multiple status values can be provided\n * with comma separated strings\n *\n * @path /pet/findByStatus\n * @method get\n * @return Pet[] successful operation\n */",
        );
        assert_eq!(doc.summary, "Finds pets by status");
        assert_eq!(
            doc.detail,
            "Multiple status values can be provided\nwith comma separated strings"
        );
        assert_eq!(doc.tags.first("path"), Some("/pet/findByStatus"));
        assert_eq!(doc.tags.first("method"), Some("get"));
        assert_eq!(doc.tags.first("return"), Some("Pet[] successful operation"));
    }

    #[test]
    fn parses_line_comments() {
        let doc = DocComment::parse("/// Ping\n/// @path /ping\n/// @method get\n");
        assert_eq!(doc.summary, "Ping");
        assert_eq!(doc.detail, "");
        assert_eq!(doc.tags.first("path"), Some("/ping"));
    }

    #[test]
    fn repeated_tags_keep_order() {
        let doc = DocComment::parse(
            "@errors 400 Invalid ID supplied\n@errors 404 Pet not found\n@errors 405 Validation exception",
        );
        assert_eq!(
            doc.tags.values("errors"),
            vec![
                "400 Invalid ID supplied",
                "404 Pet not found",
                "405 Validation exception"
            ]
        );
    }

    #[test]
    fn tag_without_value_is_present_and_empty() {
        let doc = DocComment::parse("/**\n * @var string\n * @required\n */");
        assert!(doc.tags.contains("required"));
        assert_eq!(doc.tags.first("required"), Some(""));
    }

    #[test]
    fn tag_value_continues_until_next_tag() {
        let doc = DocComment::parse("@default unexpected\nerror\n@path /x");
        assert_eq!(doc.tags.first("default"), Some("unexpected\nerror"));
        assert_eq!(doc.tags.first("path"), Some("/x"));
    }

    #[test]
    fn one_tag_per_line() {
        let doc = DocComment::parse("/** @path /pet/{petId} @method get */");
        assert_eq!(doc.tags.first("path"), Some("/pet/{petId} @method get"));
        assert!(!doc.tags.contains("method"));
    }

    #[test]
    fn inline_at_sign_is_not_a_tag() {
        let doc = DocComment::parse("Contact apiteam@swagger.io for access");
        assert!(doc.tags.is_empty());
        assert_eq!(doc.summary, "Contact apiteam@swagger.io for access");
    }

    #[test]
    fn bullets_survive_outside_block_comments() {
        let doc = DocComment::parse("Inventory\n* counts per status\n* updated hourly\n@path /inventory");
        assert_eq!(doc.detail, "* counts per status\n* updated hourly");

        let doc = DocComment::parse("/**\n * Inventory\n *   * counts per status\n */");
        assert_eq!(doc.detail, "* counts per status");
    }

    #[test]
    fn empty_comment() {
        let doc = DocComment::parse("");
        assert_eq!(doc, DocComment::default());
    }

    #[test]
    fn strips_carriage_returns() {
        let doc = DocComment::parse("/**\r\n * Title\r\n * @method post\r\n */");
        assert_eq!(doc.summary, "Title");
        assert_eq!(doc.tags.first("method"), Some("post"));
    }
}
