//! Front-matter parsing.
//!
//! A document may start with a metadata header fenced by `---` (YAML) or
//! `+++` (TOML). Only `title`, `description` and `date` are read; other keys
//! are ignored. Scalars of any type (numbers, booleans, TOML dates) are kept
//! in their string form, so `date` stays an opaque, sortable string.
//!
//! A document without a header is all body. An opening fence with no closing
//! fence is treated the same way, since a leading `---` is also a markdown
//! thematic break.

use std::sync::LazyLock;

use regex::Regex;

static YAML_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)")
        .expect("valid YAML fence regex")
});

static TOML_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A\+\+\+[ \t]*\r?\n(?:(.*?)\r?\n)?\+\+\+[ \t]*(?:\r?\n|\z)")
        .expect("valid TOML fence regex")
});

/// Metadata fields read from the header. Missing fields are empty strings.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct FrontMatter {
    pub title: String,
    pub description: String,
    pub date: String,
}

/// Front-matter parse failure.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FrontMatterError {
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("header must be a key/value mapping")]
    NotAMapping,
    #[error("field `{0}` must be a scalar value")]
    NotAScalar(&'static str),
}

/// Split a document into its front matter and markdown body.
pub(crate) fn parse(text: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if let Some(caps) = YAML_FENCE.captures(text) {
        let header = caps.get(1).map_or("", |m| m.as_str());
        let body = &text[caps.get(0).map_or(0, |m| m.end())..];
        return Ok((parse_yaml(header)?, body));
    }

    if let Some(caps) = TOML_FENCE.captures(text) {
        let header = caps.get(1).map_or("", |m| m.as_str());
        let body = &text[caps.get(0).map_or(0, |m| m.end())..];
        return Ok((parse_toml(header)?, body));
    }

    Ok((FrontMatter::default(), text))
}

fn parse_yaml(header: &str) -> Result<FrontMatter, FrontMatterError> {
    use serde_yaml::Value;

    let mapping = match serde_yaml::from_str::<Value>(header)? {
        Value::Null => return Ok(FrontMatter::default()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(FrontMatterError::NotAMapping),
    };

    let field = |name: &'static str| -> Result<String, FrontMatterError> {
        match mapping.get(name) {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(_) => Err(FrontMatterError::NotAScalar(name)),
        }
    };

    Ok(FrontMatter {
        title: field("title")?,
        description: field("description")?,
        date: field("date")?,
    })
}

fn parse_toml(header: &str) -> Result<FrontMatter, FrontMatterError> {
    use toml::Value;

    let table: toml::Table = toml::from_str(header)?;

    let field = |name: &'static str| -> Result<String, FrontMatterError> {
        match table.get(name) {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Integer(i)) => Ok(i.to_string()),
            Some(Value::Float(f)) => Ok(f.to_string()),
            Some(Value::Boolean(b)) => Ok(b.to_string()),
            Some(Value::Datetime(d)) => Ok(d.to_string()),
            Some(_) => Err(FrontMatterError::NotAScalar(name)),
        }
    };

    Ok(FrontMatter {
        title: field("title")?,
        description: field("description")?,
        date: field("date")?,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_yaml_all_fields() {
        let text = "---\ntitle: Intro\ndescription: Getting started\ndate: 2024-01-01\n---\n# Hello\n";

        let (fm, body) = parse(text).unwrap();

        assert_eq!(
            fm,
            FrontMatter {
                title: "Intro".to_owned(),
                description: "Getting started".to_owned(),
                date: "2024-01-01".to_owned(),
            }
        );
        assert_eq!(body, "# Hello\n");
    }

    #[test]
    fn test_yaml_missing_fields_default_to_empty() {
        let (fm, body) = parse("---\ntitle: Only title\n---\nBody").unwrap();

        assert_eq!(fm.title, "Only title");
        assert_eq!(fm.description, "");
        assert_eq!(fm.date, "");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_yaml_quoted_and_numeric_values() {
        let (fm, _) = parse("---\ntitle: \"2024\"\ndate: 20240101\n---\n").unwrap();

        assert_eq!(fm.title, "2024");
        assert_eq!(fm.date, "20240101");
    }

    #[test]
    fn test_yaml_ignores_unknown_keys() {
        let (fm, _) = parse("---\ntitle: T\ntags: [a, b]\n---\n").unwrap();

        assert_eq!(fm.title, "T");
    }

    #[test]
    fn test_empty_header() {
        let (fm, body) = parse("---\n---\ncontent").unwrap();

        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, "content");
    }

    #[test]
    fn test_no_header_is_all_body() {
        let text = "# Title\n\nParagraph.";

        let (fm, body) = parse(text).unwrap();

        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, text);
    }

    #[test]
    fn test_unterminated_fence_is_body() {
        let text = "---\n\nJust a rule above.";

        let (fm, body) = parse(text).unwrap();

        assert_eq!(fm, FrontMatter::default());
        assert_eq!(body, text);
    }

    #[test]
    fn test_crlf_line_endings() {
        let (fm, body) = parse("---\r\ntitle: Win\r\n---\r\nBody").unwrap();

        assert_eq!(fm.title, "Win");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let (fm, _) = parse("\u{feff}---\ntitle: Bom\n---\n").unwrap();

        assert_eq!(fm.title, "Bom");
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        let result = parse("---\ntitle: [unclosed\n---\nBody");

        assert!(matches!(result, Err(FrontMatterError::Yaml(_))));
    }

    #[test]
    fn test_yaml_sequence_header_is_error() {
        let result = parse("---\n- a\n- b\n---\n");

        assert!(matches!(result, Err(FrontMatterError::NotAMapping)));
    }

    #[test]
    fn test_yaml_nested_title_is_error() {
        let result = parse("---\ntitle:\n  nested: true\n---\n");

        assert!(matches!(result, Err(FrontMatterError::NotAScalar("title"))));
    }

    #[test]
    fn test_toml_header() {
        let text = "+++\ntitle = \"Guide\"\ndate = 2024-02-01\n+++\nBody";

        let (fm, body) = parse(text).unwrap();

        assert_eq!(fm.title, "Guide");
        assert_eq!(fm.date, "2024-02-01");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let result = parse("+++\ntitle = \n+++\n");

        assert!(matches!(result, Err(FrontMatterError::Toml(_))));
    }
}
