//! Front-matter extraction

use serde_yaml::Value;
use thiserror::Error;

use crate::schema::RawFields;

/// Front-matter syntax errors
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front matter: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON front matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unterminated {0} front matter")]
    Unterminated(&'static str),

    #[error("front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    #[error("front matter keys must be strings")]
    NonStringKey,
}

/// Raw front matter of a content file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub fields: RawFields,
}

impl FrontMatter {
    /// Parse front matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with("+++") {
            return Self::parse_toml(content);
        }

        if content.starts_with(";;;") {
            return Self::parse_json(content);
        }

        if content.starts_with('{') {
            return Ok(Self::parse_bare_json(content));
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = content[3..].trim_start_matches(['\n', '\r']);

        let Some((yaml_content, remaining)) = split_block(rest, "---") else {
            // A lone rule at the top of a file
            return Ok((FrontMatter::default(), content));
        };

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // `---` is also a markdown thematic break. The block is front matter
        // when it parses to a mapping keyed by identifiers (quoted keys and
        // flow mappings included), or when any line reads as `key: value`.
        let parsed = serde_yaml::from_str::<Value>(yaml_content);
        let is_front_matter = matches!(
            &parsed,
            Ok(Value::Mapping(mapping)) if mapping.keys().all(is_identifier_key)
        ) || yaml_content.lines().any(looks_like_yaml_key);

        if !is_front_matter {
            return Ok((FrontMatter::default(), content));
        }

        Ok((Self::from_value(parsed?)?, remaining))
    }

    fn parse_toml(content: &str) -> Result<(Self, &str), FrontMatterError> {
        let rest = content[3..].trim_start_matches(['\n', '\r']);
        let (toml_content, remaining) =
            split_block(rest, "+++").ok_or(FrontMatterError::Unterminated("TOML"))?;

        let value: Value = toml::from_str(toml_content)?;
        Ok((Self::from_value(value)?, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), FrontMatterError> {
        // JSON front-matter ends with ;;;
        let rest = &content[3..];
        let end_pos = rest.find(";;;").ok_or(FrontMatterError::Unterminated("JSON"))?;
        let json_content = &rest[..end_pos];
        let remaining = rest[end_pos + 3..].trim_start_matches(['\n', '\r']);

        let value: Value = serde_json::from_str(json_content)?;
        Ok((Self::from_value(value)?, remaining))
    }

    /// A bare JSON object at the start of the file
    ///
    /// MDX bodies may also open with `{` (expressions, `{/* comments */}`), so
    /// anything that is not a JSON object is body content.
    fn parse_bare_json(content: &str) -> (Self, &str) {
        // The deserializer stops at the end of the first value
        let mut stream = serde_json::Deserializer::from_str(content).into_iter::<Value>();
        let Some(Ok(value @ Value::Mapping(_))) = stream.next() else {
            return (FrontMatter::default(), content);
        };
        let remaining = content[stream.byte_offset()..].trim_start_matches(['\n', '\r']);

        match Self::from_value(value) {
            Ok(fm) => (fm, remaining),
            Err(_) => (FrontMatter::default(), content),
        }
    }

    fn from_value(value: Value) -> Result<Self, FrontMatterError> {
        let mapping = match value {
            Value::Mapping(mapping) => mapping,
            Value::Null => return Ok(FrontMatter::default()),
            other => return Err(FrontMatterError::NotAMapping(crate::schema::describe(&other))),
        };

        let mut fields = RawFields::with_capacity(mapping.len());
        for (key, value) in mapping {
            let Value::String(key) = key else {
                return Err(FrontMatterError::NonStringKey);
            };
            fields.insert(key, value);
        }
        Ok(Self { fields })
    }
}

/// Split `rest` at the first line consisting of `fence`
fn split_block<'a>(rest: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            let block = &rest[..offset];
            let remaining = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((block, remaining));
        }
        offset += line.len();
    }
    None
}

/// A mapping key that could name a front-matter field
fn is_identifier_key(key: &Value) -> bool {
    match key {
        Value::String(s) => !s.is_empty() && !s.chars().any(char::is_whitespace),
        _ => false,
    }
}

/// Whether a line reads as a `key:` or `key: value` pair
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }

    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };
    let before_colon = &trimmed[..colon_pos];
    // Key should be a simple identifier and not a URL scheme
    let is_valid_key = !before_colon.is_empty()
        && before_colon
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(before_colon, "http" | "https" | "ftp");

    let after_colon = &trimmed[colon_pos + 1..];
    is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
}
