//! Resolved content metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of string literals accepted by a front-matter field
pub trait Literal: Sized + Copy {
    /// Every accepted spelling, in declaration order
    const ALLOWED: &'static [&'static str];

    /// Match a raw string against the accepted literals
    fn from_literal(value: &str) -> Option<Self>;

    /// The literal this value was parsed from
    fn as_str(self) -> &'static str;
}

/// Content language. Only `en-us` is accepted for now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lang {
    #[serde(rename = "en-us")]
    EnUs,
}

impl Literal for Lang {
    const ALLOWED: &'static [&'static str] = &["en-us"];

    fn from_literal(value: &str) -> Option<Self> {
        match value {
            "en-us" => Some(Lang::EnUs),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Lang::EnUs => "en-us",
        }
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    #[default]
    Ltr,
    Rtl,
}

impl Literal for Dir {
    const ALLOWED: &'static [&'static str] = &["ltr", "rtl"];

    fn from_literal(value: &str) -> Option<Self> {
        match value {
            "ltr" => Some(Dir::Ltr),
            "rtl" => Some(Dir::Rtl),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Dir::Ltr => "ltr",
            Dir::Rtl => "rtl",
        }
    }
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Open graph image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub src: String,
    pub alt: String,
}

impl Image {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// Fully resolved metadata of one content file
///
/// Every field holds a concrete value once resolved; only `authors` may be
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    pub file: String,
    pub title: String,
    pub description: String,
    pub lang: Lang,
    pub dir: Dir,
    pub image: Image,
    pub og_locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_lookup() {
        assert_eq!(Lang::from_literal("en-us"), Some(Lang::EnUs));
        assert_eq!(Lang::from_literal("en-US"), None);
        assert_eq!(Dir::from_literal("rtl"), Some(Dir::Rtl));
        assert_eq!(Dir::from_literal("auto"), None);
        assert_eq!(Dir::default(), Dir::Ltr);
    }

    #[test]
    fn test_serialize_camel_case() {
        let meta = ContentMetadata {
            file: "/".to_string(),
            title: "Guide".to_string(),
            description: String::new(),
            lang: Lang::EnUs,
            dir: Dir::Rtl,
            image: Image::new("/og.png", "Preview"),
            og_locale: "en-us".to_string(),
            authors: None,
        };

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["ogLocale"], "en-us");
        assert_eq!(json["lang"], "en-us");
        assert_eq!(json["dir"], "rtl");
        assert_eq!(json["image"]["src"], "/og.png");
        assert!(json.get("authors").is_none());
    }
}
