//! Content schema - validates front matter and fills in defaults
//!
//! Both collections (`docs` and `blog`) share one schema. A field that is
//! absent from the front matter takes its default; a field that is present
//! must be well-typed or validation fails. Defaults never paper over a bad
//! value.

mod error;
mod metadata;

use indexmap::IndexMap;
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;

pub(crate) use error::describe;
pub use error::{ErrorKind, FieldError, SchemaError, ValidationError};
pub use metadata::{ContentMetadata, Dir, Image, Lang, Literal};

use crate::config::SiteConfig;

/// Raw front-matter fields, in document order
pub type RawFields = IndexMap<String, Value>;

/// Keys recognized by the schema
pub const FIELDS: &[&str] = &[
    "file",
    "title",
    "description",
    "lang",
    "dir",
    "image",
    "ogLocale",
    "authors",
];

/// Front-matter schema with its defaults captured from site configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSchema {
    defaults: ContentMetadata,
}

impl ContentSchema {
    /// Build the schema, taking defaults from the site configuration
    pub fn new(site: &SiteConfig) -> Result<Self, SchemaError> {
        let lang = Lang::from_literal(&site.default_language)
            .ok_or_else(|| SchemaError::UnsupportedDefaultLanguage(site.default_language.clone()))?;

        Ok(Self {
            defaults: ContentMetadata {
                file: "/".to_string(),
                title: site.title.clone(),
                description: site.description.clone(),
                lang,
                dir: Dir::default(),
                image: site.open_graph.image.clone(),
                og_locale: site.default_language.clone(),
                authors: None,
            },
        })
    }

    /// The record produced for empty front matter
    pub fn defaults(&self) -> &ContentMetadata {
        &self.defaults
    }

    /// Validate raw front matter and fill in defaults for absent fields
    pub fn resolve(&self, fields: &RawFields) -> Result<ContentMetadata, ValidationError> {
        for key in fields.keys() {
            if !FIELDS.contains(&key.as_str()) {
                tracing::debug!("Ignoring unknown front-matter field `{}`", key);
            }
        }

        let mut reader = FieldReader::new(fields);
        let defaults = &self.defaults;

        let file = reader.string("file");
        let title = reader.string("title");
        let description = reader.string("description");
        let lang = reader.literal::<Lang>("lang");
        let dir = reader.literal::<Dir>("dir");
        let image = reader.image("image");
        let og_locale = reader.string("ogLocale");
        let authors = reader.string_list("authors");

        if !reader.issues.is_empty() {
            return Err(ValidationError::new(reader.issues));
        }

        Ok(ContentMetadata {
            file: file.unwrap_or_else(|| defaults.file.clone()),
            title: title.unwrap_or_else(|| defaults.title.clone()),
            description: description.unwrap_or_else(|| defaults.description.clone()),
            lang: lang.unwrap_or(defaults.lang),
            dir: dir.unwrap_or(defaults.dir),
            image: image.unwrap_or_else(|| defaults.image.clone()),
            og_locale: og_locale.unwrap_or_else(|| defaults.og_locale.clone()),
            authors,
        })
    }
}

/// Reads typed values out of raw fields, recording every failure
///
/// Each accessor returns `None` both for absent fields and for fields that
/// failed; callers must check `issues` before using the results.
struct FieldReader<'a> {
    fields: &'a RawFields,
    issues: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    fn new(fields: &'a RawFields) -> Self {
        Self {
            fields,
            issues: Vec::new(),
        }
    }

    fn string(&mut self, name: &str) -> Option<String> {
        let fields = self.fields;
        match fields.get(name)? {
            Value::String(s) => Some(s.clone()),
            other => {
                self.issues
                    .push(FieldError::type_mismatch(name, "a string", other));
                None
            }
        }
    }

    fn literal<T: Literal>(&mut self, name: &str) -> Option<T> {
        let fields = self.fields;
        let value = fields.get(name)?;
        let parsed = value.as_str().and_then(T::from_literal);
        if parsed.is_none() {
            self.issues
                .push(FieldError::enum_violation(name, T::ALLOWED, value));
        }
        parsed
    }

    fn image(&mut self, name: &str) -> Option<Image> {
        let fields = self.fields;
        let value = fields.get(name)?;
        let Value::Mapping(map) = value else {
            self.issues
                .push(FieldError::type_mismatch(name, "a mapping with `src` and `alt`", value));
            return None;
        };

        let mut subfield = |key: &'static str| -> Option<String> {
            match map.get(key) {
                None => {
                    self.issues.push(FieldError::MissingRequiredSubfield {
                        field: name.to_string(),
                        subfield: key,
                    });
                    None
                }
                Some(Value::String(s)) => Some(s.clone()),
                Some(other) => {
                    self.issues.push(FieldError::type_mismatch(
                        format!("{}.{}", name, key),
                        "a string",
                        other,
                    ));
                    None
                }
            }
        };

        let src = subfield("src");
        let alt = subfield("alt");
        Some(Image {
            src: src?,
            alt: alt?,
        })
    }

    fn string_list(&mut self, name: &str) -> Option<Vec<String>> {
        let fields = self.fields;
        let value = fields.get(name)?;
        let Value::Sequence(items) = value else {
            self.issues
                .push(FieldError::type_mismatch(name, "a sequence of strings", value));
            return None;
        };

        let mut list = Vec::with_capacity(items.len());
        let mut ok = true;
        for (i, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => list.push(s.clone()),
                other => {
                    self.issues.push(FieldError::type_mismatch(
                        format!("{}[{}]", name, i),
                        "a string",
                        other,
                    ));
                    ok = false;
                }
            }
        }
        ok.then_some(list)
    }
}

/// Name of a content collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum CollectionName {
    Docs,
    Blog,
}

impl CollectionName {
    pub const ALL: [CollectionName; 2] = [CollectionName::Docs, CollectionName::Blog];

    /// Directory name under the content directory
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionName::Docs => "docs",
            CollectionName::Blog => "blog",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docs" => Ok(CollectionName::Docs),
            "blog" => Ok(CollectionName::Blog),
            _ => Err(format!("Unknown collection: {}. Available: docs, blog", s)),
        }
    }
}

/// The schema of every content collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collections {
    pub docs: ContentSchema,
    pub blog: ContentSchema,
}

impl Collections {
    pub fn new(site: &SiteConfig) -> Result<Self, SchemaError> {
        let schema = ContentSchema::new(site)?;
        Ok(Self {
            docs: schema.clone(),
            blog: schema,
        })
    }

    pub fn get(&self, name: CollectionName) -> &ContentSchema {
        match name {
            CollectionName::Docs => &self.docs,
            CollectionName::Blog => &self.blog,
        }
    }
}
