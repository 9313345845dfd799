//! Content loader - loads and validates collection entries from the content directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use super::frontmatter::{FrontMatter, FrontMatterError};
use crate::schema::{CollectionName, Collections, ContentMetadata, ValidationError};
use crate::Site;

/// File extensions treated as content
pub const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx", "markdown"];

/// A validated content file
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    pub collection: CollectionName,
    /// Collection-relative path without extension, slugified per segment
    pub slug: String,
    pub path: PathBuf,
    pub metadata: ContentMetadata,
    pub body: String,
}

/// A content file that could not be loaded
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("{}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("{}: {source}", .path.display())]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },

    #[error("{}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        collection: CollectionName,
        source: ValidationError,
    },
}

impl LoadError {
    /// The offending content file
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Walk { path, .. }
            | LoadError::FrontMatter { path, .. }
            | LoadError::Invalid { path, .. } => path,
        }
    }
}

/// Outcome of loading one or more collections
#[derive(Debug, Default)]
pub struct LoadReport {
    pub entries: Vec<ContentEntry>,
    pub errors: Vec<LoadError>,
}

impl LoadReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of files looked at
    pub fn files(&self) -> usize {
        self.entries.len() + self.errors.len()
    }

    fn merge(&mut self, other: LoadReport) {
        self.entries.extend(other.entries);
        self.errors.extend(other.errors);
    }
}

/// Loads content from the collection directories
pub struct ContentLoader<'a> {
    site: &'a Site,
    collections: Collections,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> anyhow::Result<Self> {
        let collections = Collections::new(&site.config)?;
        Ok(Self { site, collections })
    }

    /// Load every collection
    pub fn load_all(&self) -> LoadReport {
        let mut report = LoadReport::default();
        for name in CollectionName::ALL {
            report.merge(self.load_collection(name));
        }
        report
    }

    /// Load all entries of one collection
    pub fn load_collection(&self, collection: CollectionName) -> LoadReport {
        let mut report = LoadReport::default();
        let dir = self.site.collection_dir(collection);
        if !dir.exists() {
            tracing::debug!("Collection directory {:?} does not exist", dir);
            return report;
        }

        for entry in WalkDir::new(&dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
        {
            // Dangling links, link loops and unreadable directories
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    let path = source.path().map(Path::to_path_buf).unwrap_or_else(|| dir.clone());
                    report.errors.push(LoadError::Walk { path, source });
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if !is_content_file(path) {
                tracing::debug!("Skipping non-content file {:?}", path);
                continue;
            }

            match self.load_file(collection, path) {
                Ok(entry) => report.entries.push(entry),
                Err(e) => report.errors.push(e),
            }
        }

        report.entries.sort_by(|a, b| a.slug.cmp(&b.slug));
        tracing::debug!(
            "Loaded {} entries from {} ({} failed)",
            report.entries.len(),
            collection,
            report.errors.len()
        );
        report
    }

    /// Load and validate a single file
    pub fn load_file(
        &self,
        collection: CollectionName,
        path: &Path,
    ) -> Result<ContentEntry, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (fm, body) = FrontMatter::parse(&content).map_err(|source| LoadError::FrontMatter {
            path: path.to_path_buf(),
            source,
        })?;

        let metadata = self
            .collections
            .get(collection)
            .resolve(&fm.fields)
            .map_err(|source| LoadError::Invalid {
                path: path.to_path_buf(),
                collection,
                source,
            })?;

        let relative = path
            .strip_prefix(self.site.collection_dir(collection))
            .unwrap_or(path);

        Ok(ContentEntry {
            collection,
            slug: entry_slug(relative),
            path: path.to_path_buf(),
            metadata,
            body: body.to_string(),
        })
    }

    /// Work out which collection a file belongs to
    pub fn collection_of(&self, path: &Path) -> Option<CollectionName> {
        CollectionName::ALL
            .into_iter()
            .find(|name| path.starts_with(self.site.collection_dir(*name)))
    }
}

/// Files and directories starting with `_` are private to the site; dot
/// entries (`.DS_Store`, editor swap directories) are never content
fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str()
        .map(|s| s.starts_with('_') || s.starts_with('.'))
        .unwrap_or(false)
}

/// Check if a file is a content file
pub fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CONTENT_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Slug of a collection-relative path: `Guides/Getting Started.md` -> `guides/getting-started`
fn entry_slug(relative: &Path) -> String {
    let stem = relative.with_extension("");
    stem.components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(slug::slugify)
        .collect::<Vec<_>>()
        .join("/")
}
