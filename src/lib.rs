//! content-schema: front-matter schema for docs and blog collections
//!
//! This crate declares the metadata every content file of a documentation
//! site may carry, resolves defaults from site-wide settings, and ships a
//! checker that validates a whole content directory against it.

pub mod commands;
pub mod config;
pub mod content;
pub mod schema;

use anyhow::Result;
use std::path::{Path, PathBuf};

use schema::CollectionName;

/// A site directory and its configuration
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Config file the settings came from, if any
    pub config_path: Option<PathBuf>,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory holding one subdirectory per collection
    pub content_dir: PathBuf,
}

impl Site {
    /// Open the site rooted at a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = config::SiteConfig::find(&base_dir);

        let config = match &config_path {
            Some(path) => config::SiteConfig::load(path)?,
            None => config::SiteConfig::default(),
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            config_path,
            base_dir,
            content_dir,
        })
    }

    /// Directory of one collection
    pub fn collection_dir(&self, collection: CollectionName) -> PathBuf {
        self.content_dir.join(collection.as_str())
    }

    /// Validate every collection
    pub fn check(&self) -> Result<()> {
        commands::check::run(self, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_site_without_config() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        assert_eq!(site.config_path, None);
        assert_eq!(site.content_dir, dir.path().join("src/content"));
        assert_eq!(
            site.collection_dir(CollectionName::Docs),
            dir.path().join("src/content/docs")
        );
    }

    #[test]
    fn test_site_with_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site.yml"), "content_dir: pages\ntitle: Handbook\n").unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config.title, "Handbook");
        assert_eq!(site.content_dir, dir.path().join("pages"));
    }

    #[test]
    fn test_site_check() {
        let dir = TempDir::new().unwrap();
        let docs = dir.path().join("src/content/docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("a.md"), "---\ntitle: A\n---\n").unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert!(site.check().is_ok());

        fs::write(docs.join("b.md"), "---\ndir: down\n---\n").unwrap();
        assert!(site.check().is_err());
    }

    #[test]
    fn test_site_with_broken_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site.yml"), "title: [\n").unwrap();
        assert!(Site::new(dir.path()).is_err());
    }
}
