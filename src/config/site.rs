//! Site configuration (site.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::schema::Image;

/// Config file names, in lookup order
pub const CONFIG_FILES: &[&str] = &["site.yml", "site.yaml", "site.toml"];

/// Site-wide constants used as front-matter defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub default_language: String,

    // Social previews
    pub open_graph: OpenGraphConfig,

    // Directory
    pub content_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_string(),
            description: String::new(),
            default_language: "en-us".to_string(),
            open_graph: OpenGraphConfig::default(),
            content_dir: "src/content".to_string(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file, picking the format from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(SiteConfig::default());
        }

        let config: SiteConfig = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?,
            _ => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?,
        };

        tracing::debug!("Loaded site config from {:?}", path);
        Ok(config)
    }

    /// Locate the config file in a site directory
    pub fn find<P: AsRef<Path>>(base_dir: P) -> Option<PathBuf> {
        CONFIG_FILES
            .iter()
            .map(|name| base_dir.as_ref().join(name))
            .find(|path| path.is_file())
    }

    /// Render as the YAML written by `init`
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Open graph configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenGraphConfig {
    pub image: Image,
}

impl Default for OpenGraphConfig {
    fn default() -> Self {
        Self {
            image: Image::new("/open-graph.jpg", "Open graph image"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.default_language, "en-us");
        assert_eq!(config.content_dir, "src/content");
        assert_eq!(config.open_graph.image.src, "/open-graph.jpg");
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Docs
default_language: en-us
open_graph:
  image:
    src: /social.png
    alt: Social card
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Docs");
        assert_eq!(config.description, "");
        assert_eq!(config.open_graph.image, Image::new("/social.png", "Social card"));
        assert_eq!(config.content_dir, "src/content");
    }

    #[test]
    fn test_load_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.toml");
        fs::write(
            &path,
            r#"
title = "Handbook"
content_dir = "content"

[open_graph.image]
src = "/og.png"
alt = "Handbook cover"
"#,
        )
        .unwrap();

        assert_eq!(SiteConfig::find(dir.path()), Some(path.clone()));
        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.title, "Handbook");
        assert_eq!(config.content_dir, "content");
        assert_eq!(config.open_graph.image.alt, "Handbook cover");
    }

    #[test]
    fn test_find_prefers_yml() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site.toml"), "").unwrap();
        fs::write(dir.path().join("site.yml"), "title: A").unwrap();

        assert_eq!(SiteConfig::find(dir.path()), Some(dir.path().join("site.yml")));
        assert_eq!(SiteConfig::find(dir.path().join("missing")), None);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = SiteConfig {
            title: "Round".to_string(),
            ..Default::default()
        };
        let yaml = config.to_yaml().unwrap();
        let parsed: SiteConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }
}
