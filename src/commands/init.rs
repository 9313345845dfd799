//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::{SiteConfig, CONFIG_FILES};
use crate::schema::CollectionName;

const DOCS_SAMPLE: &str = r#"---
title: Introduction
description: What this site documents and how to navigate it
---

Welcome! Every page in `docs/` and every post in `blog/` starts with a
front-matter block. Fields you leave out fall back to the defaults in
`site.yml`.
"#;

const BLOG_SAMPLE: &str = r#"---
title: Hello World
authors:
  - Site Team
---

This is the first post. Run `content-schema check` to validate every entry.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    if let Some(existing) = SiteConfig::find(target_dir) {
        tracing::info!("Keeping existing config {:?}", existing);
    } else {
        let config = SiteConfig::default();
        let content = format!(
            "# Site settings; used as front-matter defaults\n{}",
            config.to_yaml()?
        );
        fs::write(target_dir.join(CONFIG_FILES[0]), content)?;
    }

    let site = crate::Site::new(target_dir)?;
    for (collection, name, sample) in [
        (CollectionName::Docs, "index.md", DOCS_SAMPLE),
        (CollectionName::Blog, "hello-world.md", BLOG_SAMPLE),
    ] {
        let dir = site.collection_dir(collection);
        fs::create_dir_all(&dir)?;
        let path = dir.join(name);
        if !path.exists() {
            fs::write(&path, sample)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::check;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_checks_clean() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("site.yml").exists());
        assert!(dir.path().join("src/content/docs/index.md").exists());
        assert!(dir.path().join("src/content/blog/hello-world.md").exists());

        let site = crate::Site::new(dir.path()).unwrap();
        assert_eq!(site.config, SiteConfig::default());

        let report = check::validate(&site, None).unwrap();
        assert!(report.is_ok());
        assert_eq!(report.entries.len(), 2);
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("site.toml"), "title = \"Kept\"\ncontent_dir = \"c\"\n").unwrap();
        fs::create_dir_all(dir.path().join("c/docs")).unwrap();
        fs::write(dir.path().join("c/docs/index.md"), "mine").unwrap();

        init_site(dir.path()).unwrap();

        assert!(!dir.path().join("site.yml").exists());
        assert_eq!(fs::read_to_string(dir.path().join("c/docs/index.md")).unwrap(), "mine");
        assert!(dir.path().join("c/blog/hello-world.md").exists());
    }
}
