//! Create a new collection entry

use anyhow::Result;
use indexmap::IndexMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::schema::CollectionName;
use crate::Site;

/// Create a new entry in a collection, returning its path
pub fn create_entry(
    site: &Site,
    collection: CollectionName,
    title: &str,
    path: Option<&str>,
) -> Result<PathBuf> {
    if let Some(p) = path {
        let inside = !p.is_empty()
            && Path::new(p)
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !inside {
            anyhow::bail!("Path must stay inside the {} collection: {}", collection, p);
        }
    }

    let target_dir = site.collection_dir(collection);
    fs::create_dir_all(&target_dir)?;

    let filename = match path {
        Some(p) if p.ends_with(".md") || p.ends_with(".mdx") => p.to_string(),
        Some(p) => format!("{}.md", p),
        None => format!("{}.md", slug::slugify(title)),
    };
    let file_path = target_dir.join(filename);

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Serialize so titles with colons or quotes stay valid YAML
    let mut front_matter = IndexMap::new();
    front_matter.insert("title", title);
    let content = format!("---\n{}---\n", serde_yaml::to_string(&front_matter)?);

    fs::write(&file_path, content)?;
    tracing::debug!("Created {:?}", file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(site: &Site, collection: CollectionName, title: &str, path: Option<&str>) -> Result<()> {
    let file_path = create_entry(site, collection, title, path)?;
    println!("Created: {:?}", file_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentLoader;
    use tempfile::TempDir;

    #[test]
    fn test_create_entry_is_valid() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_entry(&site, CollectionName::Blog, "Release: v1.0", None).unwrap();
        assert_eq!(path, site.collection_dir(CollectionName::Blog).join("release-v1-0.md"));

        let entry = ContentLoader::new(&site)
            .unwrap()
            .load_file(CollectionName::Blog, &path)
            .unwrap();
        assert_eq!(entry.metadata.title, "Release: v1.0");
    }

    #[test]
    fn test_create_entry_with_path() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        let path = create_entry(&site, CollectionName::Docs, "Setup", Some("guides/setup")).unwrap();
        assert_eq!(path, site.collection_dir(CollectionName::Docs).join("guides/setup.md"));
        assert!(path.exists());
    }

    #[test]
    fn test_create_entry_rejects_escaping_path() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        for path in ["../../x", "guides/../../x", "/tmp/x", ""] {
            let err = create_entry(&site, CollectionName::Docs, "X", Some(path)).unwrap_err();
            assert!(err.to_string().contains("inside the docs collection"), "{}", path);
        }
        assert!(!dir.path().join("src/x.md").exists());
    }

    #[test]
    fn test_create_entry_refuses_overwrite() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();

        create_entry(&site, CollectionName::Docs, "Intro", None).unwrap();
        assert!(create_entry(&site, CollectionName::Docs, "Intro", None).is_err());
    }
}
