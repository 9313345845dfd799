//! Print the resolved metadata of one content file

use anyhow::{Context, Result};
use std::path::Path;

use crate::content::ContentLoader;
use crate::Site;

/// Output format for resolved metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Run the show command
pub fn run(site: &Site, file: &Path, format: OutputFormat) -> Result<()> {
    print!("{}", render(site, file, format)?);
    Ok(())
}

/// Resolve a file's metadata and serialize it
pub fn render(site: &Site, file: &Path, format: OutputFormat) -> Result<String> {
    let path = if file.is_absolute() {
        file.to_path_buf()
    } else {
        site.base_dir.join(file)
    };

    let loader = ContentLoader::new(site)?;
    let collection = loader.collection_of(&path).with_context(|| {
        format!(
            "{} is not inside a collection directory under {}",
            file.display(),
            site.content_dir.display()
        )
    })?;

    let entry = loader.load_file(collection, &path)?;
    tracing::debug!("Resolved {:?} in collection {}", path, collection);

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&entry.metadata)? + "\n",
        OutputFormat::Yaml => serde_yaml::to_string(&entry.metadata)?,
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site_with(rel: &str, content: &str) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    #[test]
    fn test_render_json_with_defaults() {
        let (_dir, site) = site_with("src/content/docs/guide.md", "---\ntitle: Guide\n---\n");

        let output = render(&site, Path::new("src/content/docs/guide.md"), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["file"], "/");
        assert_eq!(json["title"], "Guide");
        assert_eq!(json["description"], "");
        assert_eq!(json["lang"], "en-us");
        assert_eq!(json["dir"], "ltr");
        assert_eq!(json["image"]["src"], "/open-graph.jpg");
        assert_eq!(json["ogLocale"], "en-us");
        assert!(json.get("authors").is_none());
    }

    #[test]
    fn test_render_yaml() {
        let (_dir, site) = site_with(
            "src/content/blog/post.md",
            "---\ndir: rtl\nauthors: [noor]\n---\n",
        );

        let output = render(&site, Path::new("src/content/blog/post.md"), OutputFormat::Yaml).unwrap();
        assert!(output.contains("dir: rtl\n"));
        assert!(output.contains("authors:\n- noor\n"));
    }

    #[test]
    fn test_render_outside_collection() {
        let (_dir, site) = site_with("notes/todo.md", "");
        let err = render(&site, Path::new("notes/todo.md"), OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("not inside a collection"));
    }

    #[test]
    fn test_render_invalid_file() {
        let (_dir, site) = site_with("src/content/docs/bad.md", "---\nlang: en\n---\n");
        let err = render(&site, Path::new("src/content/docs/bad.md"), OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("`lang`"));
    }
}
