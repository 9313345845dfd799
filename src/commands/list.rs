//! List collection entries

use anyhow::Result;

use crate::content::{ContentLoader, LoadReport};
use crate::schema::CollectionName;
use crate::Site;

/// List entries of one collection, or all of them
pub fn run(site: &Site, collection: Option<CollectionName>) -> Result<()> {
    let loader = ContentLoader::new(site)?;
    let collections = match collection {
        Some(name) => vec![name],
        None => CollectionName::ALL.to_vec(),
    };

    for name in collections {
        let report = loader.load_collection(name);
        if !report.is_ok() {
            tracing::warn!(
                "{} {} entries failed validation, run `check` for details",
                report.errors.len(),
                name
            );
        }
        for line in format_collection(site, name, &report) {
            println!("{}", line);
        }
    }

    Ok(())
}

/// Header plus one line per valid entry
pub fn format_collection(site: &Site, name: CollectionName, report: &LoadReport) -> Vec<String> {
    let mut lines = vec![format!("{} ({}):", name, report.entries.len())];
    for entry in &report.entries {
        let source = entry
            .path
            .strip_prefix(&site.base_dir)
            .unwrap_or(&entry.path)
            .display();
        let authors = match &entry.metadata.authors {
            Some(authors) if !authors.is_empty() => format!(" by {}", authors.join(", ")),
            _ => String::new(),
        };
        lines.push(format!(
            "  {} - {}{} [{}]",
            entry.slug, entry.metadata.title, authors, source
        ));
    }
    lines
}
