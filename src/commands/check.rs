//! Validate content against the collection schema

use anyhow::Result;
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::{ContentLoader, LoadError, LoadReport};
use crate::schema::CollectionName;
use crate::Site;

/// Validate one collection, or all of them
pub fn validate(site: &Site, collection: Option<CollectionName>) -> Result<LoadReport> {
    let loader = ContentLoader::new(site)?;
    Ok(match collection {
        Some(name) => loader.load_collection(name),
        None => loader.load_all(),
    })
}

/// Run the check command
pub fn run(site: &Site, collection: Option<CollectionName>) -> Result<()> {
    let start = Instant::now();
    let report = validate(site, collection)?;

    for line in failure_lines(site, &report) {
        eprintln!("{}", line);
    }

    tracing::info!(
        "Checked {} files in {:.2}s",
        report.files(),
        start.elapsed().as_secs_f64()
    );

    if !report.is_ok() {
        anyhow::bail!(
            "{} of {} content files failed validation",
            report.errors.len(),
            report.files()
        );
    }

    println!("All {} content files are valid", report.files());
    Ok(())
}

/// One line per failure: `path: message`, one per field for schema violations
pub fn failure_lines(site: &Site, report: &LoadReport) -> Vec<String> {
    let mut lines = Vec::new();
    for error in &report.errors {
        let path = error
            .path()
            .strip_prefix(&site.base_dir)
            .unwrap_or(error.path())
            .display();
        match error {
            LoadError::Invalid { source, .. } => {
                for issue in source.issues() {
                    lines.push(format!("{}: {}", path, issue));
                }
            }
            LoadError::Io { source, .. } => lines.push(format!("{}: {}", path, source)),
            LoadError::Walk { source, .. } => lines.push(format!("{}: {}", path, source)),
            LoadError::FrontMatter { source, .. } => lines.push(format!("{}: {}", path, source)),
        }
    }
    lines
}

/// Watch for file changes and re-check
pub fn watch(site: &Site, collection: Option<CollectionName>) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(site.content_dir.as_ref(), notify::RecursiveMode::Recursive)?;

    if let Some(config_path) = &site.config_path {
        watcher.watch(Path::new(config_path), notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", site.content_dir);

    let mut debounce = Debounce::new(Duration::from_millis(500));

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => debounce.event(Instant::now()),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }

        if debounce.ready(Instant::now()) {
            tracing::info!("Content changed, checking...");
            // Reload so config edits take effect
            let result = Site::new(&site.base_dir).and_then(|site| run(&site, collection));
            if let Err(e) = result {
                tracing::warn!("{}", e);
            }
        }
    }

    Ok(())
}

/// Collapses a burst of file events into a single check
///
/// Editors emit several events per save; the check runs once no event has
/// arrived for `quiet`, so it sees the file as finally written.
struct Debounce {
    quiet: Duration,
    last_event: Option<Instant>,
}

impl Debounce {
    fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            last_event: None,
        }
    }

    fn event(&mut self, now: Instant) {
        self.last_event = Some(now);
    }

    /// Whether a pending burst has gone quiet; clears it when it has
    fn ready(&mut self, now: Instant) -> bool {
        match self.last_event {
            Some(at) if now.duration_since(at) >= self.quiet => {
                self.last_event = None;
                true
            }
            _ => false,
        }
    }
}
