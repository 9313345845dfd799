//! CLI entry point for content-schema

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content_schema::commands::show::OutputFormat;
use content_schema::schema::CollectionName;

#[derive(Parser)]
#[command(name = "content-schema")]
#[command(version)]
#[command(about = "Validate docs and blog front matter against the site schema", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new entry in a collection
    New {
        /// Collection to add the entry to
        #[arg(value_enum)]
        collection: CollectionName,

        /// Title of the new entry
        title: String,

        /// Path of the new entry, relative to the collection
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Validate front matter of every entry
    #[command(alias = "c")]
    Check {
        /// Only check one collection
        #[arg(long, value_enum)]
        collection: Option<CollectionName>,

        /// Re-check on file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List collection entries
    List {
        /// Collection to list (defaults to all)
        #[arg(value_enum)]
        collection: Option<CollectionName>,
    },

    /// Print the resolved metadata of a content file
    Show {
        /// Content file to resolve
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "content_schema=debug,info"
    } else {
        "content_schema=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            content_schema::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            collection,
            title,
            path,
        } => {
            let site = content_schema::Site::new(&base_dir)?;
            tracing::info!("Creating new {} entry with title: {}", collection, title);
            content_schema::commands::new::run(&site, collection, &title, path.as_deref())?;
        }

        Commands::Check { collection, watch } => {
            let site = content_schema::Site::new(&base_dir)?;
            if watch {
                if let Err(e) = content_schema::commands::check::run(&site, collection) {
                    tracing::warn!("{}", e);
                }
                content_schema::commands::check::watch(&site, collection)?;
            } else {
                content_schema::commands::check::run(&site, collection)?;
            }
        }

        Commands::List { collection } => {
            let site = content_schema::Site::new(&base_dir)?;
            content_schema::commands::list::run(&site, collection)?;
        }

        Commands::Show { file, format } => {
            let site = content_schema::Site::new(&base_dir)?;
            content_schema::commands::show::run(&site, &file, format)?;
        }

        Commands::Version => {
            println!("content-schema version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
