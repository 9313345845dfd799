//! Content module - front-matter extraction and collection loading

mod frontmatter;
pub mod loader;

pub use frontmatter::{FrontMatter, FrontMatterError};
pub use loader::{ContentEntry, ContentLoader, LoadError, LoadReport};
