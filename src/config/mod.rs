//! Configuration module

mod site;

pub use site::OpenGraphConfig;
pub use site::SiteConfig;
pub use site::CONFIG_FILES;
