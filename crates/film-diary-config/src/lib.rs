pub mod config;
pub mod paths;

pub use config::{Config, FetchOptions, SiteConfig};
pub use paths::{base_path_override, PathManager};
