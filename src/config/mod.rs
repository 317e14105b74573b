pub mod app_config;
pub mod github_config;
pub mod loader;

// Re-export commonly used types
pub use app_config::{AppConfig, DiffConfig, ServerConfig};
pub use github_config::{GitHubAccountConfig, ResolvedGitHubConfig};
pub use loader::ConfigLoader;
