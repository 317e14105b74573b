pub mod cli;
pub mod clients;
pub mod config;
pub mod diff;
pub mod errors;
pub mod handlers;
pub mod logging;
pub mod render;
pub mod repo_ref;
pub mod server;
pub mod types;

// Re-export commonly used items for convenience
pub use config::AppConfig;
pub use diff::format_diff;
pub use errors::AppError;
pub use repo_ref::parse_repo_url;
