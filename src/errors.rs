use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("GitHub API error: {0}")]
    GitHub(#[from] GitHubError),
    #[error("View error: {0}")]
    View(#[from] ViewError),
    #[error("I/O error while {0}: {1}")]
    IO(String, #[source] std::io::Error),
    #[error("Application error: {0}")]
    Generic(String),
}

/// GitHub REST API 调用失败的原因
#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("Network request failed: {0}")]
    NetworkError(#[source] reqwest::Error),

    #[error("Authentication failed: invalid or insufficient token")]
    AuthenticationError,

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("API rate limit exceeded, please try again later or configure a token")]
    RateLimitExceeded,

    #[error("Server error: {status_code}")]
    ServerError { status_code: u16 },

    #[error("Response data parsing failed: {0}")]
    ParseError(#[source] reqwest::Error),

    #[error("Request timed out")]
    TimeoutError,
}

impl From<reqwest::Error> for GitHubError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GitHubError::TimeoutError
        } else if err.is_decode() {
            GitHubError::ParseError(err)
        } else {
            GitHubError::NetworkError(err)
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read file '{0}': {1}")]
    FileRead(String, #[source] std::io::Error),
    #[error("Failed to parse TOML from file '{0}': {1}")]
    TomlParse(String, #[source] toml::de::Error),
    #[error("Wrong url format: {0}")]
    InvalidUrl(String),
    #[error("Invalid server address '{0}'")]
    InvalidAddr(String),
    #[error("Empty token")]
    EmptyToken,
    #[error("Other Config Error: {0}")]
    Other(String),
}

/// 一次查看操作在发起任何网络请求之前就被拒绝的原因
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("Invalid GitHub repository URL '{0}'. Please enter a URL like `https://github.com/owner/repo_name`.")]
    InvalidRepoUrl(String),
    #[error("A GitHub token is required by the current configuration. Set GITVIEW_GITHUB_TOKEN or [github].token.")]
    MissingToken,
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IO("I/O operation failed".to_string(), err)
    }
}
