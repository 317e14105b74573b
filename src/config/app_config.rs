use serde::Deserialize;
use std::{collections::HashMap, net::SocketAddr, path::PathBuf, time::Duration};

use crate::clients::GitHubClient;
use crate::errors::ConfigError;
use crate::types::diff::{FormatOptions, NotebookFallback};

use super::{
    github_config::{GitHubAccountConfig, ResolvedGitHubConfig},
    loader::ConfigLoader,
};

// Configuration location constants
pub const USER_CONFIG_DIR: &str = "gitview";
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_SERVER_ADDR: &str = "GITVIEW_SERVER_ADDR";
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_REPO_URL: &str = "https://github.com/ria-pahujani77/Code-Validator-and-Deployer-Agent";
pub const DEFAULT_PROJECT_NAME: &str = "My ML Classification Project";

/// `[diff]` 配置段
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DiffConfig {
    #[serde(default)]
    pub notebook_fallback: NotebookFallback,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialServerConfig {
    pub addr: Option<String>,
    pub default_repo_url: Option<String>,
    pub default_project_name: Option<String>,
}

/// `[server]` 配置段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// 页面表单的预填值
    pub default_repo_url: String,
    pub default_project_name: String,
}

impl ServerConfig {
    fn from_partial(
        partial: Option<PartialServerConfig>,
        env_map: &HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let partial = partial.unwrap_or_default();
        let addr = partial
            .addr
            .or_else(|| {
                env_map
                    .get(ENV_SERVER_ADDR)
                    .filter(|addr| !addr.trim().is_empty())
                    .cloned()
            })
            .unwrap_or_else(|| DEFAULT_SERVER_ADDR.to_string());
        Ok(ServerConfig {
            addr: parse_addr(&addr)?,
            default_repo_url: partial
                .default_repo_url
                .unwrap_or_else(|| DEFAULT_REPO_URL.to_string()),
            default_project_name: partial
                .default_project_name
                .unwrap_or_else(|| DEFAULT_PROJECT_NAME.to_string()),
        })
    }
}

pub fn parse_addr(addr: &str) -> Result<SocketAddr, ConfigError> {
    addr.parse()
        .map_err(|_| ConfigError::InvalidAddr(addr.to_string()))
}

/// Main Application Configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub github: ResolvedGitHubConfig,
    pub diff: DiffConfig,
    pub server: ServerConfig,
}

/// Partial Application Configuration for loading from files
#[derive(Deserialize, Debug, Default)]
pub struct PartialAppConfig {
    github: Option<GitHubAccountConfig>,
    diff: Option<DiffConfig>,
    server: Option<PartialServerConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            github: ResolvedGitHubConfig::default(),
            diff: DiffConfig::default(),
            server: ServerConfig {
                addr: SocketAddr::from(([127, 0, 0, 1], 8501)),
                default_repo_url: DEFAULT_REPO_URL.to_string(),
                default_project_name: DEFAULT_PROJECT_NAME.to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file location and environment
    pub fn load() -> Result<Self, ConfigError> {
        ConfigLoader::new().load_config()
    }

    /// Load configuration from an explicit file path
    pub fn load_from(path: PathBuf) -> Result<Self, ConfigError> {
        ConfigLoader::with_path(path).load_config()
    }

    /// Create AppConfig from partial config and environment
    pub fn from_partial_and_env(
        partial: Option<PartialAppConfig>,
        env_map: HashMap<String, String>,
    ) -> Result<Self, ConfigError> {
        let partial = partial.unwrap_or_default();

        let account = partial.github.unwrap_or_default().merge_with_env(&env_map);
        account.validate()?;

        Ok(AppConfig {
            github: account.resolve(),
            diff: partial.diff.unwrap_or_default(),
            server: ServerConfig::from_partial(partial.server, &env_map)?,
        })
    }

    /// 命令行传入的 token 优先级最高
    pub fn with_token_override(mut self, token: Option<String>) -> Result<Self, ConfigError> {
        if let Some(token) = token {
            if token.trim().is_empty() {
                return Err(ConfigError::EmptyToken);
            }
            self.github.token = Some(token);
        }
        Ok(self)
    }

    pub fn format_options(&self) -> FormatOptions {
        FormatOptions::with_notebook_fallback(self.diff.notebook_fallback)
    }

    /// 按配置构造 GitHub 客户端，token 作为显式参数传入
    pub fn github_client(&self) -> GitHubClient {
        GitHubClient::new(self.github.api_base_url.clone(), self.github.token.clone())
            .with_timeout(Duration::from_secs(self.github.timeout))
            .with_user_agent(self.github.user_agent.clone())
    }
}
