use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::clients::github_client::{
    DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT,
};
use crate::errors::ConfigError;

pub const ENV_TOKEN: &str = "GITVIEW_GITHUB_TOKEN";
pub const ENV_TOKEN_FALLBACK: &str = "GITHUB_TOKEN";
pub const ENV_API_BASE_URL: &str = "GITVIEW_API_BASE_URL";

/// `[github]` 配置段，所有字段可选
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Default)]
pub struct GitHubAccountConfig {
    pub api_base_url: Option<String>,
    pub token: Option<String>,
    /// 单次请求超时（秒）
    pub timeout: Option<u64>,
    pub user_agent: Option<String>,
    /// 为 true 时没有 token 就拒绝一切查看操作
    pub require_token: Option<bool>,
}

/// 解析后的 GitHub 配置，除 token 外都有值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGitHubConfig {
    pub api_base_url: String,
    pub token: Option<String>,
    pub timeout: u64,
    pub user_agent: String,
    pub require_token: bool,
}

impl Default for ResolvedGitHubConfig {
    fn default() -> Self {
        GitHubAccountConfig::default().resolve()
    }
}

/// 设置了但为空的环境变量视同未设置
fn env_value(env_map: &HashMap<String, String>, key: &str) -> Option<String> {
    env_map
        .get(key)
        .filter(|value| !value.trim().is_empty())
        .cloned()
}

impl GitHubAccountConfig {
    /// 用环境变量补齐文件中缺失的字段
    pub fn merge_with_env(mut self, env_map: &HashMap<String, String>) -> Self {
        if self.token.is_none() {
            self.token = env_value(env_map, ENV_TOKEN)
                .or_else(|| env_value(env_map, ENV_TOKEN_FALLBACK));
        }
        if self.api_base_url.is_none() {
            self.api_base_url = env_value(env_map, ENV_API_BASE_URL);
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref token) = self.token {
            if token.trim().is_empty() {
                return Err(ConfigError::EmptyToken);
            }
        }

        if let Some(ref url) = self.api_base_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ConfigError::InvalidUrl(url.clone()));
            }
        }

        if self.timeout == Some(0) {
            return Err(ConfigError::Other(
                "github.timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn resolve(self) -> ResolvedGitHubConfig {
        ResolvedGitHubConfig {
            api_base_url: self
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            token: self.token,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            user_agent: self
                .user_agent
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            require_token: self.require_token.unwrap_or(false),
        }
    }
}
