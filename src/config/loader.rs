use std::{collections::HashMap, env, fs, path::PathBuf};

use crate::errors::ConfigError;

use super::app_config::{AppConfig, PartialAppConfig, CONFIG_FILE_NAME, USER_CONFIG_DIR};

/// 环境变量前缀；`GITHUB_TOKEN` 作为通用凭据也会被收集
const ENV_PREFIX: &str = "GITVIEW_";
const EXTRA_ENV_KEYS: &[&str] = &["GITHUB_TOKEN"];

/// Configuration loader responsible for loading config from files and environment
pub struct ConfigLoader {
    path: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new config loader with the default path
    pub fn new() -> Self {
        Self { path: None }
    }

    /// Create a config loader reading an explicit file (`~` is expanded)
    pub fn with_path(path: PathBuf) -> Self {
        let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
        Self {
            path: Some(PathBuf::from(expanded)),
        }
    }

    /// `<config_dir>/gitview/config.toml`，找不到配置目录时为 `None`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(CONFIG_FILE_NAME))
    }

    pub fn config_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(Self::default_path)
    }

    /// Load complete application configuration
    pub fn load_config(&self) -> Result<AppConfig, ConfigError> {
        let partial = match self.config_path() {
            Some(path) => self.load_partial_config(&path)?,
            None => None,
        };
        AppConfig::from_partial_and_env(partial, Self::collect_env_vars())
    }

    /// 配置文件不存在时返回 `None`，使用默认值
    fn load_partial_config(&self, path: &PathBuf) -> Result<Option<PartialAppConfig>, ConfigError> {
        let shown = path.display().to_string();
        if !path.exists() {
            tracing::debug!(path = %shown, "config file not found, using defaults");
            return Ok(None);
        }

        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(shown.clone(), e))?;
        let partial = toml::from_str::<PartialAppConfig>(&content)
            .map_err(|e| ConfigError::TomlParse(shown.clone(), e))?;
        tracing::debug!(path = %shown, "config file loaded");
        Ok(Some(partial))
    }

    fn collect_env_vars() -> HashMap<String, String> {
        env::vars()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX) || EXTRA_ENV_KEYS.contains(&key.as_str()))
            .collect()
    }
}
