use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::base_url::{resolve_base_url, BACKEND_URL_ENV};

/// How a saved patient is merged into the sidebar list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertMode {
    /// Replace an entry with the same id, otherwise prepend.
    #[default]
    Replace,
    /// Always prepend, even if the id is already listed.
    Prepend,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub backend_url: Option<String>,
    #[serde(default = "default_proxy_origin")]
    pub proxy_origin: String,
    #[serde(default)]
    pub upsert_mode: UpsertMode,
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            proxy_origin: default_proxy_origin(),
            upsert_mode: UpsertMode::default(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Base URL for REST calls. The environment variable beats the config file.
    pub fn base_url(&self) -> String {
        self.base_url_with(std::env::var(BACKEND_URL_ENV).ok().as_deref())
    }

    fn base_url_with(&self, from_env: Option<&str>) -> String {
        let from_env = from_env.filter(|v| !v.trim().is_empty());
        resolve_base_url(from_env.or(self.backend_url.as_deref()))
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| data_dir().join("medchat.log"))
    }
}

fn default_proxy_origin() -> String {
    "http://localhost:5173".to_string()
}

pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".medchat")
}

fn config_path() -> PathBuf {
    data_dir().join("config.toml")
}

pub fn load_config() -> Result<AppConfig> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: AppConfig =
        toml::from_str(&contents).with_context(|| "Failed to parse config.toml")?;
    Ok(config)
}
