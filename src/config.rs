use crate::error::{GeoError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 20;
pub const BASE_URL_ENV: &str = "GEOGENIE_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub access_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            access_token: None,
        }
    }
}

impl Config {
    /// Load from the user config file, then apply the environment override.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url.trim().to_string();
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        if config.timeout_seconds == 0 {
            return Err(GeoError::Config(format!(
                "timeout_seconds must be at least one second in {}",
                path.display()
            )));
        }
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GeoError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("geogenie").join("config.json"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn with_base_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.base_url = url;
        }
        self
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(GeoError::Config(format!("base URL must be http(s): {}", url)));
        }
        self.base_url = url.trim_end_matches('/').to_string();
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(GeoError::Config("timeout must be at least one second".into()));
        }
        self.timeout_seconds = seconds;
        self.save()
    }

    /// Take the session token from a login payload, if it carries one.
    /// Returns whether a token was found; nothing is saved.
    pub fn apply_login(&mut self, payload: &serde_json::Value) -> bool {
        match geogenie_common::access_token(payload) {
            Some(token) => {
                self.access_token = Some(token);
                true
            }
            None => false,
        }
    }

    pub fn set_access_token(&mut self, token: Option<String>) -> Result<()> {
        self.access_token = token;
        self.save()
    }
}
