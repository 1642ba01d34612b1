use crate::api::client::FIGMA_API_BASE;
use crate::prompt::DesignKind;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Figma token used when no environment variable is set
    /// WARNING: Stored in plaintext
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figma_token: Option<String>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DownloadConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default)]
    pub default_kind: DesignKind,
}

fn default_base_url() -> String {
    FIGMA_API_BASE.to_string()
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "figprompt").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load config from file, returning default if not found
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Token stored in the config file, ignoring blank values
    pub fn token(&self) -> Option<&str> {
        self.figma_token.as_deref().filter(|t| !t.trim().is_empty())
    }
}
