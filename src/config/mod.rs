use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::services::calendar_sync::google::{DEFAULT_API_BASE, PRIMARY_CALENDAR};

/// Overrides `google.access_token` from the config file when set.
pub const TOKEN_ENV_VAR: &str = "DAY_JOURNAL_GOOGLE_TOKEN";

const QUALIFIER: &str = "com";
const ORGANIZATION: &str = "DayJournal";
const APPLICATION: &str = "DayJournal";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub google: GoogleConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoogleConfig {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_calendar_id")]
    pub calendar_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

fn default_calendar_id() -> String {
    PRIMARY_CALENDAR.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            calendar_id: default_calendar_id(),
            api_base: default_api_base(),
        }
    }
}

impl Config {
    /// Load from the platform config directory. A missing file yields the
    /// defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }

    /// The access token to use, preferring the environment over the file.
    pub fn access_token(&self) -> Option<String> {
        resolve_token(std::env::var(TOKEN_ENV_VAR).ok(), self.google.access_token.as_deref())
    }

    pub fn is_sync_configured(&self) -> bool {
        self.access_token().is_some()
    }
}

fn resolve_token(env_value: Option<String>, file_value: Option<&str>) -> Option<String> {
    env_value
        .filter(|token| !token.trim().is_empty())
        .or_else(|| {
            file_value
                .filter(|token| !token.trim().is_empty())
                .map(str::to_string)
        })
        .map(|token| token.trim().to_string())
}

/// `journal.db` next to the binary in debug builds, the platform data
/// directory otherwise.
pub fn database_path() -> String {
    #[cfg(debug_assertions)]
    {
        "journal.db".to_string()
    }

    #[cfg(not(debug_assertions))]
    {
        if let Some(proj_dirs) = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION) {
            let data_dir = proj_dirs.data_dir();
            if let Err(e) = fs::create_dir_all(data_dir) {
                log::warn!("Failed to create data directory {}: {}", data_dir.display(), e);
            }
            data_dir.join("journal.db").to_string_lossy().to_string()
        } else {
            "journal.db".to_string()
        }
    }
}
