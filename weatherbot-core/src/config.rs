use anyhow::{Context, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

pub const ENV_WEATHER_KEY: &str = "KEY_WEATHER";
pub const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
pub const ENV_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OpenWeatherConfig {
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TelegramConfig {
    pub bot_token: Option<String>,
    pub chat_id: Option<String>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// city = "Madrid"
/// request = "WF"
///
/// [openweather]
/// api_key = "..."
///
/// [telegram]
/// bot_token = "..."
/// chat_id = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Default city name or numeric id.
    pub city: Option<String>,

    /// Default request mode (`W`, `F`, `WF`).
    pub request: Option<String>,

    #[serde(default)]
    pub openweather: OpenWeatherConfig,

    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// Credentials a run needs, all present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: String,
    pub bot_token: String,
    pub chat_id: String,
}

impl Config {
    /// Load config from the platform config dir, or an empty default if it doesn't exist yet.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config dir, creating parent directories as needed.
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> anyhow::Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherbot", "weatherbot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overrides credentials with values from `lookup`. Empty values are ignored.
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_WEATHER_KEY) {
            self.openweather.api_key = Some(v);
        }
        if let Some(v) = get(ENV_BOT_TOKEN) {
            self.telegram.bot_token = Some(v);
        }
        if let Some(v) = get(ENV_CHAT_ID) {
            self.telegram.chat_id = Some(v);
        }
    }

    /// Overrides credentials from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// The OpenWeather key alone, for runs that do not send anything.
    pub fn api_key(&self) -> Result<String> {
        require(&self.openweather.api_key, "openweather.api_key", ENV_WEATHER_KEY)
    }

    /// Checks that every credential is present.
    pub fn settings(&self) -> Result<Settings> {
        Ok(Settings {
            api_key: self.api_key()?,
            bot_token: require(&self.telegram.bot_token, "telegram.bot_token", ENV_BOT_TOKEN)?,
            chat_id: require(&self.telegram.chat_id, "telegram.chat_id", ENV_CHAT_ID)?,
        })
    }
}

fn require(value: &Option<String>, name: &'static str, env: &'static str) -> Result<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or(Error::MissingSetting { name, env })
}
