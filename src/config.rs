//! User configuration
//!
//! Settings are read from a TOML file, by default
//! `$XDG_CONFIG_HOME/varos/config.toml` (`~/.config/varos/config.toml`),
//! then overridden by `VAROS_*` environment variables. A missing or broken
//! file is not fatal: the defaults are used and a warning is logged.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// A city entry in the weather list: what to show, and what to query
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct City {
    pub name: String,
    pub query: String,
}

impl City {
    pub fn new(name: &str, query: &str) -> Self {
        Self {
            name: name.to_string(),
            query: query.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    pub base_url: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub cities: Vec<City>,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WEATHER_URL.to_string(),
            api_key: None,
            timeout_secs: 10,
            cities: vec![
                City::new("Delhi", "delhi"),
                City::new("Noida", "noida"),
                City::new("Mumbai", "mumbai"),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start in the light theme
    pub light_theme: bool,
    /// Folder the gallery opens first
    pub gallery_dir: Option<PathBuf>,
    pub weather: WeatherSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            light_theme: true,
            gallery_dir: None,
            weather: WeatherSettings::default(),
        }
    }
}

impl Settings {
    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("varos");
            path.push("config.toml");
            path
        })
    }

    /// Parse a config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("VAROS_WEATHER_API_KEY") {
            self.weather.api_key = Some(v);
        }
        if let Some(v) = lookup("VAROS_WEATHER_URL") {
            self.weather.base_url = v;
        }
        if let Some(v) = lookup("VAROS_GALLERY_DIR") {
            self.gallery_dir = Some(PathBuf::from(v));
        }
    }

    /// Directory the gallery should list on start-up
    pub fn gallery_start_dir(&self) -> PathBuf {
        self.gallery_dir
            .clone()
            .or_else(dirs::picture_dir)
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Load settings from `explicit` (or the default path) plus the environment
pub fn load_settings(explicit: Option<&Path>) -> Settings {
    let path = explicit.map(Path::to_path_buf).or_else(Settings::default_path);

    let mut settings = match path {
        Some(path) if path.exists() => match Settings::from_file(&path) {
            Ok(settings) => {
                info!("📁 Config loaded from: {}", path.display());
                settings
            }
            Err(e) => {
                warn!("⚠️  {}; using defaults", e);
                Settings::default()
            }
        },
        Some(path) => {
            if explicit.is_some() {
                warn!("⚠️  Config file {} does not exist; using defaults", path.display());
            }
            Settings::default()
        }
        None => Settings::default(),
    };

    settings.apply_env(|key| std::env::var(key).ok());
    settings
}
