use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

/// Wikipedia REST endpoint that page titles are appended to.
pub const DEFAULT_SUMMARY_BASE_URL: &str = "https://en.wikipedia.org/api/rest_v1/page/summary/";
pub const DEFAULT_USER_AGENT: &str = "arthist/1.0 (art history timeline)";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_TIMELINE_FILE: &str = "historyTimeline.json";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn default_summary_base_url() -> String {
    DEFAULT_SUMMARY_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// YAML config file structure. Every field is optional on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigYaml {
    #[serde(default = "default_summary_base_url")]
    pub summary_base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Path to the timeline document. None = `historyTimeline.json` in the working directory.
    #[serde(default)]
    pub timeline_path: Option<PathBuf>,
}

/// Application configuration
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base endpoint for page summary lookups, ending in `/`
    pub summary_base_url: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub timeline_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_base_url: default_summary_base_url(),
            user_agent: default_user_agent(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            timeline_path: PathBuf::from(DEFAULT_TIMELINE_FILE),
        }
    }
}

impl From<ConfigYaml> for Config {
    fn from(yaml: ConfigYaml) -> Self {
        Self {
            summary_base_url: normalize_base_url(&yaml.summary_base_url),
            user_agent: yaml.user_agent,
            request_timeout_secs: yaml.request_timeout_secs,
            timeline_path: yaml
                .timeline_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TIMELINE_FILE)),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let dev_mode = std::env::var("ARTHIST_DEV_MODE").is_ok() || dotenvy::dotenv().is_ok();
        if dev_mode {
            info!("Dev mode activated - loading from environment");
            Self::from_env()
        } else {
            Self::from_config_file()
        }
    }

    fn from_env() -> Self {
        let defaults = Self::default();
        let summary_base_url = env_var("ARTHIST_SUMMARY_BASE_URL")
            .map(|u| normalize_base_url(&u))
            .unwrap_or(defaults.summary_base_url);
        let user_agent = env_var("ARTHIST_USER_AGENT").unwrap_or(defaults.user_agent);
        let request_timeout_secs = match env_var("ARTHIST_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Ignoring invalid ARTHIST_REQUEST_TIMEOUT_SECS '{}'", raw);
                defaults.request_timeout_secs
            }),
            None => defaults.request_timeout_secs,
        };
        let timeline_path = env_var("ARTHIST_TIMELINE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.timeline_path);

        Self {
            summary_base_url,
            user_agent,
            request_timeout_secs,
            timeline_path,
        }
    }

    fn from_config_file() -> Self {
        let Some(dir) = config_dir() else {
            info!("No config directory on this platform, using defaults");
            return Self::default();
        };
        match Self::load_from_dir(&dir) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load config from {}: {}", dir.display(), e);
                Self::default()
            }
        }
    }

    /// Load `config.yaml` from `dir`. A missing file yields the defaults.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join("config.yaml");
        if !config_path.exists() {
            info!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        info!("Loading config from {}", config_path.display());
        let content = std::fs::read_to_string(&config_path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        let yaml: ConfigYaml =
            serde_yaml::from_str(content).map_err(|e| ConfigError::Serialization(e.to_string()))?;
        Ok(yaml.into())
    }

    pub fn to_yaml(&self) -> ConfigYaml {
        ConfigYaml {
            summary_base_url: self.summary_base_url.clone(),
            user_agent: self.user_agent.clone(),
            request_timeout_secs: self.request_timeout_secs,
            timeline_path: Some(self.timeline_path.clone()),
        }
    }

    /// Write this config as `config.yaml` inside `dir`, creating the directory if needed.
    pub fn save_to(&self, dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(dir)?;
        let yaml = serde_yaml::to_string(&self.to_yaml())
            .map_err(|e| ConfigError::Serialization(e.to_string()))?;
        std::fs::write(dir.join("config.yaml"), yaml)?;
        Ok(())
    }
}

/// `~/.config/arthist` on Linux, the platform equivalent elsewhere.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("arthist"))
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Titles are appended directly, so the base must end with a slash.
pub fn normalize_base_url(url: &str) -> String {
    if url.ends_with('/') {
        url.to_string()
    } else {
        format!("{}/", url)
    }
}
