use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;

const APP_DIR: &str = "diffrank";
const MAX_EXPIRY_HOURS: u64 = 24 * 365;
const DEFAULT_PROBLEMS_URL: &str = "https://leetcode.com/api/problems/all/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub cache_path: PathBuf,
    pub cache_expiry_hours: u64,
    pub output_csv: PathBuf,
    pub top_n: usize,
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            cache_expiry_hours: 24,
            output_csv: PathBuf::from("leetcode_sorted_problems.csv"),
            top_n: 20,
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PROBLEMS_URL.to_string(),
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

impl UserConfig {
    pub fn cache_expiry(&self) -> chrono::Duration {
        chrono::Duration::hours(self.cache_expiry_hours as i64)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cache_expiry_hours == 0 || self.cache_expiry_hours > MAX_EXPIRY_HOURS {
            return Err(ConfigError::Invalid(format!(
                "cache_expiry_hours must be between 1 and {}",
                MAX_EXPIRY_HOURS
            )));
        }
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be > 0".into()));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(ConfigError::Invalid("fetch.timeout_secs must be > 0".into()));
        }
        if self.fetch.url.trim().is_empty() {
            return Err(ConfigError::Invalid("fetch.url must not be empty".into()));
        }
        Ok(())
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_cache_path() -> PathBuf {
    match dirs::cache_dir() {
        Some(dir) => dir.join(APP_DIR).join("problems_cache.json"),
        None => PathBuf::from("leetcode_problems_cache.json"),
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.json"))
}

pub fn load_config() -> UserConfig {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => UserConfig::default(),
    }
}

pub fn load_config_from(path: &Path) -> UserConfig {
    if !path.exists() {
        return UserConfig::default();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
            return UserConfig::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
            UserConfig::default()
        }
    }
}

pub fn save_config(config: &UserConfig) -> Result<PathBuf, ConfigError> {
    let path = get_config_path().ok_or(ConfigError::NoConfigDir)?;
    save_config_to(&path, config)?;
    Ok(path)
}

pub fn save_config_to(path: &Path, config: &UserConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let contents = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;
    fs::write(path, contents).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
