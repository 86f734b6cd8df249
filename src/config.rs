use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";

const ENV_API_URL: &str = "CSSD_ROSTER_API_URL";
const ENV_TOKEN: &str = "CSSD_ROSTER_TOKEN";

/// Platform directories for config, data and logs
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("id", "cssd", "cssd-roster")
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the roster backend, e.g. `http://host/api`
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_token: Option<String>,
    /// Employee number (NIP) of the person using this installation
    #[serde(default)]
    pub user_nip: Option<String>,
    /// Whether this user may edit schedules and legend entries
    #[serde(default)]
    pub can_edit: bool,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: default_api_url(),
            api_token: None,
            user_nip: None,
            can_edit: false,
        }
    }
}

impl Config {
    pub fn get_config_path() -> Option<PathBuf> {
        project_dirs().map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
    }

    /// Optional `holidays.json` next to the config file
    pub fn get_holidays_path() -> Option<PathBuf> {
        project_dirs().map(|proj_dirs| proj_dirs.config_dir().join("holidays.json"))
    }

    /// Load the config file, falling back to defaults when it does not exist,
    /// then apply environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path().ok_or(ConfigError::NoConfigDirectory)?;
        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Config::default()
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config_data = fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", path.display(), e)))?;

        serde_json::from_str(&config_data)
            .map_err(|e| ConfigError::LoadFailed(format!("{}: {}", path.display(), e)))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::get_config_path().ok_or(ConfigError::NoConfigDirectory)?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::DirectoryCreationFailed(e.to_string()))?;
        }

        let config_data = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        fs::write(path, config_data).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    /// Environment variables win over the file
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
        if let Ok(token) = std::env::var(ENV_TOKEN) {
            if !token.trim().is_empty() {
                self.api_token = Some(token);
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_url.trim();
        if url.is_empty() || !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        Ok(())
    }

    /// Whether `employee_id` is the configured user
    pub fn is_me(&self, employee_id: &str) -> bool {
        self.user_nip
            .as_deref()
            .map(|nip| nip.trim() == employee_id.trim())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            api_url: "https://roster.example/api".to_string(),
            api_token: Some("secret".to_string()),
            user_nip: Some("198001012005011001".to_string()),
            can_edit: true,
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"user_nip": "42"}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_url, DEFAULT_API_URL);
        assert!(!loaded.can_edit);
        assert!(loaded.is_me(" 42 "));
        assert!(!loaded.is_me("43"));
    }

    #[test]
    fn test_corrupt_file_is_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed(_))
        ));
    }

    #[test]
    fn test_validate_url() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.api_url = "/api".to_string();
        assert!(config.validate().is_err());
    }
}
