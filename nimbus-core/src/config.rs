use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    locate::DEFAULT_LOCATION, model::Coordinates, provider::weatherapi::DEFAULT_BASE_URL,
};

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "NIMBUS_API_KEY";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_GEOLOCATION_TIMEOUT_SECS: u64 = 5;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_location = "Lisbon"
/// latitude = 38.72
/// longitude = -9.14
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// WeatherAPI.com key. Optional when `base_url` points at a proxy that adds it.
    pub api_key: Option<String>,

    /// Override for the API base, e.g. a proxy holding the key server-side.
    pub base_url: Option<String>,

    /// Fallback when no location can be determined.
    pub default_location: Option<String>,

    /// Fixed coordinates used instead of an IP lookup.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    pub request_timeout_secs: Option<u64>,
    pub geolocation_timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    /// `NIMBUS_API_KEY` wins over the stored key.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let cfg = Self::load_from(&path)?;

        Ok(cfg.with_env_api_key(std::env::var(API_KEY_ENV).ok()))
    }

    /// Replace the stored key with `env` unless it is unset or blank.
    pub fn with_env_api_key(mut self, env: Option<String>) -> Self {
        if let Some(key) = env.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
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

    pub fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "nimbus", "nimbus")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn default_location(&self) -> &str {
        self.default_location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }

    /// Configured coordinates, only when both halves are present.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => None,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(
            self.geolocation_timeout_secs
                .unwrap_or(DEFAULT_GEOLOCATION_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.default_location(), "New York");
        assert_eq!(cfg.coordinates(), None);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.geolocation_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert_eq!(cfg.api_key(), None);

        cfg.set_api_key("KEY".into());
        assert_eq!(cfg.api_key(), Some("KEY"));
    }

    #[test]
    fn env_key_overrides_stored_key() {
        let stored = Config {
            api_key: Some("STORED".into()),
            ..Config::default()
        };

        let cfg = stored.clone().with_env_api_key(Some("FROM_ENV".into()));
        assert_eq!(cfg.api_key(), Some("FROM_ENV"));

        let cfg = Config::default().with_env_api_key(Some("FROM_ENV".into()));
        assert_eq!(cfg.api_key(), Some("FROM_ENV"));
    }

    #[test]
    fn blank_or_unset_env_key_keeps_stored_key() {
        let stored = Config {
            api_key: Some("STORED".into()),
            ..Config::default()
        };

        let cfg = stored.clone().with_env_api_key(Some("  ".into()));
        assert_eq!(cfg.api_key(), Some("STORED"));

        let cfg = stored.with_env_api_key(None);
        assert_eq!(cfg.api_key(), Some("STORED"));

        assert_eq!(Config::default().with_env_api_key(Some(String::new())).api_key(), None);
    }

    #[test]
    fn coordinates_need_both_halves() {
        let cfg = Config {
            latitude: Some(38.72),
            ..Config::default()
        };
        assert_eq!(cfg.coordinates(), None);

        let cfg = Config {
            latitude: Some(38.72),
            longitude: Some(-9.14),
            ..Config::default()
        };
        assert_eq!(
            cfg.coordinates(),
            Some(Coordinates { latitude: 38.72, longitude: -9.14 })
        );
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_preserves_fields() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            api_key: Some("KEY".into()),
            default_location: Some("Lisbon".into()),
            geolocation_timeout_secs: Some(2),
            ..Config::default()
        };
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.default_location(), "Lisbon");
    }

    #[test]
    fn unparsable_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").expect("write");

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
