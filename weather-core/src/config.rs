use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::provider::ProviderId;

pub const DEFAULT_CITY: &str = "London";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Optional default provider id, "mock" or "openweather". Unset means "mock".
    pub default_provider: Option<String>,

    /// City looked up when the widget starts.
    #[serde(default = "default_city")]
    pub default_city: String,

    /// Request timeout for networked providers.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fixed seed for the mock provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_provider: None,
            default_city: default_city(),
            timeout_secs: default_timeout_secs(),
            seed: None,
            providers: HashMap::new(),
        }
    }
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        match self.default_provider.as_deref() {
            Some(s) => ProviderId::try_from(s),
            None => Ok(ProviderId::Mock),
        }
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
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

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Convenience helper: set/replace a provider API key and optionally set default provider.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderId;

    #[test]
    fn default_provider_is_mock_when_not_set() {
        let cfg = Config::default();
        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::Mock);
        assert_eq!(cfg.default_city, "London");
        assert_eq!(cfg.timeout_secs, 10);
    }

    #[test]
    fn unknown_default_provider_is_an_error() {
        let cfg = Config { default_provider: Some("nope".into()), ..Config::default() };
        let err = cfg.default_provider_id().unwrap_err();
        assert!(err.to_string().contains("Unknown provider 'nope'"));
    }

    #[test]
    fn set_api_key_and_default_for_provider() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OPEN_KEY".into());

        let default = cfg.default_provider_id().expect("default provider must exist");
        assert_eq!(default, ProviderId::OpenWeather);

        let key = cfg.provider_api_key(ProviderId::OpenWeather);
        assert_eq!(key, Some("OPEN_KEY"));
    }

    #[test]
    fn upsert_does_not_override_existing_default() {
        let mut cfg = Config::default();
        cfg.set_default_provider(ProviderId::Mock);

        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "OPEN_KEY".into());

        assert_eq!(cfg.default_provider_id().unwrap(), ProviderId::Mock);
        assert_eq!(cfg.provider_api_key(ProviderId::OpenWeather), Some("OPEN_KEY"));
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str("seed = 9\n").expect("valid toml");

        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.default_city, DEFAULT_CITY);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(cfg.providers.is_empty());
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let path = std::env::temp_dir()
            .join(format!("weather-config-test-{}", std::process::id()))
            .join("config.toml");

        let mut cfg = Config { default_city: "Tokyo".into(), ..Config::default() };
        cfg.upsert_provider_api_key(ProviderId::OpenWeather, "K".into());
        cfg.save_to(&path).expect("save");

        let loaded = Config::load_from(&path).expect("load");
        assert_eq!(loaded.default_city, "Tokyo");
        assert_eq!(loaded.provider_api_key(ProviderId::OpenWeather), Some("K"));

        let _ = fs::remove_dir_all(path.parent().expect("has parent"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let cfg = Config::load_from(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert_eq!(cfg.default_provider, None);
    }
}
