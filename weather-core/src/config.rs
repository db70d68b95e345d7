use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Default public provider endpoint.
pub const DEFAULT_BASE_URL: &str = "https://wttr.in";

/// Environment variable overriding the provider base URL at startup.
/// This is the single override point for aiming the server at a mock or
/// alternate provider.
pub const BASE_URL_ENV: &str = "WEATHER_BASE_URL";

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional provider base URL, e.g. "http://localhost:8080".
    ///
    /// Example TOML:
    /// base_url = "https://wttr.in"
    pub base_url: Option<String>,
}

impl Config {
    /// Resolve the effective provider base URL.
    ///
    /// Precedence: `WEATHER_BASE_URL` environment variable, then the config
    /// file, then the public default.
    pub fn resolved_base_url(&self) -> String {
        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.is_empty() {
                return url;
            }
        }

        self.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-mcp", "weather-mcp")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_resolves_public_endpoint() {
        let cfg = Config::default();
        assert_eq!(cfg.resolved_base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn configured_base_url_wins_over_default() {
        let cfg = Config { base_url: Some("http://localhost:8080".to_string()) };
        assert_eq!(cfg.resolved_base_url(), "http://localhost:8080");
    }

    #[test]
    fn config_parses_from_toml() {
        let cfg: Config = toml::from_str("base_url = \"http://mock.test\"").expect("valid toml");
        assert_eq!(cfg.base_url.as_deref(), Some("http://mock.test"));
    }

    #[test]
    fn empty_toml_is_a_valid_config() {
        let cfg: Config = toml::from_str("").expect("empty toml");
        assert!(cfg.base_url.is_none());
    }
}
