use crate::constants::{
    DEFAULT_ENDPOINT, DEFAULT_LOCALE, DEFAULT_RELAY_BIND, DEFAULT_SPEECH_COMMAND, GEMINI_API_URL,
};
use crate::errors::{MurmurError, MurmurResult};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL of the chat server; `/chat` is appended.
    pub endpoint: String,
    pub locale: String,
    pub speech_command: String,
    pub log_level: String,
    pub relay: RelayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    pub bind: String,
    pub api_url: String,
    pub api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            speech_command: DEFAULT_SPEECH_COMMAND.to_string(),
            log_level: "info".to_string(),
            relay: RelayConfig::default(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_RELAY_BIND.to_string(),
            api_url: GEMINI_API_URL.to_string(),
            api_key: String::new(),
        }
    }
}

impl Config {
    /// Loads the config file (creating it with defaults if missing), then
    /// applies environment overrides and validates the result.
    pub fn load(path: Option<&Path>) -> MurmurResult<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => get_config_path()?,
        };
        let mut config = load_or_create(&config_path)?;
        config.apply_overrides(|key| env::var(key).ok());
        validate_config(&config)?;
        Ok(config)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("MURMUR_ENDPOINT") {
            self.endpoint = v;
        }
        if let Some(v) = lookup("MURMUR_LOCALE") {
            self.locale = v;
        }
        if let Some(v) = lookup("MURMUR_SPEECH_COMMAND") {
            self.speech_command = v;
        }
        if let Some(v) = lookup("MURMUR_LOG_LEVEL") {
            self.log_level = v;
        }
        if let Some(v) = lookup("GEMINI_API_URL") {
            self.relay.api_url = v;
        }
        // plain API_KEY is accepted for existing .env files
        if let Some(v) = lookup("GEMINI_API_KEY").or_else(|| lookup("API_KEY")) {
            self.relay.api_key = v;
        }
    }
}

fn load_or_create(config_path: &Path) -> MurmurResult<Config> {
    if config_path.exists() {
        let config_str = fs::read_to_string(config_path).map_err(|e| {
            MurmurError::config_error(format!("Failed to read config file: {}", e))
        })?;
        return serde_json::from_str(&config_str)
            .map_err(|e| MurmurError::config_error(format!("Failed to parse config: {}", e)));
    }

    let config = Config::default();
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            MurmurError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }
    let config_str = serde_json::to_string_pretty(&config)
        .map_err(|e| MurmurError::config_error(format!("Failed to serialize config: {}", e)))?;
    fs::write(config_path, config_str)
        .map_err(|e| MurmurError::config_error(format!("Failed to write config file: {}", e)))?;
    Ok(config)
}

fn get_config_path() -> MurmurResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| MurmurError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("murmur").join("config.json"))
}

pub fn validate_config(config: &Config) -> MurmurResult<()> {
    let endpoint = config.endpoint.trim();
    if endpoint.is_empty() {
        return Err(MurmurError::config_error("Endpoint is required"));
    }
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        return Err(MurmurError::config_error(format!(
            "Endpoint must be an http(s) URL, got '{}'",
            endpoint
        )));
    }

    if config.locale.trim().is_empty() {
        return Err(MurmurError::config_error("Locale is required"));
    }

    Ok(())
}

/// The relay cannot start without an upstream key.
pub fn validate_relay(relay: &RelayConfig) -> MurmurResult<()> {
    if relay.api_key.trim().is_empty() {
        return Err(MurmurError::config_error(
            "API key is missing! Set GEMINI_API_KEY or API_KEY (a .env file works too).",
        ));
    }
    if relay.api_url.trim().is_empty() {
        return Err(MurmurError::config_error("Relay api_url is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config_valid() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_endpoint() {
        let mut config = Config::default();
        config.endpoint = "".to_string();
        assert!(validate_config(&config).is_err());

        config.endpoint = "ftp://example.com".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_invalid_locale() {
        let mut config = Config::default();
        config.locale = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_relay_requires_key() {
        let mut relay = RelayConfig::default();
        assert!(validate_relay(&relay).is_err());
        relay.api_key = "secret".to_string();
        assert!(validate_relay(&relay).is_ok());
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = load_or_create(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"endpoint": "http://chat.local:8080", "relay": {"bind": "127.0.0.1:9000"}}"#)
            .unwrap();

        let config = load_or_create(&path).unwrap();

        assert_eq!(config.endpoint, "http://chat.local:8080");
        assert_eq!(config.locale, DEFAULT_LOCALE);
        assert_eq!(config.relay.bind, "127.0.0.1:9000");
        assert_eq!(config.relay.api_url, GEMINI_API_URL);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_or_create(&path), Err(MurmurError::Config(_))));
    }

    #[test]
    fn test_env_overrides_file_values() {
        let vars: HashMap<&str, &str> = [
            ("MURMUR_ENDPOINT", "https://bot.example.com"),
            ("MURMUR_LOCALE", "fr-FR"),
            ("API_KEY", "from-dotenv"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.endpoint, "https://bot.example.com");
        assert_eq!(config.locale, "fr-FR");
        assert_eq!(config.relay.api_key, "from-dotenv");
        assert_eq!(config.speech_command, DEFAULT_SPEECH_COMMAND);
    }

    #[test]
    fn test_gemini_key_wins_over_generic_key() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            "GEMINI_API_KEY" => Some("gemini".to_string()),
            "API_KEY" => Some("generic".to_string()),
            _ => None,
        });
        assert_eq!(config.relay.api_key, "gemini");
    }
}
