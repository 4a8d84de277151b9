//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Exchange-rate provider configuration.
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Rate cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Exchange-rate provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the rate endpoint; the base currency code is appended
    /// as the final path segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connect timeout in seconds for provider requests.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Receive timeout in seconds for provider requests.
    #[serde(default = "default_receive_timeout")]
    pub receive_timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://open.er-api.com/v6/latest".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_receive_timeout() -> u64 {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            receive_timeout_secs: default_receive_timeout(),
        }
    }
}

/// Rate cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of cached base currencies.
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
}

fn default_max_entries() -> u64 {
    64
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("CAMBIO").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.provider.base_url, "https://open.er-api.com/v6/latest");
        assert_eq!(config.provider.connect_timeout_secs, 5);
        assert_eq!(config.provider.receive_timeout_secs, 10);
        assert_eq!(config.cache.max_entries, 64);
    }

    #[test]
    fn test_load_with_no_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "CAMBIO__PROVIDER__BASE_URL",
                "CAMBIO__PROVIDER__CONNECT_TIMEOUT_SECS",
                "CAMBIO__CACHE__MAX_ENTRIES",
            ],
            || {
                let config = AppConfig::load().expect("load should succeed");
                assert_eq!(config.provider.base_url, "https://open.er-api.com/v6/latest");
                assert_eq!(config.cache.max_entries, 64);
            },
        );
    }

    #[test]
    fn test_env_overrides() {
        temp_env::with_vars(
            [
                ("CAMBIO__PROVIDER__BASE_URL", Some("http://localhost:9999/v6/latest")),
                ("CAMBIO__PROVIDER__RECEIVE_TIMEOUT_SECS", Some("30")),
            ],
            || {
                let config = AppConfig::load().expect("load should succeed");
                assert_eq!(config.provider.base_url, "http://localhost:9999/v6/latest");
                assert_eq!(config.provider.receive_timeout_secs, 30);
                // Untouched fields keep their defaults.
                assert_eq!(config.provider.connect_timeout_secs, 5);
            },
        );
    }
}
