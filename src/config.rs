//! Environment-driven configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::domain::value_objects::Capacity;
use crate::query::filter::MatchMode;
use crate::query::ListingDefaults;
use crate::suggestions;

#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub catalog: CatalogConfig,
    pub stores: StoreConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub path: Option<PathBuf>,
    pub products: ListingDefaults,
    pub browse: ListingDefaults,
    pub suggestion_cap: usize,
    pub suggestion_delay: Duration,
}

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub path: Option<PathBuf>,
    pub history_capacity: Capacity,
    pub cart_add_delay: Duration,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub filter: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for `{key}`: `{value}`")]
    Invalid { key: &'static str, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig { bind_address: "0.0.0.0".to_string(), port: 8083 },
            catalog: CatalogConfig {
                path: None,
                products: ListingDefaults::products(),
                browse: ListingDefaults::catalog(),
                suggestion_cap: suggestions::DEFAULT_CAP,
                suggestion_delay: Duration::from_millis(1000),
            },
            stores: StoreConfig {
                path: None,
                history_capacity: Capacity::default(),
                cart_add_delay: Duration::from_millis(1000),
            },
            logging: LoggingConfig { filter: "info".to_string(), format: LogFormat::Pretty },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`, falling back to defaults for unset or
    /// blank variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(address) = get("BIND_ADDRESS") {
            config.server.bind_address = address;
        }
        if let Some(port) = get("PORT") {
            config.server.port = parse("PORT", port)?;
        }

        config.catalog.path = get("CATALOG_PATH").map(PathBuf::from);
        if let Some(limit) = get("PRODUCTS_PAGE_SIZE") {
            config.catalog.products.limit = parse("PRODUCTS_PAGE_SIZE", limit)?;
        }
        if let Some(limit) = get("CATALOG_PAGE_SIZE") {
            config.catalog.browse.limit = parse("CATALOG_PAGE_SIZE", limit)?;
        }
        if let Some(mode) = get("CATEGORY_MATCH") {
            let mode: MatchMode = parse("CATEGORY_MATCH", mode)?;
            config.catalog.products.category_match = mode;
            config.catalog.browse.category_match = mode;
        }
        if let Some(mode) = get("INSTRUCTOR_MATCH") {
            let mode: MatchMode = parse("INSTRUCTOR_MATCH", mode)?;
            config.catalog.products.instructor_match = mode;
            config.catalog.browse.instructor_match = mode;
        }
        if let Some(cap) = get("SUGGESTION_CAP") {
            config.catalog.suggestion_cap = parse("SUGGESTION_CAP", cap)?;
        }
        if let Some(ms) = get("SUGGESTION_DELAY_MS") {
            config.catalog.suggestion_delay = Duration::from_millis(parse("SUGGESTION_DELAY_MS", ms)?);
        }

        config.stores.path = get("STORAGE_PATH").map(PathBuf::from);
        if let Some(cap) = get("HISTORY_CAP") {
            config.stores.history_capacity = Capacity::new(parse("HISTORY_CAP", cap)?);
        }
        if let Some(ms) = get("CART_ADD_DELAY_MS") {
            config.stores.cart_add_delay = Duration::from_millis(parse("CART_ADD_DELAY_MS", ms)?);
        }

        if let Some(filter) = get("RUST_LOG") {
            config.logging.filter = filter;
        }
        if let Some(format) = get("LOG_FORMAT") {
            config.logging.format = format.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, limit) in [("PRODUCTS_PAGE_SIZE", self.catalog.products.limit), ("CATALOG_PAGE_SIZE", self.catalog.browse.limit)] {
            if !(1..=crate::query::pagination::MAX_LIMIT).contains(&limit) {
                return Err(ConfigError::Validation(format!("{key} must be between 1 and 100, got {limit}")));
            }
        }
        if self.catalog.suggestion_cap == 0 {
            return Err(ConfigError::Validation("SUGGESTION_CAP must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.bind_address, self.server.port)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8083");
        assert_eq!(config.catalog.products.limit, 9);
        assert_eq!(config.catalog.browse.limit, 12);
        assert_eq!(config.catalog.products.category_match, MatchMode::Exact);
        assert_eq!(config.catalog.suggestion_cap, 6);
        assert_eq!(config.catalog.suggestion_delay, Duration::from_millis(1000));
        assert_eq!(config.stores.history_capacity.value(), 6);
        assert!(config.stores.path.is_none());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "9000"),
            ("CATEGORY_MATCH", "substring"),
            ("HISTORY_CAP", "10"),
            ("SUGGESTION_DELAY_MS", "0"),
            ("STORAGE_PATH", "/tmp/courses.json"),
            ("LOG_FORMAT", "JSON"),
            ("CATALOG_PAGE_SIZE", "  "),
        ])
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.catalog.browse.category_match, MatchMode::Substring);
        assert_eq!(config.catalog.products.instructor_match, MatchMode::Exact);
        assert_eq!(config.stores.history_capacity.value(), 10);
        assert_eq!(config.catalog.suggestion_delay, Duration::ZERO);
        assert_eq!(config.stores.path, Some(PathBuf::from("/tmp/courses.json")));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.catalog.browse.limit, 12);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for `PORT`: `eighty`");
        assert!(load(&[("INSTRUCTOR_MATCH", "fuzzy")]).is_err());
        assert!(load(&[("LOG_FORMAT", "xml")]).is_err());
        assert!(load(&[("PRODUCTS_PAGE_SIZE", "0")]).is_err());
        assert!(load(&[("CATALOG_PAGE_SIZE", "101")]).is_err());
        assert!(load(&[("SUGGESTION_CAP", "0")]).is_err());
    }
}
