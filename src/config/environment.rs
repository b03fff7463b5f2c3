//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::QueryCacheConfig;
use crate::utils::errors::{config_error, AppResult};
use crate::views::pagination::PageSize;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub api_base_url: String,
    pub http_timeout: Duration,
    pub query_cache: QueryCacheConfig,
    pub default_page_size: PageSize,
    pub log_level: tracing::Level,
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración desde una fuente arbitraria de variables
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("FLEET_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| config_error("FLEET_API_BASE_URL must be set"))?;

        let http_timeout_secs: u64 = parse_or(&lookup, "HTTP_TIMEOUT_SECS", 30)?;
        let max_entries: usize = parse_or(&lookup, "QUERY_CACHE_MAX_ENTRIES", 500)?;
        let stale_after = match lookup("QUERY_CACHE_STALE_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_value(
                "QUERY_CACHE_STALE_SECS",
                &raw,
            )?)),
            None => None,
        };

        let page_size: usize = parse_or(&lookup, "DEFAULT_PAGE_SIZE", 10)?;
        let default_page_size = PageSize::try_from(page_size)
            .map_err(|_| config_error("DEFAULT_PAGE_SIZE must be one of 5, 10, 20, 50"))?;

        let log_level = match lookup("LOG_LEVEL") {
            Some(raw) => tracing::Level::from_str(raw.trim())
                .map_err(|_| config_error("LOG_LEVEL must be one of trace, debug, info, warn, error"))?,
            None => tracing::Level::INFO,
        };

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
            http_timeout: Duration::from_secs(http_timeout_secs),
            query_cache: QueryCacheConfig {
                max_entries,
                stale_after,
            },
            default_page_size,
            log_level,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => parse_value(key, &raw),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| config_error(&format!("{} must be a valid number", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            EnvironmentConfig::from_lookup(lookup_from(&[("FLEET_API_BASE_URL", "https://api.example.com/api/v1/")]))
                .unwrap();

        assert_eq!(config.api_base_url, "https://api.example.com/api/v1");
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.query_cache.max_entries, 500);
        assert!(config.query_cache.stale_after.is_none());
        assert_eq!(config.default_page_size, PageSize::Ten);
        assert_eq!(config.log_level, tracing::Level::INFO);
        assert!(config.is_development());
    }

    #[test]
    fn test_missing_base_url_is_an_error() {
        let err = EnvironmentConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: FLEET_API_BASE_URL must be set");
    }

    #[test]
    fn test_overrides_and_invalid_values() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("FLEET_API_BASE_URL", "http://localhost:5000/api"),
            ("ENVIRONMENT", "production"),
            ("HTTP_TIMEOUT_SECS", "5"),
            ("QUERY_CACHE_STALE_SECS", "60"),
            ("DEFAULT_PAGE_SIZE", "20"),
            ("LOG_LEVEL", "debug"),
        ]))
        .unwrap();
        assert!(config.is_production());
        assert_eq!(config.http_timeout, Duration::from_secs(5));
        assert_eq!(config.query_cache.stale_after, Some(Duration::from_secs(60)));
        assert_eq!(config.default_page_size, PageSize::Twenty);
        assert_eq!(config.log_level, tracing::Level::DEBUG);

        let bad_page = EnvironmentConfig::from_lookup(lookup_from(&[
            ("FLEET_API_BASE_URL", "http://localhost:5000/api"),
            ("DEFAULT_PAGE_SIZE", "7"),
        ]));
        assert!(bad_page.is_err());

        let bad_timeout = EnvironmentConfig::from_lookup(lookup_from(&[
            ("FLEET_API_BASE_URL", "http://localhost:5000/api"),
            ("HTTP_TIMEOUT_SECS", "soon"),
        ]));
        assert!(bad_timeout.is_err());
    }
}
