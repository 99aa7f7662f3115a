//! Configuration management for storefront services

use crate::error::{Result, StorefrontError};
use std::env;
use std::str::FromStr;

/// Port the storefront API has always listened on.
pub const DEFAULT_HTTP_BIND: &str = "0.0.0.0:4000";

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub service_name: String,
    pub http_bind: String,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        let http_bind = env_or("HTTP_BIND", DEFAULT_HTTP_BIND);
        http_bind
            .parse::<std::net::SocketAddr>()
            .map_err(|e| StorefrontError::Config(format!("Invalid HTTP_BIND: {}", e)))?;

        Ok(Self {
            service_name: env_or("SERVICE_NAME", "storefront"),
            http_bind,
        })
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "storefront".to_string(),
            http_bind: DEFAULT_HTTP_BIND.to_string(),
        }
    }
}

/// Read an environment variable, falling back to `default` when unset.
pub fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an environment variable; unset yields `default`, garbage is a config error.
pub fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| StorefrontError::Config(format!("Invalid {}: {}", key, e))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_is_port_4000() {
        let config = ServiceConfig::default();
        assert!(config.http_bind.ends_with(":4000"));
    }

    #[test]
    fn test_env_parse_falls_back_when_unset() {
        let value: usize = env_parse("STOREFRONT_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}
