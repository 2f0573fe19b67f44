//! Environment-driven configuration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_KITTEN_URL: &str = "https://placekitten.com";
pub const DEFAULT_BACON_URL: &str = "https://baconmockup.com";
pub const DEFAULT_PLACEHOLDER_URL: &str = "https://placehold.it";
pub const DEFAULT_RANDOM_IMAGE_URL: &str = "https://lorempixel.com";
pub const DEFAULT_TEXT_URL: &str = "https://loripsum.net/api";

const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Base URLs of the remote providers, without a trailing slash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderEndpoints {
    pub kitten: String,
    pub bacon: String,
    pub placeholder: String,
    pub random_image: String,
    pub text: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        ProviderEndpoints {
            kitten: DEFAULT_KITTEN_URL.to_string(),
            bacon: DEFAULT_BACON_URL.to_string(),
            placeholder: DEFAULT_PLACEHOLDER_URL.to_string(),
            random_image: DEFAULT_RANDOM_IMAGE_URL.to_string(),
            text: DEFAULT_TEXT_URL.to_string(),
        }
    }
}

impl ProviderEndpoints {
    /// Point every provider at one host, e.g. a local mock server
    pub fn all_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        ProviderEndpoints {
            kitten: base.to_string(),
            bacon: base.to_string(),
            placeholder: base.to_string(),
            random_image: base.to_string(),
            text: format!("{base}/api"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// YAML file replacing the built-in name and business-word pools
    pub pools_path: Option<String>,
    /// Fixed seed for reproducible draws
    pub seed: Option<u64>,
    pub endpoints: ProviderEndpoints,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: default_user_agent(),
            pools_path: None,
            seed: None,
            endpoints: ProviderEndpoints::default(),
        }
    }
}

fn default_user_agent() -> String {
    format!("placekit/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ProviderEndpoints::default();
        let endpoint = |key: &str, default: String| {
            lookup(key)
                .map(|url| url.trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty())
                .unwrap_or(default)
        };

        let request_timeout_secs = match lookup("PLACEKIT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                anyhow!("PLACEKIT_REQUEST_TIMEOUT_SECS must be a whole number of seconds: {e}")
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        if request_timeout_secs == 0 {
            return Err(anyhow!("PLACEKIT_REQUEST_TIMEOUT_SECS must be at least 1"));
        }

        let seed = lookup("PLACEKIT_SEED")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map_err(|e| anyhow!("PLACEKIT_SEED must be an unsigned integer: {e}"))
            })
            .transpose()?;

        Ok(Config {
            log_level: lookup("PLACEKIT_LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            request_timeout_secs,
            user_agent: lookup("PLACEKIT_USER_AGENT").unwrap_or_else(default_user_agent),
            pools_path: lookup("PLACEKIT_POOLS_PATH").filter(|p| !p.trim().is_empty()),
            seed,
            endpoints: ProviderEndpoints {
                kitten: endpoint("PLACEKIT_KITTEN_URL", defaults.kitten),
                bacon: endpoint("PLACEKIT_BACON_URL", defaults.bacon),
                placeholder: endpoint("PLACEKIT_PLACEHOLDER_URL", defaults.placeholder),
                random_image: endpoint("PLACEKIT_RANDOM_IMAGE_URL", defaults.random_image),
                text: endpoint("PLACEKIT_TEXT_URL", defaults.text),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.user_agent.starts_with("placekit/"));
        assert!(config.pools_path.is_none());
        assert!(config.seed.is_none());
        assert_eq!(config.endpoints, ProviderEndpoints::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("PLACEKIT_LOG_LEVEL", "debug"),
            ("PLACEKIT_REQUEST_TIMEOUT_SECS", "5"),
            ("PLACEKIT_SEED", "42"),
            ("PLACEKIT_POOLS_PATH", "pools.yaml"),
            ("PLACEKIT_KITTEN_URL", "http://localhost:9000/"),
        ]))
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.pools_path.as_deref(), Some("pools.yaml"));
        assert_eq!(config.endpoints.kitten, "http://localhost:9000");
        assert_eq!(config.endpoints.bacon, DEFAULT_BACON_URL);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        assert!(Config::from_lookup(lookup_from(&[("PLACEKIT_SEED", "abc")])).is_err());
        assert!(
            Config::from_lookup(lookup_from(&[("PLACEKIT_REQUEST_TIMEOUT_SECS", "0")])).is_err()
        );
    }

    #[test]
    fn test_all_at_points_every_provider_at_one_host() {
        let endpoints = ProviderEndpoints::all_at("http://127.0.0.1:4000/");
        assert_eq!(endpoints.kitten, "http://127.0.0.1:4000");
        assert_eq!(endpoints.text, "http://127.0.0.1:4000/api");
    }
}
