//! Runtime configuration.
//!
//! Environment variables are read in exactly one place,
//! [`AgentConfig::from_env`]. Everything downstream receives plain values,
//! so credential presence is an explicit `Option` rather than an implicit
//! lookup at call time.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `TWITTER_BEARER_TOKEN` | `credentials.twitter_bearer_token` | unset |
//! | `SANTIMENT_API_KEY` | `credentials.santiment_api_key` | unset |
//! | `CRYPTOPANIC_API_KEY` | `credentials.cryptopanic_api_key` | unset |
//! | `BITTE_API_KEY` | `bitte_api_key` | unset |
//! | `BITTE_API_URL` | `bitte_api_url` | hosted agent runtime |
//! | `USER_ADDRESS` | `user_address` | `0x0` |
//! | `ACCOUNT_ID` | `account_id` | unset |
//! | `NEXT_PUBLIC_BASE_URL` | `public_base_url` | `http://localhost:3000` |
//! | `PERSONA_REQUEST_TIMEOUT_MS` | `request_timeout_ms` | `5000` |

use std::env;

use thiserror::Error;

use crate::http_client::DEFAULT_TIMEOUT_MS;
use crate::ProviderId;

pub const DEFAULT_BITTE_API_URL: &str = "https://ai-runtime-446257178793.europe-west1.run.app/chat";
pub const DEFAULT_USER_ADDRESS: &str = "0x0";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000";

/// Configuration errors detected while reading the environment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{variable} must be a positive integer number of milliseconds, got {value:?}")]
    InvalidTimeout { variable: &'static str, value: String },
}

/// Per-provider credentials. Blank values are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub twitter_bearer_token: Option<String>,
    pub santiment_api_key: Option<String>,
    pub cryptopanic_api_key: Option<String>,
}

impl ProviderCredentials {
    pub fn new(
        twitter_bearer_token: Option<String>,
        santiment_api_key: Option<String>,
        cryptopanic_api_key: Option<String>,
    ) -> Self {
        Self {
            twitter_bearer_token: non_blank(twitter_bearer_token),
            santiment_api_key: non_blank(santiment_api_key),
            cryptopanic_api_key: non_blank(cryptopanic_api_key),
        }
    }

    /// Providers that have a credential configured, for the startup log.
    pub fn configured(&self) -> Vec<ProviderId> {
        [
            (ProviderId::Twitter, &self.twitter_bearer_token),
            (ProviderId::Santiment, &self.santiment_api_key),
            (ProviderId::Cryptopanic, &self.cryptopanic_api_key),
        ]
        .into_iter()
        .filter(|(_, credential)| credential.is_some())
        .map(|(provider, _)| provider)
        .collect()
    }
}

/// Agent-wide settings shared by the server and the core services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    pub credentials: ProviderCredentials,
    pub bitte_api_key: Option<String>,
    pub bitte_api_url: String,
    pub user_address: String,
    pub account_id: Option<String>,
    pub public_base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            credentials: ProviderCredentials::default(),
            bitte_api_key: None,
            bitte_api_url: String::from(DEFAULT_BITTE_API_URL),
            user_address: String::from(DEFAULT_USER_ADDRESS),
            account_id: None,
            public_base_url: String::from(DEFAULT_PUBLIC_BASE_URL),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AgentConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| non_blank(lookup(name));
        let defaults = Self::default();

        let request_timeout_ms = match read("PERSONA_REQUEST_TIMEOUT_MS") {
            Some(raw) => parse_timeout("PERSONA_REQUEST_TIMEOUT_MS", &raw)?,
            None => defaults.request_timeout_ms,
        };

        Ok(Self {
            credentials: ProviderCredentials::new(
                read("TWITTER_BEARER_TOKEN"),
                read("SANTIMENT_API_KEY"),
                read("CRYPTOPANIC_API_KEY"),
            ),
            bitte_api_key: read("BITTE_API_KEY"),
            bitte_api_url: read("BITTE_API_URL").unwrap_or(defaults.bitte_api_url),
            user_address: read("USER_ADDRESS").unwrap_or(defaults.user_address),
            account_id: read("ACCOUNT_ID"),
            public_base_url: read("NEXT_PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
            request_timeout_ms,
        })
    }

    pub fn with_credentials(mut self, credentials: ProviderCredentials) -> Self {
        self.credentials = credentials;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_timeout(variable: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidTimeout {
            variable,
            value: raw.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = AgentConfig::from_lookup(lookup(&[])).expect("config");
        assert_eq!(config, AgentConfig::default());
        assert_eq!(config.request_timeout_ms, 5_000);
        assert_eq!(config.user_address, "0x0");
        assert!(config.credentials.configured().is_empty());
    }

    #[test]
    fn reads_every_variable_and_drops_blank_credentials() {
        let config = AgentConfig::from_lookup(lookup(&[
            ("TWITTER_BEARER_TOKEN", "tw"),
            ("SANTIMENT_API_KEY", "   "),
            ("CRYPTOPANIC_API_KEY", "cp"),
            ("BITTE_API_KEY", "bitte"),
            ("BITTE_API_URL", "https://runtime.example/chat"),
            ("USER_ADDRESS", "0xabc"),
            ("ACCOUNT_ID", "captain.near"),
            ("NEXT_PUBLIC_BASE_URL", "https://agent.example"),
            ("PERSONA_REQUEST_TIMEOUT_MS", "2500"),
        ]))
        .expect("config");

        assert_eq!(config.credentials.twitter_bearer_token.as_deref(), Some("tw"));
        assert_eq!(config.credentials.santiment_api_key, None);
        assert_eq!(
            config.credentials.configured(),
            vec![ProviderId::Twitter, ProviderId::Cryptopanic]
        );
        assert_eq!(config.bitte_api_url, "https://runtime.example/chat");
        assert_eq!(config.account_id.as_deref(), Some("captain.near"));
        assert_eq!(config.public_base_url, "https://agent.example");
        assert_eq!(config.request_timeout_ms, 2_500);
    }

    #[test]
    fn rejects_invalid_timeouts() {
        for raw in ["0", "soon", "-5"] {
            let error = AgentConfig::from_lookup(lookup(&[("PERSONA_REQUEST_TIMEOUT_MS", raw)]))
                .expect_err("invalid timeout");
            assert!(matches!(error, ConfigError::InvalidTimeout { .. }));
        }
    }
}
