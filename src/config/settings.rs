use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::config::env::{self, EnvKey};

pub const DEFAULT_HIGGSFIELD_BASE_URL: &str = "https://platform.higgsfield.ai";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing credentials: {0} is not set")]
    Missing(&'static str),
}

#[derive(Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub higgsfield_base_url: String,
    pub higgsfield_api_key_id: String,
    pub higgsfield_api_key_secret: String,
    pub submit_timeout_secs: u64,
    pub status_timeout_secs: u64,
    pub media_timeout_secs: u64,
}

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SUBMIT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_STATUS_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MEDIA_TIMEOUT_SECS: u64 = 120;

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            server_port: env::get_parsed(EnvKey::ServerPort, DEFAULT_PORT),
            higgsfield_base_url: base_url(env::get_or(EnvKey::HiggsfieldBaseUrl, DEFAULT_HIGGSFIELD_BASE_URL)),
            higgsfield_api_key_id: required(EnvKey::HiggsfieldApiKeyId, env::get(EnvKey::HiggsfieldApiKeyId).ok())?,
            higgsfield_api_key_secret: required(
                EnvKey::HiggsfieldApiKeySecret,
                env::get(EnvKey::HiggsfieldApiKeySecret).ok(),
            )?,
            submit_timeout_secs: env::get_parsed(EnvKey::SubmitTimeoutSecs, DEFAULT_SUBMIT_TIMEOUT_SECS),
            status_timeout_secs: env::get_parsed(EnvKey::StatusTimeoutSecs, DEFAULT_STATUS_TIMEOUT_SECS),
            media_timeout_secs: env::get_parsed(EnvKey::MediaTimeoutSecs, DEFAULT_MEDIA_TIMEOUT_SECS),
        })
    }

    /// Same rules as `new`, reading from an arbitrary key lookup instead of the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(EnvKey) -> Option<String>,
    {
        Ok(Self {
            server_port: env::parsed_or(lookup(EnvKey::ServerPort), DEFAULT_PORT),
            higgsfield_base_url: base_url(env::or_default(
                lookup(EnvKey::HiggsfieldBaseUrl),
                DEFAULT_HIGGSFIELD_BASE_URL,
            )),
            higgsfield_api_key_id: required(EnvKey::HiggsfieldApiKeyId, lookup(EnvKey::HiggsfieldApiKeyId))?,
            higgsfield_api_key_secret: required(
                EnvKey::HiggsfieldApiKeySecret,
                lookup(EnvKey::HiggsfieldApiKeySecret),
            )?,
            submit_timeout_secs: env::parsed_or(lookup(EnvKey::SubmitTimeoutSecs), DEFAULT_SUBMIT_TIMEOUT_SECS),
            status_timeout_secs: env::parsed_or(lookup(EnvKey::StatusTimeoutSecs), DEFAULT_STATUS_TIMEOUT_SECS),
            media_timeout_secs: env::parsed_or(lookup(EnvKey::MediaTimeoutSecs), DEFAULT_MEDIA_TIMEOUT_SECS),
        })
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_secs(self.submit_timeout_secs)
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout_secs)
    }

    pub fn media_timeout(&self) -> Duration {
        Duration::from_secs(self.media_timeout_secs)
    }
}

// Secrets stay out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("server_port", &self.server_port)
            .field("higgsfield_base_url", &self.higgsfield_base_url)
            .field("higgsfield_api_key_id", &self.higgsfield_api_key_id)
            .field("submit_timeout_secs", &self.submit_timeout_secs)
            .field("status_timeout_secs", &self.status_timeout_secs)
            .field("media_timeout_secs", &self.media_timeout_secs)
            .finish_non_exhaustive()
    }
}

fn required(key: EnvKey, raw: Option<String>) -> Result<String, ConfigError> {
    env::non_blank(raw).ok_or(ConfigError::Missing(key.as_str()))
}

fn base_url(raw: String) -> String {
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&'static str, &'static str)]) -> impl Fn(EnvKey) -> Option<String> {
        let map: HashMap<&'static str, &'static str> = pairs.iter().copied().collect();
        move |key| map.get(key.as_str()).map(|v| v.to_string())
    }

    #[test]
    fn test_defaults_applied_when_only_credentials_set() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("HIGGSFIELD_API_KEY_ID", "key-id"),
            ("HIGGSFIELD_API_KEY_SECRET", "key-secret"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.higgsfield_base_url, DEFAULT_HIGGSFIELD_BASE_URL);
        assert_eq!(config.submit_timeout(), Duration::from_secs(60));
        assert_eq!(config.status_timeout(), Duration::from_secs(30));
        assert_eq!(config.media_timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_missing_secret_refuses_to_build() {
        let err = AppConfig::from_lookup(lookup_from(&[("HIGGSFIELD_API_KEY_ID", "key-id")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing("HIGGSFIELD_API_KEY_SECRET"));
    }

    #[test]
    fn test_blank_key_id_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("HIGGSFIELD_API_KEY_ID", "   "),
            ("HIGGSFIELD_API_KEY_SECRET", "key-secret"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("HIGGSFIELD_API_KEY_ID"));
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("HIGGSFIELD_API_KEY_ID", "key-id"),
            ("HIGGSFIELD_API_KEY_SECRET", "key-secret"),
            ("HIGGSFIELD_BASE_URL", "http://127.0.0.1:9999/"),
            ("APP_PORT", "8080"),
            ("HIGGSFIELD_SUBMIT_TIMEOUT_SECS", "not-a-number"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.higgsfield_base_url, "http://127.0.0.1:9999");
        assert_eq!(config.submit_timeout_secs, 60);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("HIGGSFIELD_API_KEY_ID", "key-id"),
            ("HIGGSFIELD_API_KEY_SECRET", "super-secret"),
        ]))
        .unwrap();
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
