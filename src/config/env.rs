use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum EnvKey {
    ServerPort,
    HiggsfieldBaseUrl,
    HiggsfieldApiKeyId,
    HiggsfieldApiKeySecret,
    SubmitTimeoutSecs,
    StatusTimeoutSecs,
    MediaTimeoutSecs,
}

impl EnvKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvKey::ServerPort => "APP_PORT",
            EnvKey::HiggsfieldBaseUrl => "HIGGSFIELD_BASE_URL",
            EnvKey::HiggsfieldApiKeyId => "HIGGSFIELD_API_KEY_ID",
            EnvKey::HiggsfieldApiKeySecret => "HIGGSFIELD_API_KEY_SECRET",
            EnvKey::SubmitTimeoutSecs => "HIGGSFIELD_SUBMIT_TIMEOUT_SECS",
            EnvKey::StatusTimeoutSecs => "HIGGSFIELD_STATUS_TIMEOUT_SECS",
            EnvKey::MediaTimeoutSecs => "HIGGSFIELD_MEDIA_TIMEOUT_SECS",
        }
    }
}

pub fn get(key: EnvKey) -> Result<String, env::VarError> {
    env::var(key.as_str())
}

pub fn get_or(key: EnvKey, default: &str) -> String {
    or_default(get(key).ok(), default)
}

pub fn get_parsed<T: FromStr>(key: EnvKey, default: T) -> T {
    parsed_or(get(key).ok(), default)
}

/// Trimmed value, with blank treated as unset.
pub fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

pub fn or_default(raw: Option<String>, default: &str) -> String {
    non_blank(raw).unwrap_or_else(|| default.to_string())
}

pub fn parsed_or<T: FromStr>(raw: Option<String>, default: T) -> T {
    non_blank(raw).and_then(|v| v.parse::<T>().ok()).unwrap_or(default)
}
