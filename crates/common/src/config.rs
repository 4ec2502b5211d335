use std::fmt;
use std::time::Duration;

use crate::error::ConfigError;

/// Default status endpoint of the homework review API.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default Telegram Bot API base URL.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default pause between two poll cycles, in seconds (10 minutes).
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

/// Default timeout applied to every outbound HTTP request, in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Application configuration, read once at startup and immutable afterwards.
#[derive(Clone)]
pub struct AppConfig {
    /// OAuth token for the homework status API
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives every notification
    pub telegram_chat_id: String,

    /// Status API endpoint URL
    pub endpoint: String,

    /// Telegram Bot API base URL (overridable for self-hosted Bot API servers)
    pub telegram_api_url: String,

    /// Sleep between poll cycles
    pub retry_period: Duration,

    /// Per-request HTTP timeout
    pub http_timeout: Duration,

    /// Initial query cursor (unix seconds). `None` means "now" at loop start.
    pub from_date: Option<i64>,
}

impl AppConfig {
    /// Load configuration from a `.env` file (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "Loaded .env file");
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Credentials are checked first and in a fixed order, so a missing
    /// credential is always reported before any malformed tunable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let practicum_token = required(&lookup, "PRACTICUM_TOKEN")?;
        let telegram_token = required(&lookup, "TELEGRAM_TOKEN")?;
        let telegram_chat_id = required(&lookup, "TELEGRAM_CHAT_ID")?;

        let retry_period_secs =
            positive_secs(&lookup, "RETRY_PERIOD_SECS", DEFAULT_RETRY_PERIOD_SECS)?;
        let http_timeout_secs =
            positive_secs(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;

        let from_date = match optional(&lookup, "HOMEWORK_FROM_DATE") {
            Some(raw) => Some(raw.parse::<i64>().map_err(|_| ConfigError::Invalid {
                key: "HOMEWORK_FROM_DATE",
                reason: format!("expected a unix timestamp, got {raw:?}"),
            })?),
            None => None,
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint: optional(&lookup, "PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: optional(&lookup, "TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_period: Duration::from_secs(retry_period_secs),
            http_timeout: Duration::from_secs(http_timeout_secs),
            from_date,
        })
    }
}

// Secrets stay out of logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_period", &self.retry_period)
            .field("http_timeout", &self.http_timeout)
            .field("from_date", &self.from_date)
            .finish()
    }
}

/// Non-empty value for `key`, with surrounding whitespace removed.
fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::MissingCredential(key))
}

fn positive_secs<F>(lookup: &F, key: &'static str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = optional(lookup, key) else {
        return Ok(default);
    };

    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(ConfigError::Invalid {
            key,
            reason: format!("expected a positive number of seconds, got {raw:?}"),
        }),
    }
}
