//! Configuration and settings management
//!
//! Loads settings from environment variables and defines the API constants.

use crate::error::HomeworkError;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::error;

/// Homework statuses endpoint of the Practicum API
pub const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Pause between two poll cycles, in seconds
pub const RETRY_PERIOD_SECS: u64 = 600;

/// Shortest accepted pause between two poll cycles, in seconds
pub const MIN_RETRY_PERIOD_SECS: u64 = 1;

/// Default timeout for a single API request, in seconds
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default log file, truncated on every start
pub const LOG_FILE: &str = "main.log";

/// Maximum message length for Telegram with safety margin.
/// The official limit is 4096.
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4000;

/// Greeting sent once the configuration has been validated
pub const GREETING_MESSAGE: &str =
    "Привет! Я Homework_Bot и буду отслеживать статус твоей домашки на Практикуме :)";

/// Farewell sent when the operator stops the bot
pub const FAREWELL_MESSAGE: &str = "Бот остановлен. До связи!";

/// Application settings loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Practicum API OAuth token
    pub practicum_token: Option<String>,
    /// Telegram Bot API token
    pub telegram_token: Option<String>,
    /// Chat that receives notifications (numeric id or `@channel`)
    pub telegram_chat_id: Option<String>,

    /// Pause between poll cycles
    #[serde(default = "default_retry_period_secs")]
    pub retry_period_secs: u64,
    /// Timeout for a single API request
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Path of the log file
    #[serde(default = "default_log_file")]
    pub log_file: String,
}

const fn default_retry_period_secs() -> u64 {
    RETRY_PERIOD_SECS
}

const fn default_http_timeout_secs() -> u64 {
    HTTP_TIMEOUT_SECS
}

fn default_log_file() -> String {
    LOG_FILE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            practicum_token: None,
            telegram_token: None,
            telegram_chat_id: None,
            retry_period_secs: default_retry_period_secs(),
            http_timeout_secs: default_http_timeout_secs(),
            log_file: default_log_file(),
        }
    }
}

/// Validated secrets required to run the bot.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Practicum API OAuth token
    pub practicum_token: String,
    /// Telegram Bot API token
    pub telegram_token: String,
    /// Target chat identifier
    pub telegram_chat_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"[MASKED]")
            .field("telegram_token", &"[MASKED]")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

impl Settings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(Environment::default().ignore_empty(true))
    }

    /// Create settings from an explicit variable map instead of the process
    /// environment. Files under `config/` are still consulted.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading fails.
    pub fn from_env_map(vars: config::Map<String, String>) -> Result<Self, ConfigError> {
        Self::build(Environment::default().ignore_empty(true).source(Some(vars)))
    }

    fn build(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let settings: Self = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Local overrides, not checked into git
            .add_source(File::with_name("config/local").required(false))
            // PRACTICUM_TOKEN -> practicum_token
            .add_source(environment)
            .build()?
            .try_deserialize()?;

        if settings.retry_period_secs < MIN_RETRY_PERIOD_SECS {
            return Err(ConfigError::Message(format!(
                "retry_period_secs must be at least {MIN_RETRY_PERIOD_SECS}, got {}",
                settings.retry_period_secs
            )));
        }
        if settings.http_timeout_secs == 0 {
            return Err(ConfigError::Message(
                "http_timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(settings)
    }

    /// Checks that all three secrets are present.
    ///
    /// # Errors
    ///
    /// Returns `HomeworkError::MissingConfig` listing every missing variable.
    pub fn check_tokens(&self) -> Result<Credentials, HomeworkError> {
        let required = [
            ("PRACTICUM_TOKEN", &self.practicum_token),
            ("TELEGRAM_TOKEN", &self.telegram_token),
            ("TELEGRAM_CHAT_ID", &self.telegram_chat_id),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            let names = missing.join(", ");
            error!(
                severity = "critical",
                "Отсутствует обязательная переменная окружения: {names}. Работа бота принудительно остановлена."
            );
            return Err(HomeworkError::MissingConfig(names));
        }

        let trimmed = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string()
        };
        Ok(Credentials {
            practicum_token: trimmed(&self.practicum_token),
            telegram_token: trimmed(&self.telegram_token),
            telegram_chat_id: trimmed(&self.telegram_chat_id),
        })
    }

    /// Pause between poll cycles
    #[must_use]
    pub const fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    /// Timeout for a single API request
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
