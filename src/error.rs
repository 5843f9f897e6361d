//! Error types for the homework status bot.

use thiserror::Error;

/// Errors that can occur while polling the homework API and building notifications.
///
/// The `Display` text of every variant is what ends up inside the
/// "Сбой в работе программы" chat notification, so it is written for the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HomeworkError {
    /// One or more required environment variables are not set
    #[error("Отсутствует обязательная переменная окружения: {0}")]
    MissingConfig(String),
    /// The API answered with a status code other than 200
    #[error("Статус-код ответа API не 200: {status}")]
    StatusNot200 {
        /// Observed HTTP status code
        status: u16,
    },
    /// Connectivity problem (DNS, TLS, timeout, reset)
    #[error("Нет ответа от API: {0}")]
    Network(String),
    /// The response body is not valid JSON
    #[error("Ответ API не является JSON: {0}")]
    InvalidJson(String),
    /// A value in the response has an unexpected type
    #[error("{0}")]
    TypeMismatch(String),
    /// A required key is absent from the response
    #[error("Ключа {key} нет в {context}")]
    MissingKey {
        /// Name of the missing key
        key: &'static str,
        /// Which object was being inspected
        context: &'static str,
    },
    /// The homework status is not in the verdict table
    #[error("Недопустимый статус {0}")]
    InvalidStatus(String),
}

impl HomeworkError {
    /// Returns `true` for errors that must stop the process.
    ///
    /// Only configuration errors are fatal; everything else is retried on the
    /// next poll cycle.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::MissingConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_missing_config_is_fatal() {
        assert!(HomeworkError::MissingConfig("TELEGRAM_TOKEN".into()).is_fatal());
        assert!(!HomeworkError::StatusNot200 { status: 503 }.is_fatal());
        assert!(!HomeworkError::Network("reset".into()).is_fatal());
        assert!(!HomeworkError::InvalidStatus("lost".into()).is_fatal());
    }

    #[test]
    fn test_display_names_the_broken_invariant() {
        let err = HomeworkError::MissingKey {
            key: "homeworks",
            context: "ответе API",
        };
        assert_eq!(err.to_string(), "Ключа homeworks нет в ответе API");
        assert_eq!(
            HomeworkError::Network("connection refused".into()).to_string(),
            "Нет ответа от API: connection refused"
        );
        assert_eq!(
            HomeworkError::StatusNot200 { status: 404 }.to_string(),
            "Статус-код ответа API не 200: 404"
        );
    }
}
