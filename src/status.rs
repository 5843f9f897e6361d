//! Verdict table and notification text for homework status changes.

use crate::error::HomeworkError;
use crate::practicum::HomeworkRecord;
use std::fmt;
use std::str::FromStr;

/// Review status of a homework, as understood by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    /// Accepted by the reviewer
    Approved,
    /// Taken for review
    Reviewing,
    /// Returned with remarks
    Rejected,
}

impl HomeworkStatus {
    /// All statuses known to the verdict table
    pub const ALL: [Self; 3] = [Self::Approved, Self::Reviewing, Self::Rejected];

    /// Status string as sent by the API
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Reviewing => "reviewing",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable verdict for this status
    #[must_use]
    pub const fn verdict(self) -> &'static str {
        match self {
            Self::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Self::Reviewing => "Работа взята на проверку ревьюером.",
            Self::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeworkStatus {
    type Err = HomeworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| HomeworkError::InvalidStatus(s.to_string()))
    }
}

/// Builds the chat notification for a changed homework.
///
/// # Errors
///
/// `HomeworkError::InvalidStatus` if the status is not in the verdict table.
pub fn parse_status(homework: &HomeworkRecord) -> Result<String, HomeworkError> {
    let status: HomeworkStatus = homework.status.parse()?;
    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework.homework_name,
        status.verdict()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(status: &str, name: &str) -> HomeworkRecord {
        HomeworkRecord {
            status: status.to_string(),
            homework_name: name.to_string(),
        }
    }

    #[test]
    fn test_approved_message() {
        assert_eq!(
            parse_status(&record("approved", "X")),
            Ok("Изменился статус проверки работы \"X\". Работа проверена: ревьюеру всё понравилось. Ура!".to_string())
        );
    }

    #[test]
    fn test_every_known_status_has_a_verdict() {
        for status in HomeworkStatus::ALL {
            let message = parse_status(&record(status.as_str(), "hw"));
            assert_eq!(
                message,
                Ok(format!(
                    "Изменился статус проверки работы \"hw\". {}",
                    status.verdict()
                ))
            );
        }
    }

    #[test]
    fn test_status_is_case_sensitive() {
        assert_eq!(
            parse_status(&record("Approved", "X")),
            Err(HomeworkError::InvalidStatus("Approved".into()))
        );
    }

    proptest! {
        #[test]
        fn unknown_status_is_rejected(status in "\\PC*") {
            prop_assume!(!["approved", "reviewing", "rejected"].contains(&status.as_str()));
            prop_assert_eq!(
                parse_status(&record(&status, "X")),
                Err(HomeworkError::InvalidStatus(status.clone()))
            );
        }
    }
}
