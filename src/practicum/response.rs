//! Decoding of raw API answers into typed records.
//!
//! Checks run in a fixed order so that the error names the first broken
//! invariant: the answer is an object, it has `current_date` and `homeworks`,
//! `current_date` is an integer, `homeworks` is a list. Only the first list
//! element is inspected.

use crate::error::HomeworkError;
use serde_json::{Map, Value};
use tracing::debug;

const RESPONSE_CONTEXT: &str = "ответе API";
const RECORD_CONTEXT: &str = "записи о домашней работе";

/// One submitted assignment as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    /// Raw review status, checked against the verdict table later
    pub status: String,
    /// Name of the submitted work
    pub homework_name: String,
}

/// A structurally valid API answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResponse {
    /// Server timestamp, the next poll cursor
    pub current_date: i64,
    /// First changed homework, `None` when nothing changed
    pub homework: Option<HomeworkRecord>,
}

/// Validates an API answer and extracts the first homework record.
///
/// An empty `homeworks` list is the normal "no update" case and yields
/// `homework: None`.
///
/// # Errors
///
/// `HomeworkError::TypeMismatch` or `HomeworkError::MissingKey` naming the
/// first violated invariant.
pub fn check_response(response: &Value) -> Result<ValidatedResponse, HomeworkError> {
    let object = response
        .as_object()
        .ok_or_else(|| HomeworkError::TypeMismatch("объект ответа - не словарь".into()))?;

    let current_date = require(object, "current_date", RESPONSE_CONTEXT)?;
    let homeworks = require(object, "homeworks", RESPONSE_CONTEXT)?;

    let current_date = current_date
        .as_i64()
        .ok_or_else(|| HomeworkError::TypeMismatch("current_date - не целое число".into()))?;
    let homeworks = homeworks
        .as_array()
        .ok_or_else(|| HomeworkError::TypeMismatch("homeworks - не список".into()))?;

    let Some(first) = homeworks.first() else {
        debug!("Обновлений нет");
        return Ok(ValidatedResponse {
            current_date,
            homework: None,
        });
    };

    Ok(ValidatedResponse {
        current_date,
        homework: Some(decode_record(first)?),
    })
}

fn decode_record(value: &Value) -> Result<HomeworkRecord, HomeworkError> {
    let record = value
        .as_object()
        .ok_or_else(|| HomeworkError::TypeMismatch("элемент homeworks - не словарь".into()))?;

    let status = require(record, "status", RECORD_CONTEXT)?;
    let homework_name = require(record, "homework_name", RECORD_CONTEXT)?;

    Ok(HomeworkRecord {
        status: as_string(status, "status")?,
        homework_name: as_string(homework_name, "homework_name")?,
    })
}

fn require<'a>(
    object: &'a Map<String, Value>,
    key: &'static str,
    context: &'static str,
) -> Result<&'a Value, HomeworkError> {
    object
        .get(key)
        .ok_or(HomeworkError::MissingKey { key, context })
}

fn as_string(value: &Value, key: &str) -> Result<String, HomeworkError> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| HomeworkError::TypeMismatch(format!("{key} - не строка")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_homeworks_is_no_update() {
        let response = json!({"current_date": 1_700_000_000, "homeworks": []});
        assert_eq!(
            check_response(&response),
            Ok(ValidatedResponse {
                current_date: 1_700_000_000,
                homework: None,
            })
        );
    }

    #[test]
    fn test_first_record_is_returned() {
        let response = json!({
            "current_date": 100,
            "homeworks": [
                {"status": "approved", "homework_name": "X", "reviewer_comment": "ok"},
                {"status": "rejected", "homework_name": "Y"}
            ]
        });
        let validated = check_response(&response);
        assert_eq!(
            validated.map(|v| v.homework),
            Ok(Some(HomeworkRecord {
                status: "approved".into(),
                homework_name: "X".into(),
            }))
        );
    }

    #[test]
    fn test_not_an_object() {
        let err = check_response(&json!([1, 2, 3]));
        assert!(matches!(err, Err(HomeworkError::TypeMismatch(_))));
    }

    #[test]
    fn test_missing_top_level_keys() {
        assert_eq!(
            check_response(&json!({"homeworks": []})),
            Err(HomeworkError::MissingKey {
                key: "current_date",
                context: RESPONSE_CONTEXT,
            })
        );
        assert_eq!(
            check_response(&json!({"current_date": 1})),
            Err(HomeworkError::MissingKey {
                key: "homeworks",
                context: RESPONSE_CONTEXT,
            })
        );
    }

    #[test]
    fn test_key_presence_is_checked_before_types() {
        // current_date has the wrong type, but homeworks is missing entirely
        assert!(matches!(
            check_response(&json!({"current_date": "yesterday"})),
            Err(HomeworkError::MissingKey { key: "homeworks", .. })
        ));
    }

    #[test]
    fn test_wrong_types() {
        assert_eq!(
            check_response(&json!({"current_date": "1", "homeworks": []})),
            Err(HomeworkError::TypeMismatch(
                "current_date - не целое число".into()
            ))
        );
        assert_eq!(
            check_response(&json!({"current_date": 1.5, "homeworks": []})),
            Err(HomeworkError::TypeMismatch(
                "current_date - не целое число".into()
            ))
        );
        assert_eq!(
            check_response(&json!({"current_date": 1, "homeworks": {}})),
            Err(HomeworkError::TypeMismatch("homeworks - не список".into()))
        );
    }

    #[test]
    fn test_bad_first_record() {
        assert!(matches!(
            check_response(&json!({"current_date": 1, "homeworks": ["approved"]})),
            Err(HomeworkError::TypeMismatch(_))
        ));
        assert_eq!(
            check_response(&json!({"current_date": 1, "homeworks": [{"status": "approved"}]})),
            Err(HomeworkError::MissingKey {
                key: "homework_name",
                context: RECORD_CONTEXT,
            })
        );
        assert!(matches!(
            check_response(&json!({
                "current_date": 1,
                "homeworks": [{"status": 3, "homework_name": "X"}]
            })),
            Err(HomeworkError::TypeMismatch(_))
        ));
    }
}
