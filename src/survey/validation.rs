use serde_json::Value;
use std::collections::HashSet;
use thiserror::Error;

use super::{
    SurveyAnswer, SurveySubmission, MAX_QUESTION_VALUE, MIN_QUESTION_VALUE, MIN_USER_ID_LEN,
    QUESTION_COUNT,
};

/// Rejection reasons for an incoming payload. The messages are returned to
/// clients verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid `user_id`. Must be a string with at least 5 characters.")]
    InvalidUserId,
    #[error("`survey_results` must contain exactly 10 entries.")]
    InvalidResultCount,
    #[error("Each `question_number` must be an integer between 1 and 10.")]
    InvalidQuestionNumber,
    #[error("Duplicate `question_number` values are not allowed.")]
    DuplicateQuestionNumber,
    #[error("Each `question_value` must be an integer between 1 and 7.")]
    InvalidQuestionValue,
}

/// Check a raw JSON payload and turn it into a typed submission.
///
/// Rules run in a fixed order and the first failure wins: `user_id`, the
/// number of entries, then each entry in turn (`question_number` range,
/// duplicate `question_number`, `question_value` range). Any shape is
/// accepted as input; missing or mistyped fields simply fail their rule.
pub fn validate(payload: &Value) -> Result<SurveySubmission, ValidationError> {
    let user_id = match payload.get("user_id").and_then(Value::as_str) {
        Some(id) if id.chars().count() >= MIN_USER_ID_LEN => id.to_string(),
        _ => return Err(ValidationError::InvalidUserId),
    };

    let entries = match payload.get("survey_results").and_then(Value::as_array) {
        Some(entries) if entries.len() == QUESTION_COUNT => entries,
        _ => return Err(ValidationError::InvalidResultCount),
    };

    let mut seen = HashSet::with_capacity(QUESTION_COUNT);
    let mut survey_results = Vec::with_capacity(QUESTION_COUNT);

    for entry in entries {
        let question_number =
            integer_in_range(entry.get("question_number"), 1, QUESTION_COUNT as i64)
                .ok_or(ValidationError::InvalidQuestionNumber)?;

        if !seen.insert(question_number) {
            return Err(ValidationError::DuplicateQuestionNumber);
        }

        let question_value =
            integer_in_range(entry.get("question_value"), MIN_QUESTION_VALUE, MAX_QUESTION_VALUE)
                .ok_or(ValidationError::InvalidQuestionValue)?;

        survey_results.push(SurveyAnswer { question_number, question_value });
    }

    Ok(SurveySubmission { user_id, survey_results })
}

// Both ranges fit in a u8; floats, booleans and strings are not integers here.
fn integer_in_range(value: Option<&Value>, min: i64, max: i64) -> Option<u8> {
    let n = value?.as_i64()?;
    if (min..=max).contains(&n) {
        u8::try_from(n).ok()
    } else {
        None
    }
}
