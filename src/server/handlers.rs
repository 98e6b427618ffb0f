//! HTTP request handlers

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, Json};
use log::warn;
use serde_json::Value;

use super::{AppState, ErrorResponse};
use crate::survey::ProcessError;

/// `POST /process-survey`
///
/// The body is taken as untyped JSON; shape checks happen in the validator
/// so every malformed payload gets one of its messages back as a 400.
/// Bodies that are not JSON at all keep the extractor's status code but
/// still get an `{"error": ...}` body.
pub async fn process_survey(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!("Rejected request body: {}", rejection.body_text());
            return error_response(rejection.status(), rejection.body_text());
        }
    };

    match state.processor.process(&payload).await {
        Ok(record) => match serde_json::to_value(&record) {
            Ok(body) => (StatusCode::OK, Json(body)),
            Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
        },
        Err(e @ ProcessError::ValidationFailed(_)) => {
            error_response(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(e @ ProcessError::PersistenceFailed(_)) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

fn error_response(status: StatusCode, message: String) -> (StatusCode, Json<Value>) {
    let body = serde_json::to_value(ErrorResponse::new(message))
        .unwrap_or_else(|_| Value::Null);
    (status, Json(body))
}

// =============================================================================
// Tests
// =============================================================================
