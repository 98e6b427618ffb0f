//! HTTP surface
//!
//! A single `POST /process-survey` route in front of [`SurveyProcessor`],
//! with CORS restricted to the configured origins.

mod handlers;

pub use handlers::process_survey;

use axum::http::HeaderValue;
use axum::routing::post;
use axum::Router;
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::survey::SurveyProcessor;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<SurveyProcessor>,
}

impl AppState {
    pub fn new(processor: SurveyProcessor) -> Self {
        Self { processor: Arc::new(processor) }
    }
}

/// Error body returned with 4xx/5xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}

pub fn router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/process-survey", post(process_survey))
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parse_origins(origins)))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Origins that are valid header values; the rest are logged and dropped.
fn parse_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Skipping invalid CORS origin: {}", origin);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialize() {
        let body = serde_json::to_value(ErrorResponse::new("boom")).unwrap();
        assert_eq!(body, serde_json::json!({"error": "boom"}));
    }

    #[test]
    fn test_parse_origins_skips_invalid_values() {
        // Header values cannot contain newlines
        let origins = vec![
            "http://localhost:3000".to_string(),
            "bad\norigin".to_string(),
            "http://127.0.0.1:3000".to_string(),
        ];
        let parsed = parse_origins(&origins);
        assert_eq!(
            parsed,
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("http://127.0.0.1:3000"),
            ]
        );
    }

    #[test]
    fn test_parse_origins_empty() {
        assert!(parse_origins(&[]).is_empty());
        assert!(parse_origins(&["\r".to_string()]).is_empty());
    }
}
