use async_trait::async_trait;
use log::{error, info};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent";

/// A failed description call. The Display text doubles as the placeholder
/// description stored in place of the generated one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Failed to generate description. Error: {0}")]
    Api(String),
    #[error("Exception occurred: {0}")]
    Exception(String),
}

/// Turns a reference text into a prose description.
#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    async fn generate(&self, content: &str) -> Result<String, GenerationError>;
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

impl<'a> GeminiRequest<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: content }],
            }],
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key, api_url }
    }
}

#[async_trait]
impl DescriptionGenerator for GeminiClient {
    async fn generate(&self, content: &str) -> Result<String, GenerationError> {
        info!("Sending description request to Gemini ({} chars of content)", content.len());

        let response = self
            .client
            .post(&self.api_url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&GeminiRequest::new(content))
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                error!("Exception occurred during Gemini API call: {}", e);
                GenerationError::Exception(e.to_string())
            })?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!("Exception occurred while reading Gemini response: {}", e);
            GenerationError::Exception(e.to_string())
        })?;

        if status == reqwest::StatusCode::OK {
            extract_text(&body).ok_or_else(|| {
                error!("Gemini response had no candidate text");
                GenerationError::Exception("unexpected response shape from Gemini".to_string())
            })
        } else {
            let message = error_message(&body);
            error!("Gemini API error ({}): {}", status, message);
            Err(GenerationError::Api(message))
        }
    }
}

/// Text of the first part of the first candidate.
fn extract_text(body: &Value) -> Option<String> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn error_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(GeminiRequest::new("describe short hair")).unwrap();
        assert_eq!(body, json!({"contents": [{"parts": [{"text": "describe short hair"}]}]}));
    }

    #[test]
    fn test_extract_text() {
        let body = json!({
            "candidates": [
                {
                    "content": {"parts": [{"text": "A sleek coat.\n"}, {"text": "ignored"}]},
                    "role": "model"
                },
                {"content": {"parts": [{"text": "second candidate"}]}}
            ]
        });
        assert_eq!(extract_text(&body), Some("A sleek coat.\n".to_string()));
    }

    #[test]
    fn test_extract_text_missing() {
        assert_eq!(extract_text(&json!({"candidates": []})), None);
        assert_eq!(extract_text(&json!({"promptFeedback": {"blockReason": "SAFETY"}})), None);
    }

    #[test]
    fn test_error_message() {
        let body = json!({"error": {"code": 400, "message": "API key not valid."}});
        assert_eq!(error_message(&body), "API key not valid.");
        assert_eq!(error_message(&json!({})), "Unknown error");
    }

    #[test]
    fn test_placeholder_text() {
        assert_eq!(
            GenerationError::Api("API key not valid.".to_string()).to_string(),
            "Failed to generate description. Error: API key not valid."
        );
        assert_eq!(
            GenerationError::Exception("connection refused".to_string()).to_string(),
            "Exception occurred: connection refused"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_exception() {
        // Nothing listens on port 9 locally
        let client = GeminiClient::new(
            "test-key".to_string(),
            "http://127.0.0.1:9/generate".to_string(),
            Duration::from_secs(2),
        );
        let err = client.generate("content").await.unwrap_err();
        assert!(matches!(err, GenerationError::Exception(_)));
        assert!(err.to_string().starts_with("Exception occurred: "));
    }

    #[tokio::test]
    async fn test_transport_error_hides_key_and_url() {
        let client = GeminiClient::new(
            "SECRET_API_KEY_123".to_string(),
            "http://127.0.0.1:9/generate".to_string(),
            Duration::from_secs(2),
        );
        let placeholder = client.generate("content").await.unwrap_err().to_string();
        assert!(placeholder.starts_with("Exception occurred: "));
        assert!(!placeholder.contains("SECRET_API_KEY_123"));
        assert!(!placeholder.contains("key="));
        assert!(!placeholder.contains("127.0.0.1:9/generate"));
    }
}
