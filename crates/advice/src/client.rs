//! HTTP client for the generative-language API.
//!
//! Configuration (API key, base URL, model) is an explicit value built
//! from the environment in `main` and injected here, so tests can point
//! the client at a mock server.

use std::time::Duration;

use crate::retry::RetryPolicy;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Default production base URL for the generative-language API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Per-request timeout applied to every model call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the advice pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AdviceError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The generative API returned a non-2xx status code.
    #[error("generative API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Upstream error message, extracted from the error body when possible.
        message: String,
    },

    /// A 2xx response carried no extractable candidate text.
    #[error("Received an empty or invalid content response from the AI model.")]
    EmptyResponse,

    /// The retry budget is exhausted, or a non-retryable error occurred.
    #[error("Failed to get FPL advice after {attempts} attempts. {message}")]
    Exhausted { attempts: u32, message: String },
}

impl AdviceError {
    /// Whether the pipeline should retry after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AdviceError::Api { status, .. } if RetryPolicy::is_retryable_status(*status))
    }

    /// Human-readable upstream message for embedding in the terminal error.
    pub fn upstream_message(&self) -> String {
        match self {
            AdviceError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Configuration for the generative API client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    /// Service API key appended as the `key` query parameter.
    pub api_key: String,
    /// Model identifier in the request path.
    pub model: String,
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Required | Default                  |
    /// |-------------------|----------|--------------------------|
    /// | `GOOGLE_API_KEY`  | **yes**  | --                       |
    /// | `GEMINI_BASE_URL` | no       | production API base URL  |
    /// | `GEMINI_MODEL`    | no       | [`DEFAULT_MODEL`]        |
    ///
    /// # Panics
    ///
    /// Panics if `GOOGLE_API_KEY` is not set. Intended for startup only;
    /// everything downstream takes the config as a value.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("GOOGLE_API_KEY").expect("GOOGLE_API_KEY must be set in the environment");
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        Self {
            base_url,
            api_key,
            model,
        }
    }
}

/// HTTP client for the `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Issue a single `generateContent` call. No retries at this layer;
    /// the pipeline owns the retry loop.
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AdviceError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(AdviceError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        Ok(response.json::<GenerateContentResponse>().await?)
    }
}

/// Pull the `error.message` field out of an API error body, falling back
/// to the raw body text.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_structured_error_message() {
        let body = r#"{"error": {"code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE"}}"#;
        assert_eq!(extract_error_message(body), "The model is overloaded.");
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(extract_error_message("Service Unavailable"), "Service Unavailable");
    }

    #[test]
    fn retryable_predicate_follows_policy() {
        let err = AdviceError::Api {
            status: 503,
            message: "overloaded".into(),
        };
        assert!(err.is_retryable());

        let err = AdviceError::Api {
            status: 400,
            message: "bad request".into(),
        };
        assert!(!err.is_retryable());

        assert!(!AdviceError::EmptyResponse.is_retryable());
    }
}
