//! Retry-law tests for the advice pipeline against a mock generative API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fplmate_advice::{AdviceError, AdvicePipeline, GeminiClient, GeminiConfig, RetryPolicy};

const MODEL_PATH: &str = "/v1beta/models/gemini-2.5-flash-lite:generateContent";

fn test_pipeline(server: &MockServer) -> AdvicePipeline {
    let client = GeminiClient::new(GeminiConfig {
        base_url: server.uri(),
        api_key: "test-key".to_string(),
        model: "gemini-2.5-flash-lite".to_string(),
    });
    // Millisecond delays keep the retry tests fast; the schedule shape is
    // covered by the RetryPolicy unit tests.
    AdvicePipeline::with_policy(
        client,
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        },
    )
}

fn success_body() -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {"parts": [{"text": "Transfer out Player A for Player B."}]}
        }]
    })
}

#[tokio::test]
async fn succeeds_on_third_attempt_after_two_503s() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(move |_req: &wiremock::Request| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                ResponseTemplate::new(503)
                    .set_body_string(r#"{"error": {"message": "The model is overloaded."}}"#)
            } else {
                ResponseTemplate::new(200).set_body_json(success_body())
            }
        })
        .expect(3)
        .mount(&server)
        .await;

    let result = test_pipeline(&server)
        .chat_advice("Who should I captain?", "CURRENT GW7 | ...", 7)
        .await
        .expect("third attempt should succeed");

    assert_eq!(result.text, "Transfer out Player A for Player B.");
    assert!(result.sources.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn fails_after_exactly_three_503s() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_string(r#"{"error": {"message": "The model is overloaded."}}"#),
        )
        .expect(3)
        .mount(&server)
        .await;

    let err = test_pipeline(&server)
        .chat_advice("Who should I captain?", "ctx", 7)
        .await
        .expect_err("all attempts fail");

    assert_matches!(err, AdviceError::Exhausted { attempts: 3, ref message } => {
        assert_eq!(message, "The model is overloaded.");
    });
}

#[tokio::test]
async fn non_retryable_error_fails_on_first_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"error": {"message": "API key not valid."}}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = test_pipeline(&server)
        .projected_points("SQUAD CONTEXT")
        .await
        .expect_err("400 must not be retried");

    assert_matches!(err, AdviceError::Exhausted { attempts: 1, ref message } => {
        assert_eq!(message, "API key not valid.");
    });
}

#[tokio::test]
async fn empty_success_body_is_a_distinct_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{"content": {"parts": []}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_pipeline(&server)
        .chat_advice("q", "ctx", 1)
        .await
        .expect_err("empty body must fail");

    assert_matches!(err, AdviceError::EmptyResponse);
}

#[tokio::test]
async fn grounded_reply_carries_ordered_sources() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "**Projected Points: 61**\nBold call."}]},
                "groundingMetadata": {
                    "groundingAttributions": [
                        {"web": {"uri": "https://news.example/a", "title": "Injury news"}},
                        {"web": {"uri": "https://no-title.example"}},
                        {"web": {"uri": "https://news.example/b", "title": "Fixture odds"}}
                    ]
                }
            }]
        })))
        .mount(&server)
        .await;

    let result = test_pipeline(&server)
        .projected_points("SQUAD CONTEXT")
        .await
        .expect("success");

    assert!(result.text.starts_with("**Projected Points: 61**"));
    let titles: Vec<&str> = result.sources.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Injury news", "Fixture odds"]);
}
