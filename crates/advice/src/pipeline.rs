//! The advice request pipeline: prompt assembly, bounded-retry external
//! call, and response normalization.
//!
//! Per-request flow: prompt built -> `CallingModel(attempt=1..max)` with
//! attempt-indexed backoff between retryable failures -> normalized
//! [`AdviceResult`] or a terminal [`AdviceError`]. No caching: every call
//! re-invokes the external model.

use crate::client::{AdviceError, GeminiClient};
use crate::prompt;
use crate::retry::RetryPolicy;
use crate::types::{AdviceResult, GenerateContentRequest, GenerateContentResponse};

/// Stateless pipeline over a [`GeminiClient`] and a [`RetryPolicy`].
#[derive(Debug, Clone)]
pub struct AdvicePipeline {
    client: GeminiClient,
    policy: RetryPolicy,
}

impl AdvicePipeline {
    pub fn new(client: GeminiClient) -> Self {
        Self::with_policy(client, RetryPolicy::default())
    }

    pub fn with_policy(client: GeminiClient, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }

    /// Answer a free-text transfer-advice question against the rendered
    /// squad context. The context segment of the prompt is truncated to
    /// the chat limit; degraded contexts are passed through as-is so the
    /// model can still respond.
    pub async fn chat_advice(
        &self,
        question: &str,
        context: &str,
        gameweek: i32,
    ) -> Result<AdviceResult, AdviceError> {
        let request = prompt::chat_request(question, context, gameweek);
        let response = self.call_with_retry(&request).await?;
        normalize(response)
    }

    /// Produce a projected-points estimate for the rendered squad context.
    /// The reply is required (by the system instruction) to lead with a
    /// `Projected Points: [NUMBER]` line.
    pub async fn projected_points(&self, context: &str) -> Result<AdviceResult, AdviceError> {
        let request = prompt::projection_request(context);
        let response = self.call_with_retry(&request).await?;
        normalize(response)
    }

    /// Run the bounded retry loop around a single logical model call.
    ///
    /// Retries only on the policy's retryable statuses, sleeping the
    /// attempt-indexed delay between attempts. Every other failure, and
    /// exhaustion of the budget, terminates with
    /// [`AdviceError::Exhausted`] carrying the last upstream message.
    async fn call_with_retry(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, AdviceError> {
        let mut attempt = 1u32;

        loop {
            match self.client.generate_content(request).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    if err.is_retryable() && attempt < self.policy.max_attempts {
                        let delay = self.policy.delay_for(attempt);
                        tracing::warn!(
                            attempt,
                            delay_ms = delay.as_millis() as u64,
                            error = %err,
                            "generative API call failed, retrying",
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }

                    tracing::error!(attempt, error = %err, "generative API call failed");
                    return Err(AdviceError::Exhausted {
                        attempts: attempt,
                        message: err.upstream_message(),
                    });
                }
            }
        }
    }
}

/// Extract the first candidate's text and citations from a success body.
///
/// A 2xx body with no extractable text is a distinct failure from a
/// transport error; it is logged separately for diagnosis.
fn normalize(response: GenerateContentResponse) -> Result<AdviceResult, AdviceError> {
    let Some(text) = response.first_candidate_text() else {
        tracing::error!(
            candidates = response.candidates.len(),
            "model returned a success body with no extractable text",
        );
        return Err(AdviceError::EmptyResponse);
    };

    Ok(AdviceResult {
        text,
        sources: response.sources(),
    })
}
