//! Generative-API advice pipeline.
//!
//! Assembles prompts from a rendered squad context, calls the external
//! generative-language API with a bounded retry policy, and normalizes the
//! reply into an [`AdviceResult`](types::AdviceResult).

pub mod client;
pub mod pipeline;
pub mod prompt;
pub mod retry;
pub mod types;

pub use client::{AdviceError, GeminiClient, GeminiConfig};
pub use pipeline::AdvicePipeline;
pub use retry::RetryPolicy;
pub use types::{AdviceResult, Source};
