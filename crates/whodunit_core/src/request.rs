//! Request and response types for text generation.

use crate::{Message, SamplingParams};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A single conversation sent to the generation service.
///
/// Created per call and discarded once the response arrives.
///
/// # Examples
///
/// ```
/// use whodunit_core::{GenerateRequest, Message, SamplingParams};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::system("你是编剧"), Message::user("开始")])
///     .sampling(SamplingParams::default())
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages().len(), 2);
/// assert!(request.model().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// The conversation messages, oldest first
    messages: Vec<Message>,
    /// Decoding parameters
    #[builder(default)]
    sampling: SamplingParams,
    /// Model override; drivers fall back to their configured model
    #[builder(default)]
    model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new builder for `GenerateRequest`.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Token accounting reported by the service, when available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenUsage {
    /// Tokens consumed by the prompt
    pub prompt_tokens: u64,
    /// Tokens produced by the model
    pub completion_tokens: u64,
    /// Sum of prompt and completion tokens
    pub total_tokens: u64,
}

/// Raw text returned by the generation service.
///
/// # Examples
///
/// ```
/// use whodunit_core::GenerateResponse;
///
/// let response = GenerateResponse::text("{\"title\": \"T\"}");
/// assert!(response.text.starts_with('{'));
/// assert!(response.usage.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text, untouched
    pub text: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
}

impl GenerateResponse {
    /// Response carrying only text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: None,
        }
    }
}
