//! Chat-completions data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use whodunit_core::{Message, TokenUsage};

/// A message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`
    pub role: String,
    /// Message text
    #[serde(default)]
    pub content: Option<String>,
}

impl From<&Message> for ChatMessage {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.to_string(),
            content: Some(message.content.clone()),
        }
    }
}

/// Chat-completions request body.
#[derive(Debug, Clone, PartialEq, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation
    messages: Vec<ChatMessage>,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
    /// Nucleus-sampling threshold
    top_p: f32,
    /// Frequency penalty
    frequency_penalty: f32,
    /// Number of choices; always one
    #[builder(default = "1")]
    n: u32,
}

impl ChatCompletionRequest {
    /// Creates a new builder for `ChatCompletionRequest`.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// One generated alternative.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatChoice {
    /// Position in the choice list
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: ChatMessage,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Chat-completions response body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatCompletionResponse {
    /// Response identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    /// Token accounting
    #[serde(default)]
    pub usage: Option<TokenUsage>,
}
