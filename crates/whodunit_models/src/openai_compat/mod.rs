//! OpenAI chat-completions protocol support.

mod client;
mod dto;

pub use client::OpenAICompatibleClient;
pub use dto::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage,
};
