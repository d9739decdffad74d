//! Generation service drivers for Whodunit.
//!
//! Any service speaking the OpenAI chat-completions protocol (InternLM/Puyu,
//! OpenAI, vLLM, Ollama's compatibility endpoint, ...) is reachable through
//! [`OpenAICompatibleClient`]. Credentials and the model name are injected
//! through [`ModelConfig`] instead of being read from process-wide state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod openai_compat;

pub use config::ModelConfig;
pub use openai_compat::{
    ChatChoice, ChatCompletionRequest, ChatCompletionRequestBuilder, ChatCompletionResponse,
    ChatMessage, OpenAICompatibleClient,
};
