//! HTTP client for OpenAI-compatible chat-completions endpoints.

use super::dto::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::ModelConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, error, instrument};
use whodunit_core::{GenerateRequest, GenerateResponse};
use whodunit_error::{BuilderError, ServiceError, ServiceErrorKind, WhodunitResult};
use whodunit_interface::GenerationDriver;

/// Driver for any service that speaks the OpenAI chat-completions protocol.
///
/// The underlying `reqwest::Client` pools connections and is cheap to clone,
/// so one instance can serve every concurrent character task.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAICompatibleClient {
    /// Creates a new client from validated settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the settings are incomplete, or a
    /// `ServiceError` if the HTTP client cannot be initialized.
    #[instrument(skip_all, fields(model = %config.model))]
    pub fn new(config: &ModelConfig) -> WhodunitResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                ServiceError::new(ServiceErrorKind::Http(format!(
                    "Failed to build HTTP client: {}",
                    e
                )))
            })?;

        debug!(endpoint = %config.chat_completions_url(), "Creating OpenAI-compatible client");
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.chat_completions_url(),
        })
    }

    /// Endpoint the client posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Converts a pipeline request into the wire format.
    pub fn convert_request(&self, request: &GenerateRequest) -> WhodunitResult<ChatCompletionRequest> {
        let sampling = request.sampling();
        let model = request.model().clone().unwrap_or_else(|| self.model.clone());

        ChatCompletionRequest::builder()
            .model(model)
            .messages(
                request
                    .messages()
                    .iter()
                    .map(ChatMessage::from)
                    .collect::<Vec<_>>(),
            )
            .max_tokens(sampling.max_tokens)
            .temperature(sampling.temperature)
            .top_p(sampling.top_p)
            .frequency_penalty(sampling.frequency_penalty)
            .build()
            .map_err(|e| BuilderError::new(e.to_string()).into())
    }

    /// Extracts the first choice's text.
    pub fn convert_response(response: ChatCompletionResponse) -> WhodunitResult<GenerateResponse> {
        let usage = response.usage;
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ServiceError::new(ServiceErrorKind::EmptyResponse))?;

        Ok(GenerateResponse {
            text: text.trim().to_string(),
            usage,
        })
    }

    fn classify_status(status: StatusCode, body: String) -> ServiceError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => ServiceError::new(ServiceErrorKind::RateLimit),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ServiceError::new(ServiceErrorKind::Unauthorized(body))
            }
            _ => ServiceError::new(ServiceErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }),
        }
    }
}

#[async_trait]
impl GenerationDriver for OpenAICompatibleClient {
    #[instrument(skip(self, req), fields(provider = "openai-compatible", model = %self.model, messages = req.messages().len()))]
    async fn generate(&self, req: &GenerateRequest) -> WhodunitResult<GenerateResponse> {
        let body = self.convert_request(req)?;

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send chat-completions request");
                ServiceError::new(ServiceErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Generation service returned error");
            return Err(Self::classify_status(status, body).into());
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat-completions response");
            ServiceError::new(ServiceErrorKind::ResponseParsing(e.to_string()))
        })?;

        if let Some(usage) = &parsed.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Received chat-completions response"
            );
        }

        Self::convert_response(parsed)
    }

    fn provider_name(&self) -> &'static str {
        "openai-compatible"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
