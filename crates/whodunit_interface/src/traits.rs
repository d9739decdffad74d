//! Trait definitions for the pipeline's external collaborators.

use async_trait::async_trait;
use std::sync::Arc;
use whodunit_core::{GenerateRequest, GenerateResponse};
use whodunit_error::WhodunitResult;

/// Core trait that all generation backends must implement.
///
/// Implementations are shared across concurrent character tasks, so they
/// must be safe to call from several futures at once.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Generate model output for a conversation.
    ///
    /// # Errors
    ///
    /// Returns a `ServiceError` on transport, authentication or rate-limit failure.
    async fn generate(&self, req: &GenerateRequest) -> WhodunitResult<GenerateResponse>;

    /// Provider name (e.g., "openai-compatible").
    fn provider_name(&self) -> &'static str;

    /// Model identifier.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<D: GenerationDriver + ?Sized> GenerationDriver for Arc<D> {
    async fn generate(&self, req: &GenerateRequest) -> WhodunitResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

/// Read-only source of prompt templates.
pub trait TemplateSource: Send + Sync {
    /// Load the template registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the template cannot be found or read.
    fn load(&self, name: &str) -> WhodunitResult<String>;
}

/// Terminal consumer of the finished document.
pub trait DocumentSink: Send + Sync {
    /// Where a saved document ends up.
    type Location;

    /// Persist `content` under a name derived from `title`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the document cannot be written.
    fn save(&self, title: &str, content: &str) -> WhodunitResult<Self::Location>;
}
