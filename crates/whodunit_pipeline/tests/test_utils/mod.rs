//! Shared fixtures for pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use whodunit_core::{GenerateRequest, GenerateResponse};
use whodunit_error::{
    ServiceError, ServiceErrorKind, StorageError, StorageErrorKind, WhodunitResult,
};
use whodunit_interface::{GenerationDriver, TemplateSource};

type Responder = Box<dyn Fn(&str) -> WhodunitResult<String> + Send + Sync>;
type Latency = Box<dyn Fn(&str) -> Duration + Send + Sync>;

/// Mock generation driver answering from a prompt-keyed responder.
///
/// Every request is recorded so tests can inspect prompts and call counts.
pub struct MockDriver {
    responder: Responder,
    latency: Option<Latency>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockDriver {
    /// Create a driver that answers each user prompt with `responder`.
    pub fn new(responder: impl Fn(&str) -> WhodunitResult<String> + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            latency: None,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Delay each reply by an amount chosen from the prompt.
    pub fn with_latency(mut self, latency: impl Fn(&str) -> Duration + Send + Sync + 'static) -> Self {
        self.latency = Some(Box::new(latency));
        self
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of generate calls.
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// User prompts that start with `prefix`, in arrival order.
    pub fn prompts_starting_with(&self, prefix: &str) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.messages().last().map(|m| m.content.clone()))
            .filter(|p| p.starts_with(prefix))
            .collect()
    }
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> WhodunitResult<GenerateResponse> {
        self.requests.lock().unwrap().push(req.clone());
        let prompt = req
            .messages()
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default();

        if let Some(latency) = &self.latency {
            tokio::time::sleep(latency(&prompt)).await;
        }

        (self.responder)(&prompt).map(GenerateResponse::text)
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// A service failure for responders to return.
pub fn service_down() -> WhodunitResult<String> {
    Err(ServiceError::new(ServiceErrorKind::Http("connection refused".to_string())).into())
}

/// In-memory templates keyed by name.
pub struct MemoryTemplates(BTreeMap<String, String>);

impl MemoryTemplates {
    /// One short template per stage, each opening with the stage name so
    /// responders can route on the prompt.
    pub fn stages() -> Self {
        let templates = [
            ("script_info_writer", "premise {theme}"),
            ("character_outline_writer", "roster {theme} {intro}"),
            ("character_info_writer", "character {character_intro}|{script_content}"),
            (
                "clue_search_writer",
                "clues {script_content}|{character_intro}|{character_content}",
            ),
            (
                "discuss_writer",
                "discussion {script_content}|{character_intro}|{clue}",
            ),
        ];
        Self(
            templates
                .into_iter()
                .map(|(name, body)| (name.to_string(), body.to_string()))
                .collect(),
        )
    }

    /// Drop the template called `name`.
    pub fn without(mut self, name: &str) -> Self {
        self.0.remove(name);
        self
    }
}

impl TemplateSource for MemoryTemplates {
    fn load(&self, name: &str) -> WhodunitResult<String> {
        self.0.get(name).cloned().ok_or_else(|| {
            StorageError::new(StorageErrorKind::TemplateNotFound(name.to_string())).into()
        })
    }
}
