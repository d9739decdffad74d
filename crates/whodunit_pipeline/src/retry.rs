//! Bounded retry around one generation call plus extraction.

use crate::extraction::{Shape, extract, normalize_whitespace};
use serde_json::Value as JsonValue;
use std::future::Future;
use tracing::{debug, info, warn};
use whodunit_error::WhodunitResult;

/// What a stage accepts as a successful reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// A JSON payload of `shape`, optionally whitespace-normalized first
    Structured {
        /// Expected top-level shape
        shape: Shape,
        /// Flatten line breaks before delimiter repair
        normalize: bool,
    },
    /// Free prose. A reply opening with a ```` ```json ```` fence must hold a
    /// parsable object instead.
    Text,
}

impl Expectation {
    /// Structured expectation without normalization.
    pub fn structured(shape: Shape) -> Self {
        Self::Structured {
            shape,
            normalize: false,
        }
    }

    /// Turn a raw reply into a payload.
    ///
    /// Free text becomes a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedOutputError` when the reply cannot be repaired.
    pub fn extract(&self, raw: &str) -> WhodunitResult<JsonValue> {
        match *self {
            Expectation::Structured { shape, normalize } => {
                if normalize {
                    extract(&normalize_whitespace(raw), shape)
                } else {
                    extract(raw, shape)
                }
            }
            Expectation::Text => {
                let trimmed = raw.trim();
                if trimmed.starts_with("```json") {
                    extract(trimmed, Shape::Object)
                } else {
                    Ok(JsonValue::String(trimmed.to_string()))
                }
            }
        }
    }
}

/// Result of a retried stage call.
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome {
    /// Extraction succeeded on some attempt
    Validated(JsonValue),
    /// Every attempt failed; carries the last raw reply, or an empty string
    /// if the service never answered
    Degraded(String),
}

impl StageOutcome {
    /// Whether the payload passed extraction.
    pub fn is_validated(&self) -> bool {
        matches!(self, StageOutcome::Validated(_))
    }
}

/// Runs a generation call up to `max_attempts` times.
///
/// Service errors and extraction failures are both retryable. Attempts are
/// immediate; there is no backoff. The controller never fails: once the
/// attempts are spent it returns [`StageOutcome::Degraded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryController {
    max_attempts: u32,
}

impl Default for RetryController {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl RetryController {
    /// Create a controller; at least one attempt is always made.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    /// Configured attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Call `call` until its reply satisfies `expectation` or the budget runs out.
    #[tracing::instrument(skip(self, expectation, call), fields(max_attempts = self.max_attempts))]
    pub async fn run<F, Fut>(&self, stage: &str, expectation: &Expectation, mut call: F) -> StageOutcome
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = WhodunitResult<String>>,
    {
        let mut last_raw = String::new();

        for attempt in 1..=self.max_attempts {
            match call().await {
                Ok(raw) => match expectation.extract(&raw) {
                    Ok(payload) => {
                        if attempt > 1 {
                            info!(stage, attempt, "Retry succeeded");
                        } else {
                            debug!(stage, "Reply validated on first attempt");
                        }
                        return StageOutcome::Validated(payload);
                    }
                    Err(e) => {
                        warn!(stage, attempt, error = %e, "Attempt {} failed", attempt);
                        last_raw = raw;
                    }
                },
                Err(e) => {
                    warn!(stage, attempt, error = %e, "Attempt {} failed", attempt);
                }
            }
        }

        warn!(
            stage,
            attempts = self.max_attempts,
            fallback_len = last_raw.len(),
            "All attempts failed, degrading to raw reply"
        );
        StageOutcome::Degraded(last_raw)
    }
}
