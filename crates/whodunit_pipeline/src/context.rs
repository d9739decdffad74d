//! Accumulated stage results for one script.

use crate::prose;
use crate::stage::{StageKind, StageResult};
use std::collections::BTreeMap;
use whodunit_error::{PipelineError, PipelineErrorKind, WhodunitResult};

/// Results published so far, keyed by stage.
///
/// Each stage publishes exactly once and is read-only afterwards. Character
/// results are published together, in roster order, even when there are none.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptContext {
    theme: String,
    results: BTreeMap<StageKind, StageResult>,
    characters: Option<Vec<StageResult>>,
}

impl ScriptContext {
    /// Start an empty context for `theme`.
    pub fn new(theme: impl Into<String>) -> Self {
        Self {
            theme: theme.into(),
            results: BTreeMap::new(),
            characters: None,
        }
    }

    /// Theme the script is written around.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    /// Publish a single-result stage.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if the stage already published, or if a
    /// character result is passed here instead of [`Self::publish_characters`].
    pub fn publish(&mut self, result: StageResult) -> WhodunitResult<()> {
        if result.stage == StageKind::Character {
            return Err(PipelineError::new(PipelineErrorKind::ConfigurationError(
                "character results are published with publish_characters".to_string(),
            ))
            .into());
        }
        if self.results.contains_key(&result.stage) {
            return Err(PipelineError::new(PipelineErrorKind::StageAlreadyPublished(
                result.stage.to_string(),
            ))
            .into());
        }
        tracing::debug!(stage = %result.stage, degraded = result.is_degraded(), "Published stage result");
        self.results.insert(result.stage, result);
        Ok(())
    }

    /// Publish every character result at once, in roster order.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if characters were already published.
    pub fn publish_characters(&mut self, characters: Vec<StageResult>) -> WhodunitResult<()> {
        if self.characters.is_some() {
            return Err(PipelineError::new(PipelineErrorKind::StageAlreadyPublished(
                StageKind::Character.to_string(),
            ))
            .into());
        }
        tracing::debug!(count = characters.len(), "Published character results");
        self.characters = Some(characters);
        Ok(())
    }

    /// Result of a single-result stage.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if the stage has not published yet.
    pub fn get(&self, stage: StageKind) -> WhodunitResult<&StageResult> {
        self.results.get(&stage).ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::MissingStage(stage.to_string())).into()
        })
    }

    /// Character results in roster order; empty until published.
    pub fn characters(&self) -> &[StageResult] {
        self.characters.as_deref().unwrap_or_default()
    }

    /// Whether `stage` has published its result.
    pub fn is_published(&self, stage: StageKind) -> bool {
        match stage {
            StageKind::Character => self.characters.is_some(),
            _ => self.results.contains_key(&stage),
        }
    }

    /// Check that every stage in `stages` has published.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` naming the first unpublished stage.
    pub fn require(&self, stages: &[StageKind]) -> WhodunitResult<()> {
        match stages.iter().find(|stage| !self.is_published(**stage)) {
            Some(missing) => Err(PipelineError::new(PipelineErrorKind::MissingStage(
                missing.to_string(),
            ))
            .into()),
            None => Ok(()),
        }
    }

    /// Premise payload as compact JSON, or its raw text when degraded.
    pub fn premise_json(&self) -> WhodunitResult<String> {
        let premise = self.get(StageKind::Premise)?;
        Ok(match &premise.payload {
            Some(payload) => payload.to_string(),
            None => premise.text.clone(),
        })
    }

    /// Premise introduction, or the raw premise text when degraded.
    pub fn premise_intro(&self) -> WhodunitResult<String> {
        let premise = self.get(StageKind::Premise)?;
        Ok(match &premise.payload {
            Some(payload) => prose::text_field(payload, "intro", prose::UNKNOWN),
            None => premise.text.clone(),
        })
    }

    /// Script title, falling back to a placeholder.
    pub fn title(&self) -> WhodunitResult<String> {
        let premise = self.get(StageKind::Premise)?;
        Ok(match &premise.payload {
            Some(payload) => prose::text_field(payload, "title", prose::UNTITLED),
            None => prose::UNTITLED.to_string(),
        })
    }

    /// Roster entries in roster order; empty when the roster degraded.
    pub fn roster_entries(&self) -> WhodunitResult<Vec<String>> {
        let roster = self.get(StageKind::Roster)?;
        Ok(roster
            .payload
            .as_ref()
            .map(prose::roster_entries)
            .unwrap_or_default())
    }

    /// All character sections joined by blank lines.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if characters have not been published.
    pub fn character_content(&self) -> WhodunitResult<String> {
        let characters = self.characters.as_ref().ok_or_else(|| {
            PipelineError::new(PipelineErrorKind::MissingStage(
                StageKind::Character.to_string(),
            ))
        })?;
        Ok(characters
            .iter()
            .map(|c| c.text.trim())
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
