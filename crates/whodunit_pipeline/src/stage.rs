//! Stage definitions.

use crate::context::ScriptContext;
use crate::extraction::Shape;
use crate::prose;
use crate::retry::{Expectation, StageOutcome};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use whodunit_error::WhodunitResult;

/// The five pipeline stages, in execution order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum StageKind {
    /// Title, player count, introduction and genre
    Premise,
    /// Ordered list of character outlines
    Roster,
    /// One background per roster entry
    Character,
    /// Search scenes and their clues
    Clues,
    /// Panel questions, resolution and ending
    Discussion,
}

impl StageKind {
    /// Name of the prompt template this stage renders.
    pub fn template_name(self) -> &'static str {
        match self {
            StageKind::Premise => "script_info_writer",
            StageKind::Roster => "character_outline_writer",
            StageKind::Character => "character_info_writer",
            StageKind::Clues => "clue_search_writer",
            StageKind::Discussion => "discuss_writer",
        }
    }

    /// What the stage accepts as a valid reply.
    pub fn expectation(self) -> Expectation {
        match self {
            StageKind::Premise => Expectation::structured(Shape::Object),
            StageKind::Roster => Expectation::structured(Shape::Array),
            StageKind::Character => Expectation::Text,
            StageKind::Clues => Expectation::structured(Shape::Object),
            StageKind::Discussion => Expectation::Structured {
                shape: Shape::Object,
                normalize: true,
            },
        }
    }

    /// Upstream stages whose results feed this stage's prompt.
    ///
    /// Every value [`Self::substitutions`] reads comes from one of these.
    pub fn dependencies(self) -> &'static [StageKind] {
        match self {
            StageKind::Premise => &[],
            StageKind::Roster => &[StageKind::Premise],
            StageKind::Character => &[StageKind::Premise, StageKind::Roster],
            StageKind::Clues => &[StageKind::Premise, StageKind::Roster, StageKind::Character],
            StageKind::Discussion => &[
                StageKind::Premise,
                StageKind::Roster,
                StageKind::Character,
                StageKind::Clues,
            ],
        }
    }

    /// Placeholder values for this stage's template.
    ///
    /// `roster_entry` is the outline of the character being written and is
    /// only read by [`StageKind::Character`].
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if a dependency has not been published.
    pub fn substitutions(
        self,
        context: &ScriptContext,
        roster_entry: Option<&str>,
    ) -> WhodunitResult<BTreeMap<String, String>> {
        let mut subs = BTreeMap::new();
        match self {
            StageKind::Premise => {
                subs.insert("theme".to_string(), context.theme().to_string());
            }
            StageKind::Roster => {
                subs.insert("theme".to_string(), context.theme().to_string());
                subs.insert("intro".to_string(), context.premise_json()?);
            }
            StageKind::Character => {
                subs.insert("script_content".to_string(), context.premise_json()?);
                subs.insert(
                    "character_intro".to_string(),
                    roster_entry.unwrap_or_default().to_string(),
                );
            }
            StageKind::Clues | StageKind::Discussion => {
                subs.insert("script_content".to_string(), context.premise_intro()?);
                subs.insert(
                    "character_intro".to_string(),
                    context.roster_entries()?.join(" "),
                );
                subs.insert("character_content".to_string(), context.character_content()?);
                if self == StageKind::Discussion {
                    subs.insert("clue".to_string(), context.get(StageKind::Clues)?.text.clone());
                }
            }
        }
        Ok(subs)
    }

    /// Render a validated payload into document prose.
    pub fn render(self, payload: &JsonValue) -> String {
        match self {
            StageKind::Premise => prose::premise(payload),
            StageKind::Roster => prose::roster_entries(payload).join("\n"),
            StageKind::Character => prose::character(payload),
            StageKind::Clues => prose::clues(payload),
            StageKind::Discussion => prose::discussion(payload),
        }
    }
}

/// Output of one stage run.
#[derive(Debug, Clone, PartialEq)]
pub struct StageResult {
    /// Stage that produced this result
    pub stage: StageKind,
    /// Rendered prose, or the raw fallback reply when degraded
    pub text: String,
    /// Validated payload, absent when degraded
    pub payload: Option<JsonValue>,
}

impl StageResult {
    /// Build a result from a retry outcome, rendering validated payloads.
    pub fn from_outcome(stage: StageKind, outcome: StageOutcome) -> Self {
        match outcome {
            StageOutcome::Validated(payload) => Self {
                stage,
                text: stage.render(&payload),
                payload: Some(payload),
            },
            StageOutcome::Degraded(raw) => Self {
                stage,
                text: raw,
                payload: None,
            },
        }
    }

    /// Whether extraction failed on every attempt.
    pub fn is_degraded(&self) -> bool {
        self.payload.is_none()
    }
}
