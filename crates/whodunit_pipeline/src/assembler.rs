//! Final document assembly.

use crate::context::ScriptContext;
use crate::stage::{StageKind, StageResult};
use std::fmt;
use whodunit_error::WhodunitResult;

/// One block of the assembled document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Stage that produced the block
    pub stage: StageKind,
    /// Roster position for character sections
    pub index: Option<usize>,
    /// Separator and header written before the body
    pub lead: &'static str,
    /// Rendered prose, or raw fallback text
    pub body: String,
    /// Whether the body is an unvalidated fallback
    pub degraded: bool,
}

impl Section {
    fn from_result(result: &StageResult, lead: &'static str, index: Option<usize>) -> Self {
        let body = match result.stage {
            StageKind::Character => result.text.trim().to_string(),
            _ => result.text.clone(),
        };
        Self {
            stage: result.stage,
            index,
            lead,
            body,
            degraded: result.is_degraded(),
        }
    }
}

/// The finished script, in pipeline order.
///
/// Displaying a document yields the text that gets saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    sections: Vec<Section>,
}

impl Document {
    /// Assemble every published stage of `context`.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if a single-result stage never published.
    pub fn assemble(context: &ScriptContext) -> WhodunitResult<Self> {
        let mut sections = vec![
            Section::from_result(context.get(StageKind::Premise)?, "", None),
            Section::from_result(context.get(StageKind::Roster)?, "\n\n#人物简介\n", None),
        ];
        sections.extend(
            context
                .characters()
                .iter()
                .enumerate()
                .map(|(idx, result)| Section::from_result(result, "\n\n", Some(idx))),
        );
        sections.push(Section::from_result(
            context.get(StageKind::Clues)?,
            "\n\n\n#线索搜证\n",
            None,
        ));
        sections.push(Section::from_result(
            context.get(StageKind::Discussion)?,
            "\n\n#圆桌与解析\n",
            None,
        ));

        Ok(Self {
            title: context.title()?,
            sections,
        })
    }

    /// Script title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sections in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Stages with at least one degraded section, in pipeline order.
    pub fn degraded_stages(&self) -> Vec<StageKind> {
        let mut stages: Vec<StageKind> = self
            .sections
            .iter()
            .filter(|s| s.degraded)
            .map(|s| s.stage)
            .collect();
        stages.dedup();
        stages
    }

    /// Whether any section fell back to raw text.
    pub fn is_degraded(&self) -> bool {
        self.sections.iter().any(|s| s.degraded)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            write!(f, "{}{}", section.lead, section.body)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retry::StageOutcome;
    use serde_json::json;

    fn context(clues: StageOutcome) -> ScriptContext {
        let mut ctx = ScriptContext::new("雪夜");
        let publish = |ctx: &mut ScriptContext, stage, outcome| {
            ctx.publish(StageResult::from_outcome(stage, outcome)).unwrap();
        };
        publish(
            &mut ctx,
            StageKind::Premise,
            StageOutcome::Validated(json!({"title": "T", "num": 2, "intro": "I", "type": "悬疑"})),
        );
        publish(
            &mut ctx,
            StageKind::Roster,
            StageOutcome::Validated(json!(["A", "B"])),
        );
        ctx.publish_characters(vec![
            StageResult::from_outcome(StageKind::Character, StageOutcome::Validated(json!(" bio-A\n"))),
            StageResult::from_outcome(StageKind::Character, StageOutcome::Validated(json!("bio-B"))),
        ])
        .unwrap();
        publish(&mut ctx, StageKind::Clues, clues);
        publish(
            &mut ctx,
            StageKind::Discussion,
            StageOutcome::Validated(json!({"故事结局": "end"})),
        );
        ctx
    }

    #[test]
    fn test_document_layout() {
        let ctx = context(StageOutcome::Validated(
            json!({"s": {"场景名称": "Hall", "线索": ["key"]}}),
        ));
        let doc = Document::assemble(&ctx).unwrap();

        assert_eq!(doc.title(), "T");
        assert_eq!(
            doc.to_string(),
            "#剧本名：T\n#剧本人数：2\n#剧本类型：悬疑\n#剧本简介：I\
\n\n#人物简介\nA\nB\
\n\nbio-A\n\nbio-B\
\n\n\n#线索搜证\n\n场景：Hall\n线索：\n  1. key\n\
\n\n#圆桌与解析\n\n故事结局:\n  end\n"
        );
        assert!(!doc.is_degraded());
    }

    #[test]
    fn test_degraded_section_inserted_as_fallback() {
        let ctx = context(StageOutcome::Degraded("线索生成失败".to_string()));
        let doc = Document::assemble(&ctx).unwrap();

        assert!(doc.to_string().contains("#线索搜证\n线索生成失败"));
        assert_eq!(doc.degraded_stages(), vec![StageKind::Clues]);
    }

    #[test]
    fn test_incomplete_context_cannot_assemble() {
        let ctx = ScriptContext::new("雪夜");
        assert!(Document::assemble(&ctx).is_err());
    }
}
