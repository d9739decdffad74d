//! Stage execution and the full script run.

use crate::assembler::Document;
use crate::config::PipelineConfig;
use crate::context::ScriptContext;
use crate::fanout::map_concurrent;
use crate::retry::RetryController;
use crate::stage::{StageKind, StageResult};
use crate::template;
use tracing::{debug, info, instrument};
use whodunit_core::{GenerateRequest, Message, SamplingParams};
use whodunit_error::{BuilderError, PipelineError, PipelineErrorKind, WhodunitResult};
use whodunit_interface::{GenerationDriver, TemplateSource};

/// A generated script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Title used for the saved file
    pub title: String,
    /// Assembled document
    pub document: Document,
}

/// Writes murder-mystery scripts by driving a generation model through the
/// five stages.
///
/// Stages run in order, each reading what earlier stages published. The
/// character stage fans out with one task per roster entry. Generation
/// failures never abort the run; a stage whose replies never validate is
/// kept as its raw fallback text and flagged as degraded.
///
/// # Example
///
/// ```rust,ignore
/// use whodunit_pipeline::ScriptWriter;
///
/// let writer = ScriptWriter::new(driver, templates);
/// let script = writer.generate("雪夜山庄").await?;
/// for stage in script.document.degraded_stages() {
///     eprintln!("{stage} fell back to raw text");
/// }
/// ```
pub struct ScriptWriter<D: GenerationDriver, S: TemplateSource> {
    driver: D,
    templates: S,
    config: PipelineConfig,
    sampling: SamplingParams,
    retry: RetryController,
}

impl<D: GenerationDriver, S: TemplateSource> ScriptWriter<D, S> {
    /// Create a writer with default pipeline settings and sampling.
    pub fn new(driver: D, templates: S) -> Self {
        let config = PipelineConfig::default();
        Self {
            driver,
            templates,
            retry: RetryController::new(config.max_attempts),
            config,
            sampling: SamplingParams::default(),
        }
    }

    /// Replace the pipeline settings.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.retry = RetryController::new(config.max_attempts);
        self.config = config;
        self
    }

    /// Replace the sampling parameters sent with every request.
    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    /// Get a reference to the generation driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Active pipeline settings.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage for `theme` and assemble the document.
    ///
    /// A blank theme falls back to the configured default.
    ///
    /// # Errors
    ///
    /// Fails only when a prompt template cannot be loaded or a request cannot
    /// be built. Generation failures degrade the affected stage instead.
    #[instrument(skip(self), fields(provider = self.driver.provider_name(), model = self.driver.model_name()))]
    pub async fn generate(&self, theme: &str) -> WhodunitResult<Script> {
        let theme = self.config.resolve_theme(theme);
        info!(theme, "Starting script generation");

        let mut context = ScriptContext::new(theme);

        for stage in [StageKind::Premise, StageKind::Roster] {
            let result = self.run_stage(stage, &context).await?;
            context.publish(result)?;
        }

        let characters = self.run_characters(&context).await?;
        context.publish_characters(characters)?;

        for stage in [StageKind::Clues, StageKind::Discussion] {
            let result = self.run_stage(stage, &context).await?;
            context.publish(result)?;
        }

        let document = Document::assemble(&context)?;
        let degraded = document.degraded_stages();
        info!(
            title = document.title(),
            sections = document.sections().len(),
            degraded = degraded.len(),
            "Script generation completed"
        );

        Ok(Script {
            title: document.title().to_string(),
            document,
        })
    }

    /// Run one single-result stage against the current context.
    ///
    /// # Errors
    ///
    /// Returns an error if the stage template is unavailable or an upstream
    /// stage has not published.
    pub async fn run_stage(&self, stage: StageKind, context: &ScriptContext) -> WhodunitResult<StageResult> {
        let template = self.load_template(stage)?;
        self.run_prompt(stage, &template, context, None).await
    }

    /// Write one character per roster entry, concurrently, in roster order.
    #[instrument(skip(self, context), fields(limit = self.config.max_concurrency))]
    async fn run_characters(&self, context: &ScriptContext) -> WhodunitResult<Vec<StageResult>> {
        let entries = context.roster_entries()?;
        if entries.is_empty() {
            info!("Roster is empty, no characters to write");
            return Ok(Vec::new());
        }

        let template = self.load_template(StageKind::Character)?;
        let template = template.as_str();
        info!(count = entries.len(), "Writing characters");

        map_concurrent(entries, self.config.max_concurrency, move |idx, entry| async move {
            debug!(idx, entry = %entry, "Character task started");
            self.run_prompt(StageKind::Character, template, context, Some(&entry))
                .await
        })
        .await
        .into_iter()
        .collect()
    }

    #[instrument(skip_all, fields(stage = %stage))]
    async fn run_prompt(
        &self,
        stage: StageKind,
        template: &str,
        context: &ScriptContext,
        roster_entry: Option<&str>,
    ) -> WhodunitResult<StageResult> {
        context.require(stage.dependencies())?;
        let substitutions = stage.substitutions(context, roster_entry)?;
        let prompt = template::render(template, &substitutions);
        let request = self.build_request(prompt)?;

        let name: &'static str = stage.into();
        let driver = &self.driver;
        let request = &request;
        let outcome = self
            .retry
            .run(name, &stage.expectation(), move || async move {
                driver.generate(request).await.map(|response| response.text)
            })
            .await;

        let result = StageResult::from_outcome(stage, outcome);
        info!(degraded = result.is_degraded(), chars = result.text.len(), "Stage completed");
        Ok(result)
    }

    fn load_template(&self, stage: StageKind) -> WhodunitResult<String> {
        self.templates.load(stage.template_name()).map_err(|e| {
            PipelineError::new(PipelineErrorKind::TemplateUnavailable {
                stage: stage.to_string(),
                message: e.to_string(),
            })
            .into()
        })
    }

    fn build_request(&self, prompt: String) -> WhodunitResult<GenerateRequest> {
        GenerateRequest::builder()
            .messages(vec![
                Message::system(self.config.system_prompt.clone()),
                Message::user(prompt),
            ])
            .sampling(self.sampling)
            .build()
            .map_err(|e| BuilderError::new(e.to_string()).into())
    }
}
