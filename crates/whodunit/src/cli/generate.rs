//! Script generation command handler.

use std::path::PathBuf;
use tracing::{info, warn};
use whodunit::{
    DocumentDirectory, DocumentSink, OpenAICompatibleClient, PromptDirectory, ScriptWriter,
    WhodunitConfig, WhodunitResult,
};

/// Options for one `generate` run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Requested theme
    pub theme: Option<String>,
    /// Prompt override directory
    pub prompts: Option<PathBuf>,
    /// Output directory
    pub output: Option<PathBuf>,
    /// Print instead of saving
    pub no_save: bool,
    /// Explicit configuration file
    pub config: Option<PathBuf>,
}

/// Generate a script and save or print it.
///
/// Degraded stages are reported but do not fail the command.
pub async fn run_generate(options: GenerateOptions) -> WhodunitResult<()> {
    let mut config = WhodunitConfig::load(options.config.as_deref())?;
    if let Some(dir) = options.prompts {
        config.paths.prompts_dir = Some(dir);
    }
    if let Some(dir) = options.output {
        config.paths.output_dir = dir;
    }

    let driver = OpenAICompatibleClient::new(&config.model)?;
    let templates = match &config.paths.prompts_dir {
        Some(dir) => PromptDirectory::with_override(dir)?,
        None => PromptDirectory::bundled(),
    };

    let writer = ScriptWriter::new(driver, templates)
        .with_config(config.pipeline.clone())
        .with_sampling(config.sampling);

    let script = writer
        .generate(options.theme.as_deref().unwrap_or_default())
        .await?;

    let degraded = script.document.degraded_stages();
    if !degraded.is_empty() {
        let names: Vec<String> = degraded.iter().map(ToString::to_string).collect();
        warn!(stages = %names.join(", "), "Some stages fell back to raw model output");
        eprintln!("警告：以下阶段未能解析为结构化内容，已保留原始输出：{}", names.join(", "));
    }

    if options.no_save {
        println!("{}", script.document);
        return Ok(());
    }

    let sink = DocumentDirectory::new(&config.paths.output_dir);
    let path = sink.save(&script.title, &script.document.to_string())?;
    info!(path = %path.display(), "Script saved");
    println!("剧本内容已保存到 {}", path.display());

    Ok(())
}
