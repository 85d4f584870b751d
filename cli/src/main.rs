//! CLI entrypoint for danmaku-troupe
//!
//! Wires the layers together with dependency injection: config and prompt
//! files feed the registry, the Gemini transport feeds the generator, and
//! the use case drives everything with a console progress observer.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;
use troupe_application::ports::prompt_source::PromptSource;
use troupe_application::{NoObserver, PipelineObserver, RunPipelineInput, RunPipelineUseCase};
use troupe_domain::{AgentRegistry, ExecutionOrder, Model, VideoRef};
use troupe_infrastructure::{
    ConfigLoader, FileConfig, FilePromptSource, GeminiCommentGenerator, HttpTransport, RetryPolicy,
};
use troupe_presentation::{Cli, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting danmaku-troupe");

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("{e}"))
            .context("Failed to load configuration")?
    };

    // Prompt templates must all be in place before the run can start.
    let prompt_source = match &config.troupe.prompts_dir {
        Some(dir) => FilePromptSource::new(dir),
        None => FilePromptSource::builtin(),
    };
    let prompts = prompt_source
        .load()
        .await
        .context("Failed to load persona prompt templates")?;

    let mut registry = AgentRegistry::new(&prompts)?;
    apply_config_overrides(&mut registry, &config).await?;
    for (agent, count) in cli.parse_counts().map_err(|e| anyhow::anyhow!(e))? {
        registry.set_target_count(agent, count)?;
    }

    let order = build_order(&cli, &config, &registry)?;

    let model: Model = cli
        .model
        .as_deref()
        .unwrap_or(&config.generation.model)
        .parse()
        .expect("model parsing is infallible");

    let video = load_video(&cli).await?;
    let article_text = match &cli.article {
        Some(path) => Some(
            tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read article: {}", path.display()))?,
        ),
        None => None,
    };

    // === Dependency Injection ===
    let transport = HttpTransport::from_env(Duration::from_secs(
        config.generation.request_timeout_secs,
    ))?;
    let policy = RetryPolicy::new(
        config.generation.max_attempts,
        Duration::from_secs(config.generation.backoff_secs),
    );
    let generator =
        std::sync::Arc::new(GeminiCommentGenerator::new(transport).with_policy(policy));
    let use_case = RunPipelineUseCase::new(generator);

    let mut input = RunPipelineInput::new(video, registry, order).with_model(model);
    if let Some(article) = article_text {
        input = input.with_article(article);
    }

    // Log lines and a redrawing bar fight over the terminal, so verbose
    // runs get plain line-based progress instead.
    let observer: Box<dyn PipelineObserver> = if cli.quiet {
        Box::new(NoObserver)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let result = use_case
        .execute_with_progress(input, observer.as_ref(), &CancellationToken::new())
        .await?;

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&result.timeline),
        OutputFormat::Json => ConsoleFormatter::format_json(&result.timeline),
        OutputFormat::Xml => ConsoleFormatter::format_xml(&result.timeline),
    };
    println!("{output}");

    Ok(())
}

async fn apply_config_overrides(registry: &mut AgentRegistry, config: &FileConfig) -> Result<()> {
    for (id, overrides) in &config.troupe.agents {
        let agent = id
            .parse()
            .with_context(|| format!("Unknown agent in config: {id}"))?;
        if let Some(count) = overrides.target_comment_count {
            registry.set_target_count(agent, count)?;
        }
        if let Some(path) = &overrides.prompt_file {
            let prompt = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read prompt file: {}", path.display()))?;
            registry.set_prompt(agent, prompt)?;
        }
    }
    Ok(())
}

fn build_order(cli: &Cli, config: &FileConfig, registry: &AgentRegistry) -> Result<ExecutionOrder> {
    if let Some(ids) = cli.parse_order().map_err(|e| anyhow::anyhow!(e))? {
        return Ok(ExecutionOrder::new(ids, registry)?);
    }
    if !config.troupe.order.is_empty() {
        let ids = config
            .troupe
            .order
            .iter()
            .map(|s| s.parse())
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ExecutionOrder::new(ids, registry)?);
    }
    Ok(ExecutionOrder::default_for(registry))
}

async fn load_video(cli: &Cli) -> Result<VideoRef> {
    let file_name = cli
        .video
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if file_name.is_empty() {
        bail!("No video selected");
    }

    if cli.no_upload {
        return Ok(VideoRef::named(file_name));
    }

    let data = tokio::fs::read(&cli.video)
        .await
        .with_context(|| format!("Failed to read video: {}", cli.video.display()))?;
    let mime = mime_for(&cli.video);
    info!("Attached {} ({} bytes, {})", file_name, data.len(), mime);
    Ok(VideoRef::with_media(file_name, mime, data))
}

/// MIME type from the file extension; the Gemini API needs one for
/// inline media and unknown containers default to mp4.
fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("mpg") | Some("mpeg") => "video/mpeg",
        _ => "video/mp4",
    }
}
