use std::{path::PathBuf, process::ExitCode, time::Duration};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use notes_pulse::{
    openai::OpenAIClient,
    render::{format_metadata, format_summary_json, format_summary_markdown},
    tracing::init_tracing_subscriber,
    RetryPolicy, RunOutcome, SummarizerConfig, VideoNotes, VideoNotesProcessorBuilder,
};
use transcript_source::YouTubeTranscriptSource;

#[derive(Parser)]
#[command(name = "notes-pulse", about = "Quota-aware YouTube video notes")]
struct Cli {
    /// YouTube video link or bare 11 character video id
    video: String,

    /// API key for the OpenAI-compatible completion endpoint
    #[arg(long, env = "GOOGLE_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of the OpenAI-compatible completion endpoint
    #[arg(long, env = "LLM_BASE_URL", default_value = OpenAIClient::DEFAULT_BASE_URL)]
    base_url: String,

    /// Completion model name
    #[arg(long, env = "LLM_MODEL", default_value = OpenAIClient::DEFAULT_MODEL)]
    model: String,

    /// Maximum completion requests per video
    #[arg(long, env = "MAX_API_CALLS", default_value_t = SummarizerConfig::DEFAULT_CALL_BUDGET)]
    max_api_calls: usize,

    /// Maximum transcript chunk size in characters
    #[arg(long, env = "CHUNK_SIZE", default_value_t = SummarizerConfig::DEFAULT_MAX_CHUNK_SIZE)]
    chunk_size: usize,

    /// Attempts per completion request when rate limited
    #[arg(long, env = "LLM_MAX_ATTEMPTS", default_value = "3")]
    max_attempts: u32,

    /// Delay before the first retry, doubled on every further retry
    #[arg(long, env = "LLM_INITIAL_BACKOFF_SECS", default_value = "6")]
    initial_backoff_secs: u64,

    /// What to print on stdout
    #[arg(long, value_enum, default_value_t = Format::Markdown)]
    format: Format,

    /// Write the JSON summary to this file
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Write the Markdown summary to this file
    #[arg(long)]
    markdown_out: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Markdown,
    Json,
}

fn print_notes(notes: &VideoNotes, format: Format) -> anyhow::Result<()> {
    match format {
        Format::Markdown => {
            println!("Video: {}", notes.video_id.watch_url());
            println!("Thumbnail: {}", notes.thumbnail_url);
            println!();
            println!("{}", format_summary_markdown(&notes.summary));
            println!();
            println!("{}", format_metadata(&notes.metadata));
        }
        Format::Json => {
            let json = serde_json::to_string_pretty(notes).context("Failed to serialize notes")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn export_notes(notes: &VideoNotes, cli: &Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.json_out {
        let json = format_summary_json(&notes.summary).context("Failed to serialize summary")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write JSON summary to {}", path.display()))?;
        tracing::info!(path = %path.display(), "JSON summary written");
    }

    if let Some(path) = &cli.markdown_out {
        std::fs::write(path, format_summary_markdown(&notes.summary))
            .with_context(|| format!("Failed to write Markdown summary to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Markdown summary written");
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();

    let _guard = sentry::init((
        std::env::var("SENTRY_DSN").unwrap_or_default(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: Some("production".into()),
            ..Default::default()
        },
    ));

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let summarizer = OpenAIClient::new(&cli.api_key)
        .with_base_url(&cli.base_url)
        .with_model(&cli.model);

    let processor = VideoNotesProcessorBuilder::new()
        .transcript_source(YouTubeTranscriptSource::default())
        .summarizer(summarizer)
        .max_chunk_size(cli.chunk_size)
        .call_budget(cli.max_api_calls)
        .retry_policy(RetryPolicy {
            max_attempts: cli.max_attempts,
            initial_backoff: Duration::from_secs(cli.initial_backoff_secs),
        })
        .build();

    tracing::info!(video = %cli.video, call_budget = cli.max_api_calls, "Generating notes...");

    match processor.process(&cli.video).await {
        RunOutcome::Completed(notes) => {
            print_notes(&notes, cli.format)?;
            export_notes(&notes, &cli)?;
            Ok(ExitCode::SUCCESS)
        }
        RunOutcome::Failed { message, .. } => {
            eprintln!("{message}");
            Ok(ExitCode::FAILURE)
        }
    }
}
