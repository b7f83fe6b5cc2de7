use chrono::Utc;
use clap::{Parser, Subcommand};
use doc_summarizer_core::{
    chunk_text, extract_text, render_all, ChunkingConfig, Format, HttpSummarizer,
    HttpSummarizerConfig, LengthBounds, SourceDocument, SummarizationOptions, SummaryPipeline,
    SummarySession, DEFAULT_CHUNK_MAX_CHARS, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH,
    DEFAULT_TIMEOUT_SECS,
};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "doc-summarizer", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize a TXT, DOCX or PDF document and write Summary.{txt,docx,pdf}.
    Summarize {
        /// Document to summarize.
        #[arg(long)]
        input: PathBuf,
        /// Override the format detected from the file extension (txt, docx, pdf).
        #[arg(long)]
        format: Option<String>,
        /// Directory the three summary files are written to.
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Minimum summary length per chunk, in model tokens.
        #[arg(long, default_value_t = DEFAULT_MIN_LENGTH, value_parser = clap::value_parser!(u32).range(20..=100))]
        min_length: u32,
        /// Maximum summary length per chunk, in model tokens.
        #[arg(long, default_value_t = DEFAULT_MAX_LENGTH, value_parser = clap::value_parser!(u32).range(50..=500))]
        max_length: u32,
        /// Character budget of a single chunk.
        #[arg(long, default_value_t = DEFAULT_CHUNK_MAX_CHARS)]
        chunk_chars: usize,
        /// Summarization inference endpoint.
        #[arg(long, env = "SUMMARIZER_ENDPOINT")]
        endpoint: String,
        /// Bearer token for the inference endpoint.
        #[arg(long, env = "SUMMARIZER_API_TOKEN", hide_env_values = true)]
        api_token: Option<String>,
        /// Per-request timeout in seconds.
        #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout_secs: u64,
        /// Also print the extracted source text.
        #[arg(long, default_value_t = false)]
        show_text: bool,
        /// Print the result as JSON instead of plain text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the chunks a document would be split into.
    Chunk {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        format: Option<String>,
        #[arg(long, default_value_t = DEFAULT_CHUNK_MAX_CHARS)]
        chunk_chars: usize,
    },
    /// Render an existing UTF-8 summary into TXT, DOCX and PDF.
    Render {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn resolve_format(input: &Path, tag: Option<&str>) -> anyhow::Result<Format> {
    let format = match tag {
        Some(tag) => tag.parse(),
        None => Format::from_path(input),
    };
    format.map_err(|error| anyhow::anyhow!(error.to_string()))
}

async fn read_source(input: &Path, tag: Option<&str>) -> anyhow::Result<SourceDocument> {
    let format = resolve_format(input, tag)?;
    let bytes = tokio::fs::read(input)
        .await
        .map_err(|error| anyhow::anyhow!("cannot read {}: {error}", input.display()))?;
    Ok(SourceDocument::new(bytes, format))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();
    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        "doc-summarizer boot"
    );

    match cli.command {
        Command::Summarize {
            input,
            format,
            out_dir,
            min_length,
            max_length,
            chunk_chars,
            endpoint,
            api_token,
            timeout_secs,
            show_text,
            json,
        } => {
            let bounds = LengthBounds::new(min_length, max_length)
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;
            let options = SummarizationOptions {
                chunk_max_chars: chunk_chars,
                bounds,
            };

            let summarizer = HttpSummarizer::new(HttpSummarizerConfig {
                api_token,
                timeout: Duration::from_secs(timeout_secs),
                ..HttpSummarizerConfig::new(endpoint)
            })
            .map_err(|error| anyhow::anyhow!(error.to_string()))?;
            info!(endpoint = %summarizer.endpoint(), "summarizer ready");

            let document = read_source(&input, format.as_deref()).await?;
            let pipeline = SummaryPipeline::new(summarizer, options);
            let mut session = SummarySession::new();

            let output = session
                .process(&pipeline, &document, |fraction| {
                    info!("summarizing: {:.0}% of chunks done", fraction * 100.0);
                })
                .await
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            let written = output
                .artifacts
                .write_to_dir(&out_dir)
                .await
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            if json {
                let report = json!({
                    "input": input.display().to_string(),
                    "source_word_count": output.summary.source_word_count,
                    "summary_word_count": output.summary.summary_word_count,
                    "chunk_count": output.summary.chunk_count,
                    "summary": output.summary.text,
                    "files": written
                        .iter()
                        .map(|path| path.display().to_string())
                        .collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            if show_text {
                println!(
                    "uploaded content (word count: {}):\n{}\n",
                    output.summary.source_word_count, output.extracted_text
                );
            }
            println!(
                "summary (word count: {}):\n{}",
                output.summary.summary_word_count, output.summary.text
            );
            for path in written {
                println!("wrote {}", path.display());
            }
        }
        Command::Chunk {
            input,
            format,
            chunk_chars,
        } => {
            let document = read_source(&input, format.as_deref()).await?;
            let config = ChunkingConfig::new(chunk_chars)
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;
            let text = extract_text(&document.bytes, document.format)
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            let chunks = chunk_text(&text, config);
            info!(input = %input.display(), chunk_count = chunks.len(), "document chunked");

            for (index, chunk) in chunks.iter().enumerate() {
                let length = chunk.chars().count();
                if length > config.max_chars {
                    warn!(chunk = index + 1, length, "single word exceeds chunk budget");
                }
                println!("[chunk {}] chars={length}\n{chunk}\n", index + 1);
            }
        }
        Command::Render { input, out_dir } => {
            let summary = tokio::fs::read_to_string(&input)
                .await
                .map_err(|error| anyhow::anyhow!("cannot read {}: {error}", input.display()))?;
            let artifacts =
                render_all(&summary).map_err(|error| anyhow::anyhow!(error.to_string()))?;
            let written = artifacts
                .write_to_dir(&out_dir)
                .await
                .map_err(|error| anyhow::anyhow!(error.to_string()))?;

            for path in written {
                println!("wrote {}", path.display());
            }
        }
    }

    Ok(())
}
