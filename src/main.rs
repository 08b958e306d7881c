use anyhow::Context;
use clap::{Parser, Subcommand};
use feedtrim::prelude::*;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

/// Filter low-popularity items out of intercepted media feed responses
#[derive(Parser, Debug)]
#[command(name = "feedtrim")]
#[command(about = "Filter low-popularity items out of intercepted feed responses")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter a single response body and print the outgoing body
    Filter {
        /// Body file to read (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Minimum popularity; items below this are dropped
        /// (default: 0, or the FEEDTRIM_MIN_PLAY env var)
        #[arg(long = "min-play")]
        min_play: Option<String>,

        /// Disable filtering; bodies are still parsed and re-serialized
        #[arg(long)]
        no_filter: bool,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Filter bodies supplied one per stdin line, one output line per body
    /// Useful for stdio pipelines: cat bodies.ndjson | feedtrim stream
    Stream {
        /// Minimum popularity; items below this are dropped
        #[arg(long = "min-play")]
        min_play: Option<String>,

        /// Disable filtering
        #[arg(long)]
        no_filter: bool,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Emit JSON outcome records instead of bare bodies
        #[arg(long)]
        report: bool,
    },

    /// Dry run: report what filtering would do without rewriting anything
    Inspect {
        /// Body file to read (defaults to stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Minimum popularity to evaluate against
        #[arg(long = "min-play")]
        min_play: Option<String>,

        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// Resolve configuration: flag, then FEEDTRIM_MIN_PLAY env var, then config
/// file, then defaults
fn build_config(
    min_play: Option<String>,
    no_filter: bool,
    config_path: Option<PathBuf>,
) -> anyhow::Result<Config> {
    let base = match config_path {
        Some(path) => Config::from_file(&path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let mut builder = ConfigBuilder::from_config(base);

    let min_play = min_play.or_else(|| std::env::var("FEEDTRIM_MIN_PLAY").ok());
    if let Some(raw) = min_play {
        builder = builder.min_popularity_str(&raw)?;
    }

    if no_filter {
        builder = builder.enabled(false);
    }

    Ok(builder.build()?)
}

fn read_body(input: Option<PathBuf>) -> anyhow::Result<Vec<u8>> {
    match input {
        Some(path) => std::fs::read(&path)
            .with_context(|| format!("failed to read body from {}", path.display())),
        None => {
            let mut bytes = Vec::new();
            io::stdin().lock().read_to_end(&mut bytes)?;
            Ok(bytes)
        }
    }
}

fn run_filter_command(
    input: Option<PathBuf>,
    min_play: Option<String>,
    no_filter: bool,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = build_config(min_play, no_filter, config)?;
    let hook = ResponseHook::new(config);
    let bytes = read_body(input)?;

    let outcome = hook.process(&bytes);
    match outcome.action {
        RewriteAction::Replace(body) => {
            println!("{}", body);
        }
        RewriteAction::Passthrough => {
            // Pass the original bytes through untouched, binary included
            io::stdout().write_all(&bytes)?;
        }
    }

    Ok(())
}

async fn run_stream_command(
    min_play: Option<String>,
    no_filter: bool,
    config: Option<PathBuf>,
    report: bool,
) -> anyhow::Result<()> {
    let config = build_config(min_play, no_filter, config)?;
    let pipeline = ResponsePipeline::new(config);

    let stdin = io::stdin();
    let lines = stdin
        .lock()
        .lines()
        .filter_map(|line| line.ok())
        .filter(|line| !line.trim().is_empty());

    let mut stream = pipeline.process_lines(lines);

    while let Some(result) = stream.next().await {
        match result {
            Ok(outcome) => {
                if report {
                    println!("{}", serde_json::to_string(&outcome)?);
                } else {
                    println!("{}", outcome.body);
                }
            }
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
    }

    Ok(())
}

fn run_inspect_command(
    input: Option<PathBuf>,
    min_play: Option<String>,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = build_config(min_play, false, config)?;
    let hook = ResponseHook::new(config);
    let bytes = read_body(input)?;
    let body = String::from_utf8(bytes).context("body is not valid UTF-8 text")?;

    let report = hook.inspect(&body)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Filter {
            input,
            min_play,
            no_filter,
            config,
        } => run_filter_command(input, min_play, no_filter, config),
        Command::Stream {
            min_play,
            no_filter,
            config,
            report,
        } => run_stream_command(min_play, no_filter, config, report).await,
        Command::Inspect {
            input,
            min_play,
            config,
        } => run_inspect_command(input, min_play, config),
    }
}
