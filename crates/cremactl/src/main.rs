//! cremactl - latte art analysis from the terminal.
//!
//! Sends a photo to an OpenAI-compatible vision endpoint, parses the
//! templated report into a scored record, and keeps a local attempt
//! history.

mod client;
mod render;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crema_core::{
    compute_scores, parse_analysis, Attempt, History, Pattern, ANALYSIS_PROMPT,
};

use client::{VisionClient, VisionConfig};

#[derive(Parser)]
#[command(name = "cremactl")]
#[command(about = "Latte art analysis and scoring", long_about = None)]
#[command(version)]
struct Cli {
    /// History file location (defaults to the user data directory)
    #[arg(long, global = true)]
    history_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a photo and record the attempt
    Analyze {
        /// Path to the image file
        image: PathBuf,

        /// Chat-completions endpoint base URL
        #[arg(long, default_value = "https://api.openai.com")]
        endpoint: String,

        /// Model name
        #[arg(long, default_value = "gpt-4o")]
        model: String,

        /// API key (falls back to the OPENAI_API_KEY environment variable)
        #[arg(long)]
        api_key: Option<String>,

        /// Request timeout in seconds
        #[arg(long, default_value_t = 60)]
        timeout: u64,

        /// Print the record as JSON instead of formatted output
        #[arg(long)]
        json: bool,

        /// Do not append the attempt to the history
        #[arg(long)]
        no_save: bool,
    },

    /// Parse an already-captured service response (file or stdin)
    Parse {
        /// Text file to parse; reads stdin when absent
        file: Option<PathBuf>,

        /// Print the record as JSON instead of formatted output
        #[arg(long)]
        json: bool,
    },

    /// Compute execution score and rating from raw inputs
    Score {
        /// Confidence percent, 0-100
        #[arg(long)]
        confidence: u8,

        /// Pattern complexity rank, 1-5
        #[arg(long)]
        complexity: u8,
    },

    /// Show recorded attempts and the aggregate summary
    History {
        /// Show at most this many attempts
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },

    /// Correct the pattern label on a recorded attempt
    Relabel {
        /// Attempt id (shown by `history`)
        id: Uuid,

        /// New pattern: tulip, rosetta, heart, swan, uncertain, or "no art"
        pattern: String,
    },

    /// Print the analysis prompt for driving the vision model by hand
    Prompt,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let history_path = cli.history_path;

    match cli.command {
        Commands::Analyze { image, endpoint, model, api_key, timeout, json, no_save } => {
            let api_key = api_key.or_else(|| std::env::var("OPENAI_API_KEY").ok());
            let config = VisionConfig { endpoint, model, api_key, timeout_secs: timeout };
            let client = VisionClient::new(config)?;
            let raw = client
                .analyze_image(&image)
                .with_context(|| format!("analysis request for {} failed", image.display()))?;
            let result = parse_analysis(&raw)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                render::print_result(&result);
            }

            if !no_save && result.is_latte_art {
                let history_path = resolve_history_path(history_path)?;
                let mut history = History::load(&history_path)?;
                let attempt =
                    Attempt::from_result(&result, Some(image.display().to_string()));
                let id = attempt.id;
                history.add(attempt);
                history.save(&history_path)?;
                if !json {
                    println!("recorded attempt {id}");
                }
            }
        }

        Commands::Parse { file, json } => {
            let raw = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let result = parse_analysis(&raw)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                render::print_result(&result);
            }
        }

        Commands::Score { confidence, complexity } => {
            if !(1..=5).contains(&complexity) {
                bail!("complexity must be between 1 and 5");
            }
            if confidence > 100 {
                bail!("confidence must be between 0 and 100");
            }
            render::print_scores(&compute_scores(complexity, confidence));
        }

        Commands::History { limit, json } => {
            let history = History::load(&resolve_history_path(history_path)?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&history)?);
            } else {
                for attempt in history.attempts.iter().take(limit) {
                    render::print_attempt(attempt);
                }
                render::print_summary(&history.summary());
            }
        }

        Commands::Relabel { id, pattern } => {
            let pattern = parse_pattern_arg(&pattern)?;
            let history_path = resolve_history_path(history_path)?;
            let mut history = History::load(&history_path)?;
            history.relabel(id, pattern)?;
            history.save(&history_path)?;
            println!("attempt {id} relabeled as {pattern}");
        }

        Commands::Prompt => {
            print!("{ANALYSIS_PROMPT}");
        }
    }

    Ok(())
}

fn resolve_history_path(overridden: Option<PathBuf>) -> Result<PathBuf> {
    match overridden {
        Some(path) => Ok(path),
        None => Ok(History::default_path()?),
    }
}

/// Strict pattern parsing for user input. Unlike the closed-world
/// normalization in the pipeline, an unrecognized name here is an
/// error, not `Uncertain`.
fn parse_pattern_arg(input: &str) -> Result<Pattern> {
    match input.trim().to_lowercase().as_str() {
        "tulip" => Ok(Pattern::Tulip),
        "rosetta" => Ok(Pattern::Rosetta),
        "heart" => Ok(Pattern::Heart),
        "swan" => Ok(Pattern::Swan),
        "uncertain" => Ok(Pattern::Uncertain),
        "no art" | "noart" | "none" => Ok(Pattern::NoArt),
        other => bail!("unknown pattern {other:?}"),
    }
}
