use anyhow::Result;
use clap::Parser;
use revue::app::run_tui;
use revue::config::Config;
use revue::review::{ReviewClient, Tone};
use revue::source;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "revue",
    about = "A terminal companion for AI code review, powered by local Ollama",
    version
)]
struct Args {
    /// Source file to review (use '-' to read from stdin)
    path: PathBuf,

    /// Review tone preset
    #[arg(short, long)]
    tone: Option<Tone>,

    /// Ollama model identifier (overrides config)
    #[arg(short, long)]
    model: Option<String>,

    /// Ollama base URL (overrides config)
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    timeout: Option<u64>,

    /// Run one review and print it as JSON (no TUI)
    #[arg(short, long)]
    review: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load();
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(tone) = args.tone {
        config.default_tone = tone;
    }

    let (source_text, source_path) = if args.path.as_os_str() == "-" {
        (source::load_stdin()?, None)
    } else {
        (source::load_source(&args.path)?, Some(args.path))
    };

    // One-shot mode: review, print, exit
    if args.review {
        eprintln!("  Reviewing with {}…", config.model);
        let client = ReviewClient::new(&config)?;
        let review = client
            .generate_review(&source_text, config.default_tone)
            .await?;
        println!("{}", serde_json::to_string_pretty(&review)?);
        return Ok(());
    }

    run_tui(config, source_text, source_path).await
}
