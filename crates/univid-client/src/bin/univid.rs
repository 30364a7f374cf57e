//! `univid` CLI - identify a video URL's platform and show its details

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use univid_client::display::render_card;
use univid_client::{
    AnalysisController, Analyzer, ApiClient, ApiClientConfig, FailureMode, SubmitOutcome,
    ViewState,
};

#[derive(Parser)]
#[command(name = "univid")]
#[command(about = "Identify which platform a video URL belongs to and fetch its details")]
#[command(version)]
struct Cli {
    /// Video URL to analyze
    url: String,

    /// Base URL of the UniVideo API [default: $UNIVID_API_URL or http://localhost:4000]
    #[arg(long)]
    api_url: Option<String>,

    /// Request timeout in seconds [default: $UNIVID_API_TIMEOUT or 30]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Report service failures instead of showing placeholder details
    #[arg(long)]
    strict: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ApiClientConfig::from_env();
    if let Some(api_url) = cli.api_url {
        config = config.with_base_url(api_url);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    let client = ApiClient::new(config)?;

    let mode = if cli.strict {
        FailureMode::Strict
    } else {
        FailureMode::Fallback
    };
    let controller = AnalysisController::new(Analyzer::new(client.clone(), client).with_mode(mode));

    eprintln!("Analyzing...");
    let state = match controller.submit(&cli.url).await {
        SubmitOutcome::Settled(state) => state,
        SubmitOutcome::Busy => controller.state(),
    };

    match state {
        ViewState::Ready(record) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("{}", render_card(&record));
            }
            Ok(ExitCode::SUCCESS)
        }
        ViewState::Failed(message) => {
            eprintln!("Error: {}", message);
            Ok(ExitCode::FAILURE)
        }
        ViewState::Idle | ViewState::Loading => Ok(ExitCode::FAILURE),
    }
}
