//! AHP Advisor command line
//!
//! Reads one evaluation request (hierarchy, rankings, alternative scores),
//! runs it through the recommendation handlers and prints the result as JSON.

use ahp_advisor::adapters::InMemoryMatchStore;
use ahp_advisor::application::{Advisor, EvaluationRequest};
use ahp_advisor::config::{AppConfig, LoggingConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "ahp-advisor")]
#[command(about = "Rank alternatives with the Analytic Hierarchy Process")]
#[command(version)]
struct Cli {
    /// Request file (.json, .yaml or .yml); reads JSON from stdin when omitted or "-"
    request: Option<PathBuf>,

    /// Override the consistency ratio threshold
    #[arg(long)]
    consistency_threshold: Option<f64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn init_tracing(logging: &LoggingConfig) {
    // stdout carries the JSON result, so logs go to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging.env_filter())
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.with_ansi(false).init();
    }
}

fn load_request(path: Option<&PathBuf>) -> Result<EvaluationRequest> {
    match path {
        Some(path) if path.as_os_str() != "-" => EvaluationRequest::load_from_path(path)
            .with_context(|| format!("cannot load request {}", path.display())),
        _ => EvaluationRequest::from_json_reader(std::io::stdin().lock())
            .context("cannot load request from stdin"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load().context("cannot load configuration")?;
    if let Some(threshold) = cli.consistency_threshold {
        config.ahp.consistency_threshold = threshold;
    }
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging);

    let request = load_request(cli.request.as_ref())?;
    let match_id = request.match_id();
    let hierarchy = Arc::new(request.hierarchy()?);
    let scores = request.score_sheet()?;

    tracing::info!(
        %match_id,
        criteria = hierarchy.len(),
        alternatives = scores.alternative_count(),
        threshold = config.ahp.consistency_threshold,
        "Evaluating request"
    );

    let advisor = Advisor::new(Arc::new(InMemoryMatchStore::new()), hierarchy, &config.ahp);
    let outcome = advisor
        .evaluate(match_id, request.preferences, scores)
        .await
        .map_err(|err| {
            tracing::error!(code = %err.code, details = ?err.details, "Evaluation failed");
            err
        })?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&outcome)?
    } else {
        serde_json::to_string(&outcome)?
    };
    println!("{output}");

    Ok(())
}
