//! oncomatch: evaluate one patient against one eligibility rule tree and
//! rank treatment evidence for the patient's molecular events.

mod config;
mod runner;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oncomatch")]
#[command(version)]
#[command(about = "Match a patient against trial eligibility rules and rank treatments", long_about = None)]
struct Cli {
    /// Patient record (JSON)
    #[arg(long)]
    patient: PathBuf,

    /// Eligibility rule tree (JSON)
    #[arg(long)]
    rules: PathBuf,

    /// Treatment evidence items to rank (JSON array)
    #[arg(long)]
    evidence: Option<PathBuf>,

    /// ICD ontology nodes (JSON array of {code, parent_code})
    #[arg(long)]
    icd: Option<PathBuf>,

    /// Config file; defaults to $ONCOMATCH_CONFIG or ./oncomatch.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("oncomatch=debug,info")),
        )
        .init();

    info!("oncomatch {}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => config::Config::load_from(path)?,
        None => config::Config::load()?,
    };
    config.validate()?;

    let inputs = runner::Inputs {
        patient: cli.patient,
        rules: cli.rules,
        evidence: cli.evidence,
        icd: cli.icd,
    };
    let report = runner::run(&inputs, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
