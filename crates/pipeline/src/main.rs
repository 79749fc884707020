//! Batch entry point.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use treasury_core::PipelineConfig;

#[derive(Parser)]
#[command(
    name = "treasury",
    about = "Reconcile raw transfer exports into quarterly treasury ledgers"
)]
struct Args {
    /// Root directory holding raw exports, registries, and outputs.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// JSON config overriding the default directory layout.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config: PipelineConfig = match &args.config {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("opening config {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => PipelineConfig::default(),
    };

    let summary = treasury_pipeline::run(&args.root, &config)
        .context("pipeline run failed")?;

    if summary.wallets_processed == 0 {
        anyhow::bail!(
            "no wallet processed successfully ({} failed)",
            summary.wallets_failed
        );
    }
    Ok(())
}
