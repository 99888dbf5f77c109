//! `benchboard ingest` and `benchboard page`

use anyhow::{Context, Result};
use benchboard_report::ingest::{parse_bench_output, HistoryStore};
use benchboard_report::page::PageWriter;
use chrono::Utc;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Args)]
pub struct IngestArgs {
    /// Output of `go test -run=^$ -bench=. -benchmem`
    #[arg(short, long, default_value = "bench.out", env = "BENCH_OUT")]
    bench_out: PathBuf,

    /// History directory holding summary.json and data/
    #[arg(long, default_value = "bench")]
    history: PathBuf,
}

#[derive(Args)]
pub struct PageArgs {
    /// History directory holding summary.json and data/
    #[arg(long, default_value = "bench")]
    history: PathBuf,

    /// Documentation source directory receiving bench.md
    #[arg(short, long, default_value = "site_src")]
    site: PathBuf,
}

pub fn handle_ingest(args: IngestArgs, config_path: Option<&Path>) -> Result<()> {
    let config = crate::config::resolve(config_path)?;

    if !args.bench_out.exists() {
        warn!("{} not found; skipping bench history update", args.bench_out.display());
        return Ok(());
    }
    let text = fs::read_to_string(&args.bench_out)
        .with_context(|| format!("failed to read {}", args.bench_out.display()))?;

    let records = parse_bench_output(&text, Utc::now());
    let store = HistoryStore::new(&args.history, &config);
    let report = store
        .update(records)
        .with_context(|| format!("failed to update history in {}", args.history.display()))?;

    if report.benchmarks > 0 {
        info!(
            "Recorded {} measurements across {} benchmarks",
            report.records, report.benchmarks
        );
        debug!("Series files updated: {}", report.files.join(", "));
    }
    Ok(())
}

pub async fn handle_page(args: PageArgs, config_path: Option<&Path>) -> Result<()> {
    let config = crate::config::resolve(config_path)?;
    let report = PageWriter::new(config)
        .write(&args.history, &args.site)
        .await
        .with_context(|| format!("failed to generate page in {}", args.site.display()))?;

    info!("Generated {} as {}", report.path.display(), report.kind);
    Ok(())
}
