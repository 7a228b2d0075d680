use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use dbscan_viz::data::{compute_summary, load_times, write_summary};
use dbscan_viz::plot::plot_speedups;

/// Generate per-N speedup charts from benchmark timing data, plus a
/// persisted summary table of mean durations and speedups.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Timing CSV produced by the benchmark harness.
    #[arg(default_value = "results/times.csv")]
    csv: PathBuf,

    /// Output directory for the charts.
    #[arg(long, default_value = "results/plots")]
    outdir: PathBuf,

    /// Where to save the aggregated mean/speedup table.
    #[arg(long, default_value = "results/speedup_summary.csv")]
    summary: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let samples = load_times(&args.csv)?;
    let summary = compute_summary(&samples);
    info!("{} configurations aggregated", summary.len());

    // The numeric artifact is written even when there is nothing to draw.
    write_summary(&summary, &args.summary)
        .with_context(|| format!("writing {}", args.summary.display()))?;
    println!("summary saved to: {}", args.summary.display());

    if summary.is_empty() {
        println!("no data to plot; run the benchmark harness first");
        return Ok(());
    }

    let charts = plot_speedups(&summary, &args.outdir)
        .with_context(|| format!("plotting into {}", args.outdir.display()))?;
    println!("{} chart(s) in: {}", charts.len(), args.outdir.display());
    Ok(())
}
