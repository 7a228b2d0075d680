use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use dbscan_viz::data::{load_points, PointTable};
use dbscan_viz::plot::render_points;
use dbscan_viz::resolve::PathResolver;

/// Plot clustering results: a scatter chart of points colored by cluster
/// id, with noise points drawn separately in gray.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Results CSV, a raw `{N}_data.csv` input to map, or a directory to
    /// search. Defaults to the newest results file under data/output.
    input: Option<PathBuf>,

    /// Save the PNG without opening it in the system image viewer.
    #[arg(long)]
    no_show: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let resolver = PathResolver::default();
    let input = resolver.resolve(args.input.as_deref())?;
    println!("using input file: {}", input.display());

    let table =
        load_points(&input).with_context(|| format!("loading {}", input.display()))?;
    match &table {
        PointTable::Labeled { .. } => info!("loaded {} labeled points", table.len()),
        PointTable::Positional { .. } => {
            info!("loaded {} points (no label column)", table.len())
        }
    }

    let out_png = render_points(&table, &input)
        .with_context(|| format!("rendering chart for {}", input.display()))?;
    println!("PNG saved to: {}", out_png.display());

    if !args.no_show && std::env::var("NO_SHOW").map_or(true, |v| v != "1") {
        display_image(&out_png);
    }
    Ok(())
}

/// Best-effort hand-off to the platform image viewer. Never fatal.
fn display_image(path: &Path) {
    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(path).spawn()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", ""]).arg(path).spawn()
    } else {
        Command::new("xdg-open").arg(path).spawn()
    };
    if let Err(err) = result {
        warn!("could not open image viewer: {err}");
    }
}
