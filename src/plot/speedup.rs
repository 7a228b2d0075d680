use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use plotters::prelude::*;

use crate::color::{generate_palette, PALETTE_SIZE};
use crate::data::speedup::{has_baseline, SERIAL_MODE};
use crate::data::SpeedupRow;
use crate::error::{Result, VizError};

// ---------------------------------------------------------------------------
// Speedup charts
// ---------------------------------------------------------------------------

const WIDTH: u32 = 1600;
const HEIGHT: u32 = 1000;
const MARGIN: u32 = 12;
const X_LABEL_AREA: u32 = 50;
const Y_LABEL_AREA: u32 = 70;

const BASELINE_COLOR: RGBColor = GREEN;
const MARKER_RADIUS: i32 = 5;

/// Display names for the benchmark modes the harness emits.
fn mode_label(mode: &str) -> &str {
    match mode {
        "serial" => "Serial",
        "omp_indivisible" => "OMP Indivisible",
        "omp_cuadrantes" => "OMP Quadrants",
        other => other,
    }
}

/// Draw one speedup chart per input size N that has a serial baseline,
/// as `speedup_N{N}.png` under `out_dir`. Sizes without a baseline are
/// skipped silently (best-effort partial output). Returns the written
/// chart paths.
pub fn plot_speedups(summary: &[SpeedupRow], out_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let sizes: BTreeSet<u64> = summary.iter().map(|row| row.n).collect();
    let mut written = Vec::new();
    for &n in &sizes {
        if !has_baseline(summary, n) {
            debug!("skipping N={n}: no serial baseline");
            continue;
        }
        let out_path = out_dir.join(format!("speedup_N{n}.png"));
        draw_chart(summary, n, &out_path)?;
        info!("speedup chart written to {}", out_path.display());
        written.push(out_path);
    }
    Ok(written)
}

fn draw_chart(summary: &[SpeedupRow], n: u64, out_path: &Path) -> Result<()> {
    let rows: Vec<&SpeedupRow> = summary.iter().filter(|row| row.n == n).collect();

    // Per-mode series, serial excluded (it is the reference line).
    // BTreeMap keeps series order, and therefore colors, deterministic.
    let mut series: BTreeMap<&str, Vec<(u32, f64)>> = BTreeMap::new();
    for row in &rows {
        if row.mode != SERIAL_MODE {
            series
                .entry(row.mode.as_str())
                .or_default()
                .push((row.threads, row.speedup));
        }
    }
    for points in series.values_mut() {
        points.sort_by_key(|&(threads, _)| threads);
        points.retain(|&(_, speedup)| speedup.is_finite());
    }

    let thread_min = rows.iter().map(|row| row.threads).min().unwrap_or(1);
    let thread_max = rows.iter().map(|row| row.threads).max().unwrap_or(1);
    let x_range = thread_min.saturating_sub(1)..thread_max + 1;

    let speedup_max = series
        .values()
        .flatten()
        .map(|&(_, speedup)| speedup)
        .fold(1.0_f64, f64::max);
    let y_range = 0.0..speedup_max * 1.1;

    let root = BitMapBackend::new(out_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(VizError::render)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Speedup for N = {n}"), ("sans-serif", 36))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range.clone(), y_range)
        .map_err(VizError::render)?;

    chart
        .configure_mesh()
        .x_desc("Threads (OMP_NUM_THREADS)")
        .y_desc("Speedup (vs serial)")
        .light_line_style(BLACK.mix(0.08))
        .bold_line_style(BLACK.mix(0.2))
        .draw()
        .map_err(VizError::render)?;

    // Reference line at speedup 1.0 stands in for the serial series.
    chart
        .draw_series(LineSeries::new(
            [(x_range.start, 1.0), (x_range.end, 1.0)],
            BASELINE_COLOR.stroke_width(2),
        ))
        .map_err(VizError::render)?
        .label(mode_label(SERIAL_MODE))
        .legend(|(cx, cy)| {
            PathElement::new([(cx, cy), (cx + 18, cy)], BASELINE_COLOR.stroke_width(2))
        });

    let palette = generate_palette(PALETTE_SIZE);
    for (pos, (mode, points)) in series.iter().enumerate() {
        let color = palette[pos % PALETTE_SIZE];
        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                color.stroke_width(2),
            ))
            .map_err(VizError::render)?
            .label(mode_label(mode))
            .legend(move |(cx, cy)| {
                PathElement::new([(cx, cy), (cx + 18, cy)], color.stroke_width(2))
            });
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, MARKER_RADIUS, color.filled())),
            )
            .map_err(VizError::render)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .border_style(BLACK.mix(0.4))
        .background_style(WHITE.mix(0.9))
        .draw()
        .map_err(VizError::render)?;

    root.present().map_err(VizError::render)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::data::{compute_summary, TimingSample};

    use super::*;

    fn sample(mode: &str, n: u64, threads: u32, seconds: f64) -> TimingSample {
        TimingSample {
            mode: mode.into(),
            n,
            threads,
            run: 1,
            seconds,
        }
    }

    #[test]
    fn one_chart_per_n_with_baseline() {
        let dir = TempDir::new().unwrap();
        let summary = compute_summary(&[
            sample("serial", 100, 1, 10.0),
            sample("omp_indivisible", 100, 2, 6.0),
            sample("omp_indivisible", 100, 4, 3.0),
            sample("serial", 200, 1, 40.0),
            sample("omp_cuadrantes", 200, 4, 12.0),
        ]);
        let written = plot_speedups(&summary, dir.path()).unwrap();
        assert_eq!(
            written,
            vec![
                dir.path().join("speedup_N100.png"),
                dir.path().join("speedup_N200.png"),
            ]
        );
        assert!(written.iter().all(|p| p.is_file()));
    }

    #[test]
    fn n_without_baseline_gets_no_chart() {
        let dir = TempDir::new().unwrap();
        let summary = compute_summary(&[
            sample("serial", 100, 1, 10.0),
            sample("omp_indivisible", 100, 4, 3.0),
            sample("omp_indivisible", 50, 4, 1.0),
        ]);
        let written = plot_speedups(&summary, dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("speedup_N100.png")]);
        assert!(!dir.path().join("speedup_N50.png").exists());
    }

    #[test]
    fn empty_summary_creates_dir_but_no_charts() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("plots");
        let written = plot_speedups(&[], &out).unwrap();
        assert!(written.is_empty());
        assert!(out.is_dir());
    }

    #[test]
    fn baseline_only_summary_still_draws_the_reference_chart() {
        // No parallel modes at all: the chart has just the 1.0 line.
        let dir = TempDir::new().unwrap();
        let summary = compute_summary(&[sample("serial", 100, 1, 10.0)]);
        let written = plot_speedups(&summary, dir.path()).unwrap();
        assert_eq!(written.len(), 1);
    }

    #[test]
    fn friendly_labels_with_raw_fallback() {
        assert_eq!(mode_label("serial"), "Serial");
        assert_eq!(mode_label("omp_indivisible"), "OMP Indivisible");
        assert_eq!(mode_label("omp_cuadrantes"), "OMP Quadrants");
        assert_eq!(mode_label("pthread_custom"), "pthread_custom");
    }
}
