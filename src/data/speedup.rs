use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::error::Result;

use super::model::{SpeedupRow, TimingSample};

// ---------------------------------------------------------------------------
// Speedup aggregation
// ---------------------------------------------------------------------------

/// Mode string of the baseline producer.
pub const SERIAL_MODE: &str = "serial";

/// Thread count of the baseline configuration.
pub const BASELINE_THREADS: u32 = 1;

/// Aggregate repeated timing samples into one [`SpeedupRow`] per distinct
/// `(mode, N, threads)` configuration.
///
/// The mean over repeated runs is arithmetic; the speedup denominator is
/// the mean of the `serial`/`threads=1` group for the same N. Rows whose
/// N has no baseline, or whose own mean is exactly zero, get a NaN speedup
/// instead of being dropped. Output is sorted by `(mode, N, threads)`.
pub fn compute_summary(samples: &[TimingSample]) -> Vec<SpeedupRow> {
    let mut groups: BTreeMap<(String, u64, u32), (f64, usize)> = BTreeMap::new();
    for sample in samples {
        let entry = groups
            .entry((sample.mode.clone(), sample.n, sample.threads))
            .or_insert((0.0, 0));
        entry.0 += sample.seconds;
        entry.1 += 1;
    }

    let means: BTreeMap<(String, u64, u32), f64> = groups
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / count as f64))
        .collect();

    // N → serial mean. Repeated serial runs were already merged above, so
    // each N has at most one baseline entry.
    let baselines: BTreeMap<u64, f64> = means
        .iter()
        .filter(|((mode, _, threads), _)| mode == SERIAL_MODE && *threads == BASELINE_THREADS)
        .map(|((_, n, _), &mean)| (*n, mean))
        .collect();
    debug!("serial baselines: {baselines:?}");

    means
        .into_iter()
        .map(|((mode, n, threads), mean_seconds)| {
            let speedup = match baselines.get(&n) {
                Some(&baseline) if mean_seconds != 0.0 => baseline / mean_seconds,
                _ => f64::NAN,
            };
            SpeedupRow {
                mode,
                n,
                threads,
                mean_seconds,
                speedup,
            }
        })
        .collect()
}

/// Whether a serial/threads=1 baseline row exists for `n`.
pub fn has_baseline(summary: &[SpeedupRow], n: u64) -> bool {
    summary
        .iter()
        .any(|row| row.n == n && row.mode == SERIAL_MODE && row.threads == BASELINE_THREADS)
}

// ---------------------------------------------------------------------------
// Summary persistence
// ---------------------------------------------------------------------------

/// Write the summary table as CSV. An empty summary still produces a file
/// with just the header row, so the numeric artifact always exists.
pub fn write_summary(summary: &[SpeedupRow], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(path)?;
    if summary.is_empty() {
        writer.write_record(["mode", "N", "threads", "mean_seconds", "speedup"])?;
    }
    for row in summary {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
