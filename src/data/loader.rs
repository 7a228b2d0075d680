use std::path::Path;

use log::info;

use crate::error::{Result, VizError};

use super::model::{PointTable, TimingSample};

// ---------------------------------------------------------------------------
// Points loader (pipeline A)
// ---------------------------------------------------------------------------

/// Load a points CSV into a [`PointTable`].
///
/// Schema detection, decided once here:
/// * named `x`, `y`, `label` columns present (the clustering binaries write
///   `idx,x,y,label`) → [`PointTable::Labeled`];
/// * otherwise, at least two columns → the first two are taken positionally
///   as x/y, no labels;
/// * fewer than two columns is a hard failure.
pub fn load_points(path: &Path) -> Result<PointTable> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    info!("columns detected: {headers:?}");

    let find = |name: &str| headers.iter().position(|h| h == name);
    match (find("x"), find("y"), find("label")) {
        (Some(xi), Some(yi), Some(li)) => {
            let mut x = Vec::new();
            let mut y = Vec::new();
            let mut labels = Vec::new();
            for (row, record) in reader.records().enumerate() {
                let record = record?;
                x.push(parse_f64(&record, xi, row, "x")?);
                y.push(parse_f64(&record, yi, row, "y")?);
                labels.push(parse_i64(&record, li, row, "label")?);
            }
            Ok(PointTable::Labeled { x, y, labels })
        }
        _ if headers.len() >= 2 => {
            let mut x = Vec::new();
            let mut y = Vec::new();
            for (row, record) in reader.records().enumerate() {
                let record = record?;
                x.push(parse_f64(&record, 0, row, &headers[0])?);
                y.push(parse_f64(&record, 1, row, &headers[1])?);
            }
            Ok(PointTable::Positional { x, y })
        }
        _ => Err(VizError::Schema(
            "not enough columns to interpret points (need >= 2)".into(),
        )),
    }
}

fn parse_f64(record: &csv::StringRecord, idx: usize, row: usize, col: &str) -> Result<f64> {
    let raw = record.get(idx).unwrap_or("");
    raw.trim().parse().map_err(|_| {
        VizError::Schema(format!("row {row}, column '{col}': '{raw}' is not a number"))
    })
}

fn parse_i64(record: &csv::StringRecord, idx: usize, row: usize, col: &str) -> Result<i64> {
    let raw = record.get(idx).unwrap_or("");
    raw.trim().parse().map_err(|_| {
        VizError::Schema(format!("row {row}, column '{col}': '{raw}' is not an integer"))
    })
}

// ---------------------------------------------------------------------------
// Timing loader (pipeline B)
// ---------------------------------------------------------------------------

/// Columns the benchmark harness writes, in no required order.
pub const TIMING_COLUMNS: [&str; 5] = ["mode", "N", "threads", "run", "seconds"];

/// Load the timing CSV produced by the benchmark harness.
pub fn load_times(path: &Path) -> Result<Vec<TimingSample>> {
    if !path.is_file() {
        return Err(VizError::NotFound(format!(
            "{} not found; run the benchmark harness first",
            path.display()
        )));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let missing: Vec<&str> = TIMING_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(VizError::Schema(format!(
            "timing CSV must contain columns {TIMING_COLUMNS:?}; missing {missing:?}"
        )));
    }

    let samples = reader
        .deserialize()
        .collect::<std::result::Result<Vec<TimingSample>, _>>()?;
    info!("loaded {} timing samples from {}", samples.len(), path.display());
    Ok(samples)
}
