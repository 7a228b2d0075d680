use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PointTable – one clustering result file
// ---------------------------------------------------------------------------

/// Canonical noise label written by the clustering binaries.
pub const NOISE_LABEL: i64 = -2;

/// A parsed points file, tagged by how its columns were interpreted.
///
/// The tag is decided once at load time; rendering code matches on the
/// variant instead of re-checking column presence.
#[derive(Debug, Clone, PartialEq)]
pub enum PointTable {
    /// Source had named `x`, `y` and `label` columns. All three vectors
    /// have equal length; `label < 0` means noise, `label >= 0` a cluster.
    Labeled {
        x: Vec<f64>,
        y: Vec<f64>,
        labels: Vec<i64>,
    },
    /// Fallback: the first two columns interpreted positionally as x/y,
    /// no cluster membership available.
    Positional { x: Vec<f64>, y: Vec<f64> },
}

impl PointTable {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.xy().0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The coordinate columns, regardless of schema.
    pub fn xy(&self) -> (&[f64], &[f64]) {
        match self {
            PointTable::Labeled { x, y, .. } | PointTable::Positional { x, y } => (x, y),
        }
    }

    /// The label column, if the source carried one.
    pub fn labels(&self) -> Option<&[i64]> {
        match self {
            PointTable::Labeled { labels, .. } => Some(labels),
            PointTable::Positional { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Timing samples and aggregated speedup rows
// ---------------------------------------------------------------------------

/// One wall-clock measurement from the benchmark harness. Multiple `run`
/// values for the same `(mode, N, threads)` are repeated trials.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TimingSample {
    pub mode: String,
    #[serde(rename = "N")]
    pub n: u64,
    pub threads: u32,
    pub run: u32,
    pub seconds: f64,
}

/// Aggregated timing for one `(mode, N, threads)` configuration.
///
/// `speedup` is `serial_mean(N) / mean_seconds`, or NaN when there is no
/// serial baseline for that N or the mean is exactly zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupRow {
    pub mode: String,
    #[serde(rename = "N")]
    pub n: u64,
    pub threads: u32,
    pub mean_seconds: f64,
    pub speedup: f64,
}
