/// Data layer: core types, loading, and speedup aggregation.
///
/// ```text
///  points CSV ──► loader ──► PointTable ───────────────► plot::points
///  timing CSV ──► loader ──► Vec<TimingSample>
///                                │
///                                ▼
///                            speedup  (group, mean, baseline ratio)
///                                │
///                                ▼
///                          Vec<SpeedupRow> ──► summary CSV + plot::speedup
/// ```
pub mod loader;
pub mod model;
pub mod speedup;

pub use loader::{load_points, load_times};
pub use model::{PointTable, SpeedupRow, TimingSample, NOISE_LABEL};
pub use speedup::{compute_summary, has_baseline, write_summary};
