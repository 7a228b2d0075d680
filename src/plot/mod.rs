/// Chart rendering: scatter plots of clustered points and per-N speedup
/// curves, both written as PNG through the plotters bitmap backend.
pub mod points;
pub mod speedup;

pub use points::{render_points, ClusterLayers};
pub use speedup::plot_speedups;
