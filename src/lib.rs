//! Plotting companion for the DBSCAN benchmark binaries.
//!
//! Two independent pipelines, both reading CSV output produced by the
//! external clustering / benchmark programs:
//!
//! * `plot-results`: scatter chart of points colored by cluster id,
//!   noise drawn separately (see [`plot::points`]).
//! * `plot-speedup`: per-N speedup curves against the serial baseline,
//!   plus a persisted summary table (see [`plot::speedup`]).

pub mod color;
pub mod data;
pub mod error;
pub mod plot;
pub mod resolve;

pub use error::{Result, VizError};
