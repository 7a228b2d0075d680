use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

use log::info;
use plotters::prelude::*;

use crate::color::{ClusterColorMap, NOISE_COLOR, UNLABELED_COLOR};
use crate::data::{PointTable, NOISE_LABEL};
use crate::error::{Result, VizError};

// ---------------------------------------------------------------------------
// Cluster scatter renderer
// ---------------------------------------------------------------------------

const WIDTH: u32 = 1600;
const HEIGHT: u32 = 1200;
const MARGIN: u32 = 12;
const CAPTION_AREA: u32 = 50;
const X_LABEL_AREA: u32 = 50;
const Y_LABEL_AREA: u32 = 70;

const CLUSTER_POINT_RADIUS: i32 = 3;
const NOISE_POINT_RADIUS: i32 = 2;

/// Point indices split into per-cluster layers plus one noise layer.
///
/// Clusters are ordered by ascending id so the legend and the color
/// assignment are stable for any permutation of the input rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterLayers {
    /// `(cluster id, point indices)`, ascending by id.
    pub clusters: Vec<(i64, Vec<usize>)>,
    /// Indices of points with negative labels.
    pub noise: Vec<usize>,
}

impl ClusterLayers {
    pub fn from_labels(labels: &[i64]) -> Self {
        let mut by_id: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
        let mut noise = Vec::new();
        for (idx, &label) in labels.iter().enumerate() {
            if label < 0 {
                noise.push(idx);
            } else {
                by_id.entry(label).or_default().push(idx);
            }
        }
        ClusterLayers {
            clusters: by_id.into_iter().collect(),
            noise,
        }
    }

    /// Ascending cluster ids present.
    pub fn cluster_ids(&self) -> Vec<i64> {
        self.clusters.iter().map(|(id, _)| *id).collect()
    }

    /// True when there is nothing to put in a legend.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty() && self.noise.is_empty()
    }
}

/// Render the scatter chart and save it beside the input file as
/// `<basename>.png`. Returns the written path.
pub fn render_points(table: &PointTable, input: &Path) -> Result<PathBuf> {
    let base = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("results");
    let out_path = input.with_file_name(format!("{base}.png"));

    let title = match table {
        PointTable::Labeled { .. } => format!("Points: {base} (DBSCAN clusters and noise)"),
        PointTable::Positional { .. } => format!("Points: {base} (no labels)"),
    };

    let (x, y) = table.xy();
    let frame_w = f64::from(WIDTH - 2 * MARGIN - Y_LABEL_AREA);
    let frame_h = f64::from(HEIGHT - 2 * MARGIN - CAPTION_AREA - X_LABEL_AREA);
    let (x_range, y_range) = equal_aspect_ranges(x, y, frame_w, frame_h);

    let backend_path = out_path.clone();
    let root = BitMapBackend::new(&backend_path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(VizError::render)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&title, ("sans-serif", 36))
        .margin(MARGIN)
        .x_label_area_size(X_LABEL_AREA)
        .y_label_area_size(Y_LABEL_AREA)
        .build_cartesian_2d(x_range, y_range)
        .map_err(VizError::render)?;

    chart
        .configure_mesh()
        .x_desc("X")
        .y_desc("Y")
        .light_line_style(BLACK.mix(0.08))
        .bold_line_style(BLACK.mix(0.2))
        .draw()
        .map_err(VizError::render)?;

    match table {
        PointTable::Positional { x, y } => {
            let style = UNLABELED_COLOR.mix(0.9).filled();
            chart
                .draw_series(
                    x.iter()
                        .zip(y)
                        .map(|(&px, &py)| Circle::new((px, py), CLUSTER_POINT_RADIUS, style)),
                )
                .map_err(VizError::render)?;
        }
        PointTable::Labeled { x, y, labels } => {
            let layers = ClusterLayers::from_labels(labels);
            let colors = ClusterColorMap::new(&layers.cluster_ids());

            // One layer per cluster so each gets its own legend entry.
            for (id, indices) in &layers.clusters {
                let style = colors.color_for(*id).mix(0.9).filled();
                chart
                    .draw_series(indices.iter().map(|&i| {
                        Circle::new((x[i], y[i]), CLUSTER_POINT_RADIUS, style)
                    }))
                    .map_err(VizError::render)?
                    .label(format!("Cluster {id}"))
                    .legend(move |(cx, cy)| {
                        Circle::new((cx + 6, cy), CLUSTER_POINT_RADIUS, style)
                    });
            }

            if !layers.noise.is_empty() {
                let style = NOISE_COLOR.mix(0.6).filled();
                chart
                    .draw_series(layers.noise.iter().map(|&i| {
                        Circle::new((x[i], y[i]), NOISE_POINT_RADIUS, style)
                    }))
                    .map_err(VizError::render)?
                    .label(format!("Noise ({NOISE_LABEL})"))
                    .legend(move |(cx, cy)| {
                        Circle::new((cx + 6, cy), NOISE_POINT_RADIUS, style)
                    });
            }

            if !layers.is_empty() {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .border_style(BLACK.mix(0.4))
                    .background_style(WHITE.mix(0.9))
                    .draw()
                    .map_err(VizError::render)?;
            }
        }
    }

    root.present().map_err(VizError::render)?;
    info!("scatter chart written to {}", out_path.display());
    Ok(out_path)
}

// ---------------------------------------------------------------------------
// Axis ranges
// ---------------------------------------------------------------------------

/// Padded data ranges stretched so x and y use the same data-units-per-pixel
/// for the given plot-area dimensions, keeping spatial distances visually
/// comparable on both axes.
fn equal_aspect_ranges(
    x: &[f64],
    y: &[f64],
    frame_w: f64,
    frame_h: f64,
) -> (Range<f64>, Range<f64>) {
    let (x0, x1) = padded_bounds(x);
    let (y0, y1) = padded_bounds(y);

    let unit = ((x1 - x0) / frame_w).max((y1 - y0) / frame_h);
    let (xc, yc) = ((x0 + x1) / 2.0, (y0 + y1) / 2.0);
    let half_w = unit * frame_w / 2.0;
    let half_h = unit * frame_h / 2.0;
    ((xc - half_w)..(xc + half_w), (yc - half_h)..(yc + half_h))
}

/// Min/max with 5% padding; degenerate or empty input widens to a unit span.
fn padded_bounds(values: &[f64]) -> (f64, f64) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span <= 0.0 {
        return (min - 0.5, max + 0.5);
    }
    (min - span * 0.05, max + span * 0.05)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn layers_split_clusters_and_noise() {
        let layers = ClusterLayers::from_labels(&[-2, -2, 0, 0, 1]);
        assert_eq!(layers.cluster_ids(), vec![0, 1]);
        assert_eq!(layers.clusters, vec![(0, vec![2, 3]), (1, vec![4])]);
        assert_eq!(layers.noise, vec![0, 1]);
    }

    #[test]
    fn layer_order_is_stable_under_permutation() {
        let a = ClusterLayers::from_labels(&[-2, -2, 0, 0, 1]);
        let b = ClusterLayers::from_labels(&[1, 0, -2, 0, -2]);
        assert_eq!(a.cluster_ids(), b.cluster_ids());
        assert_eq!(a.noise.len(), b.noise.len());
        // Same per-cluster sizes even though indices differ.
        let sizes = |l: &ClusterLayers| -> Vec<(i64, usize)> {
            l.clusters.iter().map(|(id, v)| (*id, v.len())).collect()
        };
        assert_eq!(sizes(&a), sizes(&b));
    }

    #[test]
    fn non_contiguous_ids_stay_sorted() {
        let layers = ClusterLayers::from_labels(&[7, 3, 7, 100, 3]);
        assert_eq!(layers.cluster_ids(), vec![3, 7, 100]);
        assert!(layers.noise.is_empty());
    }

    #[test]
    fn all_noise_has_no_clusters_but_is_not_empty() {
        let layers = ClusterLayers::from_labels(&[-2, -1, -2]);
        assert!(layers.clusters.is_empty());
        assert_eq!(layers.noise, vec![0, 1, 2]);
        assert!(!layers.is_empty());
    }

    #[test]
    fn empty_labels_give_empty_layers() {
        assert!(ClusterLayers::from_labels(&[]).is_empty());
    }

    #[test]
    fn equal_aspect_matches_frame_ratio() {
        let x = vec![0.0, 10.0];
        let y = vec![0.0, 1.0];
        let (xr, yr) = equal_aspect_ranges(&x, &y, 800.0, 400.0);
        let x_span = xr.end - xr.start;
        let y_span = yr.end - yr.start;
        assert!((x_span / y_span - 2.0).abs() < 1e-9);
        // Original data must remain inside the widened ranges.
        assert!(xr.start <= 0.0 && xr.end >= 10.0);
        assert!(yr.start <= 0.0 && yr.end >= 1.0);
    }

    #[test]
    fn degenerate_bounds_widen_to_unit_span() {
        assert_eq!(padded_bounds(&[2.0, 2.0]), (1.5, 2.5));
        assert_eq!(padded_bounds(&[]), (0.0, 1.0));
    }

    #[test]
    fn renders_labeled_table_to_png() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("4000_results.csv");
        let table = PointTable::Labeled {
            x: vec![0.0, 1.0, 2.0, 10.0, 11.0],
            y: vec![0.0, 0.5, 1.0, 10.0, 10.5],
            labels: vec![0, 0, 1, 1, -2],
        };
        let out = render_points(&table, &input).unwrap();
        assert_eq!(out, dir.path().join("4000_results.png"));
        assert!(out.metadata().unwrap().len() > 0);
    }

    #[test]
    fn renders_positional_table_without_legend() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("points.csv");
        let table = PointTable::Positional {
            x: vec![0.0, 1.0],
            y: vec![1.0, 0.0],
        };
        let out = render_points(&table, &input).unwrap();
        assert!(out.is_file());
    }

    #[test]
    fn renders_empty_table() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("empty_results.csv");
        let table = PointTable::Labeled {
            x: vec![],
            y: vec![],
            labels: vec![],
        };
        assert!(render_points(&table, &input).unwrap().is_file());
    }
}
