use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Distinct hues before the cluster palette repeats.
pub const PALETTE_SIZE: usize = 20;

/// Dark gray reserved for noise points.
pub const NOISE_COLOR: RGBColor = RGBColor(0x55, 0x55, 0x55);

/// Uniform blue used when the input carries no labels.
pub const UNLABELED_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

/// Generates `n` visually distinct colors using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            RGBColor(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: cluster id → RGBColor
// ---------------------------------------------------------------------------

/// Maps cluster ids to distinct colors.
///
/// The assignment depends only on each id's position in the sorted id list,
/// so it is reproducible across runs with the same set of ids, even when
/// ids are non-contiguous. Positions cycle through a fixed
/// [`PALETTE_SIZE`]-entry palette.
#[derive(Debug, Clone)]
pub struct ClusterColorMap {
    mapping: BTreeMap<i64, RGBColor>,
    default_color: RGBColor,
}

impl ClusterColorMap {
    /// Build the map from the ascending-sorted list of cluster ids.
    pub fn new(sorted_ids: &[i64]) -> Self {
        let palette = generate_palette(PALETTE_SIZE);
        let mapping = sorted_ids
            .iter()
            .enumerate()
            .map(|(pos, &id)| (id, palette[pos % PALETTE_SIZE]))
            .collect();

        ClusterColorMap {
            mapping,
            default_color: NOISE_COLOR,
        }
    }

    /// Look up the color for a cluster id.
    pub fn color_for(&self, id: i64) -> RGBColor {
        self.mapping.get(&id).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_no_adjacent_duplicates() {
        let palette = generate_palette(PALETTE_SIZE);
        assert_eq!(palette.len(), PALETTE_SIZE);
        for pair in palette.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn empty_palette_for_zero() {
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn assignment_depends_on_position_not_id_value() {
        // Non-contiguous ids get the same colors as contiguous ones.
        let sparse = ClusterColorMap::new(&[3, 17, 250]);
        let dense = ClusterColorMap::new(&[0, 1, 2]);
        assert_eq!(sparse.color_for(3), dense.color_for(0));
        assert_eq!(sparse.color_for(17), dense.color_for(1));
        assert_eq!(sparse.color_for(250), dense.color_for(2));
    }

    #[test]
    fn same_ids_give_same_colors() {
        let a = ClusterColorMap::new(&[0, 2, 5]);
        let b = ClusterColorMap::new(&[0, 2, 5]);
        for id in [0, 2, 5] {
            assert_eq!(a.color_for(id), b.color_for(id));
        }
    }

    #[test]
    fn palette_cycles_after_twenty_clusters() {
        let ids: Vec<i64> = (0..25).collect();
        let map = ClusterColorMap::new(&ids);
        assert_eq!(map.color_for(20), map.color_for(0));
        assert_eq!(map.color_for(24), map.color_for(4));
    }

    #[test]
    fn unknown_id_falls_back_to_noise_gray() {
        let map = ClusterColorMap::new(&[0, 1]);
        assert_eq!(map.color_for(99), NOISE_COLOR);
    }
}
