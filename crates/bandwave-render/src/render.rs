//! Band vector → LED matrix.

use crate::matrix::{Matrix, Rgb};
use std::ops::Range;

/// Geometry and color of the target display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Rows a full-scale mirrored bar extends above and below the middle row.
    pub bar_height: usize,
    /// Color of lit pixels.
    pub color: Rgb,
    /// Band value drawn as a full-scale bar.
    pub display_max: f32,
    /// Draw bars mirrored around the middle row instead of up from the bottom.
    pub mirror: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
            bar_height: 14,
            color: Rgb::RED,
            display_max: 15.0,
            mirror: true,
        }
    }
}

/// Draw one band vector.
///
/// The bands share the width evenly: band `i` starts at column
/// `floor(i * width / bands.len())` and is `max(1, floor(width / bands.len()))`
/// columns wide, so with more bands than columns neighbouring bands land on
/// the same column. Values are scaled by `display_max` and clamped to
/// full scale; negative or non-finite values draw as zero.
///
/// In mirrored mode a bar covers rows `floor(mid - a)..=floor(mid + a)` with
/// `mid = height / 2`, clipped to the matrix, so even silence lights the
/// middle row. Non-mirrored bars grow up from the bottom row and scale to the
/// full height.
pub fn render_frame(bands: &[f32], config: &DisplayConfig) -> Matrix {
    let mut matrix = Matrix::new(config.width, config.height);
    if bands.is_empty() || config.width == 0 || config.height == 0 {
        return matrix;
    }

    let band_width = config.width as f32 / bands.len() as f32;
    let bar_columns = (band_width.floor() as usize).max(1);

    for (i, &value) in bands.iter().enumerate() {
        let x0 = (i as f32 * band_width).floor() as usize;
        let columns = x0..(x0 + bar_columns).min(config.width);
        for y in bar_rows(value, config) {
            for x in columns.clone() {
                matrix.set(x, y, config.color);
            }
        }
    }
    matrix
}

/// Fraction of full scale, in `[0, 1]`.
fn level(value: f32, display_max: f32) -> f32 {
    if !value.is_finite() || !display_max.is_finite() || display_max <= 0.0 {
        return 0.0;
    }
    (value / display_max).clamp(0.0, 1.0)
}

fn bar_rows(value: f32, config: &DisplayConfig) -> Range<usize> {
    let level = level(value, config.display_max);
    let last = config.height - 1;

    if config.mirror {
        let amplitude = level * config.bar_height as f32;
        let mid = (config.height / 2) as f32;
        let start = (mid - amplitude).floor().max(0.0) as usize;
        let end = ((mid + amplitude).floor() as usize).min(last);
        start..end + 1
    } else {
        let lit = ((level * config.height as f32).floor() as usize).min(config.height);
        config.height - lit..config.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_rows(m: &Matrix, x: usize) -> Vec<usize> {
        (0..m.height()).filter(|&y| m.get(x, y).is_some()).collect()
    }

    #[test]
    fn test_silence_lights_center_row_only() {
        let config = DisplayConfig::default();
        let m = render_frame(&[0.0; 69], &config);
        for x in 0..config.width {
            assert_eq!(lit_rows(&m, x), vec![16], "column {x}");
        }
        assert_eq!(m.lit_count(), 64);
    }

    #[test]
    fn test_full_scale_spans_bar_height() {
        let config = DisplayConfig::default();
        let m = render_frame(&[15.0; 69], &config);
        assert_eq!(lit_rows(&m, 0), (2..=30).collect::<Vec<_>>());
    }

    #[test]
    fn test_values_above_max_are_clamped() {
        let config = DisplayConfig::default();
        let full = render_frame(&[15.0; 8], &config);
        let over = render_frame(&[1000.0; 8], &config);
        assert_eq!(full, over);
    }

    #[test]
    fn test_half_scale() {
        let config = DisplayConfig::default();
        // 7.5 / 15 * 14 = 7 rows either side of mid
        let m = render_frame(&[7.5], &config);
        assert_eq!(lit_rows(&m, 0), (9..=23).collect::<Vec<_>>());
    }

    #[test]
    fn test_mirror_symmetry() {
        let config = DisplayConfig::default();
        let m = render_frame(&[3.0, 6.0, 9.0, 12.0], &config);
        let mid = config.height / 2;
        for x in 0..config.width {
            let rows = lit_rows(&m, x);
            assert!(rows.contains(&mid));
            let above = rows.iter().filter(|&&y| y < mid).count();
            let below = rows.iter().filter(|&&y| y > mid).count();
            // Flooring both ends can cost the lower half one row
            assert!(above == below || above == below + 1, "column {x}: {above} vs {below}");
        }
    }

    #[test]
    fn test_tall_bars_are_clipped() {
        let config = DisplayConfig {
            width: 4,
            height: 8,
            bar_height: 10,
            ..DisplayConfig::default()
        };
        let m = render_frame(&[15.0], &config);
        assert_eq!(lit_rows(&m, 0), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_band_columns() {
        let config = DisplayConfig {
            width: 8,
            height: 4,
            bar_height: 2,
            ..DisplayConfig::default()
        };
        // 4 bands over 8 columns: two columns each; only band 2 is loud
        let m = render_frame(&[0.0, 0.0, 15.0, 0.0], &config);
        let counts: Vec<usize> = (0..8).map(|x| lit_rows(&m, x).len()).collect();
        assert_eq!(counts, vec![1, 1, 1, 1, 4, 4, 1, 1]);
    }

    #[test]
    fn test_more_bands_than_columns() {
        let config = DisplayConfig::default();
        let mut bands = vec![0.0; 69];
        bands[68] = 15.0;
        let m = render_frame(&bands, &config);
        // floor(68 * 64 / 69) = 63
        assert_eq!(lit_rows(&m, 63).len(), 29);
        assert_eq!(lit_rows(&m, 62).len(), 1);
    }

    #[test]
    fn test_bottom_up_mode() {
        let config = DisplayConfig {
            width: 2,
            height: 10,
            mirror: false,
            ..DisplayConfig::default()
        };
        let silent = render_frame(&[0.0, 0.0], &config);
        assert_eq!(silent.lit_count(), 0);

        let m = render_frame(&[7.5, 15.0], &config);
        assert_eq!(lit_rows(&m, 0), (5..10).collect::<Vec<_>>());
        assert_eq!(lit_rows(&m, 1), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_degenerate_inputs() {
        let config = DisplayConfig::default();
        assert_eq!(render_frame(&[], &config).lit_count(), 0);

        let m = render_frame(&[f32::NAN, -3.0], &config);
        assert_eq!(lit_rows(&m, 0), vec![16]);
        assert_eq!(lit_rows(&m, 40), vec![16]);

        let empty = DisplayConfig {
            width: 0,
            ..DisplayConfig::default()
        };
        assert_eq!(render_frame(&[15.0], &empty).lit_count(), 0);
    }

    #[test]
    fn test_color_is_applied() {
        let config = DisplayConfig {
            color: Rgb(0, 200, 50),
            ..DisplayConfig::default()
        };
        let m = render_frame(&[15.0], &config);
        assert_eq!(m.get(0, 16), Some(Rgb(0, 200, 50)));
    }
}
