//! Perceptually spaced band-edge table.
//!
//! Five sub-ranges are concatenated into 70 boundaries, giving 69 bands:
//!
//! | Region    | Points | Range          | Spacing     |
//! |-----------|--------|----------------|-------------|
//! | Bass      | 10     | 50–200 Hz      | linear      |
//! | Low-mid   | 15     | 200–500 Hz     | linear      |
//! | Mid       | 15     | 500–1000 Hz    | linear      |
//! | Upper-mid | 15     | 1000–2000 Hz   | linear      |
//! | Highs     | 15     | 2000–20000 Hz  | logarithmic |
//!
//! Each join frequency appears twice, so the bands at 200, 500, 1000 and
//! 2000 Hz have zero width and fall back to a single spectrum bin.
//!
//! # Example
//!
//! ```rust
//! use bandwave_analysis::bands::{BandEdges, NUM_BANDS};
//!
//! let edges = BandEdges::new();
//! assert_eq!(edges.num_bands(), NUM_BANDS);
//! let ranges = edges.bin_ranges(735, 44100);
//! assert!(ranges.iter().all(|r| r.end > r.start));
//! ```

use std::ops::Range;

/// Spacing of the points within one sub-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spacing {
    /// Evenly spaced in Hz.
    Linear,
    /// Evenly spaced in log10(Hz).
    Logarithmic,
}

/// One sub-range of the schema.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Human-readable name for the region
    pub name: &'static str,
    /// First boundary in Hz
    pub low_hz: f64,
    /// Last boundary in Hz
    pub high_hz: f64,
    /// Number of boundaries, endpoints included
    pub points: usize,
    /// How the points are distributed
    pub spacing: Spacing,
}

impl Region {
    const fn new(
        name: &'static str,
        low_hz: f64,
        high_hz: f64,
        points: usize,
        spacing: Spacing,
    ) -> Self {
        Self {
            name,
            low_hz,
            high_hz,
            points,
            spacing,
        }
    }

    /// The boundaries of this region, endpoints included.
    pub fn boundaries(&self) -> Vec<f64> {
        match self.spacing {
            Spacing::Linear => linspace(self.low_hz, self.high_hz, self.points),
            Spacing::Logarithmic => linspace(self.low_hz.log10(), self.high_hz.log10(), self.points)
                .into_iter()
                .map(|e| 10f64.powf(e))
                .collect(),
        }
    }
}

/// The fixed band schema, lowest region first.
pub const SCHEMA: [Region; 5] = [
    Region::new("bass", 50.0, 200.0, 10, Spacing::Linear),
    Region::new("low-mid", 200.0, 500.0, 15, Spacing::Linear),
    Region::new("mid", 500.0, 1000.0, 15, Spacing::Linear),
    Region::new("upper-mid", 1000.0, 2000.0, 15, Spacing::Linear),
    Region::new("highs", 2000.0, 20000.0, 15, Spacing::Logarithmic),
];

/// Number of boundaries in the schema.
pub const NUM_EDGES: usize = 70;

/// Number of bands produced per chunk.
pub const NUM_BANDS: usize = NUM_EDGES - 1;

/// `num` evenly spaced values from `start` to `stop` inclusive.
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// A single band between two consecutive boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    /// Lower edge in Hz
    pub low_hz: f64,
    /// Upper edge in Hz
    pub high_hz: f64,
}

impl FrequencyBand {
    /// Get the bandwidth in Hz.
    pub fn bandwidth(&self) -> f64 {
        self.high_hz - self.low_hz
    }

    /// True when `freq_hz` lies within `[low_hz, high_hz]`.
    pub fn contains(&self, freq_hz: f64) -> bool {
        (self.low_hz..=self.high_hz).contains(&freq_hz)
    }
}

/// The ordered boundaries of all bands, computed once from [`SCHEMA`].
#[derive(Debug, Clone, PartialEq)]
pub struct BandEdges {
    edges: Vec<f64>,
}

impl Default for BandEdges {
    fn default() -> Self {
        Self::new()
    }
}

impl BandEdges {
    /// Build the table from the fixed schema.
    pub fn new() -> Self {
        let edges: Vec<f64> = SCHEMA.iter().flat_map(Region::boundaries).collect();
        debug_assert_eq!(edges.len(), NUM_EDGES);
        Self { edges }
    }

    /// All boundaries in Hz, non-decreasing.
    pub fn frequencies(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bands (boundaries - 1).
    pub fn num_bands(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    /// Band `index`, or `None` if out of range.
    pub fn band(&self, index: usize) -> Option<FrequencyBand> {
        let low_hz = *self.edges.get(index)?;
        let high_hz = *self.edges.get(index + 1)?;
        Some(FrequencyBand { low_hz, high_hz })
    }

    /// Iterate over all bands, lowest first.
    pub fn bands(&self) -> impl ExactSizeIterator<Item = FrequencyBand> + '_ {
        self.edges.windows(2).map(|w| FrequencyBand {
            low_hz: w[0],
            high_hz: w[1],
        })
    }

    /// Spectrum bin ranges for a magnitude spectrum of `spectrum_len` bins
    /// spanning `0..sample_rate/2`.
    ///
    /// Each edge maps to `floor(f * spectrum_len / (sample_rate / 2))`. The end
    /// of every range is raised to at least `start + 1`, so every band covers
    /// one bin or more. Adjacent ranges may overlap in the sparse top octave;
    /// they are not forced apart. Ranges are not clipped here; callers reading
    /// a shorter spectrum must clip.
    pub fn bin_ranges(&self, spectrum_len: usize, sample_rate: u32) -> Vec<Range<usize>> {
        let nyquist = f64::from(sample_rate) / 2.0;
        let to_bin = |f: f64| (f * spectrum_len as f64 / nyquist).floor() as usize;

        self.bands()
            .map(|band| {
                let start = to_bin(band.low_hz);
                let end = to_bin(band.high_hz).max(start + 1);
                start..end
            })
            .collect()
    }
}

/// Number of adjacent range pairs that share at least one bin.
pub fn count_overlaps(ranges: &[Range<usize>]) -> usize {
    ranges
        .windows(2)
        .filter(|w| w[1].start < w[0].end)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_count_and_order() {
        let edges = BandEdges::new();
        assert_eq!(edges.frequencies().len(), NUM_EDGES);
        assert_eq!(edges.num_bands(), 69);
        assert!(edges.frequencies().windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(edges.frequencies()[0], 50.0);
        assert!((edges.frequencies()[69] - 20000.0).abs() < 1e-6);
    }

    #[test]
    fn test_region_joins_are_repeated() {
        let f = BandEdges::new();
        let f = f.frequencies();
        assert_eq!(f[9], 200.0);
        assert_eq!(f[10], 200.0);
        assert_eq!(f[24], 500.0);
        assert_eq!(f[25], 500.0);
        assert_eq!(f[39], 1000.0);
        assert_eq!(f[40], 1000.0);
        assert_eq!(f[54], 2000.0);
        assert!((f[55] - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_log_region_spacing() {
        let highs = SCHEMA[4].boundaries();
        let ratios: Vec<f64> = highs.windows(2).map(|w| w[1] / w[0]).collect();
        let first = ratios[0];
        assert!(ratios.iter().all(|r| (r - first).abs() < 1e-9));
    }

    #[test]
    fn test_bin_ranges_cover_at_least_one_bin() {
        let edges = BandEdges::new();
        let ranges = edges.bin_ranges(735, 44100);
        assert_eq!(ranges.len(), NUM_BANDS);
        for r in &ranges {
            assert!(r.end >= r.start + 1);
            assert!(r.end <= 735);
        }
        // 50 Hz at 30 Hz per bin
        assert_eq!(ranges[0].start, 1);
        // zero-width band at 1000 Hz: floor(1000 * 735 / 22050) = 33
        assert_eq!(ranges[39], 33..34);
    }

    #[test]
    fn test_bin_ranges_deterministic() {
        let a = BandEdges::new();
        let b = BandEdges::new();
        assert_eq!(a, b);
        assert_eq!(a.bin_ranges(735, 44100), b.bin_ranges(735, 44100));
    }

    #[test]
    fn test_small_spectrum_overlaps() {
        // A tiny chunk has few bins, so many bands collapse onto shared bins
        let ranges = BandEdges::new().bin_ranges(16, 44100);
        assert!(count_overlaps(&ranges) > 0);
        assert!(ranges.iter().all(|r| r.end > r.start));
    }

    #[test]
    fn test_band_lookup() {
        let edges = BandEdges::new();
        let band = edges.band(0).unwrap();
        assert_eq!(band.low_hz, 50.0);
        assert!(band.bandwidth() > 0.0);
        assert!(band.contains(60.0));
        assert_eq!(edges.band(39).unwrap().bandwidth(), 0.0);
        assert!(edges.band(69).is_none());
        assert_eq!(edges.bands().len(), 69);
    }
}
