//! Chunk-to-band-vector analysis.
//!
//! [`BandAnalyzer`] maps one analysis chunk to one [`BandVector`]:
//!
//! 1. multiply by the configured window (Hann by default)
//! 2. FFT, keep the magnitudes of bins `0..L/2`
//! 3. average the magnitudes inside each band's bin range
//! 4. divide by the chunk's largest band, scale by the presence factor and
//!    apply the progressive gain curve
//! 5. divide by the shaped maximum and scale to `display_max`
//!
//! Steps 4 and 5 each normalize per chunk, so absolute loudness is discarded:
//! a quiet chunk and a loud chunk with the same spectral shape produce the
//! same band vector. Downstream players rely on this relative-shape output.
//! A silent chunk yields all zeros.
//!
//! The window, FFT plan, band-edge table and bin ranges are computed once in
//! [`BandAnalyzer::new`] and only read afterwards, so one analyzer can be
//! shared across threads.

use crate::bands::{BandEdges, count_overlaps};
use crate::config::AnalysisConfig;
use crate::fft::Fft;
use crate::{Error, Result};
use std::ops::Range;

/// Per-band amplitudes for one chunk, lowest band first.
pub type BandVector = Vec<f32>;

/// Stateless chunk analyzer with precomputed tables.
#[derive(Debug, Clone)]
pub struct BandAnalyzer {
    config: AnalysisConfig,
    chunk_size: usize,
    window: Vec<f32>,
    fft: Fft,
    edges: BandEdges,
    bin_ranges: Vec<Range<usize>>,
    gains: Vec<f32>,
}

impl BandAnalyzer {
    /// Validate `config` and precompute every table for its chunk size.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let chunk_size = config.chunk_size();

        let fft = Fft::new(chunk_size);
        let edges = BandEdges::new();
        let bin_ranges = edges.bin_ranges(fft.spectrum_len(), config.sample_rate);
        let gains = config.gain_curve.multipliers(edges.num_bands());

        tracing::debug!(
            chunk_size,
            bands = edges.num_bands(),
            spectrum_bins = fft.spectrum_len(),
            overlapping = count_overlaps(&bin_ranges),
            window = %config.window,
            "band analyzer ready"
        );

        Ok(Self {
            window: config.window.coefficients(chunk_size),
            config,
            chunk_size,
            fft,
            edges,
            bin_ranges,
            gains,
        })
    }

    /// The configuration this analyzer was built from.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Samples expected per chunk.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of bands in every output vector.
    pub fn num_bands(&self) -> usize {
        self.edges.num_bands()
    }

    /// The band-edge table.
    pub fn band_edges(&self) -> &BandEdges {
        &self.edges
    }

    /// Spectrum bin range of each band.
    pub fn bin_ranges(&self) -> &[Range<usize>] {
        &self.bin_ranges
    }

    /// Gain multiplier of each band.
    pub fn gains(&self) -> &[f32] {
        &self.gains
    }

    fn check_chunk(&self, chunk: &[f32]) -> Result<()> {
        if chunk.is_empty() {
            return Err(Error::input("chunk is empty"));
        }
        if chunk.len() != self.chunk_size {
            return Err(Error::input(format!(
                "chunk has {} samples, expected {}",
                chunk.len(),
                self.chunk_size
            )));
        }
        if let Some(pos) = chunk.iter().position(|s| !s.is_finite()) {
            return Err(Error::input(format!("non-finite sample at offset {pos}")));
        }
        Ok(())
    }

    /// Windowed magnitude spectrum of `chunk` (bins `0..chunk_size/2`).
    pub fn spectrum(&self, chunk: &[f32]) -> Result<Vec<f32>> {
        self.check_chunk(chunk)?;
        let windowed: Vec<f32> = chunk
            .iter()
            .zip(&self.window)
            .map(|(s, w)| s * w)
            .collect();
        Ok(self.fft.magnitudes(&windowed))
    }

    /// Mean spectrum magnitude inside each band (before any normalization).
    pub fn raw_bands(&self, chunk: &[f32]) -> Result<BandVector> {
        let spectrum = self.spectrum(chunk)?;
        Ok(self
            .bin_ranges
            .iter()
            .map(|range| {
                let end = range.end.min(spectrum.len());
                let bins = spectrum.get(range.start..end).unwrap_or(&[]);
                if bins.is_empty() {
                    0.0
                } else {
                    bins.iter().sum::<f32>() / bins.len() as f32
                }
            })
            .collect())
    }

    /// Bands after peak normalization, presence scaling and the gain curve.
    pub fn shape_chunk(&self, chunk: &[f32]) -> Result<BandVector> {
        let mut bands = self.raw_bands(chunk)?;
        self.shape(&mut bands);
        Ok(bands)
    }

    /// Analyze one chunk into a band vector with values in `[0, display_max]`.
    ///
    /// Fails with [`Error::InvalidInput`] if the chunk is empty, has the wrong
    /// length or contains a non-finite sample.
    pub fn analyze_chunk(&self, chunk: &[f32]) -> Result<BandVector> {
        let mut bands = self.shape_chunk(chunk)?;
        scale_to_max(&mut bands, self.config.display_max);
        Ok(bands)
    }

    fn shape(&self, bands: &mut [f32]) {
        let max = max_value(bands);
        if max <= 0.0 {
            bands.fill(0.0);
            return;
        }
        let presence = self.config.presence_factor;
        for (band, gain) in bands.iter_mut().zip(&self.gains) {
            *band = *band / max * presence * gain;
        }
    }
}

/// Largest value in `values` (0.0 for an empty slice).
fn max_value(values: &[f32]) -> f32 {
    values.iter().fold(0.0_f32, |acc, &v| acc.max(v))
}

/// Rescale so the largest value equals `ceiling`; all-zero input stays zero.
fn scale_to_max(values: &mut [f32], ceiling: f32) {
    let max = max_value(values);
    if max > 0.0 {
        for v in values.iter_mut() {
            *v = *v / max * ceiling;
        }
    }
}
