//! FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Window function types
///
/// All windows are symmetric: the first and last coefficients are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// Rectangular (no windowing)
    Rectangular,
    /// Hann window (raised cosine), `0.5 - 0.5 cos(2πk/(L-1))`
    #[default]
    Hann,
    /// Hamming window
    Hamming,
}

impl Window {
    /// Coefficient `k` of a window of length `len`.
    fn coefficient(&self, k: usize, len: usize) -> f32 {
        if len <= 1 {
            return 1.0;
        }
        let x = 2.0 * PI * k as f32 / (len - 1) as f32;
        match self {
            Window::Rectangular => 1.0,
            Window::Hann => 0.5 - 0.5 * x.cos(),
            Window::Hamming => 0.54 - 0.46 * x.cos(),
        }
    }

    /// Apply window to a buffer
    pub fn apply(&self, buffer: &mut [f32]) {
        let n = buffer.len();
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample *= self.coefficient(i, n);
        }
    }

    /// Get window coefficients
    pub fn coefficients(&self, size: usize) -> Vec<f32> {
        (0..size).map(|i| self.coefficient(i, size)).collect()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Window::Rectangular => "rectangular",
            Window::Hann => "hann",
            Window::Hamming => "hamming",
        };
        f.write_str(name)
    }
}

impl FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hann" | "hanning" => Ok(Window::Hann),
            "hamming" => Ok(Window::Hamming),
            "rectangular" | "rect" | "none" => Ok(Window::Rectangular),
            other => Err(format!("unknown window '{other}'")),
        }
    }
}

/// Forward FFT of a fixed length, planned once and shared read-only.
///
/// Arbitrary lengths are supported (the default 1470-sample chunk is not a
/// power of two).
#[derive(Clone)]
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl fmt::Debug for Fft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fft").field("size", &self.size).finish()
    }
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of magnitudes returned by [`magnitudes`](Self::magnitudes).
    pub fn spectrum_len(&self) -> usize {
        self.size / 2
    }

    /// Perform forward FFT on real input
    ///
    /// Input shorter than the FFT size is zero padded, longer input is truncated.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);
        buffer
    }

    /// Magnitudes of bins `0..size/2`.
    ///
    /// The upper half mirrors the lower half for real input and is dropped,
    /// Nyquist included.
    pub fn magnitudes(&self, input: &[f32]) -> Vec<f32> {
        let mut spectrum = self.forward(input);
        spectrum.truncate(self.spectrum_len());
        spectrum.iter().map(|c| c.norm()).collect()
    }
}
