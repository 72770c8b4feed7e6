//! Analysis configuration.

use crate::fft::Window;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default analysis frame rate (chunks per second).
pub const DEFAULT_ANALYSIS_FPS: u32 = 30;

/// Default PCM sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

/// Default ceiling of the output band range.
pub const DEFAULT_DISPLAY_MAX: f32 = 15.0;

/// Default attenuation applied after per-chunk peak normalization.
pub const DEFAULT_PRESENCE_FACTOR: f32 = 0.7;

/// Linear gain ramp applied across band index.
///
/// Band 0 is multiplied by `start`, the last band by `end`, and the bands in
/// between by evenly spaced values. With a single band only `start` applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct GainCurve {
    /// Multiplier for the lowest band.
    pub start: f32,
    /// Multiplier for the highest band.
    pub end: f32,
}

impl GainCurve {
    /// Create a gain curve ramping from `start` to `end`.
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Multiplier for band `index` out of `count` bands.
    pub fn multiplier(&self, index: usize, count: usize) -> f32 {
        if count <= 1 {
            return self.start;
        }
        let t = index as f32 / (count - 1) as f32;
        self.start + (self.end - self.start) * t
    }

    /// All multipliers for `count` bands, lowest band first.
    pub fn multipliers(&self, count: usize) -> Vec<f32> {
        (0..count).map(|i| self.multiplier(i, count)).collect()
    }

    fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start <= 0.0 {
            return Err(Error::config(format!(
                "gain curve must be finite and positive, got {}..{}",
                self.start, self.end
            )));
        }
        if self.end < self.start {
            return Err(Error::config(format!(
                "gain curve must be non-decreasing, got {}..{}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

impl Default for GainCurve {
    fn default() -> Self {
        Self::new(1.0, 1.2)
    }
}

impl From<[f32; 2]> for GainCurve {
    fn from([start, end]: [f32; 2]) -> Self {
        Self { start, end }
    }
}

impl From<GainCurve> for [f32; 2] {
    fn from(curve: GainCurve) -> Self {
        [curve.start, curve.end]
    }
}

/// Parameters shared by every chunk analysis in a run.
///
/// # TOML Format
///
/// ```toml
/// sample_rate = 44100
/// analysis_fps = 30
/// display_max = 15.0
/// presence_factor = 0.7
/// gain_curve = [1.0, 1.2]
/// window = "hann"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Sample rate of the decoded PCM in Hz.
    pub sample_rate: u32,
    /// Chunks analyzed per second of audio.
    pub analysis_fps: u32,
    /// Ceiling of the output range; every band vector lies in `[0, display_max]`.
    pub display_max: f32,
    /// Attenuation applied after per-chunk peak normalization.
    pub presence_factor: f32,
    /// Progressive gain across band index.
    pub gain_curve: GainCurve,
    /// Window applied to each chunk before the FFT.
    pub window: Window,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            analysis_fps: DEFAULT_ANALYSIS_FPS,
            display_max: DEFAULT_DISPLAY_MAX,
            presence_factor: DEFAULT_PRESENCE_FACTOR,
            gain_curve: GainCurve::default(),
            window: Window::Hann,
        }
    }
}

impl AnalysisConfig {
    /// Set the PCM sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the analysis frame rate.
    pub fn with_analysis_fps(mut self, analysis_fps: u32) -> Self {
        self.analysis_fps = analysis_fps;
        self
    }

    /// Set the display ceiling.
    pub fn with_display_max(mut self, display_max: f32) -> Self {
        self.display_max = display_max;
        self
    }

    /// Set the presence factor.
    pub fn with_presence_factor(mut self, presence_factor: f32) -> Self {
        self.presence_factor = presence_factor;
        self
    }

    /// Set the gain curve.
    pub fn with_gain_curve(mut self, gain_curve: GainCurve) -> Self {
        self.gain_curve = gain_curve;
        self
    }

    /// Set the window function.
    pub fn with_window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Samples per analysis chunk (`sample_rate / analysis_fps`, floored).
    ///
    /// Returns 0 when `analysis_fps` is 0; [`validate`](Self::validate) rejects that.
    pub fn chunk_size(&self) -> usize {
        self.sample_rate
            .checked_div(self.analysis_fps)
            .unwrap_or(0) as usize
    }

    /// Check every field, reporting the first violation.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::config("sample_rate must be positive"));
        }
        if self.analysis_fps == 0 {
            return Err(Error::config("analysis_fps must be positive"));
        }
        if self.chunk_size() == 0 {
            return Err(Error::config(format!(
                "chunk size is zero: sample_rate {} / analysis_fps {}",
                self.sample_rate, self.analysis_fps
            )));
        }
        if !self.display_max.is_finite() || self.display_max <= 0.0 {
            return Err(Error::config(format!(
                "display_max must be finite and positive, got {}",
                self.display_max
            )));
        }
        if !self.presence_factor.is_finite() || self.presence_factor <= 0.0 {
            return Err(Error::config(format!(
                "presence_factor must be finite and positive, got {}",
                self.presence_factor
            )));
        }
        self.gain_curve.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.analysis_fps, 30);
        assert_eq!(config.display_max, 15.0);
        assert_eq!(config.presence_factor, 0.7);
        assert_eq!(config.gain_curve, GainCurve::new(1.0, 1.2));
        assert_eq!(config.chunk_size(), 1470);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_rates_rejected() {
        let config = AnalysisConfig::default().with_analysis_fps(0);
        assert_eq!(config.chunk_size(), 0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));

        let config = AnalysisConfig::default().with_sample_rate(0);
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_fps_above_sample_rate_rejected() {
        // 100 / 200 floors to a zero-length chunk
        let config = AnalysisConfig::default()
            .with_sample_rate(100)
            .with_analysis_fps(200);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("chunk size is zero"));
    }

    #[test]
    fn test_bad_scaling_rejected() {
        for config in [
            AnalysisConfig::default().with_display_max(0.0),
            AnalysisConfig::default().with_display_max(f32::NAN),
            AnalysisConfig::default().with_presence_factor(-0.5),
            AnalysisConfig::default().with_gain_curve(GainCurve::new(1.2, 1.0)),
            AnalysisConfig::default().with_gain_curve(GainCurve::new(0.0, 1.0)),
            AnalysisConfig::default().with_gain_curve(GainCurve::new(1.0, f32::INFINITY)),
        ] {
            assert!(
                matches!(config.validate(), Err(Error::InvalidConfiguration(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_gain_curve_endpoints() {
        let curve = GainCurve::default();
        let m = curve.multipliers(69);
        assert_eq!(m.len(), 69);
        assert_eq!(m[0], 1.0);
        assert!((m[68] - 1.2).abs() < 1e-6);
        assert!(m.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(curve.multiplier(0, 1), 1.0);
    }
}
