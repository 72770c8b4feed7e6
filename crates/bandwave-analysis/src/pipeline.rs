//! Whole-signal analysis: samples → framer → analyzer → waveform.
//!
//! [`analyze`] walks the chunks in order on the calling thread.
//! [`analyze_parallel`] spreads chunks over a rayon pool; rayon's indexed
//! collect keeps the output in chunk order, so both produce identical
//! waveforms. Either every frame is returned or the first error is.

use crate::analyzer::{BandAnalyzer, BandVector};
use crate::config::AnalysisConfig;
use crate::framer::Framer;
use crate::waveform::Waveform;
use crate::{Error, Result};
use rayon::prelude::*;

fn check_samples(samples: &[f32]) -> Result<()> {
    if samples.is_empty() {
        return Err(Error::input("sample sequence is empty"));
    }
    Ok(())
}

fn into_waveform(config: &AnalysisConfig, frames: Vec<BandVector>) -> Waveform {
    Waveform {
        sample_rate: config.sample_rate,
        analysis_fps: config.analysis_fps,
        display_max: config.display_max,
        frames,
    }
}

impl BandAnalyzer {
    /// Analyze every full chunk of `samples` in order.
    pub fn analyze_all(&self, samples: &[f32]) -> Result<Vec<BandVector>> {
        self.analyze_all_with(samples, |_, _| {})
    }

    /// Like [`BandAnalyzer::analyze_all`], calling `progress(done, total)`
    /// after each chunk.
    pub fn analyze_all_with(
        &self,
        samples: &[f32],
        mut progress: impl FnMut(usize, usize),
    ) -> Result<Vec<BandVector>> {
        let framer = Framer::with_chunk_size(samples, self.chunk_size())?;
        let total = framer.len();
        let mut frames = Vec::with_capacity(total);
        for chunk in &framer {
            frames.push(self.analyze_chunk(chunk)?);
            progress(frames.len(), total);
        }
        Ok(frames)
    }

    /// Analyze every full chunk of `samples` on the current rayon pool.
    pub fn par_analyze_all(&self, samples: &[f32]) -> Result<Vec<BandVector>> {
        let framer = Framer::with_chunk_size(samples, self.chunk_size())?;
        samples[..framer.len() * framer.chunk_size()]
            .par_chunks_exact(framer.chunk_size())
            .map(|chunk| self.analyze_chunk(chunk))
            .collect()
    }
}

/// Analyze a normalized mono sample sequence on the calling thread.
///
/// # Example
///
/// ```rust
/// use bandwave_analysis::{AnalysisConfig, analyze};
///
/// let samples: Vec<f32> = (0..44100)
///     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 44100.0).sin())
///     .collect();
/// let waveform = analyze(&samples, &AnalysisConfig::default()).unwrap();
/// assert_eq!(waveform.len(), 30);
/// assert_eq!(waveform.num_bands(), 69);
/// ```
pub fn analyze(samples: &[f32], config: &AnalysisConfig) -> Result<Waveform> {
    analyze_with_progress(samples, config, |_, _| {})
}

/// [`analyze`] with a `progress(done, total)` callback after each chunk.
pub fn analyze_with_progress(
    samples: &[f32],
    config: &AnalysisConfig,
    progress: impl FnMut(usize, usize),
) -> Result<Waveform> {
    check_samples(samples)?;
    let analyzer = BandAnalyzer::new(*config)?;
    let frames = analyzer.analyze_all_with(samples, progress)?;
    tracing::debug!(chunks = frames.len(), workers = 1, "analysis complete");
    Ok(into_waveform(config, frames))
}

/// Analyze a normalized mono sample sequence on `workers` threads.
///
/// `workers == 0` uses rayon's default (one per core). The result is
/// identical to [`analyze`].
pub fn analyze_parallel(
    samples: &[f32],
    config: &AnalysisConfig,
    workers: usize,
) -> Result<Waveform> {
    check_samples(samples)?;
    let analyzer = BandAnalyzer::new(*config)?;
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| Error::config(format!("cannot start worker pool: {e}")))?;
    let frames = pool.install(|| analyzer.par_analyze_all(samples))?;
    tracing::debug!(
        chunks = frames.len(),
        workers = pool.current_num_threads(),
        "analysis complete"
    );
    Ok(into_waveform(config, frames))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn chirp(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f32 / 44100.0;
                (2.0 * PI * (100.0 + 2000.0 * t) * t).sin()
            })
            .collect()
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = analyze(&[], &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        let err = analyze_parallel(&[], &AnalysisConfig::default(), 2).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_shorter_than_one_chunk() {
        let wf = analyze(&[0.1; 100], &AnalysisConfig::default()).unwrap();
        assert!(wf.is_empty());
        assert_eq!(wf.num_bands(), 0);
    }

    #[test]
    fn test_progress_reports_every_chunk() {
        let samples = chirp(1470 * 3 + 10);
        let config = AnalysisConfig::default();
        let mut calls = Vec::new();
        let wf = analyze_with_progress(&samples, &config, |done, total| {
            calls.push((done, total));
        })
        .unwrap();
        assert_eq!(calls, vec![(1, 3), (2, 3), (3, 3)]);
        assert_eq!(wf, analyze(&samples, &config).unwrap());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let samples = chirp(44100);
        let config = AnalysisConfig::default();
        let seq = analyze(&samples, &config).unwrap();
        let par = analyze_parallel(&samples, &config, 4).unwrap();
        assert_eq!(seq, par);
        assert_eq!(seq.len(), 30);
    }

    #[test]
    fn test_failure_returns_no_frames() {
        let mut samples = chirp(14700);
        samples[14000] = f32::INFINITY;
        let config = AnalysisConfig::default();
        assert!(analyze(&samples, &config).is_err());
        assert!(analyze_parallel(&samples, &config, 3).is_err());
    }

    #[test]
    fn test_metadata_copied() {
        let config = AnalysisConfig::default()
            .with_analysis_fps(60)
            .with_display_max(8.0);
        let wf = analyze(&chirp(4410), &config).unwrap();
        assert_eq!(wf.analysis_fps, 60);
        assert_eq!(wf.display_max, 8.0);
        assert_eq!(wf.len(), 4410 / 735);
    }
}
