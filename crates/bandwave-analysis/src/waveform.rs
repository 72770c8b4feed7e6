//! The analysis output: one band vector per chunk, in chunk order.

use crate::analyzer::BandVector;
use serde::{Deserialize, Serialize};

/// Ordered band vectors plus the parameters they were produced with.
///
/// Players step through [`frames`](Self::frames) at `analysis_fps`; keeping
/// that rate aligned with the audio clock is the player's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    /// Sample rate of the analyzed PCM in Hz.
    pub sample_rate: u32,
    /// Frames per second of audio.
    pub analysis_fps: u32,
    /// Ceiling of the band values.
    pub display_max: f32,
    /// Band vectors, `[time][band]`.
    pub frames: Vec<BandVector>,
}

impl Waveform {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// True when no full chunk was analyzed.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Bands per frame (0 for an empty waveform).
    pub fn num_bands(&self) -> usize {
        self.frames.first().map_or(0, Vec::len)
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.analysis_fps == 0 {
            return 0.0;
        }
        self.frames.len() as f64 / f64::from(self.analysis_fps)
    }

    /// Frame `index`, if present.
    pub fn frame(&self, index: usize) -> Option<&[f32]> {
        self.frames.get(index).map(Vec::as_slice)
    }

    /// Frame shown at `secs` into playback, if playback has not ended.
    pub fn frame_at_time(&self, secs: f64) -> Option<&[f32]> {
        if secs < 0.0 || !secs.is_finite() {
            return None;
        }
        let index = (secs * f64::from(self.analysis_fps)).floor() as usize;
        self.frame(index)
    }

    /// Index of the loudest band in frame `index`.
    ///
    /// Ties resolve to the lowest band. `None` for a missing or silent frame.
    pub fn peak_band(&self, index: usize) -> Option<usize> {
        let frame = self.frame(index)?;
        let (band, &value) = frame
            .iter()
            .enumerate()
            .rev()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))?;
        (value > 0.0).then_some(band)
    }

    /// Mean value of each band over the first `first_n` frames.
    pub fn band_averages(&self, first_n: usize) -> Vec<f32> {
        let frames = &self.frames[..first_n.min(self.frames.len())];
        let mut sums = vec![0.0_f32; self.num_bands()];
        if frames.is_empty() {
            return sums;
        }
        for frame in frames {
            for (sum, &v) in sums.iter_mut().zip(frame) {
                *sum += v;
            }
        }
        let n = frames.len() as f32;
        sums.iter_mut().for_each(|s| *s /= n);
        sums
    }

    /// Smallest and largest value over all frames.
    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut values = self.frames.iter().flatten().copied();
        let first = values.next()?;
        Some(values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Take the band vectors, dropping the metadata.
    pub fn into_frames(self) -> Vec<BandVector> {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waveform(frames: Vec<Vec<f32>>) -> Waveform {
        Waveform {
            sample_rate: 44100,
            analysis_fps: 30,
            display_max: 15.0,
            frames,
        }
    }

    #[test]
    fn test_duration_and_lookup() {
        let wf = waveform(vec![vec![0.0, 1.0]; 60]);
        assert_eq!(wf.len(), 60);
        assert_eq!(wf.num_bands(), 2);
        assert!((wf.duration_secs() - 2.0).abs() < 1e-9);
        assert!(wf.frame_at_time(1.99).is_some());
        assert!(wf.frame_at_time(2.0).is_none());
        assert!(wf.frame_at_time(-1.0).is_none());
    }

    #[test]
    fn test_peak_band() {
        let wf = waveform(vec![vec![1.0, 15.0, 15.0], vec![0.0, 0.0, 0.0]]);
        assert_eq!(wf.peak_band(0), Some(1));
        assert_eq!(wf.peak_band(1), None);
        assert_eq!(wf.peak_band(2), None);
    }

    #[test]
    fn test_band_averages() {
        let wf = waveform(vec![vec![0.0, 2.0], vec![4.0, 2.0], vec![100.0, 100.0]]);
        assert_eq!(wf.band_averages(2), vec![2.0, 2.0]);
        assert_eq!(waveform(Vec::new()).band_averages(100), Vec::<f32>::new());
    }

    #[test]
    fn test_value_range() {
        let wf = waveform(vec![vec![3.0, 1.0], vec![15.0, 0.5]]);
        assert_eq!(wf.value_range(), Some((0.5, 15.0)));
        assert_eq!(waveform(Vec::new()).value_range(), None);
    }
}
