//! Sample sequence preparation: mono collapse and peak normalization.
//!
//! Decoded PCM must pass through these before it reaches the framer. The
//! analyzer assumes a mono sequence whose peak absolute value is 1.0 (or an
//! all-zero sequence).

/// Average interleaved frames down to one channel.
///
/// A trailing partial frame is dropped. `channels == 0` yields an empty
/// sequence; `channels == 1` returns the input unchanged.
pub fn mix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    match channels {
        0 => Vec::new(),
        1 => interleaved.to_vec(),
        _ => interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect(),
    }
}

/// Largest absolute sample value (0.0 for an empty slice).
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().fold(0.0_f32, |acc, &s| acc.max(s.abs()))
}

/// Scale `samples` in place so the peak absolute value becomes 1.0.
///
/// An all-zero (or empty) sequence is left untouched. Returns the peak that
/// was divided out.
pub fn normalize_peak(samples: &mut [f32]) -> f32 {
    let max = peak(samples);
    if max > 0.0 {
        for s in samples.iter_mut() {
            *s /= max;
        }
    }
    max
}
