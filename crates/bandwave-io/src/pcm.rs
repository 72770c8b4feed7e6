//! PCM decoding into the normalized mono sample sequence the analyzer expects.

use crate::transcode::transcode_to_wav;
use crate::{Error, Result};
use bandwave_analysis::signal::{mix_to_mono, normalize_peak};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Format of the decoded PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PcmSpec {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channels in the source file (the returned samples are always mono).
    pub channels: u16,
    /// Bit depth per sample in the source file.
    pub bits_per_sample: u16,
    /// Sample frames (samples per channel).
    pub num_frames: u64,
}

impl PcmSpec {
    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.num_frames as f64 / f64::from(self.sample_rate)
    }
}

impl From<hound::WavSpec> for PcmSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            num_frames: 0,
        }
    }
}

/// Read WAV metadata without loading sample data.
pub fn read_pcm_info<P: AsRef<Path>>(path: P) -> Result<PcmSpec> {
    let reader = WavReader::open(path)?;
    let mut spec = PcmSpec::from(reader.spec());
    spec.num_frames = u64::from(reader.duration());
    Ok(spec)
}

/// Read a WAV file as a normalized mono sample sequence.
///
/// Integer samples (16-bit signed is the expected input) are scaled to
/// [-1, 1], multi-channel frames are averaged down to mono, and the result is
/// divided by its peak absolute value unless it is all zeros.
///
/// # Example
/// ```ignore
/// let (samples, spec) = read_pcm("input.wav")?;
/// println!("Loaded {} samples at {} Hz", samples.len(), spec.sample_rate);
/// ```
pub fn read_pcm<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, PcmSpec)> {
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    let mut spec = PcmSpec::from(hound_spec);
    spec.num_frames = u64::from(reader.duration());
    let channels = usize::from(spec.channels);

    let interleaved: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mut samples = mix_to_mono(&interleaved, channels);
    let peak = normalize_peak(&mut samples);
    tracing::debug!(
        frames = samples.len(),
        channels,
        sample_rate = spec.sample_rate,
        peak,
        "decoded PCM"
    );

    Ok((samples, spec))
}

/// Decode any audio file into a normalized mono sample sequence.
///
/// `.wav` files are read directly. Anything else is converted with ffmpeg to
/// a temporary 16-bit mono WAV first; the temporary file is removed whether
/// or not decoding succeeds.
pub fn load_audio<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, PcmSpec)> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("audio file '{}' not found", path.display()),
        )));
    }

    if is_wav(path) {
        return read_pcm(path);
    }

    let temp = tempfile::Builder::new()
        .prefix("bandwave-")
        .suffix(".wav")
        .tempfile()?;
    transcode_to_wav(path, temp.path())?;
    read_pcm(temp.path())
}

fn is_wav(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
}

/// Write mono samples in [-1, 1] as a 16-bit PCM WAV.
pub fn write_pcm_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;

    let max_val = f32::from(i16::MAX);
    for &sample in samples {
        let int_sample = (sample * max_val).clamp(-max_val - 1.0, max_val) as i16;
        writer.write_sample(int_sample)?;
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_wav() {
        assert!(is_wav(Path::new("a/b/song.wav")));
        assert!(is_wav(Path::new("SONG.WAV")));
        assert!(!is_wav(Path::new("song.mp3")));
        assert!(!is_wav(Path::new("wav")));
    }

    #[test]
    fn test_missing_file() {
        let err = load_audio("/definitely/not/here.mp3").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_spec_duration() {
        let spec = PcmSpec {
            sample_rate: 44100,
            channels: 2,
            bits_per_sample: 16,
            num_frames: 88200,
        };
        assert!((spec.duration_secs() - 2.0).abs() < 1e-9);
    }
}
