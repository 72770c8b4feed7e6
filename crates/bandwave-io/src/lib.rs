//! Audio I/O layer for bandwave.
//!
//! This crate provides everything that happens before and after band
//! analysis:
//!
//! - **PCM decoding**: [`read_pcm`] loads a WAV, collapses it to mono and
//!   peak-normalizes it; [`load_audio`] does the same for any format ffmpeg
//!   can decode
//! - **Transcoding**: [`find_ffmpeg`] and [`transcode_to_wav`]
//! - **Waveform files**: [`save_waveform`] and [`load_waveform`] in JSON or
//!   JSON Lines
//! - **Audio output**: [`AudioPlayer`] plays the decoded samples and exposes
//!   the playback clock a visualizer follows
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bandwave_analysis::{AnalysisConfig, analyze};
//! use bandwave_io::{WaveformFormat, load_audio, save_waveform};
//!
//! let (samples, spec) = load_audio("song.mp3")?;
//! let config = AnalysisConfig::default().with_sample_rate(spec.sample_rate);
//! let waveform = analyze(&samples, &config)?;
//! save_waveform("song.waveform.json", &waveform, WaveformFormat::Json)?;
//! ```

mod pcm;
mod playback;
mod transcode;
mod waveform_file;

pub use pcm::{PcmSpec, load_audio, read_pcm, read_pcm_info, write_pcm_wav};
pub use playback::{AudioPlayer, list_output_devices};
pub use transcode::{TRANSCODE_SAMPLE_RATE, find_ffmpeg, transcode_to_wav};
pub use waveform_file::{WaveformFormat, load_waveform, save_waveform};

use std::path::PathBuf;

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Waveform JSON could not be read or written.
    #[error("waveform JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// ffmpeg is not installed or could not be located.
    #[error(
        "ffmpeg not found. Please install ffmpeg:\n\
         macOS: brew install ffmpeg\n\
         Linux: apt install ffmpeg (Debian/Ubuntu) or dnf install ffmpeg (Fedora)\n\
         Windows: Download from https://ffmpeg.org/download.html"
    )]
    FfmpegNotFound,

    /// ffmpeg ran but failed to convert the input.
    #[error("transcoding '{path}' failed: {reason}")]
    Transcode {
        /// The input file.
        path: PathBuf,
        /// ffmpeg's exit status and stderr tail.
        reason: String,
    },

    /// The decoded audio cannot be analyzed.
    #[error("analysis error: {0}")]
    Analysis(#[from] bandwave_analysis::Error),

    /// A waveform file has frames of different lengths.
    #[error("frame {index} has {found} bands, expected {expected}")]
    InconsistentFrames {
        /// Index of the offending frame.
        index: usize,
        /// Length of the first frame.
        expected: usize,
        /// Length of the offending frame.
        found: usize,
    },

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
