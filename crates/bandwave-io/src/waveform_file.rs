//! Waveform persistence as plain nested numeric arrays.
//!
//! Two layouts are supported:
//!
//! - **JSON**: one document, `[[b0, b1, ...], [b0, b1, ...], ...]` with time
//!   on the outer axis and band on the inner axis
//! - **JSON Lines**: one band-vector array per line, so a player can stream
//!   frames without parsing the whole file
//!
//! Only the band values are stored. The analysis rate is not part of the file;
//! players must be told the fps the waveform was produced at.

use crate::{Error, Result};
use bandwave_analysis::{BandVector, Waveform};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// On-disk layout of a waveform file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaveformFormat {
    /// A single JSON array of arrays.
    #[default]
    Json,
    /// One JSON array per line.
    JsonLines,
}

impl WaveformFormat {
    /// Pick the layout from a file extension (`.jsonl`/`.ndjson` → lines).
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("jsonl" | "ndjson") => WaveformFormat::JsonLines,
            _ => WaveformFormat::Json,
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            WaveformFormat::Json => "json",
            WaveformFormat::JsonLines => "jsonl",
        }
    }
}

/// Write the band vectors of `waveform` to `path`.
pub fn save_waveform(
    path: impl AsRef<Path>,
    waveform: &Waveform,
    format: WaveformFormat,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    match format {
        WaveformFormat::Json => serde_json::to_writer(&mut writer, &waveform.frames)?,
        WaveformFormat::JsonLines => {
            for frame in &waveform.frames {
                serde_json::to_writer(&mut writer, frame)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;

    tracing::info!(
        path = %path.display(),
        frames = waveform.len(),
        bands = waveform.num_bands(),
        "waveform saved"
    );
    Ok(())
}

/// Read band vectors from `path`.
///
/// A file with no frames loads as an empty list, matching what
/// [`save_waveform`] writes for audio shorter than one chunk. Fails if any
/// frame's length differs from the first frame's.
pub fn load_waveform(path: impl AsRef<Path>, format: WaveformFormat) -> Result<Vec<BandVector>> {
    let reader = BufReader::new(File::open(path)?);

    let frames: Vec<BandVector> = match format {
        WaveformFormat::Json => serde_json::from_reader(reader)?,
        WaveformFormat::JsonLines => {
            let mut frames = Vec::new();
            for line in reader.lines() {
                let line = line?;
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                frames.push(serde_json::from_str(line)?);
            }
            frames
        }
    };

    check_frames(&frames)?;
    Ok(frames)
}

fn check_frames(frames: &[BandVector]) -> Result<()> {
    let Some(expected) = frames.first().map(Vec::len) else {
        return Ok(());
    };
    if let Some((index, frame)) = frames
        .iter()
        .enumerate()
        .find(|(_, f)| f.len() != expected)
    {
        return Err(Error::InconsistentFrames {
            index,
            expected,
            found: frame.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            WaveformFormat::from_path("a/waveform.json"),
            WaveformFormat::Json
        );
        assert_eq!(
            WaveformFormat::from_path("waveform.JSONL"),
            WaveformFormat::JsonLines
        );
        assert_eq!(
            WaveformFormat::from_path("waveform.ndjson"),
            WaveformFormat::JsonLines
        );
        assert_eq!(WaveformFormat::from_path("waveform"), WaveformFormat::Json);
        assert_eq!(WaveformFormat::JsonLines.extension(), "jsonl");
    }

    #[test]
    fn test_check_frames() {
        assert!(check_frames(&[]).is_ok());
        assert!(check_frames(&[vec![1.0, 2.0], vec![3.0, 4.0]]).is_ok());
        match check_frames(&[vec![1.0, 2.0], vec![3.0]]) {
            Err(Error::InconsistentFrames {
                index,
                expected,
                found,
            }) => {
                assert_eq!((index, expected, found), (1, 2, 1));
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
