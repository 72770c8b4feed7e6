//! Helpers shared by several commands.

use bandwave_config::Config;
use bandwave_io::WaveformFormat;
use clap::ValueEnum;
use std::path::{Path, PathBuf};

/// Waveform file layout as a CLI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// A single JSON array of arrays
    Json,
    /// One JSON array per line
    Jsonl,
}

impl From<FormatArg> for WaveformFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => WaveformFormat::Json,
            FormatArg::Jsonl => WaveformFormat::JsonLines,
        }
    }
}

/// Load the explicit config file, or the user config, or the defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = Config::load_or_default(path)?;
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// `<dir>/<stem>.waveform.<ext>` next to the input file.
pub fn default_output_path(input: &Path, format: WaveformFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "audio".into(), |s| s.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}.waveform.{}", format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("music/song.mp3"), WaveformFormat::Json),
            PathBuf::from("music/song.waveform.json")
        );
        assert_eq!(
            default_output_path(Path::new("song.wav"), WaveformFormat::JsonLines),
            PathBuf::from("song.waveform.jsonl")
        );
    }

    #[test]
    fn test_format_arg() {
        assert_eq!(WaveformFormat::from(FormatArg::Jsonl), WaveformFormat::JsonLines);
        assert_eq!(WaveformFormat::from(FormatArg::Json), WaveformFormat::Json);
    }
}
