//! ffmpeg transcoding of arbitrary audio to 16-bit mono WAV.
//!
//! Checks standard installation locations before falling back to a PATH
//! search, so ffmpeg is found even when running with a minimal PATH.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Sample rate ffmpeg resamples every input to.
pub const TRANSCODE_SAMPLE_RATE: u32 = 44100;

/// Locates the ffmpeg binary on the system.
///
/// Checks in this order:
/// 1. The `BANDWAVE_FFMPEG` environment variable
/// 2. Platform install locations (Homebrew, /usr/bin, snap, C:\ffmpeg)
/// 3. PATH search via `which` or `where`
pub fn find_ffmpeg() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os("BANDWAVE_FFMPEG").map(PathBuf::from)
        && path.exists()
    {
        tracing::debug!("Using ffmpeg from BANDWAVE_FFMPEG: {}", path.display());
        return Ok(path);
    }

    let candidates: &[&str] = if cfg!(target_os = "macos") {
        &[
            "/opt/homebrew/bin/ffmpeg",
            "/usr/local/bin/ffmpeg",
            "/usr/bin/ffmpeg",
        ]
    } else if cfg!(target_os = "linux") {
        &["/usr/bin/ffmpeg", "/usr/local/bin/ffmpeg", "/snap/bin/ffmpeg"]
    } else if cfg!(target_os = "windows") {
        &[
            "C:\\ffmpeg\\bin\\ffmpeg.exe",
            "C:\\Program Files\\ffmpeg\\bin\\ffmpeg.exe",
        ]
    } else {
        &[]
    };

    if let Some(path) = candidates.iter().map(PathBuf::from).find(|p| p.exists()) {
        tracing::debug!("Found ffmpeg at: {}", path.display());
        return Ok(path);
    }

    let path = find_in_path("ffmpeg").ok_or(Error::FfmpegNotFound)?;
    tracing::debug!("Found ffmpeg in PATH at: {}", path.display());
    Ok(path)
}

/// Searches for a binary in the system PATH.
fn find_in_path(binary_name: &str) -> Option<PathBuf> {
    let search_cmd = if cfg!(target_os = "windows") {
        "where"
    } else {
        "which"
    };

    let output = Command::new(search_cmd).arg(binary_name).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next()?.trim();
    (!first.is_empty()).then(|| PathBuf::from(first))
}

/// Convert `input` to a 16-bit, 44.1 kHz mono WAV at `output`, overwriting it.
pub fn transcode_to_wav(input: &Path, output: &Path) -> Result<()> {
    let ffmpeg = find_ffmpeg()?;
    tracing::info!(input = %input.display(), "transcoding with ffmpeg");

    let result = Command::new(&ffmpeg)
        .arg("-i")
        .arg(input)
        .args(["-acodec", "pcm_s16le"])
        .arg("-ar")
        .arg(TRANSCODE_SAMPLE_RATE.to_string())
        .args(["-ac", "1"])
        .arg("-y")
        .arg(output)
        .output()?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        let tail: Vec<&str> = stderr.lines().rev().take(3).collect();
        let reason = format!(
            "{}: {}",
            result.status,
            tail.into_iter().rev().collect::<Vec<_>>().join(" | ")
        );
        return Err(Error::Transcode {
            path: input.to_path_buf(),
            reason,
        });
    }

    tracing::info!(output = %output.display(), "transcode finished");
    Ok(())
}
