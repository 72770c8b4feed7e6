//! Summarize a waveform file.

use super::common::load_config;
use bandwave_analysis::Waveform;
use bandwave_io::{WaveformFormat, load_waveform};
use clap::Args;
use std::path::PathBuf;

/// Summarize a waveform file.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the waveform file
    #[arg(value_name = "WAVEFORM")]
    pub waveform: PathBuf,

    /// Frames per second the waveform was analyzed at
    #[arg(long)]
    pub fps: Option<u32>,

    /// Number of leading frames to average per band
    #[arg(long, default_value = "100")]
    pub average_frames: usize,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let format = WaveformFormat::from_path(&args.waveform);
    let frames = load_waveform(&args.waveform, format)?;

    let waveform = Waveform {
        sample_rate: config.analysis.sample_rate,
        analysis_fps: args.fps.unwrap_or(config.analysis.analysis_fps),
        display_max: config.analysis.display_max,
        frames,
    };

    let format_str = match format {
        WaveformFormat::Json => "JSON",
        WaveformFormat::JsonLines => "JSON Lines",
    };

    println!("File:        {}", args.waveform.display());
    println!("Format:      {format_str}");
    println!("Frames:      {}", waveform.len());
    println!("Bands:       {}", waveform.num_bands());
    println!(
        "Duration:    {:.3}s at {} fps",
        waveform.duration_secs(),
        waveform.analysis_fps
    );
    if let Some((lo, hi)) = waveform.value_range() {
        println!("Value range: {lo:.3} to {hi:.3}");
    }

    let averaged = args.average_frames.min(waveform.len());
    let averages = waveform.band_averages(averaged);
    if let Some((loudest, _)) = averages
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
    {
        println!("Loudest band: {loudest}");
    }

    println!("\nAverage amplitude per band (first {averaged} frames):");
    for (i, avg) in averages.iter().enumerate() {
        println!("Band {i}: {avg:.3}");
    }

    Ok(())
}
