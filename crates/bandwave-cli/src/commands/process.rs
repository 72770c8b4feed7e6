//! Audio file → waveform file.

use super::common::{FormatArg, default_output_path, load_config};
use super::play::{AudioSource, play_frames};
use anyhow::Context;
use bandwave_analysis::{analyze_parallel, analyze_with_progress};
use bandwave_io::{WaveformFormat, load_audio, save_waveform};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input audio file (WAV directly, anything else through ffmpeg)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output waveform file [default: <INPUT stem>.waveform.json]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output layout [default: from the output extension]
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Analysis frames per second
    #[arg(long)]
    fps: Option<u32>,

    /// Ceiling of the band values
    #[arg(long)]
    display_max: Option<f32>,

    /// Worker threads for analysis (1 = sequential)
    #[arg(short, long, default_value = "1")]
    jobs: usize,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Play the animation once processing finishes
    #[arg(long)]
    play: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    let format = match (args.format, &args.output) {
        (Some(format), _) => WaveformFormat::from(format),
        (None, Some(output)) => WaveformFormat::from_path(output),
        (None, None) => WaveformFormat::Json,
    };
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input, format));

    println!("Reading {}...", args.input.display());
    let spinner = ProgressBar::new_spinner();
    spinner.set_message("decoding");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let decoded = load_audio(&args.input);
    spinner.finish_and_clear();
    let (samples, spec) =
        decoded.with_context(|| format!("failed to decode {}", args.input.display()))?;

    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f64 / f64::from(spec.sample_rate)
    );

    let mut analysis = config.analysis.with_sample_rate(spec.sample_rate);
    if let Some(fps) = args.fps {
        analysis = analysis.with_analysis_fps(fps);
    }
    if let Some(display_max) = args.display_max {
        analysis = analysis.with_display_max(display_max);
    }

    let waveform = if args.jobs > 1 {
        let spinner = ProgressBar::new_spinner();
        spinner.set_message(format!("analyzing on {} threads", args.jobs));
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = analyze_parallel(&samples, &analysis, args.jobs);
        spinner.finish_and_clear();
        result?
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({eta})")?
                .progress_chars("##-"),
        );
        let result = analyze_with_progress(&samples, &analysis, |done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        });
        pb.finish_and_clear();
        result?
    };

    println!(
        "  {} frames x {} bands at {} fps ({:.2}s)",
        waveform.len(),
        waveform.num_bands(),
        waveform.analysis_fps,
        waveform.duration_secs()
    );

    println!("Writing {}...", output.display());
    save_waveform(&output, &waveform, format)?;

    if args.play {
        let mut display = config.display_config();
        display.display_max = waveform.display_max;
        let audio = AudioSource {
            samples,
            sample_rate: spec.sample_rate,
        };
        play_frames(&waveform.frames, waveform.analysis_fps, &display, Some(audio), None)?;
    }

    println!("Done!");
    Ok(())
}
