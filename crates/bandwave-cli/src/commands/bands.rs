//! Print the band-edge table and the FFT bins each band averages.

use bandwave_analysis::bands::count_overlaps;
use bandwave_analysis::config::{DEFAULT_ANALYSIS_FPS, DEFAULT_SAMPLE_RATE};
use bandwave_analysis::{AnalysisConfig, BandAnalyzer};
use clap::Args;

#[derive(Args)]
pub struct BandsArgs {
    /// Sample rate in Hz
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE)]
    sample_rate: u32,

    /// Analysis frames per second
    #[arg(long, default_value_t = DEFAULT_ANALYSIS_FPS)]
    fps: u32,
}

pub fn run(args: BandsArgs) -> anyhow::Result<()> {
    let config = AnalysisConfig::default()
        .with_sample_rate(args.sample_rate)
        .with_analysis_fps(args.fps);
    let analyzer = BandAnalyzer::new(config)?;

    let chunk_size = analyzer.chunk_size();
    let spectrum_len = chunk_size / 2;
    let ranges = analyzer.bin_ranges();

    println!(
        "Chunk size: {chunk_size} samples ({} fps at {} Hz)",
        args.fps, args.sample_rate
    );
    println!(
        "Spectrum:   {spectrum_len} bins, {:.2} Hz per bin\n",
        f64::from(args.sample_rate) / chunk_size as f64
    );

    println!("{:>4}  {:>10}  {:>10}  {:>6}  {:>6}", "band", "low Hz", "high Hz", "start", "end");
    for (i, (band, range)) in analyzer.band_edges().bands().zip(ranges).enumerate() {
        let overlap = if i > 0 && range.start < ranges[i - 1].end {
            "  *"
        } else {
            ""
        };
        let clipped = if range.end > spectrum_len { "  (past Nyquist)" } else { "" };
        println!(
            "{i:>4}  {:>10.1}  {:>10.1}  {:>6}  {:>6}{overlap}{clipped}",
            band.low_hz, band.high_hz, range.start, range.end
        );
    }

    println!(
        "\n{} bands, {} overlapping bin ranges (*)",
        analyzer.num_bands(),
        count_overlaps(ranges)
    );
    Ok(())
}
