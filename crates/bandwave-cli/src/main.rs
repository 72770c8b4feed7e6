//! Bandwave CLI - turn audio into LED-matrix band animations.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bandwave")]
#[command(author, version, about = "Audio to LED band visualizer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an audio file into a waveform file
    Process(commands::process::ProcessArgs),

    /// Play a waveform file as a terminal LED-matrix animation
    Play(commands::play::PlayArgs),

    /// Summarize a waveform file
    Info(commands::info::InfoArgs),

    /// Print the band-edge table and FFT bin ranges
    Bands(commands::bands::BandsArgs),

    /// List audio output devices
    Devices(commands::devices::DevicesArgs),

    /// Show or create the configuration file
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Bands(args) => commands::bands::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
