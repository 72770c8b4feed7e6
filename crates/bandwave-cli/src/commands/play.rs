//! Terminal playback of a waveform, optionally synchronized to audio.

use super::common::load_config;
use bandwave_analysis::BandVector;
use bandwave_io::{AudioPlayer, WaveformFormat, load_audio, load_waveform};
use bandwave_render::{DisplayConfig, PlaybackClock, render_frame, to_ansi};
use clap::Args;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use std::io::{Stdout, Write, stdout};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

#[derive(Args)]
pub struct PlayArgs {
    /// Waveform file (.json or .jsonl)
    #[arg(value_name = "WAVEFORM")]
    waveform: PathBuf,

    /// Audio file to play in sync with the animation
    #[arg(short, long)]
    audio: Option<PathBuf>,

    /// Frames per second the waveform was analyzed at
    #[arg(long)]
    fps: Option<u32>,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Animate silently even when --audio is given
    #[arg(long)]
    no_audio: bool,

    /// Output device (exact or partial name)
    #[arg(short = 'd', long)]
    device: Option<String>,
}

/// Decoded audio to play alongside the frames.
pub struct AudioSource {
    /// Normalized mono samples.
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

pub fn run(args: PlayArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let fps = args.fps.unwrap_or(config.analysis.analysis_fps);
    if fps == 0 {
        anyhow::bail!("--fps must be positive");
    }

    let frames = load_waveform(&args.waveform, WaveformFormat::from_path(&args.waveform))?;
    println!(
        "Loaded {}: {} frames x {} bands",
        args.waveform.display(),
        frames.len(),
        frames.first().map_or(0, Vec::len)
    );

    let audio = match &args.audio {
        Some(path) if !args.no_audio => {
            let (samples, spec) = load_audio(path)?;
            Some(AudioSource {
                samples,
                sample_rate: spec.sample_rate,
            })
        }
        _ => None,
    };

    play_frames(
        &frames,
        fps,
        &config.display_config(),
        audio,
        args.device.as_deref(),
    )?;
    println!("Done!");
    Ok(())
}

/// Alternate screen in raw mode, restored on drop.
struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    fn enter() -> anyhow::Result<Self> {
        enable_raw_mode()?;
        let mut out = stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All)) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Ok(Self { out })
    }

    fn draw(&mut self, picture: &str, status: &str) -> anyhow::Result<()> {
        let mut row = 0u16;
        for line in picture.lines() {
            queue!(self.out, MoveTo(0, row), Print(line))?;
            row = row.saturating_add(1);
        }
        queue!(
            self.out,
            MoveTo(0, row.saturating_add(1)),
            Clear(ClearType::CurrentLine),
            Print(status)
        )?;
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

enum KeyAction {
    None,
    TogglePause,
    Quit,
}

fn poll_key(timeout: Duration) -> anyhow::Result<KeyAction> {
    if !event::poll(timeout)? {
        return Ok(KeyAction::None);
    }
    if let Event::Key(key) = event::read()?
        && key.kind == KeyEventKind::Press
    {
        return Ok(match key.code {
            KeyCode::Char(' ') => KeyAction::TogglePause,
            KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            _ => KeyAction::None,
        });
    }
    Ok(KeyAction::None)
}

/// Animate `frames` at `fps` until they run out or the user quits.
///
/// With audio the frame index follows the audio player's position; without
/// it a pausable wall clock drives playback. Space pauses, `q`/Esc/Ctrl+C stop.
pub fn play_frames(
    frames: &[BandVector],
    fps: u32,
    display: &DisplayConfig,
    audio: Option<AudioSource>,
    device: Option<&str>,
) -> anyhow::Result<()> {
    if frames.is_empty() {
        anyhow::bail!("waveform has no frames to play");
    }

    // Raw mode swallows SIGINT on most terminals; this covers the rest
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let player = audio
        .map(|a| AudioPlayer::new(a.samples, a.sample_rate, device))
        .transpose()?;
    let mut clock = PlaybackClock::new(fps);
    let total_secs = frames.len() as f64 / f64::from(fps);
    let poll_interval =
        Duration::from_secs_f64(1.0 / f64::from(fps)).min(Duration::from_millis(20));

    tracing::debug!(frames = frames.len(), fps, audio = player.is_some(), "starting playback");

    let mut terminal = TerminalGuard::enter()?;
    let mut last_drawn = None;

    while running.load(Ordering::SeqCst) {
        match poll_key(poll_interval)? {
            KeyAction::Quit => break,
            KeyAction::TogglePause => {
                let paused = clock.toggle_pause();
                if let Some(player) = &player {
                    if paused {
                        player.pause();
                    } else {
                        player.resume();
                    }
                }
                // Force a redraw of the status line
                last_drawn = None;
            }
            KeyAction::None => {}
        }

        let position = match &player {
            Some(player) if player.is_finished() => break,
            Some(player) => player.position_secs(),
            None => clock.elapsed().as_secs_f64(),
        };
        let index = clock.frame_index(position);
        let Some(bands) = frames.get(index) else {
            break;
        };

        if last_drawn != Some(index) {
            let picture = to_ansi(&render_frame(bands, display));
            let status = format!(
                "frame {:>5}/{}  {:6.2}s/{:.2}s{}  [space] pause  [q] quit",
                index + 1,
                frames.len(),
                position,
                total_secs,
                if clock.is_paused() { "  PAUSED" } else { "" }
            );
            terminal.draw(&picture, &status)?;
            last_drawn = Some(index);
        }
    }

    drop(terminal);
    Ok(())
}
