//! Audio output for synchronized playback.
//!
//! [`AudioPlayer`] plays a mono buffer on an output device through cpal and
//! counts the frames it has handed to the device. A visualizer reads
//! [`AudioPlayer::position_secs`] to choose the band vector to draw, so the
//! animation follows the audio clock instead of drifting on its own timer.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

fn device_name(device: &cpal::Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Names of the output devices on the default host.
pub fn list_output_devices() -> Result<Vec<String>> {
    let host = cpal::default_host();
    let devices = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;
    Ok(devices.filter_map(|d| device_name(&d).ok()).collect())
}

/// Find an output device by case-insensitive substring, or the default one.
fn find_output_device(name: Option<&str>) -> Result<cpal::Device> {
    let host = cpal::default_host();
    match name {
        Some(search) => {
            let search_lower = search.to_lowercase();
            let devices = host
                .output_devices()
                .map_err(|e| Error::Stream(e.to_string()))?;

            for device in devices {
                if let Ok(dev_name) = device_name(&device)
                    && dev_name.to_lowercase().contains(&search_lower)
                {
                    return Ok(device);
                }
            }
            Err(Error::DeviceNotFound(format!(
                "no output device matching '{}'",
                search
            )))
        }
        None => host.default_output_device().ok_or(Error::NoDevice),
    }
}

/// State shared between the player and the audio callback.
struct Shared {
    samples: Vec<f32>,
    position: AtomicUsize,
    paused: AtomicBool,
}

impl Shared {
    /// Fill an interleaved output buffer, duplicating each mono sample to
    /// every channel. Silence once paused or past the end.
    fn fill(&self, data: &mut [f32], channels: usize) {
        if self.paused.load(Ordering::Relaxed) {
            data.fill(0.0);
            return;
        }
        let mut pos = self.position.load(Ordering::Relaxed);
        for frame in data.chunks_mut(channels.max(1)) {
            let sample = self.samples.get(pos).copied().unwrap_or(0.0);
            frame.fill(sample);
            if pos < self.samples.len() {
                pos += 1;
            }
        }
        self.position.store(pos, Ordering::Relaxed);
    }
}

/// Plays a mono buffer and reports the playback position.
///
/// Playback starts in [`AudioPlayer::new`] and stops when the player is dropped.
pub struct AudioPlayer {
    shared: Arc<Shared>,
    sample_rate: u32,
    _stream: cpal::Stream,
}

impl AudioPlayer {
    /// Start playing `samples` at `sample_rate` Hz on the named (or default)
    /// output device.
    pub fn new(samples: Vec<f32>, sample_rate: u32, device: Option<&str>) -> Result<Self> {
        let device = find_output_device(device)?;
        let channels = device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?
            .channels();

        let stream_config = cpal::StreamConfig {
            channels,
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        let shared = Arc::new(Shared {
            samples,
            position: AtomicUsize::new(0),
            paused: AtomicBool::new(false),
        });

        let callback_shared = Arc::clone(&shared);
        let stream = device
            .build_output_stream(
                &stream_config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    callback_shared.fill(data, usize::from(channels));
                },
                move |err| {
                    tracing::warn!("audio output error: {err}");
                },
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(
            device = %device_name(&device).unwrap_or_default(),
            channels,
            sample_rate,
            "output stream started"
        );

        Ok(Self {
            shared,
            sample_rate,
            _stream: stream,
        })
    }

    /// Seconds of audio handed to the device so far.
    pub fn position_secs(&self) -> f64 {
        self.shared.position.load(Ordering::Relaxed) as f64 / f64::from(self.sample_rate)
    }

    /// Total length in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.shared.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Output silence and hold the position.
    pub fn pause(&self) {
        self.shared.paused.store(true, Ordering::Relaxed);
    }

    /// Continue from the held position.
    pub fn resume(&self) {
        self.shared.paused.store(false, Ordering::Relaxed);
    }

    /// True while paused.
    pub fn is_paused(&self) -> bool {
        self.shared.paused.load(Ordering::Relaxed)
    }

    /// True once every sample has been handed to the device.
    pub fn is_finished(&self) -> bool {
        self.shared.position.load(Ordering::Relaxed) >= self.shared.samples.len()
    }
}
