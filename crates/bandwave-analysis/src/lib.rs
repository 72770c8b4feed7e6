//! Bandwave Analysis - spectral band extraction for low-resolution displays
//!
//! This crate turns a normalized mono PCM signal into a time series of
//! band-amplitude vectors sized for an LED matrix or a small on-screen
//! animation:
//!
//! - [`signal`] - Mono collapse and peak normalization of decoded PCM
//! - [`framer`] - Fixed-size, non-overlapping analysis chunks
//! - [`fft`] - FFT wrapper with windowing functions
//! - [`bands`] - The fixed 69-band, perceptually spaced band-edge table
//! - [`analyzer`] - Chunk → band vector (window, FFT, band means, scaling)
//! - [`pipeline`] - Whole-signal analysis, sequential or chunk-parallel
//! - [`waveform`] - The ordered band vectors handed to players
//!
//! Decoding, file formats and rendering live in sibling crates; this crate
//! only sees `f32` samples.
//!
//! ## Example
//!
//! ```rust
//! use bandwave_analysis::{AnalysisConfig, analyze, signal};
//!
//! let mut samples: Vec<f32> = (0..14700)
//!     .map(|i| 0.25 * (2.0 * std::f32::consts::PI * 1000.0 * i as f32 / 44100.0).sin())
//!     .collect();
//! signal::normalize_peak(&mut samples);
//!
//! let waveform = analyze(&samples, &AnalysisConfig::default()).unwrap();
//! assert_eq!(waveform.len(), 10);
//! for frame in &waveform.frames {
//!     assert!(frame.iter().all(|&v| (0.0..=15.0).contains(&v)));
//! }
//! ```
//!
//! ## Output contract
//!
//! Each band vector is normalized twice per chunk (peak → presence/gain, then
//! peak → `display_max`), so the output carries spectral *shape* only and no
//! absolute loudness across chunks. This is intentional and players depend on it.

pub mod analyzer;
pub mod bands;
pub mod config;
mod error;
pub mod fft;
pub mod framer;
pub mod pipeline;
pub mod signal;
pub mod waveform;

// Re-export main types
pub use analyzer::{BandAnalyzer, BandVector};
pub use bands::{BandEdges, FrequencyBand, NUM_BANDS};
pub use config::{AnalysisConfig, GainCurve};
pub use error::{Error, Result};
pub use fft::{Fft, Window};
pub use framer::Framer;
pub use pipeline::{analyze, analyze_parallel, analyze_with_progress};
pub use waveform::Waveform;
