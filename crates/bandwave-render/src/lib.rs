//! LED-matrix rendering for bandwave band vectors.
//!
//! Rendering is a pure function of one band vector and an explicit
//! [`DisplayConfig`]; nothing here touches a terminal, a window, or a clock
//! source it was not handed.
//!
//! - [`render_frame`] draws one band vector as mirrored (or bottom-up) bars
//!   into a [`Matrix`] of optional colored pixels
//! - [`to_ansi`] turns a matrix into 24-bit ANSI text, two pixel rows per line
//! - [`PlaybackClock`] maps elapsed playback time to a frame index
//!
//! ```rust
//! use bandwave_render::{DisplayConfig, render_frame};
//!
//! let config = DisplayConfig::default();
//! let matrix = render_frame(&[15.0; 64], &config);
//! // Full-scale bars span mid ± bar_height on every column
//! assert_eq!(matrix.lit_count(), 64 * 29);
//! ```

mod ansi;
mod clock;
mod matrix;
mod render;

pub use ansi::to_ansi;
pub use clock::PlaybackClock;
pub use matrix::{Matrix, Rgb};
pub use render::{DisplayConfig, render_frame};
