//! Configuration for the bandwave visualizer.
//!
//! A single TOML file carries the analysis parameters and the geometry of
//! the LED matrix the waveform is drawn on. Every field has a default, so an
//! empty file (or no file at all) gives a 64×32 red LED panel fed
//! at 30 fps with a 15.0 ceiling.
//!
//! # Example
//!
//! ```rust,no_run
//! use bandwave_config::Config;
//!
//! // Explicit path, or the user config file when None
//! let config = Config::load_or_default(None).unwrap();
//! let analysis = config.analysis_config().unwrap();
//! println!("chunk size: {}", analysis.chunk_size());
//! ```

mod config;
mod error;

/// Platform-specific configuration paths.
pub mod paths;

pub use config::{Config, DisplaySettings};
pub use error::ConfigError;
pub use paths::{default_config_path, ensure_user_config_dir, user_config_dir};
