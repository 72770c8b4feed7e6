//! CLI command implementations.

pub mod bands;
pub mod common;
pub mod config;
pub mod devices;
pub mod info;
pub mod play;
pub mod process;
