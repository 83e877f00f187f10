//! # Overscan Settings
//!
//! File-backed configuration for the overscan post-processor.

pub mod config;

pub use config::{derive_output_path, Config, JobSettings, OutputSettings, DEFAULT_OUTPUT_SUFFIX};
