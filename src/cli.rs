//! Command-line interface
//!
//! Precedence for every job setting: built-in defaults, then the config file,
//! then command-line flags.

use clap::{ArgAction, Parser};
use overscan_camtools::OverscanParameters;
use overscan_settings::Config;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Rewrites laser G-code into serpentine scan lines with overscan
#[derive(Debug, Clone, Parser)]
#[command(name = "overscan", version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Input G-code file
    pub input: PathBuf,

    /// Overscan distance before and after each pass (mm)
    #[arg(long, value_name = "MM", allow_negative_numbers = true)]
    pub overscan: Option<f64>,

    /// Laser power for M03 and cut moves (S value)
    #[arg(long, value_name = "S")]
    pub power: Option<f64>,

    /// Grouping tolerance (mm); zero disables quantization
    #[arg(long, value_name = "MM", allow_negative_numbers = true)]
    pub tolerance: Option<f64>,

    /// Cutting feed rate written in the header (mm/min)
    #[arg(long, value_name = "F")]
    pub feed: Option<f64>,

    /// Output file (default: input name with the configured suffix)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Config file (.json or .toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not write a comment before each pass
    #[arg(long)]
    pub no_comments: bool,

    /// Plan and report without writing the output file
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub summary_json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Load the config file and apply command-line overrides
    pub fn resolve_config(&self) -> overscan_core::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)?,
            None => Config::load_default()?,
        };

        if let Some(v) = self.overscan {
            config.job.overscan_distance = v;
        }
        if let Some(v) = self.power {
            config.job.laser_power = v;
        }
        if let Some(v) = self.tolerance {
            config.job.group_tolerance = v;
        }
        if let Some(v) = self.feed {
            config.job.cut_feed_rate = v;
        }
        if self.no_comments {
            config.output.group_comments = false;
        }

        config.validate()?;
        Ok(config)
    }

    /// Output path from `--output` or derived from the input name
    pub fn output_path(&self, config: &Config) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| config.output_path_for(&self.input))
    }
}

/// Processor parameters for a resolved config
pub fn parameters(config: &Config) -> OverscanParameters {
    OverscanParameters {
        overscan_distance: config.job.overscan_distance,
        laser_power: config.job.laser_power,
        group_tolerance: config.job.group_tolerance,
        cut_feed_rate: config.job.cut_feed_rate,
        group_comments: config.output.group_comments,
    }
}
