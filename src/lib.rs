//! # Overscan
//!
//! Post-processor for laser cutter G-code. Straight axis-aligned cuts are
//! regrouped into scan lines and cut in serpentine passes, each pass extended
//! by an overscan distance so the head is at speed before the laser fires.
//!
//! ## Architecture
//!
//! 1. **overscan-core** - Geometry and error types
//! 2. **overscan-gcode** - Line classification, word extraction, emission
//! 3. **overscan-camtools** - Extraction, grouping, ordering, planning
//! 4. **overscan-settings** - JSON/TOML configuration
//! 5. **overscan** - Command-line binary

pub mod cli;

use anyhow::Context;
use tracing::info;

pub use cli::{parameters, Cli};
pub use overscan_camtools::{OverscanParameters, OverscanProcessor, RunSummary};
pub use overscan_core::{Error, JobError, Result};
pub use overscan_gcode::{GcodeEmitter, GcodeWriter};
pub use overscan_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging on stderr with:
/// - RUST_LOG environment variable support
/// - `info` by default, `debug` at verbosity 1, `trace` above
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 0)
        .with_level(true)
        .with_line_number(verbosity > 0);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

/// Run one overscan job as described by the command line
pub fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = cli
        .resolve_config()
        .context("Failed to load configuration")?;
    let processor = OverscanProcessor::new(parameters(&config));

    let summary = if cli.dry_run {
        let (_, summary) = processor.plan_file(&cli.input)?;
        info!(
            vertical_groups = summary.vertical_groups,
            horizontal_groups = summary.horizontal_groups,
            dropped = summary.dropped_segments,
            "dry run, no output written"
        );
        summary
    } else {
        let output = cli.output_path(&config);
        processor.process_file(&cli.input, &output)?
    };

    if cli.summary_json {
        println!("{}", summary.to_json()?);
    }

    Ok(summary)
}
