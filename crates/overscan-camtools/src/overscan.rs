//! Laser Overscan Processor
//!
//! Rewrites a laser program so that every axis-aligned cut is made inside a
//! serpentine pass with overscan lead-in and lead-out. Vertical columns are
//! cut first (in ascending X), then horizontal rows (in ascending Y).
//! Diagonal and curved moves are not carried over.

use crate::extractor::extract_segments;
use crate::grouping::{group_segments, AxisGroups};
use crate::planner::{ScanAxis, ToolpathMove, ToolpathPlanner};
use overscan_core::{Error, JobError, Result};
use overscan_gcode::{GcodeEmitter, GcodeWriter};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;
use tracing::{info, warn};

/// Overscan job parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverscanParameters {
    /// Extra travel before and after each pass (mm)
    pub overscan_distance: f64,
    /// Laser power used for M03 and every cut (S value)
    pub laser_power: f64,
    /// Orientation threshold and quantization step for scan lines (mm)
    pub group_tolerance: f64,
    /// Feed rate written in the header (mm/min)
    pub cut_feed_rate: f64,
    /// Write a comment line before each pass
    pub group_comments: bool,
}

impl Default for OverscanParameters {
    fn default() -> Self {
        Self {
            overscan_distance: 2.0,
            laser_power: 75.0,
            group_tolerance: 0.0001,
            cut_feed_rate: 1000.0,
            group_comments: true,
        }
    }
}

/// Counters describing one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub lines_read: usize,
    pub segments_extracted: usize,
    pub vertical_groups: usize,
    pub horizontal_groups: usize,
    pub vertical_segments: usize,
    pub horizontal_segments: usize,
    pub dropped_segments: usize,
    /// First feed rate found in the source program
    pub first_feed: Option<f64>,
}

impl RunSummary {
    /// Pretty-printed JSON report
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::other(format!("Failed to serialize summary: {}", e)))
    }
}

/// Planned program ready for emission
#[derive(Debug, Clone, Default)]
pub struct OverscanPlan {
    pub groups: AxisGroups,
    pub vertical: Vec<ToolpathMove>,
    pub horizontal: Vec<ToolpathMove>,
    pub summary: RunSummary,
}

impl OverscanPlan {
    /// All moves in emission order
    pub fn moves(&self) -> impl Iterator<Item = &ToolpathMove> {
        self.vertical.iter().chain(self.horizontal.iter())
    }
}

/// Overscan post-processor
#[derive(Debug, Clone, Default)]
pub struct OverscanProcessor {
    params: OverscanParameters,
}

impl OverscanProcessor {
    pub fn new(params: OverscanParameters) -> Self {
        if params.group_tolerance <= 0.0 {
            warn!(
                tolerance = params.group_tolerance,
                "non-positive grouping tolerance, scan lines will not be quantized"
            );
        }
        Self { params }
    }

    pub fn params(&self) -> &OverscanParameters {
        &self.params
    }

    /// Extract, group and plan a program held in memory
    pub fn plan(&self, program: &str) -> OverscanPlan {
        let extraction = extract_segments(program);
        let groups = group_segments(&extraction.segments, self.params.group_tolerance);

        let planner = ToolpathPlanner::new(self.params.overscan_distance);
        let vertical = planner.plan(&groups.vertical, ScanAxis::Vertical);
        let horizontal = planner.plan(&groups.horizontal, ScanAxis::Horizontal);

        let summary = RunSummary {
            lines_read: extraction.lines_read,
            segments_extracted: extraction.segments.len(),
            vertical_groups: groups.vertical.len(),
            horizontal_groups: groups.horizontal.len(),
            vertical_segments: groups.vertical.segment_count(),
            horizontal_segments: groups.horizontal.segment_count(),
            dropped_segments: groups.discarded,
            first_feed: extraction.first_feed,
        };

        OverscanPlan {
            groups,
            vertical,
            horizontal,
            summary,
        }
    }

    /// Write a planned program with header and laser framing
    pub fn emit<W: GcodeWriter>(&self, plan: &OverscanPlan, writer: &mut W) -> io::Result<()> {
        let power = self.params.laser_power;

        writer.write_header(self.params.cut_feed_rate)?;
        writer.write_laser_on(power)?;
        for step in plan.moves() {
            match step {
                ToolpathMove::GroupStart { .. } => {
                    if self.params.group_comments {
                        if let Some(text) = step.describe() {
                            writer.write_comment(&text)?;
                        }
                    }
                }
                ToolpathMove::Rapid(p) => writer.write_rapid_move(p.x, p.y)?,
                ToolpathMove::Cut(p) => writer.write_cut_move(p.x, p.y, power)?,
            }
        }
        writer.write_laser_off()
    }

    /// Rewrite a program held in memory
    pub fn process_str(&self, program: &str) -> (String, RunSummary) {
        let plan = self.plan(program);
        let mut emitter = GcodeEmitter::new(Vec::new());
        if let Err(e) = self.emit(&plan, &mut emitter) {
            // Vec<u8> sinks do not fail
            warn!("in-memory emission failed: {}", e);
        }
        let text = String::from_utf8_lossy(&emitter.into_inner()).into_owned();
        (text, plan.summary)
    }

    /// Rewrite `input` into `output`
    ///
    /// The input is read completely and the output is written in one call
    /// after planning.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<RunSummary> {
        let (text, summary) = self.plan_file(input)?;

        std::fs::write(output, text).map_err(|source| JobError::OutputUnwritable {
            path: output.to_path_buf(),
            source,
        })?;

        info!(
            input = %input.display(),
            output = %output.display(),
            vertical_groups = summary.vertical_groups,
            horizontal_groups = summary.horizontal_groups,
            dropped = summary.dropped_segments,
            "overscan program written"
        );
        Ok(summary)
    }

    /// Read and plan `input` without writing anything
    pub fn plan_file(&self, input: &Path) -> Result<(String, RunSummary)> {
        let bytes = std::fs::read(input).map_err(|source| JobError::InputUnreadable {
            path: input.to_path_buf(),
            source,
        })?;
        let program = String::from_utf8_lossy(&bytes);

        let (text, summary) = self.process_str(&program);
        if let Some(feed) = summary.first_feed {
            info!(feed, "source program feed rate");
        }
        Ok((text, summary))
    }
}
