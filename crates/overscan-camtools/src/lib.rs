//! # Overscan CAM Tools
//!
//! Toolpath re-planning for laser programs made of straight cuts.
//!
//! ## Pipeline
//!
//! - **Extractor**: replays the program and collects laser-on cuts
//! - **Grouping**: splits cuts into vertical/horizontal scan lines by quantized position
//! - **Ordering**: sorts scan lines by position and their cuts along the scan axis
//! - **Planner**: serpentine passes with overscan lead-in and lead-out
//! - **Overscan**: runs the pipeline and emits the rewritten program

pub mod extractor;
pub mod grouping;
pub mod ordering;
pub mod overscan;
pub mod planner;

pub use extractor::{extract_segments, Extraction, SegmentExtractor, ToolState};
pub use grouping::{
    classify_orientation, group_segments, quantize, AxisGroups, Group, GroupCollection,
    Orientation, KEY_EQUALITY_TOLERANCE,
};
pub use overscan::{OverscanParameters, OverscanPlan, OverscanProcessor, RunSummary};
pub use planner::{ScanAxis, ToolpathMove, ToolpathPlanner};
