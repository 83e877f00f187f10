//! # Overscan G-Code
//!
//! The textual side of the overscan post-processor:
//!
//! - **Classifier**: recognizes moves, laser enable/disable, comments and blanks
//! - **Words**: pulls X/Y/F/S values out of a move line
//! - **Emitter**: writes rapid/cut moves and laser framing with fixed precision
//!
//! Parsing is permissive. Lines that are not understood are classified as
//! [`LineKind::Other`] and ignored downstream.

pub mod classifier;
pub mod emitter;
pub mod words;

pub use classifier::{classify_line, LineKind, MotionKind};
pub use emitter::{GcodeEmitter, GcodeWriter};
pub use words::MoveWords;
