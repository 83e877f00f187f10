//! # Overscan Core
//!
//! Core types shared by the overscan workspace crates.
//! Provides the geometric primitives produced while replaying a laser program
//! and the error types used at every crate boundary.

pub mod error;
pub mod geometry;

pub use error::{ConfigError, Error, JobError, Result};
pub use geometry::{Point, Segment};
