//! Line classification
//!
//! Looks only at the first non-whitespace token of a line. Command letters are
//! case-insensitive and numbers may be zero-padded (`G0`/`G00`, `M3`/`M03`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of linear move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionKind {
    /// G0: positioning move, laser does not cut
    Rapid,
    /// G1: cutting move at feed rate
    Cut,
}

impl MotionKind {
    pub fn is_cut(self) -> bool {
        self == MotionKind::Cut
    }
}

/// Category of one program line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Parenthesis or semicolon comment
    Comment,
    /// Blank or whitespace-only line
    Empty,
    /// G0/G1 linear move
    Move(MotionKind),
    /// M3/M4 laser enable
    LaserOn,
    /// M5 laser disable
    LaserOff,
    /// Anything else
    Other,
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Comment => write!(f, "comment"),
            Self::Empty => write!(f, "empty"),
            Self::Move(MotionKind::Rapid) => write!(f, "rapid"),
            Self::Move(MotionKind::Cut) => write!(f, "cut"),
            Self::LaserOn => write!(f, "laser-on"),
            Self::LaserOff => write!(f, "laser-off"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Classify a raw program line
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Empty;
    }
    if trimmed.starts_with('(') || trimmed.starts_with(';') {
        return LineKind::Comment;
    }

    match command_word(trimmed) {
        Some(('G', 0)) => LineKind::Move(MotionKind::Rapid),
        Some(('G', 1)) => LineKind::Move(MotionKind::Cut),
        Some(('M', 3)) | Some(('M', 4)) => LineKind::LaserOn,
        Some(('M', 5)) => LineKind::LaserOff,
        _ => LineKind::Other,
    }
}

/// Leading command word as (uppercase letter, integer code)
///
/// `G1.1` and `G` alone are not integer codes and yield `None`.
fn command_word(s: &str) -> Option<(char, u32)> {
    let letter = s.chars().next()?;
    if !letter.is_ascii_alphabetic() {
        return None;
    }

    let rest = &s[1..];
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || digits > 9 {
        return None;
    }
    if rest[digits..].starts_with('.') {
        return None;
    }

    let code = rest[..digits].parse::<u32>().ok()?;
    Some((letter.to_ascii_uppercase(), code))
}
