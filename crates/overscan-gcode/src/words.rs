//! Word extraction for move lines

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Coordinate, feed and power words found on a move line
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoveWords {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub f: Option<f64>,
    pub s: Option<f64>,
}

impl MoveWords {
    /// Parse X, Y, F and S words from a line
    ///
    /// The first occurrence of each letter followed by a number wins. Letters
    /// are case-insensitive. Comment text is ignored and malformed numbers are
    /// skipped rather than reported.
    pub fn parse(line: &str) -> Self {
        let code = strip_comments(line);
        let mut words = MoveWords::default();

        for caps in word_regex().captures_iter(code) {
            let Ok(value) = caps[2].parse::<f64>() else {
                continue;
            };
            let slot = match caps[1].as_bytes()[0].to_ascii_uppercase() {
                b'X' => &mut words.x,
                b'Y' => &mut words.y,
                b'F' => &mut words.f,
                b'S' => &mut words.s,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        words
    }

    /// Whether the line moves at least one axis
    pub fn has_coordinates(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }
}

fn word_regex() -> &'static Regex {
    static WORD_REGEX: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    WORD_REGEX.get_or_init(|| {
        Regex::new(r"(?i)([XYFS])[ \t]*([-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?)")
            .expect("invalid word regex")
    })
}

/// Code portion of a line, before any `(` or `;` comment
fn strip_comments(line: &str) -> &str {
    match line.find(['(', ';']) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_all_words() {
        let words = MoveWords::parse("G1 X10.5 Y-3 F1200 S750");
        assert_eq!(words.x, Some(10.5));
        assert_eq!(words.y, Some(-3.0));
        assert_eq!(words.f, Some(1200.0));
        assert_eq!(words.s, Some(750.0));
        assert!(words.has_coordinates());
    }

    #[test]
    fn test_parse_any_order_and_case() {
        let words = MoveWords::parse("g01 s20 y.5 x+4.");
        assert_eq!(words.x, Some(4.0));
        assert_eq!(words.y, Some(0.5));
        assert_eq!(words.s, Some(20.0));
        assert_eq!(words.f, None);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let words = MoveWords::parse("G1 X1 X2 Y3 Y4");
        assert_eq!(words.x, Some(1.0));
        assert_eq!(words.y, Some(3.0));
    }

    #[test]
    fn test_packed_words() {
        let words = MoveWords::parse("G1X10Y20F300");
        assert_eq!(words.x, Some(10.0));
        assert_eq!(words.y, Some(20.0));
        assert_eq!(words.f, Some(300.0));
    }

    #[test]
    fn test_malformed_number_is_skipped() {
        let words = MoveWords::parse("G1 Xabc X7 Y");
        assert_eq!(words.x, Some(7.0));
        assert_eq!(words.y, None);
    }

    #[test]
    fn test_comment_text_is_ignored() {
        let words = MoveWords::parse("G1 X5 (set S100 Y9)");
        assert_eq!(words.x, Some(5.0));
        assert_eq!(words.y, None);
        assert_eq!(words.s, None);

        let words = MoveWords::parse("G1 F500 ; X1");
        assert!(!words.has_coordinates());
        assert_eq!(words.f, Some(500.0));
    }

    #[test]
    fn test_spaced_word() {
        let words = MoveWords::parse("G0 X 12.25\tY\t-1");
        assert_eq!(words.x, Some(12.25));
        assert_eq!(words.y, Some(-1.0));
    }

    proptest! {
        #[test]
        fn prop_formatted_coordinates_round_trip(x in -1.0e4f64..1.0e4, y in -1.0e4f64..1.0e4) {
            let line = format!("G1 X{:.4} Y{:.4}", x, y);
            let words = MoveWords::parse(&line);
            prop_assert!((words.x.unwrap_or(f64::NAN) - x).abs() < 1e-4);
            prop_assert!((words.y.unwrap_or(f64::NAN) - y).abs() < 1e-4);
        }

        #[test]
        fn prop_parse_never_panics(line in "\\PC*") {
            let _ = MoveWords::parse(&line);
        }
    }
}
