//! Segment extraction
//!
//! Replays a laser program line by line, tracking the tool position and laser
//! state, and records every straight cut made with the laser enabled.

use overscan_core::Segment;
use overscan_gcode::{classify_line, LineKind, MoveWords};
use tracing::trace;

/// Machine state while replaying a program
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ToolState {
    pub x: f64,
    pub y: f64,
    pub laser_on: bool,
}

/// Result of replaying a program
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Cuts in source order
    pub segments: Vec<Segment>,
    /// F value of the first move line that carried one
    pub first_feed: Option<f64>,
    /// Number of lines replayed
    pub lines_read: usize,
}

/// Line-by-line segment extractor
#[derive(Debug, Default)]
pub struct SegmentExtractor {
    state: ToolState,
    extraction: Extraction,
}

impl SegmentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tool state
    pub fn state(&self) -> ToolState {
        self.state
    }

    /// Replay one line
    pub fn process_line(&mut self, line: &str) {
        self.extraction.lines_read += 1;

        match classify_line(line) {
            LineKind::LaserOn => self.state.laser_on = true,
            LineKind::LaserOff => self.state.laser_on = false,
            LineKind::Move(motion) => {
                let words = MoveWords::parse(line);
                if self.extraction.first_feed.is_none() {
                    self.extraction.first_feed = words.f;
                }

                let nx = words.x.unwrap_or(self.state.x);
                let ny = words.y.unwrap_or(self.state.y);

                if motion.is_cut() && self.state.laser_on && words.has_coordinates() {
                    let segment =
                        Segment::new(self.state.x, self.state.y, nx, ny).with_power(words.s);
                    trace!(line = self.extraction.lines_read, ?segment, "cut segment");
                    self.extraction.segments.push(segment);
                }

                self.state.x = nx;
                self.state.y = ny;
            }
            LineKind::Comment | LineKind::Empty | LineKind::Other => {}
        }
    }

    /// Finish replay and hand over the collected segments
    pub fn finish(self) -> Extraction {
        self.extraction
    }
}

/// Replay a whole program held in memory
pub fn extract_segments(program: &str) -> Extraction {
    let mut extractor = SegmentExtractor::new();
    for line in program.lines() {
        extractor.process_line(line);
    }
    extractor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_requires_laser_on() {
        let ex = extract_segments("G1 X10 Y0\nM3\nG1 X10 Y10\nM5\nG1 X0 Y10\n");
        assert_eq!(ex.segments, vec![Segment::new(10.0, 0.0, 10.0, 10.0)]);
        assert_eq!(ex.lines_read, 5);
    }

    #[test]
    fn test_rapid_moves_advance_without_cutting() {
        let ex = extract_segments("M03 S500\nG0 X5 Y5\nG1 Y15\n");
        assert_eq!(ex.segments, vec![Segment::new(5.0, 5.0, 5.0, 15.0)]);
    }

    #[test]
    fn test_missing_axis_keeps_current_value() {
        let ex = extract_segments("M3\nG1 X3\nG1 Y4\n");
        assert_eq!(
            ex.segments,
            vec![
                Segment::new(0.0, 0.0, 3.0, 0.0),
                Segment::new(3.0, 0.0, 3.0, 4.0)
            ]
        );
    }

    #[test]
    fn test_feed_only_line_makes_no_segment() {
        let ex = extract_segments("M3\nG1 F1500\nG1 S200\nG1 X1 S300\n");
        assert_eq!(ex.segments.len(), 1);
        assert_eq!(ex.segments[0].power, Some(300.0));
        assert_eq!(ex.first_feed, Some(1500.0));
    }

    #[test]
    fn test_power_is_optional() {
        let ex = extract_segments("M3\nG01 X2 S40\nG01 X4\n");
        assert_eq!(ex.segments[0].power, Some(40.0));
        assert_eq!(ex.segments[1].power, None);
    }

    #[test]
    fn test_first_feed_wins() {
        let ex = extract_segments("G0 X1 F3000\nM3\nG1 X2 F800\n");
        assert_eq!(ex.first_feed, Some(3000.0));
    }

    #[test]
    fn test_other_lines_are_inert() {
        let ex = extract_segments("(comment)\n\nG21\nG90\nT1\nM3\nG2 X5 Y5 I1 J1\nG1 X1\n");
        assert_eq!(ex.segments, vec![Segment::new(0.0, 0.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_state_tracking() {
        let mut extractor = SegmentExtractor::new();
        extractor.process_line("G0 X4 Y2");
        extractor.process_line("M4 S100");
        let state = extractor.state();
        assert_eq!((state.x, state.y, state.laser_on), (4.0, 2.0, true));
        extractor.process_line("m05");
        assert!(!extractor.state().laser_on);
    }
}
