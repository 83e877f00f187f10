//! G-code emission
//!
//! Coordinates are written with 4 decimals, the header feed with 2, the
//! laser-enable power with 3 and cut power with 4. Downstream senders parse
//! these numerically, so the precision is part of the output contract.

use std::io::{self, Write};

/// Sink for planned laser moves
pub trait GcodeWriter {
    /// Program header: units, positioning and feed mode, initial feed
    fn write_header(&mut self, feed_rate: f64) -> io::Result<()>;

    /// Enable the laser at the given power
    fn write_laser_on(&mut self, power: f64) -> io::Result<()>;

    /// Disable the laser
    fn write_laser_off(&mut self) -> io::Result<()>;

    /// Non-cutting positioning move
    fn write_rapid_move(&mut self, x: f64, y: f64) -> io::Result<()>;

    /// Cutting move at the given power
    fn write_cut_move(&mut self, x: f64, y: f64, power: f64) -> io::Result<()>;

    /// Free-form comment line
    fn write_comment(&mut self, text: &str) -> io::Result<()>;
}

/// Writes G-code text to any `io::Write`
#[derive(Debug)]
pub struct GcodeEmitter<W: Write> {
    out: W,
    lines: usize,
}

impl<W: Write> GcodeEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Number of lines written so far, blank lines included
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    /// Consume the emitter, returning the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        self.lines += 1;
        writeln!(self.out, "{}", text)
    }

    fn blank_lines(&mut self, count: usize) -> io::Result<()> {
        for _ in 0..count {
            self.line("")?;
        }
        Ok(())
    }
}

impl<W: Write> GcodeWriter for GcodeEmitter<W> {
    fn write_header(&mut self, feed_rate: f64) -> io::Result<()> {
        self.line("(Generated by overscan)")?;
        self.line("G21")?;
        self.line("G90")?;
        self.line("G94")?;
        self.line(&format!("G01 F{:.2}", feed_rate))?;
        self.blank_lines(2)
    }

    fn write_laser_on(&mut self, power: f64) -> io::Result<()> {
        self.line(&format!("M03 S{:.3}", power))?;
        self.blank_lines(2)
    }

    fn write_laser_off(&mut self) -> io::Result<()> {
        self.line("M05")?;
        self.blank_lines(2)
    }

    fn write_rapid_move(&mut self, x: f64, y: f64) -> io::Result<()> {
        self.line(&format!("G00 X{:.4} Y{:.4} S0", x, y))
    }

    fn write_cut_move(&mut self, x: f64, y: f64, power: f64) -> io::Result<()> {
        self.line(&format!("G01 X{:.4} Y{:.4} S{:.4}", x, y, power))
    }

    fn write_comment(&mut self, text: &str) -> io::Result<()> {
        // Nested parentheses would end the comment early
        let text = text.replace('(', "[").replace(')', "]");
        self.line(&format!("({})", text))
    }
}
