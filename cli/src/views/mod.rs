//! Terminal views for the three assessment stages
//!
//! Each view reads from and writes to a [`Console`], so the whole flow can
//! be driven by scripted input in tests.

use crate::error::CliResult;
use std::fmt::Display;
use std::io::{BufRead, Write};

pub mod dashboard;
pub mod profile;
pub mod questionnaire;

/// What the app loop should do after a view returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// Input was closed
    Quit,
}

/// Line-oriented terminal
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `label` and read one trimmed line. `None` once input is closed.
    pub fn prompt(&mut self, label: &str) -> CliResult<Option<String>> {
        write!(self.output, "{}: ", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn line(&mut self, text: impl Display) -> CliResult<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn blank(&mut self) -> CliResult<()> {
        writeln!(self.output)?;
        Ok(())
    }

    pub fn heading(&mut self, title: &str) -> CliResult<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", title)?;
        writeln!(self.output, "{}", "=".repeat(title.chars().count()))?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

/// Text gauge, e.g. `[########------------]`
pub fn gauge_bar(value: f64, remaining: f64, width: usize) -> String {
    let total = value + remaining;
    let filled = if total > 0.0 {
        ((value / total) * width as f64).round().clamp(0.0, width as f64) as usize
    } else {
        0
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}
