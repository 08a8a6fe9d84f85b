//! The active document and the selection-or-whole-document policy

use std::fmt;
use std::str::FromStr;

use crate::error::{PipelineError, PipelineResult};

/// A note's full text, as the host editor holds it
///
/// The pipeline never mutates a `Document`; insertion produces a new string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Document {
    /// Wrap the full text of a note
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Full document text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of lines, counting a trailing partial line
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// The text generation operates on: the selection if one is given, otherwise the
    /// whole document
    pub fn active_text(&self, selection: Option<LineRange>) -> PipelineResult<&str> {
        match selection {
            None => Ok(&self.text),
            Some(range) => range.slice(&self.text).ok_or(PipelineError::InvalidSelection {
                requested: range.to_string(),
                lines: self.line_count(),
            }),
        }
    }
}

/// A 1-based, inclusive range of lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    start: usize,
    end: usize,
}

impl LineRange {
    /// Create a range; `None` if `start` is zero or `end < start`
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start >= 1 && end >= start).then_some(Self { start, end })
    }

    /// First line (1-based)
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last line (1-based, inclusive)
    pub fn end(&self) -> usize {
        self.end
    }

    /// Slice the selected lines out of `text`, without the final line break
    fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        let mut offset = 0;
        let mut begin = None;

        for (index, line) in text.split_inclusive('\n').enumerate() {
            let number = index + 1;
            if number == self.start {
                begin = Some(offset);
            }
            if number == self.end {
                let body = line.trim_end_matches('\n').trim_end_matches('\r');
                return begin.map(|start| &text[start..offset + body.len()]);
            }
            offset += line.len();
        }

        None
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for LineRange {
    type Err = String;

    /// Parses `A:B` or a single line number `A`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid line number '{}'", part.trim()))
        };

        let (start, end) = match s.split_once(':') {
            Some((start, end)) => (parse(start)?, parse(end)?),
            None => {
                let line = parse(s)?;
                (line, line)
            }
        };

        LineRange::new(start, end)
            .ok_or_else(|| format!("invalid line range '{s}': lines start at 1 and end >= start"))
    }
}
