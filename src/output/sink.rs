//! The `OutputSink` trait and an in-memory implementation.

use super::types::StyledLine;
use par_trace_config::Verbosity;
use std::io;

/// Destination for rendered lines.
///
/// The renderer only ever appends whole lines and asks for the verbosity;
/// encoding (ANSI, markup, plain) is up to the implementation.
pub trait OutputSink {
    /// Write one line. The sink adds the line terminator.
    fn write_line(&mut self, line: StyledLine) -> io::Result<()>;

    /// The sink's verbosity level.
    fn verbosity(&self) -> Verbosity;

    /// Whether the sink is at verbose level or higher.
    fn is_verbose(&self) -> bool {
        self.verbosity().is_verbose()
    }

    /// Write an empty line.
    fn write_blank(&mut self) -> io::Result<()> {
        self.write_line(StyledLine::blank())
    }
}

/// Collects lines in memory.
///
/// Used by tests and by callers that post-process the output.
#[derive(Debug, Default)]
pub struct BufferedOutput {
    lines: Vec<StyledLine>,
    verbosity: Verbosity,
}

impl BufferedOutput {
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            lines: Vec::new(),
            verbosity,
        }
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        self.verbosity = verbosity;
    }

    /// The captured lines, in write order.
    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    /// The captured output as undecorated text, one `\n` after every line.
    pub fn fetch_output(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.plain_text() + "\n")
            .collect()
    }

    /// The captured output in markup form, one `\n` after every line.
    pub fn fetch_markup(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.to_markup() + "\n")
            .collect()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl OutputSink for BufferedOutput {
    fn write_line(&mut self, line: StyledLine) -> io::Result<()> {
        self.lines.push(line);
        Ok(())
    }

    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}
