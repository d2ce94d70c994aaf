//! Rendering of enhanced error chains: source snippets for every frame and
//! the errors that caused them.

use super::error::TraceError;
use super::types::{ErrorChain, ErrorRecord, Frame};
use crate::highlighter::{DisplayLine, Highlighter};
use crate::output::{OutputSink, StyledLine};
use par_trace_config::{ContextConfig, Style, TraceTheme};
use std::collections::HashSet;

/// Printed between an error and the one it was raised while handling.
pub const CAUSE_CONNECTOR: &str = "occurred when handling the following error:";

pub(super) struct EnhancedRenderer<'a> {
    pub(super) theme: &'a TraceTheme,
    pub(super) highlighter: &'a Highlighter,
    pub(super) context: ContextConfig,
}

impl EnhancedRenderer<'_> {
    /// Render the raised error and then each cause in turn.
    ///
    /// Records without frames show nothing but do not end the walk. A
    /// cause index that is out of range or already visited ends it.
    pub(super) fn render_chain(
        &self,
        io: &mut dyn OutputSink,
        chain: &ErrorChain,
    ) -> Result<(), TraceError> {
        if chain.records.is_empty() {
            log::debug!("Empty error chain, nothing to render");
            return Ok(());
        }

        let mut visited = HashSet::new();
        let mut rendered_any = false;
        let mut next = Some(0);

        while let Some(index) = next {
            if !visited.insert(index) {
                log::warn!("Cause chain loops back to record {index}, stopping");
                break;
            }
            let Some(record) = chain.get(index) else {
                log::warn!(
                    "Cause index {index} is out of range ({} records), stopping",
                    chain.records.len()
                );
                break;
            };

            if record.frames.is_empty() {
                log::debug!("Record {index} ({}) has no frames", record.class_name);
            } else {
                if rendered_any {
                    io.write_blank()?;
                    io.write_blank()?;
                    io.write_line(StyledLine::plain(CAUSE_CONNECTOR))?;
                    io.write_blank()?;
                }
                self.render_record(io, record)?;
                rendered_any = true;
            }
            next = record.cause;
        }
        Ok(())
    }

    fn render_record(
        &self,
        io: &mut dyn OutputSink,
        record: &ErrorRecord,
    ) -> Result<(), TraceError> {
        let Some((innermost, outer)) = record.frames.split_last() else {
            return Ok(());
        };

        io.write_blank()?;
        io.write_line(StyledLine::styled(record.class_name.as_str(), self.theme.error))?;
        io.write_blank()?;
        io.write_line(StyledLine::styled(
            record.message.as_deref().unwrap_or(""),
            self.theme.emphasis,
        ))?;
        io.write_blank()?;

        let snippet = self.snippet(
            innermost,
            self.context.innermost_before,
            self.context.innermost_after,
        )?;
        io.write_line(self.location(innermost))?;
        write_snippet(io, snippet)?;

        if io.is_verbose() && !outer.is_empty() {
            io.write_blank()?;
            io.write_line(
                StyledLine::styled("Stack trace", self.theme.stack_header).with(":", Style::PLAIN),
            )?;

            let width = outer.len().to_string().len();
            for (i, frame) in outer.iter().rev().enumerate() {
                io.write_blank()?;
                let mut header =
                    StyledLine::styled(format!("{:>width$}", i + 1), self.theme.frame_index);
                header.push(" ", Style::PLAIN);
                header.extend(self.location(frame));
                io.write_line(header)?;

                let snippet =
                    self.snippet(frame, self.context.frame_before, self.context.frame_after)?;
                write_snippet(io, snippet)?;
            }
        }
        Ok(())
    }

    /// `at <path>:<line> in <function>`
    fn location(&self, frame: &Frame) -> StyledLine {
        StyledLine::plain("at ")
            .with(frame.path.as_str(), self.theme.path)
            .with(":", Style::PLAIN)
            .with(frame.line.to_string(), self.theme.emphasis)
            .with(" in ", Style::PLAIN)
            .with(frame.function.as_str(), self.theme.function)
    }

    fn snippet(
        &self,
        frame: &Frame,
        before: usize,
        after: usize,
    ) -> Result<Vec<DisplayLine>, TraceError> {
        self.highlighter
            .snippet_with_context(&frame.file_content, frame.line, before, after)
            .map_err(|source| TraceError::lex(&frame.path, source))
    }
}

fn write_snippet(io: &mut dyn OutputSink, snippet: Vec<DisplayLine>) -> Result<(), TraceError> {
    for display in snippet {
        io.write_line(display.line)?;
    }
    Ok(())
}
