//! `ExceptionTrace`, the entry point for rendering a captured error.

use super::enhanced::EnhancedRenderer;
use super::error::TraceError;
use super::legacy;
use super::types::{CapturedError, Introspection};
use crate::highlighter::Highlighter;
use crate::output::{OutputSink, StyledLine};
use par_trace_config::{ContextConfig, Theme};

/// Renders a captured error to an output sink.
///
/// The rendering strategy follows the error's introspection: enhanced
/// chains get source snippets and cause chaining, legacy tracebacks get
/// the standard traceback listing.
pub struct ExceptionTrace<'a> {
    error: &'a CapturedError,
    theme: Theme,
    context: ContextConfig,
}

impl<'a> ExceptionTrace<'a> {
    pub fn new(error: &'a CapturedError) -> Self {
        Self {
            error,
            theme: Theme::default(),
            context: ContextConfig::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    /// Render the error. In simple mode only the error's message is
    /// written, as a single line.
    pub fn render(&self, io: &mut dyn OutputSink, simple: bool) -> Result<(), TraceError> {
        if simple {
            io.write_line(StyledLine::styled(self.error.to_string(), self.theme.trace.error))?;
            return Ok(());
        }

        match &self.error.introspection {
            Introspection::Enhanced { chain } => {
                log::debug!(
                    "Rendering {} with enhanced introspection ({} records)",
                    self.error.class_name,
                    chain.records.len()
                );
                let highlighter = Highlighter::new(self.theme.highlight.clone());
                EnhancedRenderer {
                    theme: &self.theme.trace,
                    highlighter: &highlighter,
                    context: self.context,
                }
                .render_chain(io, chain)
            }
            Introspection::Legacy { traceback } => {
                log::debug!(
                    "Rendering {} with legacy traceback ({} entries)",
                    self.error.class_name,
                    traceback.len()
                );
                legacy::render(io, self.error, traceback, &self.theme.trace)
            }
        }
    }
}
