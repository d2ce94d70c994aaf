//! Styled output lines and the sinks that receive them.
//!
//! Renderers produce [`StyledLine`]s whose segments carry structured
//! [`Style`](par_trace_config::Style) descriptors. Turning those into ANSI
//! escapes (or markup, or plain text) is the sink's job.
//!
//! Sub-modules:
//! - [`types`]: `StyledLine`, `StyledSegment`
//! - [`sink`]: `OutputSink` trait and the in-memory `BufferedOutput`
//! - [`terminal`]: `TerminalOutput`, ANSI encoding via `console`

mod sink;
mod terminal;
mod types;

pub use sink::{BufferedOutput, OutputSink};
pub use terminal::TerminalOutput;
pub use types::{StyledLine, StyledSegment};
