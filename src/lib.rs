// Library exports for the renderer, the highlighter and the CLI.
//
// Rendering writes only to an `OutputSink`; diagnostics about the rendering
// itself go through the `log` facade (see `debug`).

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod highlighter;
pub mod output;
pub mod trace;

pub use highlighter::{DisplayLine, Highlighter};
pub use output::{BufferedOutput, OutputSink, StyledLine, StyledSegment, TerminalOutput};
pub use par_trace_config::{Config, Theme, Verbosity};
pub use trace::{CapturedError, ErrorChain, ErrorRecord, ExceptionTrace, Frame, TraceError};
