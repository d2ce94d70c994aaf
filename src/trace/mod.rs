//! Exception trace rendering.
//!
//! A [`CapturedError`] is rendered by [`ExceptionTrace`] either from its
//! enhanced cause chain (title, highlighted snippet of the innermost frame,
//! stack trace when verbose, then each cause) or from a flat legacy
//! traceback.

mod enhanced;
mod error;
mod legacy;
mod renderer;
mod types;


pub use enhanced::CAUSE_CONNECTOR;
pub use error::TraceError;
pub use legacy::LegacyLine;
pub use renderer::ExceptionTrace;
pub use types::{CapturedError, ErrorChain, ErrorRecord, Frame, Introspection, TracebackEntry};
