//! Configuration system for the par-trace exception renderer.
//!
//! This crate provides configuration loading and default values for the
//! renderer. It includes:
//!
//! - Output verbosity and color choice
//! - Snippet context sizes for the innermost frame and the stack trace
//! - Style descriptors and the highlight/trace color themes

pub mod config;
pub mod error;
pub mod themes;
mod types;

// Re-export main types for convenience
pub use config::{Config, MAX_CONTEXT_LINES};
pub use error::ConfigError;
pub use themes::{Color, HighlightTheme, Style, StyleParseError, Theme, TraceTheme};
pub use types::{ColorChoice, ContextConfig, Verbosity};
