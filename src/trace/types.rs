//! Captured error data handed to the renderer.
//!
//! These types are produced by whatever captured the error (a dump file, a
//! test fixture) and are never mutated while rendering.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One stack frame of an error record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub path: String,
    /// 1-based line being executed.
    pub line: usize,
    pub function: String,
    /// Full text of the frame's file.
    #[serde(default)]
    pub file_content: String,
}

/// One error in a cause chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub class_name: String,
    #[serde(default)]
    pub message: Option<String>,
    /// Ordered outermost first, innermost last.
    #[serde(default)]
    pub frames: Vec<Frame>,
    /// Index of the error this one was raised while handling.
    #[serde(default)]
    pub cause: Option<usize>,
}

/// Error records stored flat; index 0 is the raised error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorChain {
    pub records: Vec<ErrorRecord>,
}

impl ErrorChain {
    pub fn new(records: Vec<ErrorRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, index: usize) -> Option<&ErrorRecord> {
        self.records.get(index)
    }

    /// The raised error itself.
    pub fn head(&self) -> Option<&ErrorRecord> {
        self.records.first()
    }
}

/// A frame of the flat traceback used when enhanced introspection is not
/// available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracebackEntry {
    pub path: String,
    pub line: usize,
    pub function: String,
    /// The single source line being executed, if it could be read.
    #[serde(default)]
    pub source_line: Option<String>,
}

/// What the capturing side was able to record about the error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "introspection", rename_all = "snake_case")]
pub enum Introspection {
    /// Full frames with file contents, plus the cause chain.
    Enhanced { chain: ErrorChain },
    /// Only a flat traceback for the raised error.
    Legacy { traceback: Vec<TracebackEntry> },
}

/// A captured error ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedError {
    pub class_name: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub introspection: Introspection,
}

impl CapturedError {
    /// An error with an enhanced cause chain. Class name and message are
    /// taken from the chain's head record.
    pub fn enhanced(chain: ErrorChain) -> Self {
        let (class_name, message) = chain
            .head()
            .map(|r| (r.class_name.clone(), r.message.clone()))
            .unwrap_or_default();
        Self {
            class_name,
            message,
            introspection: Introspection::Enhanced { chain },
        }
    }

    pub fn legacy(
        class_name: impl Into<String>,
        message: Option<String>,
        traceback: Vec<TracebackEntry>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            message,
            introspection: Introspection::Legacy { traceback },
        }
    }

    /// Parse a JSON dump.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// The error's string form: its message, or nothing.
impl fmt::Display for CapturedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_deref().unwrap_or(""))
    }
}
