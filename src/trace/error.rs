//! Error types for trace rendering.

use crate::highlighter::LexError;
use std::io;
use thiserror::Error;

/// Failures while rendering a captured error.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A frame's file could not be tokenized.
    #[error("cannot highlight {path}: {source}")]
    Lex {
        path: String,
        #[source]
        source: LexError,
    },

    /// Writing to the output sink failed.
    #[error("cannot write trace: {0}")]
    Io(#[from] io::Error),
}

impl TraceError {
    pub(super) fn lex(path: &str, source: LexError) -> Self {
        TraceError::Lex {
            path: path.to_string(),
            source,
        }
    }
}
