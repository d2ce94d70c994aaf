//! Syntax highlighter for Python source snippets.
//!
//! Turns raw source text into numbered, styled display lines with a marker
//! on one line, optionally clipped to a window around it:
//!
//! - **Lexing**: a hand-written scanner for the Python 3 lexical grammar
//! - **Classification**: keyword > builtin > string > number > comment >
//!   operator > default, with adjacent same-kind tokens coalesced
//! - **Line assembly**: one entry per physical line, whitespace preserved
//! - **Numbering and windowing**: marker column, gutter, `[line - before, line + after]`
//!
//! Sub-modules:
//! - [`grammar`]: static keyword and builtin tables
//! - [`lexer`]: `Lexer`, `Token`, `LexError`
//! - [`highlight`]: `Highlighter`, `tokenize`, `number_lines`, `DisplayLine`

pub mod grammar;
mod highlight;
pub mod lexer;

#[cfg(test)]
mod tests;

// Re-export the public API.
pub use highlight::{
    DEFAULT_CONTEXT, DisplayLine, Highlighter, SourceLine, TokenKind, TokenRun, number_lines,
    tokenize,
};
pub use lexer::{LexError, Token};
