//! Small configuration enums and value types.

use serde::{Deserialize, Serialize};

/// How much the output sink is allowed to show.
///
/// Ordered from least to most verbose so callers can compare with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    VeryVerbose,
    Debug,
}

impl Verbosity {
    /// Derive a verbosity from `-v` repetitions and the `--quiet` flag.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Verbosity::Quiet;
        }
        match verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            2 => Verbosity::VeryVerbose,
            _ => Verbosity::Debug,
        }
    }

    pub fn is_verbose(self) -> bool {
        self >= Verbosity::Verbose
    }
}

/// Whether terminal output carries ANSI styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorChoice {
    /// Style only when writing to a terminal and `NO_COLOR` is unset.
    #[default]
    Auto,
    Always,
    Never,
}

/// Number of source lines shown around each frame's line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Lines before the innermost frame's line.
    pub innermost_before: usize,
    /// Lines after the innermost frame's line.
    pub innermost_after: usize,
    /// Lines before each stack trace entry's line.
    pub frame_before: usize,
    /// Lines after each stack trace entry's line.
    pub frame_after: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            innermost_before: 4,
            innermost_after: 4,
            frame_before: 2,
            frame_after: 2,
        }
    }
}
