//! Color themes for highlighted snippets and trace decorations.
//!
//! Styles are structured descriptors (a foreground [`Color`] plus emphasis
//! flags). In config files they are written in the compact markup form used
//! by the renderer's markup output, e.g. `"fg=light_blue"` or
//! `"fg=default;options=dark,italic"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named terminal foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    /// The terminal's own foreground color.
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    LightBlack,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    LightWhite,
}

impl Color {
    const ALL: [Color; 17] = [
        Color::Default,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::LightBlack,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::LightWhite,
    ];

    /// The markup name of this color (`light_blue`, `default`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Color::Default => "default",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
            Color::LightBlack => "light_black",
            Color::LightRed => "light_red",
            Color::LightGreen => "light_green",
            Color::LightYellow => "light_yellow",
            Color::LightBlue => "light_blue",
            Color::LightMagenta => "light_magenta",
            Color::LightCyan => "light_cyan",
            Color::LightWhite => "light_white",
        }
    }

    /// Look up a color by its markup name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Whether this is one of the bright (`light_*`) variants.
    pub fn is_light(self) -> bool {
        matches!(
            self,
            Color::LightBlack
                | Color::LightRed
                | Color::LightGreen
                | Color::LightYellow
                | Color::LightBlue
                | Color::LightMagenta
                | Color::LightCyan
                | Color::LightWhite
        )
    }
}

/// Failure to parse a style string such as `"fg=red;options=bold"`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StyleParseError {
    #[error("unknown color '{0}'")]
    UnknownColor(String),
    #[error("unknown style option '{0}'")]
    UnknownOption(String),
    #[error("malformed style directive '{0}'")]
    Malformed(String),
}

/// Foreground color plus emphasis flags for one styled run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Style {
    pub fg: Color,
    pub bold: bool,
    /// Faint/dimmed text (`options=dark`).
    pub dark: bool,
    pub italic: bool,
}

impl Style {
    /// Unstyled text.
    pub const PLAIN: Style = Style::fg(Color::Default);

    /// Bold text in the default color (the `<b>` tag).
    pub const BOLD: Style = Style::fg(Color::Default).bold();

    pub const fn fg(fg: Color) -> Self {
        Self {
            fg,
            bold: false,
            dark: false,
            italic: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dark(mut self) -> Self {
        self.dark = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// True when rendering this style changes nothing.
    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }

    fn options(&self) -> Vec<&'static str> {
        let mut options = Vec::new();
        if self.bold {
            options.push("bold");
        }
        if self.dark {
            options.push("dark");
        }
        if self.italic {
            options.push("italic");
        }
        options
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fg={}", self.fg.name())?;
        let options = self.options();
        if !options.is_empty() {
            write!(f, ";options={}", options.join(","))?;
        }
        Ok(())
    }
}

impl FromStr for Style {
    type Err = StyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut style = Style::PLAIN;
        for directive in s.split(';').map(str::trim).filter(|d| !d.is_empty()) {
            let (key, value) = directive
                .split_once('=')
                .ok_or_else(|| StyleParseError::Malformed(directive.to_string()))?;
            match key.trim() {
                "fg" => {
                    let value = value.trim();
                    style.fg = Color::from_name(value)
                        .ok_or_else(|| StyleParseError::UnknownColor(value.to_string()))?;
                }
                "options" => {
                    for option in value.split(',').map(str::trim) {
                        match option {
                            "bold" => style.bold = true,
                            "dark" => style.dark = true,
                            "italic" => style.italic = true,
                            other => return Err(StyleParseError::UnknownOption(other.to_string())),
                        }
                    }
                }
                _ => return Err(StyleParseError::Malformed(directive.to_string())),
            }
        }
        Ok(style)
    }
}

impl TryFrom<String> for Style {
    type Error = StyleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Style> for String {
    fn from(style: Style) -> Self {
        style.to_string()
    }
}

/// Styles for highlighted source snippets: one per token kind plus the
/// current-line marker and the line-number gutter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightTheme {
    pub default: Style,
    pub comment: Style,
    pub string: Style,
    pub number: Style,
    pub keyword: Style,
    pub builtin: Style,
    pub operator: Style,
    pub line_marker: Style,
    pub line_number: Style,
}

impl Default for HighlightTheme {
    fn default() -> Self {
        Self {
            default: Style::fg(Color::Default),
            comment: Style::fg(Color::Default).dark().italic(),
            string: Style::fg(Color::LightYellow),
            number: Style::fg(Color::Green),
            keyword: Style::fg(Color::LightBlue),
            builtin: Style::fg(Color::LightMagenta),
            operator: Style::fg(Color::Default).dark(),
            line_marker: Style::fg(Color::Red).bold(),
            line_number: Style::fg(Color::Default).dark(),
        }
    }
}

/// Styles for the trace decorations around the snippets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceTheme {
    /// Error class names and the simple-mode line.
    pub error: Style,
    /// Messages, line numbers in location lines, legacy headers.
    pub emphasis: Style,
    pub path: Style,
    pub function: Style,
    /// Ordinal in front of each stack trace entry.
    pub frame_index: Style,
    pub stack_header: Style,
    pub legacy_path: Style,
    pub legacy_line: Style,
    pub legacy_keyword: Style,
    pub legacy_builtin: Style,
    pub legacy_literal: Style,
    pub legacy_comment: Style,
}

impl Default for TraceTheme {
    fn default() -> Self {
        Self {
            error: Style::fg(Color::Red),
            emphasis: Style::BOLD,
            path: Style::fg(Color::LightCyan),
            function: Style::fg(Color::LightGreen),
            frame_index: Style::fg(Color::LightMagenta),
            stack_header: Style::fg(Color::Yellow).bold(),
            legacy_path: Style::fg(Color::Cyan),
            legacy_line: Style::fg(Color::Blue).bold(),
            legacy_keyword: Style::fg(Color::Yellow),
            legacy_builtin: Style::fg(Color::Blue),
            legacy_literal: Style::fg(Color::Magenta),
            legacy_comment: Style::fg(Color::Black).bold(),
        }
    }
}

/// The complete set of styles used when rendering a trace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub highlight: HighlightTheme,
    pub trace: TraceTheme,
}
