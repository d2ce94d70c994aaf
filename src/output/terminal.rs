//! Terminal sink that encodes styles as ANSI escapes.
//!
//! Color detection is delegated to the [`console`] crate, which checks
//! whether stdout is a terminal and respects `NO_COLOR` / `CLICOLOR_FORCE`.

use super::sink::OutputSink;
use super::types::StyledLine;
use par_trace_config::{Color, ColorChoice, Style, Verbosity};
use std::io::{self, Write};

/// Writes styled lines to any `Write`, decorated or not.
pub struct TerminalOutput<W: Write> {
    writer: W,
    verbosity: Verbosity,
    decorated: bool,
}

impl TerminalOutput<io::Stdout> {
    /// A sink on stdout, decorated according to `choice`.
    pub fn stdout(verbosity: Verbosity, choice: ColorChoice) -> Self {
        let decorated = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => console::colors_enabled(),
        };
        log::debug!("Terminal output: verbosity={verbosity:?} decorated={decorated}");
        Self::new(io::stdout(), verbosity, decorated)
    }
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(writer: W, verbosity: Verbosity, decorated: bool) -> Self {
        Self {
            writer,
            verbosity,
            decorated,
        }
    }

    pub fn is_decorated(&self) -> bool {
        self.decorated
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn encode(&self, line: &StyledLine) -> String {
        if !self.decorated {
            return line.plain_text();
        }
        line.segments
            .iter()
            .map(|segment| {
                if segment.style.is_plain() {
                    segment.text.clone()
                } else {
                    console_style(segment.style)
                        .apply_to(&segment.text)
                        .to_string()
                }
            })
            .collect()
    }
}

impl<W: Write> OutputSink for TerminalOutput<W> {
    fn write_line(&mut self, line: StyledLine) -> io::Result<()> {
        let encoded = self.encode(&line);
        writeln!(self.writer, "{encoded}")
    }

    fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

/// Map a structured style onto a forced-on `console::Style`. Whether to
/// decorate at all was already decided by the sink.
fn console_style(style: Style) -> console::Style {
    let mut out = console::Style::new().force_styling(true);
    out = match style.fg {
        Color::Default => out,
        Color::Black | Color::LightBlack => out.black(),
        Color::Red | Color::LightRed => out.red(),
        Color::Green | Color::LightGreen => out.green(),
        Color::Yellow | Color::LightYellow => out.yellow(),
        Color::Blue | Color::LightBlue => out.blue(),
        Color::Magenta | Color::LightMagenta => out.magenta(),
        Color::Cyan | Color::LightCyan => out.cyan(),
        Color::White | Color::LightWhite => out.white(),
    };
    if style.fg.is_light() {
        out = out.bright();
    }
    if style.bold {
        out = out.bold();
    }
    if style.dark {
        out = out.dim();
    }
    if style.italic {
        out = out.italic();
    }
    out
}
