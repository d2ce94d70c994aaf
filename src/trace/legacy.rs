//! Flat traceback rendering for errors captured without enhanced frames.

use super::error::TraceError;
use super::types::{CapturedError, TracebackEntry};
use crate::highlighter::grammar;
use crate::highlighter::lexer::{self, LexKind, Token};
use crate::output::{OutputSink, StyledLine};
use par_trace_config::{Style, TraceTheme};

/// Keywords that may legally end a statement.
const TERMINAL_KEYWORDS: &[&str] = &[
    "break", "continue", "False", "None", "pass", "raise", "return", "True", "yield",
];

/// A traceback source line, highlighted when it parses on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyLine {
    Highlighted(StyledLine),
    /// The line is not a complete statement by itself (it continues or
    /// opens a block, has unbalanced brackets, or spans several lines).
    Raw(String),
}

impl LegacyLine {
    /// Highlight `line` with surrounding whitespace removed.
    pub fn parse(line: &str, theme: &TraceTheme) -> Self {
        let stripped = line.trim();
        // Token columns restart on every line, so the overlay only holds for
        // a single physical line.
        if stripped.contains('\n') {
            return LegacyLine::Raw(stripped.to_string());
        }
        let Ok(tokens) = lexer::lex(stripped) else {
            return LegacyLine::Raw(stripped.to_string());
        };
        if !is_standalone_statement(&tokens) {
            return LegacyLine::Raw(stripped.to_string());
        }

        let mut out = StyledLine::blank();
        let mut offset = 0;
        for token in &tokens {
            out.push(&stripped[offset..token.start.column], Style::PLAIN);
            out.push(token.text, overlay_style(token, theme));
            offset = token.start.column + token.text.len();
        }
        out.push(&stripped[offset..], Style::PLAIN);
        LegacyLine::Highlighted(out)
    }

    pub fn is_highlighted(&self) -> bool {
        matches!(self, LegacyLine::Highlighted(_))
    }

    pub fn into_styled(self) -> StyledLine {
        match self {
            LegacyLine::Highlighted(line) => line,
            LegacyLine::Raw(text) => StyledLine::plain(text),
        }
    }
}

fn overlay_style(token: &Token<'_>, theme: &TraceTheme) -> Style {
    match token.kind {
        _ if grammar::is_keyword(token.text) => theme.legacy_keyword,
        LexKind::Name if grammar::is_builtin(token.text) => theme.legacy_builtin,
        LexKind::String | LexKind::Number => theme.legacy_literal,
        LexKind::Comment => theme.legacy_comment,
        _ => Style::PLAIN,
    }
}

/// Whether a single-line token stream forms a complete statement.
///
/// Tokens come from a successful lex, so open brackets and trailing
/// continuations have already been rejected.
fn is_standalone_statement(tokens: &[Token<'_>]) -> bool {
    let mut depth = 0usize;
    for token in tokens {
        match (token.kind, token.text) {
            (LexKind::ErrorToken, _) | (LexKind::Continuation, _) => return false,
            (LexKind::Op, "(" | "[" | "{") => depth += 1,
            (LexKind::Op, ")" | "]" | "}") => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            _ => {}
        }
    }

    let mut code = tokens.iter().filter(|t| t.kind != LexKind::Comment);
    let Some(first) = code.next() else {
        return true;
    };
    let opens_expression = matches!(first.text, "(" | "[" | "{" | "-" | "+" | "~" | "*" | "...");
    if first.kind == LexKind::Op && !opens_expression {
        return false;
    }
    let last = code.last().unwrap_or(first);

    match last.kind {
        LexKind::Op => matches!(last.text, ")" | "]" | "}" | "," | ";" | "..."),
        LexKind::Name if grammar::is_keyword(last.text) => TERMINAL_KEYWORDS.contains(&last.text),
        _ => true,
    }
}

/// Title block and, when verbose, the standard traceback listing.
pub(super) fn render(
    io: &mut dyn OutputSink,
    error: &CapturedError,
    traceback: &[TracebackEntry],
    theme: &TraceTheme,
) -> Result<(), TraceError> {
    io.write_blank()?;
    io.write_line(StyledLine::styled(error.class_name.as_str(), theme.error))?;
    io.write_blank()?;
    io.write_line(StyledLine::styled(error.to_string(), theme.emphasis))?;

    if !io.is_verbose() {
        return Ok(());
    }

    io.write_blank()?;
    io.write_line(StyledLine::styled(
        "Traceback (most recent call last):",
        theme.emphasis,
    ))?;
    for entry in traceback {
        io.write_line(
            StyledLine::plain("  File \"")
                .with(entry.path.as_str(), theme.legacy_path)
                .with("\", line ", Style::PLAIN)
                .with(entry.line.to_string(), theme.legacy_line)
                .with(", in ", Style::PLAIN)
                .with(entry.function.as_str(), theme.emphasis),
        )?;

        let Some(source) = entry.source_line.as_deref() else {
            continue;
        };
        if source.trim().is_empty() {
            continue;
        }
        let parsed = LegacyLine::parse(source, theme);
        if !parsed.is_highlighted() {
            log::debug!(
                "{}:{} is not a standalone statement, shown raw",
                entry.path,
                entry.line
            );
        }
        let mut line = StyledLine::plain("    ");
        line.extend(parsed.into_styled());
        io.write_line(line)?;
    }
    io.write_blank()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::BufferedOutput;
    use par_trace_config::{Color, Verbosity};

    fn parse(line: &str) -> LegacyLine {
        LegacyLine::parse(line, &TraceTheme::default())
    }

    #[test]
    fn test_statement_is_highlighted() {
        let theme = TraceTheme::default();
        let LegacyLine::Highlighted(line) = parse("    raise Exception('Failed')  # boom\n") else {
            panic!("expected a highlighted line");
        };
        assert_eq!(line.plain_text(), "raise Exception('Failed')  # boom");
        let styled: Vec<(&str, Style)> = line
            .segments
            .iter()
            .filter(|s| !s.style.is_plain())
            .map(|s| (s.text.as_str(), s.style))
            .collect();
        assert_eq!(
            styled,
            vec![
                ("raise", theme.legacy_keyword),
                ("Exception", theme.legacy_builtin),
                ("'Failed'", theme.legacy_literal),
                ("# boom", theme.legacy_comment),
            ]
        );
    }

    #[test]
    fn test_numbers_are_literals() {
        let LegacyLine::Highlighted(line) = parse("x = 42") else {
            panic!("expected a highlighted line");
        };
        let number = line.segments.last().unwrap();
        assert_eq!(number.text, "42");
        assert_eq!(number.style, Style::fg(Color::Magenta));
    }

    #[test]
    fn test_incomplete_lines_are_raw() {
        for line in [
            "result = compute(a,",
            "if ready:",
            "x = 1 +",
            "total = value \\",
            "b)",
            "@decorator",
            "x = y and",
            "s = 'open",
            "'''tail of a docstring",
            "abc\nx",
            "foo = 1\nbar",
        ] {
            assert_eq!(parse(line), LegacyLine::Raw(line.to_string()), "{line}");
        }
    }

    #[test]
    fn test_complete_lines_are_highlighted() {
        for line in ["return", "x = (1, 2),", "pass;", "print(*args)", "-1", "# only a comment"] {
            assert!(parse(line).is_highlighted(), "{line}");
        }
    }

    #[test]
    fn test_multi_line_source_renders_raw() {
        let traceback = vec![TracebackEntry {
            path: "m.py".to_string(),
            line: 1,
            function: "<module>".to_string(),
            source_line: Some("foo = 1\nbar\n".to_string()),
        }];
        let error = CapturedError::legacy("NameError", None, traceback.clone());
        let mut io = BufferedOutput::new(Verbosity::Verbose);
        render(&mut io, &error, &traceback, &TraceTheme::default()).unwrap();

        let lines = io.lines();
        let source = &lines[lines.len() - 2];
        assert_eq!(source.plain_text(), "    foo = 1\nbar");
        assert!(source.segments.iter().all(|s| s.style.is_plain()));
    }

    #[test]
    fn test_raw_line_renders_unstyled() {
        let styled = parse("  else:  ").into_styled();
        assert_eq!(styled.segments.len(), 1);
        assert!(styled.segments[0].style.is_plain());
        assert_eq!(styled.plain_text(), "else:");
    }
}
