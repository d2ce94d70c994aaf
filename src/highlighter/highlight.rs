//! Token classification, line assembly, line numbering and snippet windows.

use super::grammar;
use super::lexer::{self, LexError, LexKind, Token};
use crate::output::StyledLine;
use par_trace_config::{HighlightTheme, Style};
use std::borrow::Cow;

/// Context lines on each side of the marked line when none are requested.
pub const DEFAULT_CONTEXT: usize = 2;

/// Highlight category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Default,
    Comment,
    String,
    Number,
    Keyword,
    Builtin,
    Operator,
}

impl TokenKind {
    /// Classify a lexical token. Keyword and builtin tables are checked
    /// before the token's lexical category.
    pub fn classify(token: &Token<'_>) -> Self {
        if grammar::is_keyword(token.text) {
            TokenKind::Keyword
        } else if grammar::is_builtin(token.text) {
            TokenKind::Builtin
        } else {
            match token.kind {
                LexKind::String => TokenKind::String,
                LexKind::Number => TokenKind::Number,
                LexKind::Comment => TokenKind::Comment,
                LexKind::Op => TokenKind::Operator,
                LexKind::Name | LexKind::Continuation | LexKind::ErrorToken => TokenKind::Default,
            }
        }
    }

    pub fn style(self, theme: &HighlightTheme) -> Style {
        match self {
            TokenKind::Default => theme.default,
            TokenKind::Comment => theme.comment,
            TokenKind::String => theme.string,
            TokenKind::Number => theme.number,
            TokenKind::Keyword => theme.keyword,
            TokenKind::Builtin => theme.builtin,
            TokenKind::Operator => theme.operator,
        }
    }
}

/// A run of same-kind text on one physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRun {
    pub kind: TokenKind,
    pub text: String,
}

/// One physical source line as a sequence of coalesced runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceLine {
    pub runs: Vec<TokenRun>,
}

impl SourceLine {
    /// The line's original text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Append text, merging it into the last run when the kind matches.
    fn push(&mut self, kind: TokenKind, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.runs.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => self.runs.push(TokenRun {
                kind,
                text: text.to_string(),
            }),
        }
    }

    /// Append inter-token text (whitespace), which joins the preceding run.
    fn push_gap(&mut self, text: &str) {
        let kind = self.runs.last().map_or(TokenKind::Default, |r| r.kind);
        self.push(kind, text);
    }
}

/// One rendered snippet line: marker column, gutter and highlighted code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    /// 1-based source line number.
    pub number: usize,
    /// True only for the line being pointed at.
    pub marked: bool,
    pub line: StyledLine,
}

fn normalize_newlines(source: &str) -> Cow<'_, str> {
    if source.contains('\r') {
        Cow::Owned(source.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(source)
    }
}

/// Split `source` into classified runs, one entry per physical line.
///
/// Blank lines yield empty entries, so the result always has as many
/// entries as the source has lines. Tokens spanning several lines are cut at
/// each newline.
pub fn tokenize(source: &str) -> Result<Vec<SourceLine>, LexError> {
    let source = normalize_newlines(source);
    let physical: Vec<&str> = source.lines().collect();
    let tokens = lexer::lex(&source)?;

    let mut lines = vec![SourceLine::default(); physical.len()];
    // Next uncovered byte column on each line.
    let mut covered = vec![0usize; physical.len()];

    for token in &tokens {
        let kind = TokenKind::classify(token);
        for (offset, piece) in token.text.split('\n').enumerate() {
            let index = token.start.line - 1 + offset;
            let Some(text) = physical.get(index) else {
                break;
            };
            let column = if offset == 0 { token.start.column } else { 0 };
            if column > covered[index] {
                lines[index].push_gap(&text[covered[index]..column]);
            }
            lines[index].push(kind, piece);
            covered[index] = column + piece.len();
        }
    }

    for (index, text) in physical.iter().enumerate() {
        if covered[index] < text.len() {
            lines[index].push_gap(&text[covered[index]..]);
        }
    }

    Ok(lines)
}

/// Prefix each line with a marker column and a right-aligned line number.
///
/// `mark_line` is 1-based; `None` leaves every line unmarked.
pub fn number_lines(
    lines: &[SourceLine],
    mark_line: Option<usize>,
    theme: &HighlightTheme,
) -> Vec<DisplayLine> {
    let width = lines.len().to_string().len();

    lines
        .iter()
        .enumerate()
        .map(|(i, source_line)| {
            let number = i + 1;
            let marked = mark_line == Some(number);

            let mut line = if marked {
                StyledLine::plain("  ")
                    .with(">", theme.line_marker)
                    .with(" ", Style::PLAIN)
            } else {
                StyledLine::plain("    ")
            };
            let number_style = if marked { Style::BOLD } else { theme.line_number };
            line.push(format!("{number:>width$}"), number_style);
            line.push("|", theme.line_number);
            line.push(" ", Style::PLAIN);
            for run in &source_line.runs {
                line.push(run.text.as_str(), run.kind.style(theme));
            }

            DisplayLine {
                number,
                marked,
                line,
            }
        })
        .collect()
}

/// Highlights source text into numbered, windowed snippets.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    theme: HighlightTheme,
}

impl Highlighter {
    pub fn new(theme: HighlightTheme) -> Self {
        Self { theme }
    }

    /// All lines of `source`, numbered, with `mark_line` marked.
    pub fn highlighted_lines(
        &self,
        source: &str,
        mark_line: Option<usize>,
    ) -> Result<Vec<DisplayLine>, LexError> {
        let lines = tokenize(source)?;
        Ok(number_lines(&lines, mark_line, &self.theme))
    }

    /// [`DEFAULT_CONTEXT`] lines on each side of `line`.
    pub fn snippet(&self, source: &str, line: usize) -> Result<Vec<DisplayLine>, LexError> {
        self.snippet_with_context(source, line, DEFAULT_CONTEXT, DEFAULT_CONTEXT)
    }

    /// The inclusive window `[max(1, line - before), line + after]` of the
    /// numbered source, with `line` marked. Past the last line the window
    /// simply ends early.
    pub fn snippet_with_context(
        &self,
        source: &str,
        line: usize,
        before: usize,
        after: usize,
    ) -> Result<Vec<DisplayLine>, LexError> {
        let numbered = self.highlighted_lines(source, Some(line))?;
        let first = line.saturating_sub(before).max(1);
        let last = line.saturating_add(after);
        log::debug!(
            "Snippet for line {line}: lines {first}..={last} of {}",
            numbered.len()
        );
        Ok(numbered
            .into_iter()
            .filter(|display| (first..=last).contains(&display.number))
            .collect())
    }
}
