//! Lexical scanner for Python 3 source text.
//!
//! Produces a flat stream of [`Token`]s carrying their text and start/end
//! positions. Whitespace and newlines are not tokens: callers recover them
//! from the gaps between token positions. Indentation is not tracked, only
//! bracket depth (needed to detect an unterminated multi-line statement).

/// A position in the source: 1-based line, 0-based byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// Lexical category of a token, before highlight classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexKind {
    /// Identifier or keyword.
    Name,
    Number,
    /// String literal including any prefix and quotes; may span lines.
    String,
    Comment,
    /// Operator or punctuation.
    Op,
    /// Backslash line continuation.
    Continuation,
    /// A character sequence the grammar does not accept (e.g. `$`, or the
    /// opening quote of a string left open at end of line).
    ErrorToken,
}

/// A token paired with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: LexKind,
    pub text: &'a str,
    pub start: Position,
    /// Exclusive end position.
    pub end: Position,
}

/// Errors that can occur while lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct LexError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl LexError {
    fn at(message: &str, pos: Position) -> Self {
        Self {
            message: message.to_string(),
            line: pos.line,
            column: pos.column,
        }
    }
}

/// Convenient alias for lexer results.
pub type LexResult<T> = Result<T, LexError>;

const STRING_PREFIXES: &[&str] = &["b", "br", "f", "fr", "r", "rb", "rf", "u"];

const OPERATORS_3: &[&str] = &["**=", "//=", ">>=", "<<=", "..."];
const OPERATORS_2: &[&str] = &[
    "**", "//", ">>", "<<", "<=", ">=", "==", "!=", "->", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "@=", ":=",
];
const OPERATORS_1: &str = "+-*/%@&|^~<>()[]{},:;.=";

/// Pull-based lexer producing tokens from a source string.
///
/// The source must already use `\n` line endings.
pub struct Lexer<'a> {
    source: &'a str,
    cursor: usize,
    line: usize,
    line_start: usize,
    /// Opening position of each unclosed bracket.
    open_brackets: Vec<Position>,
    /// Set when the last token was a line continuation.
    continued: Option<Position>,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: 0,
            line: 1,
            line_start: 0,
            open_brackets: Vec::new(),
            continued: None,
        }
    }

    /// Pull the next token, `Ok(None)` once the source is exhausted.
    pub fn next_token(&mut self) -> LexResult<Option<Token<'a>>> {
        loop {
            let Some(ch) = self.peek_char() else {
                return self.finish().map(|()| None);
            };

            let start = self.cursor;
            let start_pos = self.pos();
            let token = match ch {
                ' ' | '\t' | '\x0c' | '\n' => {
                    self.bump_char();
                    continue;
                }
                '#' => {
                    while self.peek_char().is_some_and(|c| c != '\n') {
                        self.bump_char();
                    }
                    self.make_token(LexKind::Comment, start, start_pos)
                }
                '\\' => {
                    self.bump_char();
                    if matches!(self.peek_char(), None | Some('\n')) {
                        let token = self.make_token(LexKind::Continuation, start, start_pos);
                        self.continued = Some(start_pos);
                        return Ok(Some(token));
                    }
                    self.make_token(LexKind::ErrorToken, start, start_pos)
                }
                '"' | '\'' => self.lex_string(start, start_pos)?,
                c if is_ident_start(c) => self.lex_name_or_prefixed_string(start, start_pos)?,
                c if c.is_ascii_digit() => self.lex_number(start, start_pos),
                '.' if self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) => {
                    self.lex_number(start, start_pos)
                }
                _ => self.lex_operator(start, start_pos),
            };
            self.continued = None;
            return Ok(Some(token));
        }
    }

    /// End-of-input checks for constructs that need more text.
    fn finish(&self) -> LexResult<()> {
        if let Some(pos) = self.open_brackets.last() {
            return Err(LexError::at("EOF in multi-line statement", *pos));
        }
        if let Some(pos) = self.continued {
            return Err(LexError::at("EOF in multi-line statement", pos));
        }
        Ok(())
    }

    fn lex_name_or_prefixed_string(
        &mut self,
        start: usize,
        start_pos: Position,
    ) -> LexResult<Token<'a>> {
        while self.peek_char().is_some_and(is_ident_continue) {
            self.bump_char();
        }
        let word = &self.source[start..self.cursor];
        if matches!(self.peek_char(), Some('"' | '\''))
            && STRING_PREFIXES.contains(&word.to_ascii_lowercase().as_str())
        {
            return self.lex_string(start, start_pos);
        }
        Ok(self.make_token(LexKind::Name, start, start_pos))
    }

    /// Lex a string literal whose opening quote is at the cursor. `start`
    /// points at the prefix, if any.
    fn lex_string(&mut self, start: usize, start_pos: Position) -> LexResult<Token<'a>> {
        let Some(quote) = self.peek_char() else {
            return Ok(self.make_token(LexKind::ErrorToken, start, start_pos));
        };
        let triple: String = std::iter::repeat_n(quote, 3).collect();

        if self.rest().starts_with(&triple) {
            self.bump_n(3);
            loop {
                match self.peek_char() {
                    None => return Err(LexError::at("EOF in multi-line string", start_pos)),
                    Some('\\') => {
                        self.bump_char();
                        self.bump_char();
                    }
                    Some(_) if self.rest().starts_with(&triple) => {
                        self.bump_n(3);
                        return Ok(self.make_token(LexKind::String, start, start_pos));
                    }
                    Some(_) => {
                        self.bump_char();
                    }
                }
            }
        }

        self.bump_char();
        let after_quote = (self.cursor, self.line, self.line_start);
        loop {
            match self.peek_char() {
                None | Some('\n') => break,
                Some('\\') => {
                    self.bump_char();
                    self.bump_char();
                }
                Some(c) if c == quote => {
                    self.bump_char();
                    return Ok(self.make_token(LexKind::String, start, start_pos));
                }
                Some(_) => {
                    self.bump_char();
                }
            }
        }

        // Unterminated: only the prefix and quote become an error token and
        // scanning resumes right after them.
        (self.cursor, self.line, self.line_start) = after_quote;
        Ok(self.make_token(LexKind::ErrorToken, start, start_pos))
    }

    fn lex_number(&mut self, start: usize, start_pos: Position) -> Token<'a> {
        let radix_prefix = self
            .rest()
            .get(..2)
            .map(|p| p.to_ascii_lowercase())
            .filter(|p| matches!(p.as_str(), "0x" | "0o" | "0b"));

        if radix_prefix.is_some() {
            self.bump_n(2);
            while self
                .peek_char()
                .is_some_and(|c| c.is_ascii_hexdigit() || c == '_')
            {
                self.bump_char();
            }
            return self.make_token(LexKind::Number, start, start_pos);
        }

        self.eat_digits();
        if self.peek_char() == Some('.') {
            self.bump_char();
            self.eat_digits();
        }
        if matches!(self.peek_char(), Some('e' | 'E')) {
            let signed = matches!(self.peek_nth(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_nth(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                self.bump_n(digit_at);
                self.eat_digits();
            }
        }
        if matches!(self.peek_char(), Some('j' | 'J')) {
            self.bump_char();
        }
        self.make_token(LexKind::Number, start, start_pos)
    }

    fn lex_operator(&mut self, start: usize, start_pos: Position) -> Token<'a> {
        let rest = self.rest();
        if let Some(op) = OPERATORS_3
            .iter()
            .chain(OPERATORS_2)
            .find(|op| rest.starts_with(**op))
        {
            self.bump_n(op.len());
            return self.make_token(LexKind::Op, start, start_pos);
        }

        let Some(ch) = self.bump_char() else {
            return self.make_token(LexKind::ErrorToken, start, start_pos);
        };
        if !OPERATORS_1.contains(ch) {
            return self.make_token(LexKind::ErrorToken, start, start_pos);
        }
        match ch {
            '(' | '[' | '{' => self.open_brackets.push(start_pos),
            // A stray closer is a parse error, not a lexical one.
            ')' | ']' | '}' => {
                self.open_brackets.pop();
            }
            _ => {}
        }
        self.make_token(LexKind::Op, start, start_pos)
    }

    fn eat_digits(&mut self) {
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_digit() || c == '_')
        {
            self.bump_char();
        }
    }

    fn make_token(&self, kind: LexKind, start: usize, start_pos: Position) -> Token<'a> {
        Token {
            kind,
            text: &self.source[start..self.cursor],
            start: start_pos,
            end: self.pos(),
        }
    }

    fn pos(&self) -> Position {
        Position {
            line: self.line,
            column: self.cursor - self.line_start,
        }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.cursor..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.cursor += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.line_start = self.cursor;
        }
        Some(ch)
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump_char();
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Lex a whole source string.
pub fn lex(source: &str) -> LexResult<Vec<Token<'_>>> {
    Lexer::new(source).collect()
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch.is_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch.is_alphanumeric()
}
