//! Statement separator.
//!
//! Splits a buffer of free-form query text into statements. The cursor walks
//! the input one character at a time through an explicit state machine:
//! comments are dropped, quoted strings and quoted identifiers are copied
//! verbatim, and an unquoted `;` or `\G` ends the current statement.

use serde::Serialize;


/// How a statement fragment ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Delimiter {
    /// Terminated by `;`
    Horizontal,
    /// Terminated by `\G`
    Vertical,
    /// Input ended before a terminator (possibly inside a quote)
    Undefined,
}

impl Delimiter {
    /// The literal terminator text, empty for `Undefined`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Horizontal => ";",
            Delimiter::Vertical => "\\G",
            Delimiter::Undefined => "",
        }
    }
}

/// One statement cut out of the input buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// Statement text with comments removed and quoting kept as written
    #[serde(rename = "statement")]
    pub text: String,
    pub delimiter: Delimiter,
}

impl Statement {
    pub fn new(text: impl Into<String>, delimiter: Delimiter) -> Self {
        Self {
            text: text.into(),
            delimiter,
        }
    }
}

/// Split `input` into statements.
///
/// Never fails: text left open at the end of input (including an unterminated
/// quote) comes back as a final statement with [`Delimiter::Undefined`].
pub fn separate(input: &str) -> Vec<Statement> {
    let statements = Separator::new(input).run();
    tracing::debug!(count = statements.len(), "separated input into statements");
    statements
}

/// Quoted region currently being consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Quote {
    ch: char,
    triple: bool,
    /// Backslash does not escape the quote character
    raw: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    LineComment,
    BlockComment,
    Quoted(Quote),
}

struct Separator {
    input: Vec<char>,
    position: usize,
    current_char: Option<char>,
    state: State,
    buffer: String,
    statements: Vec<Statement>,
}

impl Separator {
    fn new(input: &str) -> Self {
        let chars: Vec<char> = input.chars().collect();
        let current_char = chars.first().copied();

        Self {
            input: chars,
            position: 0,
            current_char,
            state: State::Normal,
            buffer: String::new(),
            statements: Vec::new(),
        }
    }

    fn advance(&mut self) {
        self.position += 1;
        self.current_char = self.input.get(self.position).copied();
    }

    /// Peek `offset` characters past the current one
    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn peek_char(&self) -> Option<char> {
        self.peek_at(1)
    }

    /// Copy the current character into the statement buffer and move on
    fn take(&mut self) {
        if let Some(ch) = self.current_char {
            self.buffer.push(ch);
            self.advance();
        }
    }

    fn run(mut self) -> Vec<Statement> {
        while self.current_char.is_some() {
            self.step();
        }
        self.flush_remaining();
        self.statements
    }

    fn step(&mut self) {
        match self.state {
            State::Normal => self.step_normal(),
            State::LineComment => self.step_line_comment(),
            State::BlockComment => self.step_block_comment(),
            State::Quoted(quote) => self.step_quoted(quote),
        }
    }

    fn step_normal(&mut self) {
        let Some(ch) = self.current_char else {
            return;
        };

        match ch {
            '#' => {
                self.advance();
                self.state = State::LineComment;
            }
            '-' if self.peek_char() == Some('-') => {
                self.advance();
                self.advance();
                self.state = State::LineComment;
            }
            '/' if self.peek_char() == Some('*') => {
                self.advance();
                self.advance();
                self.state = State::BlockComment;
            }
            ';' => {
                self.advance();
                self.finish_statement(Delimiter::Horizontal);
            }
            '\\' if self.peek_char() == Some('G') => {
                self.advance();
                self.advance();
                self.finish_statement(Delimiter::Vertical);
            }
            '\'' | '"' => self.open_quote(0, false),
            '`' => {
                self.take();
                self.state = State::Quoted(Quote {
                    ch: '`',
                    triple: false,
                    raw: false,
                });
            }
            'r' | 'R' | 'b' | 'B' => match self.string_prefix() {
                Some((len, raw)) => self.open_quote(len, raw),
                None => self.take(),
            },
            _ => self.take(),
        }
    }

    /// Recognize `r`, `b`, `rb` and `br` (any case) directly followed by a
    /// quote. Returns the prefix length and whether the string is raw.
    fn string_prefix(&self) -> Option<(usize, bool)> {
        let is_quote = |c: Option<char>| matches!(c, Some('\'') | Some('"'));
        let first = self.current_char?;
        let second = self.peek_char();

        match first {
            'r' | 'R' => {
                if matches!(second, Some('b') | Some('B')) && is_quote(self.peek_at(2)) {
                    Some((2, true))
                } else if is_quote(second) {
                    Some((1, true))
                } else {
                    None
                }
            }
            'b' | 'B' => {
                if matches!(second, Some('r') | Some('R')) && is_quote(self.peek_at(2)) {
                    Some((2, true))
                } else if is_quote(second) {
                    Some((1, false))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Copy a `prefix_len` character prefix and the opening quote (single or
    /// triple) and enter the quoted state.
    fn open_quote(&mut self, prefix_len: usize, raw: bool) {
        for _ in 0..prefix_len {
            self.take();
        }

        let Some(ch) = self.current_char else {
            return;
        };
        let triple = self.peek_at(1) == Some(ch) && self.peek_at(2) == Some(ch);
        let width = if triple { 3 } else { 1 };
        for _ in 0..width {
            self.take();
        }

        self.state = State::Quoted(Quote { ch, triple, raw });
    }

    fn step_quoted(&mut self, quote: Quote) {
        let Some(ch) = self.current_char else {
            return;
        };

        if ch == quote.ch {
            if !quote.triple {
                self.take();
                self.state = State::Normal;
                return;
            }
            if self.peek_at(1) == Some(ch) && self.peek_at(2) == Some(ch) {
                self.take();
                self.take();
                self.take();
                self.state = State::Normal;
                return;
            }
        }

        if ch == '\\' && !quote.raw {
            // Escaped character is copied as is, whatever it is
            self.take();
            self.take();
            return;
        }

        self.take();
    }

    fn step_line_comment(&mut self) {
        if self.current_char == Some('\n') {
            self.state = State::Normal;
        }
        self.advance();
    }

    fn step_block_comment(&mut self) {
        if self.current_char == Some('*') && self.peek_char() == Some('/') {
            self.advance();
            self.advance();
            self.state = State::Normal;
            return;
        }
        self.advance();
    }

    fn finish_statement(&mut self, delimiter: Delimiter) {
        let text = self.buffer.trim().to_string();
        self.buffer.clear();
        self.statements.push(Statement::new(text, delimiter));
    }

    fn flush_remaining(&mut self) {
        let text = self.buffer.trim();
        if !text.is_empty() {
            let statement = Statement::new(text, Delimiter::Undefined);
            self.buffer.clear();
            self.statements.push(statement);
        }
    }
}
