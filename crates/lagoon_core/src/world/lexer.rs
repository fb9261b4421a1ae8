//! Tokenizer for world description files.
//!
//! The format has very little lexical structure:
//!
//! - tokens are maximal runs of characters other than space and newline
//! - `{ } [ ] "` are always single-character tokens and cut any run they touch
//! - `//` starts a comment that runs to the end of the line
//!
//! Tabs and carriage returns are ordinary token characters. A run longer than
//! [`MAX_TOKEN_LEN`] bytes is truncated and the rest of the raw word (up to the
//! next space or newline) is dropped, not lexed again.

use super::parser::{ParseError, ParseResult};

/// Longest token the lexer will return, in bytes.
pub const MAX_TOKEN_LEN: usize = 128;

/// A single token and the line it started on (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is(&self, literal: &str) -> bool {
        self.text == literal
    }
}

fn is_separator(c: u8) -> bool {
    c == b' ' || c == b'\n'
}

fn is_punctuator(c: u8) -> bool {
    matches!(c, b'{' | b'}' | b'[' | b']' | b'"')
}

/// Cursor over an immutable text buffer.
pub struct Lexer<'a> {
    input: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    /// Line the cursor is currently on (1-based).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Get the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_separators();

        let mut line = self.line;
        let mut text: Vec<u8> = Vec::new();

        while let Some(c) = self.peek(0) {
            if is_separator(c) || text.len() >= MAX_TOKEN_LEN {
                break;
            }

            if c == b'/' && self.peek(1) == Some(b'/') {
                self.skip_line();
                self.skip_separators();
                if text.is_empty() {
                    line = self.line;
                    continue;
                }
                break;
            }

            if is_punctuator(c) && !text.is_empty() {
                break;
            }

            text.push(c);
            self.advance();

            if is_punctuator(c) {
                break;
            }
        }

        if text.is_empty() {
            return None;
        }

        if text.len() == MAX_TOKEN_LEN {
            let dropped = self.skip_word();
            if dropped > 0 {
                log::warn!(
                    "Token at line {} exceeds {} bytes, dropped {} trailing bytes",
                    line,
                    MAX_TOKEN_LEN,
                    dropped
                );
            }
        }

        Some(Token {
            text: String::from_utf8_lossy(&text).into_owned(),
            line,
        })
    }

    /// Get the next token, failing if the input is exhausted.
    pub fn expect_token(&mut self, expected: &str) -> ParseResult<Token> {
        self.next_token().ok_or_else(|| ParseError::UnexpectedEof {
            line: self.line,
            expected: expected.to_string(),
        })
    }

    /// Consume the next token and fail unless it equals `literal` exactly.
    pub fn check_next(&mut self, literal: &str) -> ParseResult<()> {
        let token = self.expect_token(&format!("\"{}\"", literal))?;
        if token.is(literal) {
            Ok(())
        } else {
            Err(ParseError::UnexpectedToken {
                line: token.line,
                expected: literal.to_string(),
                found: token.text,
            })
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek(0) {
            if c == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek(0), Some(c) if is_separator(c)) {
            self.advance();
        }
    }

    /// Skip through the end of the current line, newline included.
    fn skip_line(&mut self) {
        while let Some(c) = self.peek(0) {
            self.advance();
            if c == b'\n' {
                break;
            }
        }
    }

    /// Skip to the next separator, returning the number of bytes dropped.
    fn skip_word(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(0), Some(c) if !is_separator(c)) {
            self.advance();
        }
        self.pos - start
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
