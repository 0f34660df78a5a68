use alloc::string::String;
use alloc::vec::Vec;

use crate::error::LexError;
use crate::types::TokenKind;

/// Default upper bound on the length of an expression, in bytes.
pub const MAX_EXPRESSION_LENGTH: usize = 10_000;

/// A token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Parsed value, present only for [`TokenKind::Number`].
    pub value: Option<f64>,
    /// The source text of the token. Empty for [`TokenKind::End`].
    pub text: &'a str,
    /// Byte offset of the token in the input.
    pub position: usize,
}

/// The lexer struct, which produces tokens from an input string.
#[derive(Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    finished: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            finished: false,
        }
    }

    /// Current byte offset into the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Peek at the current character.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Peek at the character after the current one.
    fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advance the position by one character.
    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    /// Advance while `pred` holds for the current character.
    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    /// Skip whitespace.
    fn skip_whitespace(&mut self) {
        self.advance_while(char::is_whitespace);
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'a> {
        Token {
            kind,
            value: None,
            text: &self.input[start..self.pos],
            position: start,
        }
    }

    /// Get the next token from the input.
    ///
    /// Returns [`TokenKind::End`] once the input is exhausted, and `None`
    /// after the end token has been handed out.
    pub fn next_token(&mut self) -> Option<Result<Token<'a>, LexError>> {
        if self.finished {
            return None;
        }
        self.skip_whitespace();
        let start = self.pos;

        let Some(c) = self.peek() else {
            self.finished = true;
            return Some(Ok(self.token(TokenKind::End, start)));
        };

        if c.is_ascii_digit() || (c == '.' && self.peek_second().is_some_and(|d| d.is_ascii_digit())) {
            return Some(self.lex_number(start));
        }

        if c.is_ascii_alphabetic() {
            self.advance_while(|nc| nc.is_ascii_alphanumeric());
            return Some(Ok(self.token(TokenKind::Identifier, start)));
        }

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            _ => {
                self.finished = true;
                return Some(Err(LexError::UnexpectedChar {
                    position: start,
                    ch: c,
                }));
            }
        };
        self.advance();
        Some(Ok(self.token(kind, start)))
    }

    /// Number (integer or float, possibly scientific notation).
    ///
    /// Digits and dots are consumed greedily so that `1.2.3` is reported as
    /// one bad literal instead of two numbers.
    fn lex_number(&mut self, start: usize) -> Result<Token<'a>, LexError> {
        self.advance_while(|nc| nc.is_ascii_digit() || nc == '.');

        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            self.advance_while(|nc| nc.is_ascii_digit());
        }

        let literal = &self.input[start..self.pos];
        match literal.parse::<f64>() {
            Ok(value) => Ok(Token {
                value: Some(value),
                ..self.token(TokenKind::Number, start)
            }),
            Err(_) => {
                self.finished = true;
                Err(LexError::InvalidNumber {
                    position: start,
                    literal: String::from(literal),
                })
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Converts `input` into a token sequence terminated by [`TokenKind::End`].
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    tokenize_with_limit(input, MAX_EXPRESSION_LENGTH)
}

/// Same as [`tokenize`] with a custom maximum input length.
pub fn tokenize_with_limit(input: &str, max_len: usize) -> Result<Vec<Token<'_>>, LexError> {
    if input.len() > max_len {
        return Err(LexError::InputTooLong {
            len: input.len(),
            max: max_len,
        });
    }
    let tokens = Lexer::new(input).collect::<Result<Vec<_>, _>>()?;
    tracing::trace!(count = tokens.len(), "tokenized expression");
    Ok(tokens)
}
