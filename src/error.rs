//! Error types and handling for the calc-rs crate.
//!
//! Each pipeline stage has its own error enum: [`LexError`] for the tokenizer,
//! [`ParseError`] for the parser and [`EvalError`] for the evaluator.
//! [`CalcError`] wraps them and records which stage failed. Every error
//! carries the position and/or name needed to build a readable message.

use alloc::string::String;
use core::fmt;
use core::result;

use crate::types::TokenKind;

/// Result type used throughout the crate.
pub type Result<T> = result::Result<T, CalcError>;

/// The pipeline stage an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Lexical,
    Parse,
    Evaluation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Lexical => "lexical",
            Stage::Parse => "parse",
            Stage::Evaluation => "evaluation",
        })
    }
}

/// Error during lexical analysis (tokenization).
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character that cannot start any token.
    UnexpectedChar { position: usize, ch: char },

    /// A numeric literal that does not parse as a float, such as `1.2.3`
    /// or `1e`.
    InvalidNumber { position: usize, literal: String },

    /// The expression is longer than the configured limit.
    InputTooLong { len: usize, max: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedChar { position, ch } => {
                write!(f, "unexpected character '{}' at position {}", ch, position)
            }
            LexError::InvalidNumber { position, literal } => {
                write!(f, "invalid number '{}' at position {}", literal, position)
            }
            LexError::InputTooLong { len, max } => {
                write!(f, "expression too long: {} bytes (maximum is {})", len, max)
            }
        }
    }
}

impl core::error::Error for LexError {}

/// Error during syntax analysis.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token that is not allowed here. `found` is [`TokenKind::End`] when
    /// the expression ended too early.
    UnexpectedToken {
        found: TokenKind,
        text: String,
        position: usize,
    },

    /// Input ended before the `(` at `position` was closed.
    UnmatchedParen { position: usize },

    /// A call to a name that is not in the function registry.
    UnknownFunction { name: String, position: usize },

    /// A call with the wrong number of arguments.
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
        position: usize,
    },

    /// Tokens left over after a complete expression.
    TrailingInput { position: usize },

    /// Parentheses, calls or unary minus nested deeper than the limit.
    NestingTooDeep { limit: usize, position: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                found: TokenKind::End,
                position,
                ..
            } => write!(f, "unexpected end of input at position {}", position),
            ParseError::UnexpectedToken {
                found: found @ (TokenKind::Number | TokenKind::Identifier),
                text,
                position,
            } => write!(f, "unexpected {} '{}' at position {}", found, text, position),
            ParseError::UnexpectedToken {
                found, position, ..
            } => write!(f, "unexpected {} at position {}", found, position),
            ParseError::UnmatchedParen { position } => {
                write!(f, "unmatched parenthesis opened at position {}", position)
            }
            ParseError::UnknownFunction { name, position } => {
                write!(f, "unknown function '{}' at position {}", name, position)
            }
            ParseError::ArityMismatch {
                name,
                expected,
                actual,
                ..
            } => write!(
                f,
                "function '{}' expects {} argument{}, found {}",
                name,
                expected,
                if *expected == 1 { "" } else { "s" },
                actual
            ),
            ParseError::TrailingInput { position } => {
                write!(f, "unexpected trailing input at position {}", position)
            }
            ParseError::NestingTooDeep { limit, position } => write!(
                f,
                "expression nested too deeply at position {} (maximum depth is {})",
                position, limit
            ),
        }
    }
}

impl core::error::Error for ParseError {}

/// Error during evaluation.
///
/// Trees built by the parser never produce these; they guard against a tree
/// evaluated with a registry other than the one it was parsed against.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    UnknownFunction {
        name: String,
    },
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownFunction { name } => write!(f, "unknown function '{}'", name),
            EvalError::ArityMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "invalid call to '{}': expected {} arguments, found {}",
                name, expected, actual
            ),
        }
    }
}

impl core::error::Error for EvalError {}

/// Error type for [`Calculator::calculate`](crate::Calculator::calculate).
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    Lex(LexError),
    Parse(ParseError),
    Eval(EvalError),
}

impl CalcError {
    /// The stage that failed.
    pub fn stage(&self) -> Stage {
        match self {
            CalcError::Lex(_) => Stage::Lexical,
            CalcError::Parse(_) => Stage::Parse,
            CalcError::Eval(_) => Stage::Evaluation,
        }
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Lex(err) => write!(f, "lexical error: {}", err),
            CalcError::Parse(err) => write!(f, "parse error: {}", err),
            CalcError::Eval(err) => write!(f, "evaluation error: {}", err),
        }
    }
}

impl core::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            CalcError::Lex(err) => Some(err),
            CalcError::Parse(err) => Some(err),
            CalcError::Eval(err) => Some(err),
        }
    }
}

impl From<LexError> for CalcError {
    fn from(err: LexError) -> CalcError {
        CalcError::Lex(err)
    }
}

impl From<ParseError> for CalcError {
    fn from(err: ParseError) -> CalcError {
        CalcError::Parse(err)
    }
}

impl From<EvalError> for CalcError {
    fn from(err: EvalError) -> CalcError {
        CalcError::Eval(err)
    }
}
