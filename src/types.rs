//! Type definitions shared by the tokenizer, parser and evaluator.
//!
//! This module contains the token kinds produced by the lexer and the arena
//! allocated Abstract Syntax Tree (AST) built by the parser.

use alloc::vec::Vec;
use core::fmt;

use crate::registry::Function;

/// Classifies the kind of token produced during lexical analysis.
///
/// Only [`TokenKind::Number`] and [`TokenKind::Identifier`] carry a payload
/// beyond their source text; every other kind is a single character.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TokenKind {
    /// A numeric literal such as `42`, `2.5` or `1e-3`.
    Number,

    /// A function name.
    Identifier,

    /// `+`
    Plus,

    /// `-`, both binary subtraction and unary negation.
    Minus,

    /// `*`
    Star,

    /// `/`
    Slash,

    /// `(`
    LParen,

    /// `)`
    RParen,

    /// `,` separating call arguments.
    Comma,

    /// End of the expression. Always the last token of a sequence.
    End,
}

impl TokenKind {
    /// Human readable description used in error messages.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Identifier => "identifier",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Comma => "','",
            TokenKind::End => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The four arithmetic operators.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BinaryOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
}

impl BinaryOp {
    /// Applies the operator with plain IEEE-754 semantics.
    ///
    /// Division by zero is not special cased: `1/0` is `+inf` and `0/0` is NaN,
    /// exactly as the floating point unit defines them.
    #[inline]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => left / right,
        }
    }

    /// The character the operator is written with.
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Abstract Syntax Tree (AST) node representing an expression.
///
/// Nodes live in a [`bumpalo::Bump`] arena. Every child is reachable through
/// exactly one parent reference and the tree has no back-references, so the
/// whole expression is released when the arena is dropped or reset.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Node<'arena> {
    /// A literal numerical value.
    ///
    /// Examples: `3.14`, `42`, `1e-3`
    Number(f64),

    /// A binary arithmetic operation.
    ///
    /// Examples: `1 + 2`, `a * b` where `a` and `b` are sub-expressions
    Binary {
        /// The operator
        op: BinaryOp,
        /// The left operand, evaluated first
        left: &'arena Node<'arena>,
        /// The right operand
        right: &'arena Node<'arena>,
    },

    /// Unary negation.
    ///
    /// Kept as its own node instead of `0 - x` so that `-0` evaluates to
    /// negative zero.
    Neg(&'arena Node<'arena>),

    /// A call to a registered function.
    ///
    /// The function is resolved while parsing, so `args.len()` always equals
    /// `function.arity()` for trees built by the parser.
    Call {
        /// The name the function was called by
        name: &'arena str,
        /// The resolved implementation
        function: Function,
        /// The argument expressions, in call order
        args: &'arena [Node<'arena>],
    },
}

impl<'arena> Node<'arena> {
    /// Depth of the tree rooted at this node. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Node::Number(_) => 1,
            Node::Binary { .. } => {
                let (leftmost, chain) = self.left_spine();
                chain
                    .iter()
                    .fold(leftmost.depth(), |depth, (_, right)| 1 + depth.max(right.depth()))
            }
            Node::Neg(operand) => 1 + operand.depth(),
            Node::Call { args, .. } => 1 + args.iter().map(Node::depth).max().unwrap_or(0),
        }
    }

    /// Splits a chain of binary nodes along their left operands.
    ///
    /// Returns the leftmost operand that is not a binary node, and the
    /// operators with their right operands in evaluation order. Long flat
    /// chains such as `1+1+...+1` are as deep as they are long, so callers
    /// loop over the chain instead of recursing down it.
    pub(crate) fn left_spine<'s>(&'s self) -> (&'s Node<'arena>, Vec<(BinaryOp, &'s Node<'arena>)>) {
        let mut chain = Vec::new();
        let mut node = self;
        while let Node::Binary { op, left, right } = node {
            chain.push((*op, *right));
            node = *left;
        }
        chain.reverse();
        (node, chain)
    }
}

/// Renders the node fully parenthesized, e.g. `((1 + 2) * 3)`.
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => write!(f, "{}", value),
            Node::Binary { .. } => {
                let (leftmost, chain) = self.left_spine();
                for _ in &chain {
                    f.write_str("(")?;
                }
                write!(f, "{}", leftmost)?;
                for (op, right) in &chain {
                    write!(f, " {} {})", op, right)?;
                }
                Ok(())
            }
            Node::Neg(operand) => write!(f, "-({})", operand),
            Node::Call { name, args, .. } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}
