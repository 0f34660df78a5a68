//! Recursive descent parser.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := '-' unary | primary
//! primary := NUMBER | IDENT '(' argList? ')' | '(' expr ')'
//! argList := expr (',' expr)*
//! ```
//!
//! Binary operators fold strictly left to right. Function names and arities
//! are checked against the [`FunctionRegistry`] as soon as a call is parsed,
//! and the resolved [`Function`] is stored in the call node.

use alloc::string::{String, ToString};

use bumpalo::Bump;
use bumpalo::collections::Vec as BumpVec;

use crate::error::{CalcError, ParseError};
use crate::lexer::{Token, tokenize};
use crate::registry::{Function, FunctionRegistry};
use crate::types::{BinaryOp, Node, TokenKind};

/// Default maximum nesting of parentheses, calls and unary minus.
pub const MAX_NESTING_DEPTH: usize = 256;

struct Parser<'t, 'a, 'arena> {
    tokens: &'t [Token<'a>],
    pos: usize,
    end_position: usize,
    registry: &'t FunctionRegistry,
    arena: &'arena Bump,
    depth: usize,
    max_depth: usize,
}

impl<'t, 'a, 'arena> Parser<'t, 'a, 'arena> {
    fn new(
        tokens: &'t [Token<'a>],
        registry: &'t FunctionRegistry,
        arena: &'arena Bump,
        max_depth: usize,
    ) -> Self {
        let end_position = tokens
            .last()
            .map(|t| t.position + t.text.len())
            .unwrap_or(0);
        Self {
            tokens,
            pos: 0,
            end_position,
            registry,
            arena,
            depth: 0,
            max_depth,
        }
    }

    /// The current token. Past the end of the slice this is an end token, so
    /// a sequence missing its terminator still parses safely.
    fn peek(&self) -> Token<'a> {
        self.tokens.get(self.pos).copied().unwrap_or(Token {
            kind: TokenKind::End,
            value: None,
            text: "",
            position: self.end_position,
        })
    }

    fn next(&mut self) -> Token<'a> {
        let tok = self.peek();
        if tok.kind != TokenKind::End {
            self.pos += 1;
        }
        tok
    }

    fn unexpected(tok: Token<'_>) -> ParseError {
        ParseError::UnexpectedToken {
            found: tok.kind,
            text: tok.text.to_string(),
            position: tok.position,
        }
    }

    /// Runs `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        position: usize,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::NestingTooDeep {
                limit: self.max_depth,
                position,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn binary(&self, op: BinaryOp, left: Node<'arena>, right: Node<'arena>) -> Node<'arena> {
        Node::Binary {
            op,
            left: self.arena.alloc(left),
            right: self.arena.alloc(right),
        }
    }

    fn parse_expr(&mut self) -> Result<Node<'arena>, ParseError> {
        let position = self.peek().position;
        self.nested(position, |p| {
            let mut lhs = p.parse_term()?;
            loop {
                let op = match p.peek().kind {
                    TokenKind::Plus => BinaryOp::Add,
                    TokenKind::Minus => BinaryOp::Sub,
                    _ => break,
                };
                p.next();
                let rhs = p.parse_term()?;
                lhs = p.binary(op, lhs, rhs);
            }
            Ok(lhs)
        })
    }

    fn parse_term(&mut self) -> Result<Node<'arena>, ParseError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.next();
            let rhs = self.parse_unary()?;
            lhs = self.binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Node<'arena>, ParseError> {
        let tok = self.peek();
        if tok.kind != TokenKind::Minus {
            return self.parse_primary();
        }
        self.next();
        let operand = self.nested(tok.position, Self::parse_unary)?;
        Ok(Node::Neg(self.arena.alloc(operand)))
    }

    fn parse_primary(&mut self) -> Result<Node<'arena>, ParseError> {
        let tok = self.peek();
        match tok {
            Token {
                kind: TokenKind::Number,
                value: Some(value),
                ..
            } => {
                self.next();
                Ok(Node::Number(value))
            }
            Token {
                kind: TokenKind::Identifier,
                ..
            } => self.parse_call(),
            Token {
                kind: TokenKind::LParen,
                ..
            } => {
                self.next();
                let inner = self.parse_expr()?;
                self.expect_close(tok)?;
                Ok(inner)
            }
            _ => Err(Self::unexpected(tok)),
        }
    }

    /// Consumes the `)` matching `open`.
    fn expect_close(&mut self, open: Token<'_>) -> Result<(), ParseError> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::RParen => {
                self.next();
                Ok(())
            }
            TokenKind::End => Err(ParseError::UnmatchedParen {
                position: open.position,
            }),
            _ => Err(Self::unexpected(tok)),
        }
    }

    fn parse_call(&mut self) -> Result<Node<'arena>, ParseError> {
        let ident = self.next();
        if self.peek().kind != TokenKind::LParen {
            // no variables: an identifier is only valid as a call
            return Err(Self::unexpected(ident));
        }

        let function = self
            .registry
            .lookup(ident.text)
            .ok_or_else(|| ParseError::UnknownFunction {
                name: ident.text.to_string(),
                position: ident.position,
            })?;

        let open = self.next();
        let mut args = BumpVec::new_in(self.arena);
        if self.peek().kind == TokenKind::RParen {
            self.next();
        } else {
            loop {
                args.push(self.parse_expr()?);
                let tok = self.peek();
                match tok.kind {
                    TokenKind::Comma => {
                        self.next();
                    }
                    TokenKind::RParen => {
                        self.next();
                        break;
                    }
                    TokenKind::End => {
                        return Err(ParseError::UnmatchedParen {
                            position: open.position,
                        });
                    }
                    _ => return Err(Self::unexpected(tok)),
                }
            }
        }

        check_arity(ident, function, args.len())?;

        Ok(Node::Call {
            name: self.arena.alloc_str(ident.text),
            function,
            args: args.into_bump_slice(),
        })
    }

    fn parse(&mut self) -> Result<&'arena Node<'arena>, ParseError> {
        let root = self.parse_expr()?;

        let tok = self.peek();
        if tok.kind != TokenKind::End {
            return Err(ParseError::TrailingInput {
                position: tok.position,
            });
        }

        Ok(self.arena.alloc(root))
    }
}

fn check_arity(ident: Token<'_>, function: Function, actual: usize) -> Result<(), ParseError> {
    let expected = function.arity();
    if expected == actual {
        return Ok(());
    }
    Err(ParseError::ArityMismatch {
        name: String::from(ident.text),
        expected,
        actual,
        position: ident.position,
    })
}

/// Parses a token sequence into an AST allocated in `arena`.
///
/// `tokens` is normally the output of [`tokenize`]. Parsing stops at the
/// first error and no partial tree is returned.
pub fn parse<'arena>(
    tokens: &[Token<'_>],
    registry: &FunctionRegistry,
    arena: &'arena Bump,
) -> Result<&'arena Node<'arena>, ParseError> {
    parse_with_depth(tokens, registry, arena, MAX_NESTING_DEPTH)
}

/// Same as [`parse`] with a custom nesting limit.
pub fn parse_with_depth<'arena>(
    tokens: &[Token<'_>],
    registry: &FunctionRegistry,
    arena: &'arena Bump,
    max_depth: usize,
) -> Result<&'arena Node<'arena>, ParseError> {
    let root = Parser::new(tokens, registry, arena, max_depth).parse()?;
    tracing::trace!(tree = %root, "parsed expression");
    Ok(root)
}

/// Tokenizes and parses `input` in one step.
///
/// # Examples
///
/// ```
/// use bumpalo::Bump;
/// use calc_rs::engine::parse_expression;
/// use calc_rs::registry::FunctionRegistry;
///
/// let arena = Bump::new();
/// let registry = FunctionRegistry::standard();
/// let ast = parse_expression("1 + 2 * sqrt(9)", &registry, &arena).unwrap();
/// assert_eq!(ast.to_string(), "(1 + (2 * sqrt(9)))");
/// ```
pub fn parse_expression<'arena>(
    input: &str,
    registry: &FunctionRegistry,
    arena: &'arena Bump,
) -> Result<&'arena Node<'arena>, CalcError> {
    let tokens = tokenize(input)?;
    Ok(parse(&tokens, registry, arena)?)
}
