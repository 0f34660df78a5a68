//! High level calculator interface.
//!
//! [`Calculator`] runs the whole pipeline: tokenize, parse, evaluate. Each
//! stage is also exposed on its own so a parsed tree can be inspected or
//! evaluated more than once.

use bumpalo::Bump;

use crate::engine::{MAX_NESTING_DEPTH, parse_with_depth};
use crate::error::{CalcError, Result};
use crate::eval::eval_ast;
use crate::lexer::{MAX_EXPRESSION_LENGTH, tokenize_with_limit};
use crate::registry::{FunctionInfo, FunctionRegistry};
use crate::types::Node;

/// Resource limits applied to every expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Longest accepted expression, in bytes.
    pub max_input_len: usize,
    /// Deepest accepted nesting of parentheses, calls and unary minus.
    pub max_depth: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_len: MAX_EXPRESSION_LENGTH,
            max_depth: MAX_NESTING_DEPTH,
        }
    }
}

/// An expression calculator.
///
/// Holds the function registry and the limits. It has no mutable state, so
/// one calculator can serve many threads at once.
///
/// # Examples
///
/// ```
/// use calc_rs::Calculator;
///
/// let calc = Calculator::new();
/// assert_eq!(calc.calculate("2 + 3 * 4").unwrap(), 14.0);
/// assert_eq!(calc.calculate("sqrt(16) + 2").unwrap(), 6.0);
/// assert!(calc.calculate("2 +").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    registry: FunctionRegistry,
    limits: Limits,
}

impl Calculator {
    /// Creates a calculator with the standard functions and default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calculator with the standard functions and custom limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            registry: FunctionRegistry::standard(),
            limits,
        }
    }

    /// The limits applied to every expression.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// The functions expressions are checked against and call into.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Names and arities of every callable function.
    pub fn functions(&self) -> impl Iterator<Item = FunctionInfo> + '_ {
        self.registry.iter()
    }

    /// Tokenizes and parses `expression` into a tree allocated in `arena`.
    pub fn parse<'arena>(
        &self,
        expression: &str,
        arena: &'arena Bump,
    ) -> Result<&'arena Node<'arena>> {
        let tokens = tokenize_with_limit(expression, self.limits.max_input_len)
            .inspect_err(|err| tracing::debug!(error = %err, "tokenization failed"))?;
        let ast = parse_with_depth(&tokens, &self.registry, arena, self.limits.max_depth)
            .inspect_err(|err| tracing::debug!(error = %err, "parsing failed"))?;
        Ok(ast)
    }

    /// Evaluates a tree produced by [`Calculator::parse`].
    pub fn evaluate(&self, node: &Node<'_>) -> Result<f64> {
        eval_ast(node, &self.registry)
            .inspect_err(|err| tracing::debug!(error = %err, "evaluation failed"))
            .map_err(CalcError::from)
    }

    /// Like [`Calculator::calculate`], with the tree allocated in a caller
    /// provided arena. Reusing one arena (and resetting it between batches)
    /// avoids an allocation per expression.
    pub fn calculate_in(&self, expression: &str, arena: &Bump) -> Result<f64> {
        let ast = self.parse(expression, arena)?;
        let value = self.evaluate(ast)?;
        tracing::trace!(expression, value, "calculated");
        Ok(value)
    }

    /// Parses and evaluates `expression`.
    ///
    /// Returns the first error encountered; a lexical error is reported in
    /// preference to anything the parser would have found later.
    pub fn calculate(&self, expression: &str) -> Result<f64> {
        let arena = Bump::new();
        self.calculate_in(expression, &arena)
    }
}

/// Evaluates `expression` with a default [`Calculator`].
///
/// # Examples
///
/// ```
/// assert_eq!(calc_rs::calculate("pow(2, 10)").unwrap(), 1024.0);
/// ```
pub fn calculate(expression: &str) -> Result<f64> {
    Calculator::new().calculate(expression)
}
