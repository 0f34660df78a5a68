#![cfg_attr(not(test), no_std)]
#![doc = r#"
# calc-rs

A small, no_std-friendly arithmetic expression calculator for Rust.

## Overview

calc-rs turns a string such as `2 * (3 + sqrt(16)) - pow(2, 10)` into a
64-bit float. The work happens in three stages:

1. the [lexer] splits the input into tokens,
2. the [engine] parses the tokens into an arena allocated AST, checking every
   function call against the [registry],
3. the [eval] module walks the tree and computes the value.

[`Calculator`] wraps the three stages. All arithmetic follows IEEE-754, so
`1/0` is `inf` and `sqrt(-1)` is NaN; errors are reserved for malformed input.

## Quick Start

```rust
use calc_rs::Calculator;

let calc = Calculator::new();
assert_eq!(calc.calculate("2 + 3 * 4").unwrap(), 14.0);
assert_eq!(calc.calculate("-(2 + 3) * 4").unwrap(), -20.0);
assert_eq!(calc.calculate("max(3, 7) - min(3, 7)").unwrap(), 4.0);
assert!(calc.calculate("1/0").unwrap().is_infinite());
```

## Parsing once, evaluating many times

```rust
use bumpalo::Bump;
use calc_rs::Calculator;

let calc = Calculator::new();
let arena = Bump::new();
let ast = calc.parse("hypot(3, 4) * 2", &arena).unwrap();
assert_eq!(ast.to_string(), "(hypot(3, 4) * 2)");
assert_eq!(calc.evaluate(ast).unwrap(), 10.0);
```

## Error Handling

```rust
use calc_rs::{calculate, CalcError, ParseError, Stage};

let err = calculate("sqrt(1, 2)").unwrap_err();
assert_eq!(err.stage(), Stage::Parse);
assert!(matches!(
    err,
    CalcError::Parse(ParseError::ArityMismatch { expected: 1, actual: 2, .. })
));
assert_eq!(
    err.to_string(),
    "parse error: function 'sqrt' expects 1 argument, found 2"
);
```

## Supported Grammar

```text
expr    := term (('+' | '-') term)*
term    := unary (('*' | '/') unary)*
unary   := '-' unary | primary
primary := NUMBER | IDENT '(' argList? ')' | '(' expr ')'
argList := expr (',' expr)*
```

| Precedence | Operators  | Associativity |
|------------|------------|---------------|
| 1          | `+` `-`    | Left          |
| 2          | `*` `/`    | Left          |
| 3          | unary `-`  | Right         |

Numbers are decimal with an optional fraction and exponent (`42`, `.5`,
`2.5e-3`). There are no variables or constants: `pi` alone is an error, a
name must always be followed by an argument list.

### Built-in Functions

| Arity | Functions |
|-------|-----------|
| 0 | `nan` |
| 1 | `abs acos acosh asin asinh atan atanh cbrt ceil cos cosh erf erfc erfcinv erfinv exp exp2 expm1 floor gamma j0 j1 log log10 log1p log2 logb round roundtoeven sin sinh sqrt tan tanh trunc y0 y1` |
| 2 | `atan2 copysign dim hypot max min mod nextafter pow remainder` |
| 3 | `fma` |

## Logging

The crate logs through [`tracing`]: failures at `debug`, stage results at
`trace`. Nothing is printed unless the application installs a subscriber.
"#]

extern crate alloc;

pub mod calculator;
pub mod engine;
pub mod error;
pub mod eval;
pub mod functions;
pub mod lexer;
pub mod registry;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use calculator::{Calculator, Limits, calculate};
pub use engine::{parse, parse_expression};
pub use error::{CalcError, EvalError, LexError, ParseError, Result, Stage};
pub use eval::eval_ast;
pub use lexer::{Token, tokenize};
pub use registry::{Function, FunctionInfo, FunctionRegistry};
pub use types::{BinaryOp, Node, TokenKind};

pub mod constants {
    /// Tolerance used by [`assert_approx_eq!`](crate::assert_approx_eq).
    pub const TEST_PRECISION: f64 = 1e-10;
}

/// Utility macro to check if two floating point values are approximately equal
/// within a specified epsilon. Supports optional format arguments like assert_eq!.
#[macro_export]
macro_rules! assert_approx_eq {
    // assert_approx_eq!(left, right)
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::constants::TEST_PRECISION)
    };
    // assert_approx_eq!(left, right, epsilon)
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let eps: f64 = $epsilon;
        $crate::assert_approx_eq!(
            left_val,
            right_val,
            eps,
            "assertion failed: `(left ≈ right)` (left: `{}`, right: `{}`, epsilon: `{}`)",
            left_val,
            right_val,
            eps
        )
    }};
    // assert_approx_eq!(left, right, epsilon, "format", args...)
    ($left:expr, $right:expr, $epsilon:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let eps: f64 = $epsilon;

        if left_val.is_nan() && right_val.is_nan() {
            // NaN == NaN for our purposes
        } else if left_val.is_infinite() || right_val.is_infinite() {
            assert_eq!(left_val, right_val, $($arg)+);
        } else {
            assert!((left_val - right_val).abs() < eps, $($arg)+);
        }
    }};
}
