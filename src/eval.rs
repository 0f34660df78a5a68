//! Tree-walking evaluator.
//!
//! Evaluation is a pure function of the tree: there are no variables and no
//! side effects, so a tree can be evaluated any number of times, from any
//! number of threads, with identical results.

use alloc::string::String;

use heapless::Vec as ArgVec;

use crate::error::EvalError;
use crate::registry::{Function, FunctionRegistry, MAX_ARITY};
use crate::types::Node;

/// Evaluates an AST node to a value.
///
/// Arithmetic follows IEEE-754 without special cases, so division by zero,
/// overflow and out of domain function arguments produce `inf` or NaN rather
/// than errors. The only errors are calls that disagree with `registry`,
/// which cannot happen for a tree parsed against the same registry.
///
/// Operands and arguments are evaluated left to right and the first error
/// aborts the evaluation.
pub fn eval_ast(node: &Node<'_>, registry: &FunctionRegistry) -> Result<f64, EvalError> {
    match node {
        Node::Number(value) => Ok(*value),
        Node::Binary { .. } => {
            // left-leaning chains are walked in a loop, so `1+1+...+1` does
            // not recurse once per operator
            let (leftmost, chain) = node.left_spine();
            let mut acc = eval_ast(leftmost, registry)?;
            for (op, right) in chain {
                let right = eval_ast(right, registry)?;
                acc = op.apply(acc, right);
            }
            Ok(acc)
        }
        Node::Neg(operand) => Ok(-eval_ast(operand, registry)?),
        Node::Call {
            name,
            function,
            args,
        } => eval_call(name, *function, args, registry),
    }
}

fn eval_call(
    name: &str,
    function: Function,
    args: &[Node<'_>],
    registry: &FunctionRegistry,
) -> Result<f64, EvalError> {
    let mut values: ArgVec<f64, MAX_ARITY> = ArgVec::new();
    for arg in args {
        let value = eval_ast(arg, registry)?;
        // Surplus arguments are dropped here and rejected below.
        let _ = values.push(value);
    }

    let Some(entry) = registry.lookup(name) else {
        return Err(EvalError::UnknownFunction {
            name: String::from(name),
        });
    };

    let mismatch = |expected| EvalError::ArityMismatch {
        name: String::from(name),
        expected,
        actual: args.len(),
    };
    if args.len() != entry.arity() {
        return Err(mismatch(entry.arity()));
    }
    function
        .call(&values)
        .ok_or_else(|| mismatch(function.arity()))
}
