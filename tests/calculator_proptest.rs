//! Property-based tests for the calculator.
//!
//! Random arithmetic trees are rendered to text, evaluated by the calculator
//! and compared against the same tree folded directly with `f64` operators.

use bumpalo::Bump;
use calc_rs::Calculator;
use proptest::prelude::*;

use test_helpers::same_value;

#[derive(Debug, Clone)]
enum Expr {
    Num(f64),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
}

impl Expr {
    fn value(&self) -> f64 {
        match self {
            Expr::Num(v) => *v,
            Expr::Neg(e) => -e.value(),
            Expr::Add(a, b) => a.value() + b.value(),
            Expr::Sub(a, b) => a.value() - b.value(),
            Expr::Mul(a, b) => a.value() * b.value(),
            Expr::Div(a, b) => a.value() / b.value(),
        }
    }

    /// Renders with explicit parentheses around every operation.
    fn render(&self) -> String {
        match self {
            Expr::Num(v) => format!("{}", v),
            Expr::Neg(e) => format!("-{}", e.render()),
            Expr::Add(a, b) => format!("({} + {})", a.render(), b.render()),
            Expr::Sub(a, b) => format!("({} - {})", a.render(), b.render()),
            Expr::Mul(a, b) => format!("({} * {})", a.render(), b.render()),
            Expr::Div(a, b) => format!("({} / {})", a.render(), b.render()),
        }
    }
}

/// Non-negative literals that print and parse back exactly
fn literal_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![
        (0u32..1000).prop_map(f64::from),
        (0.0..1000.0f64),
        Just(0.0),
    ]
}

fn expr_strategy() -> impl Strategy<Value = Expr> {
    let leaf = literal_strategy().prop_map(Expr::Num);
    leaf.prop_recursive(6, 64, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| Expr::Neg(Box::new(e))),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::Add(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::Sub(Box::new(a), Box::new(b))),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| Expr::Mul(Box::new(a), Box::new(b))),
            (inner.clone(), inner).prop_map(|(a, b)| Expr::Div(Box::new(a), Box::new(b))),
        ]
    })
}

/// A flat chain `a op b op c ...` without parentheses, evaluated with the
/// usual precedence and left associativity.
fn flat_chain_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<char>)> {
    (1usize..12).prop_flat_map(|n| {
        (
            prop::collection::vec(literal_strategy(), n + 1),
            prop::collection::vec(prop_oneof![Just('+'), Just('-'), Just('*'), Just('/')], n),
        )
    })
}

fn fold_chain(values: &[f64], ops: &[char]) -> f64 {
    // collapse * and / first, keeping terms in order
    let mut terms = vec![values[0]];
    let mut signs = vec!['+'];
    for (op, &v) in ops.iter().zip(&values[1..]) {
        match op {
            '*' => *terms.last_mut().unwrap() *= v,
            '/' => *terms.last_mut().unwrap() /= v,
            _ => {
                terms.push(v);
                signs.push(*op);
            }
        }
    }
    let mut acc = terms[0];
    for (sign, term) in signs.iter().zip(&terms).skip(1) {
        if *sign == '+' {
            acc += term;
        } else {
            acc -= term;
        }
    }
    acc
}

proptest! {
    /// Fully parenthesized trees evaluate exactly like direct f64 arithmetic
    #[test]
    fn prop_tree_matches_direct_evaluation(expr in expr_strategy()) {
        let calc = Calculator::new();
        let text = expr.render();
        let result = calc.calculate(&text).unwrap();
        let expected = expr.value();
        prop_assert!(same_value(result, expected), "{} gave {} expected {}", text, result, expected);
    }

    /// Precedence and left associativity match hand folding
    #[test]
    fn prop_flat_chain_precedence((values, ops) in flat_chain_strategy()) {
        let mut text = format!("{}", values[0]);
        for (op, v) in ops.iter().zip(&values[1..]) {
            text.push_str(&format!(" {} {}", op, v));
        }
        let result = Calculator::new().calculate(&text).unwrap();
        let expected = fold_chain(&values, &ops);
        prop_assert!(same_value(result, expected), "{} gave {} expected {}", text, result, expected);
    }

    /// Evaluating twice, or re-parsing the rendered tree, changes nothing
    #[test]
    fn prop_evaluation_is_deterministic(expr in expr_strategy()) {
        let calc = Calculator::new();
        let arena = Bump::new();
        let text = expr.render();

        let ast = calc.parse(&text, &arena).unwrap();
        let first = calc.evaluate(ast).unwrap();
        let second = calc.evaluate(ast).unwrap();
        prop_assert!(same_value(first, second));

        let reparsed = calc.parse(&ast.to_string(), &arena).unwrap();
        prop_assert!(same_value(calc.evaluate(reparsed).unwrap(), first));
    }

    /// Arbitrary input never panics, it either evaluates or reports an error
    #[test]
    fn prop_arbitrary_input_does_not_panic(input in "[ 0-9a-z+*/().,$-]{0,64}") {
        let _ = Calculator::new().calculate(&input);
    }
}
