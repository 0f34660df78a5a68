//! Test utilities shared by the unit tests.

#![cfg(test)]

use std::sync::Once;

use bumpalo::Bump;

use crate::engine::parse_expression;
use crate::error::CalcError;
use crate::registry::FunctionRegistry;

static INIT_LOGGING: Once = Once::new();

/// Installs a `tracing` subscriber that writes to the test output.
///
/// Filtering follows `RUST_LOG`, e.g. `RUST_LOG=calc_rs=trace cargo test`.
/// Safe to call from every test; only the first call has an effect.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Parses `input` with the standard registry and renders the tree fully
/// parenthesized.
pub fn render(input: &str) -> Result<String, CalcError> {
    let arena = Bump::new();
    let registry = FunctionRegistry::standard();
    parse_expression(input, &registry, &arena).map(|ast| ast.to_string())
}
