//! The function table expressions can call.
//!
//! A [`FunctionRegistry`] maps a name to a [`Function`], a tagged union over
//! arity. The registry is filled once by [`FunctionRegistry::standard`] and is
//! read-only afterwards, so it can be shared freely between threads.

use core::fmt;
use core::ptr::fn_addr_eq;

use heapless::FnvIndexMap;

use crate::functions;

/// Capacity of the function table. heapless index maps need a power of two.
pub const MAX_FUNCTIONS: usize = 64;

/// Largest number of arguments any [`Function`] takes.
pub const MAX_ARITY: usize = 3;

/// A callable of fixed arity.
///
/// The arity is part of the type, so the evaluator calls the function
/// directly instead of inspecting its shape at run time.
#[derive(Clone, Copy)]
pub enum Function {
    /// No arguments, e.g. `nan()`
    Nullary(fn() -> f64),
    /// One argument, e.g. `sqrt(x)`
    Unary(fn(f64) -> f64),
    /// Two arguments, e.g. `pow(x, y)`
    Binary(fn(f64, f64) -> f64),
    /// Three arguments, e.g. `fma(x, y, z)`
    Ternary(fn(f64, f64, f64) -> f64),
}

impl Function {
    /// Number of arguments the function takes.
    pub fn arity(&self) -> usize {
        match self {
            Function::Nullary(_) => 0,
            Function::Unary(_) => 1,
            Function::Binary(_) => 2,
            Function::Ternary(_) => 3,
        }
    }

    /// Calls the function with `args`.
    ///
    /// Returns `None` if `args.len()` is not the function's arity.
    #[inline]
    pub fn call(&self, args: &[f64]) -> Option<f64> {
        match (self, args) {
            (Function::Nullary(f), []) => Some(f()),
            (Function::Unary(f), &[a]) => Some(f(a)),
            (Function::Binary(f), &[a, b]) => Some(f(a, b)),
            (Function::Ternary(f), &[a, b, c]) => Some(f(a, b, c)),
            _ => None,
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Function::Nullary(a), Function::Nullary(b)) => fn_addr_eq(*a, *b),
            (Function::Unary(a), Function::Unary(b)) => fn_addr_eq(*a, *b),
            (Function::Binary(a), Function::Binary(b)) => fn_addr_eq(*a, *b),
            (Function::Ternary(a), Function::Ternary(b)) => fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function(arity = {})", self.arity())
    }
}

/// Name and arity of a registered function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: &'static str,
    pub arity: usize,
}

/// Registry of the functions available to expressions.
///
/// Names are case-sensitive. There is no public way to add or remove entries
/// once the registry is built.
#[derive(Clone)]
pub struct FunctionRegistry {
    functions: FnvIndexMap<&'static str, Function, MAX_FUNCTIONS>,
}

impl FunctionRegistry {
    /// Builds the standard function table.
    ///
    /// | Arity | Functions |
    /// |-------|-----------|
    /// | 0 | `nan` |
    /// | 1 | `abs acos acosh asin asinh atan atanh cbrt ceil cos cosh erf erfc erfcinv erfinv exp exp2 expm1 floor gamma j0 j1 log log10 log1p log2 logb round roundtoeven sin sinh sqrt tan tanh trunc y0 y1` |
    /// | 2 | `atan2 copysign dim hypot max min mod nextafter pow remainder` |
    /// | 3 | `fma` |
    pub fn standard() -> Self {
        use Function::{Binary, Nullary, Ternary, Unary};

        let table: [(&'static str, Function); 49] = [
            ("abs", Unary(functions::abs)),
            ("acos", Unary(functions::acos)),
            ("acosh", Unary(functions::acosh)),
            ("asin", Unary(functions::asin)),
            ("asinh", Unary(functions::asinh)),
            ("atan", Unary(functions::atan)),
            ("atan2", Binary(functions::atan2)),
            ("atanh", Unary(functions::atanh)),
            ("cbrt", Unary(functions::cbrt)),
            ("ceil", Unary(functions::ceil)),
            ("copysign", Binary(functions::copysign)),
            ("cos", Unary(functions::cos)),
            ("cosh", Unary(functions::cosh)),
            ("dim", Binary(functions::dim)),
            ("erf", Unary(functions::erf)),
            ("erfc", Unary(functions::erfc)),
            ("erfcinv", Unary(functions::erfcinv)),
            ("erfinv", Unary(functions::erfinv)),
            ("exp", Unary(functions::exp)),
            ("exp2", Unary(functions::exp2)),
            ("expm1", Unary(functions::expm1)),
            ("fma", Ternary(functions::fma)),
            ("floor", Unary(functions::floor)),
            ("gamma", Unary(functions::gamma)),
            ("hypot", Binary(functions::hypot)),
            ("j0", Unary(functions::j0)),
            ("j1", Unary(functions::j1)),
            ("log", Unary(functions::log)),
            ("log10", Unary(functions::log10)),
            ("log1p", Unary(functions::log1p)),
            ("log2", Unary(functions::log2)),
            ("logb", Unary(functions::logb)),
            ("max", Binary(functions::max)),
            ("min", Binary(functions::min)),
            ("mod", Binary(functions::fmod)),
            ("nan", Nullary(functions::nan)),
            ("nextafter", Binary(functions::nextafter)),
            ("pow", Binary(functions::pow)),
            ("remainder", Binary(functions::remainder)),
            ("round", Unary(functions::round)),
            ("roundtoeven", Unary(functions::roundtoeven)),
            ("sin", Unary(functions::sin)),
            ("sinh", Unary(functions::sinh)),
            ("sqrt", Unary(functions::sqrt)),
            ("tan", Unary(functions::tan)),
            ("tanh", Unary(functions::tanh)),
            ("trunc", Unary(functions::trunc)),
            ("y0", Unary(functions::y0)),
            ("y1", Unary(functions::y1)),
        ];

        Self::from_table(table)
    }

    /// Builds a registry from a fixed table.
    ///
    /// Kept crate-private: tests use it to build registries that disagree
    /// with a parsed tree.
    pub(crate) fn from_table<const N: usize>(table: [(&'static str, Function); N]) -> Self {
        const { assert!(N <= MAX_FUNCTIONS, "function table exceeds registry capacity") };

        let mut functions = FnvIndexMap::new();
        for (name, function) in table {
            // Cannot fail: N is checked against the capacity above.
            let _ = functions.insert(name, function);
        }
        Self { functions }
    }

    /// Looks up a function by name.
    pub fn lookup(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns true if no function is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Iterates over the function surface in registration order.
    pub fn iter(&self) -> impl Iterator<Item = FunctionInfo> + '_ {
        self.functions.iter().map(|(name, function)| FunctionInfo {
            name: *name,
            arity: function.arity(),
        })
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.functions.iter().map(|(name, func)| (name, func.arity())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_standard_registry_surface() {
        let registry = FunctionRegistry::standard();
        assert_eq!(registry.len(), 49);

        let arity_of = |name| registry.lookup(name).map(|f| f.arity());
        assert_eq!(arity_of("nan"), Some(0));
        assert_eq!(arity_of("sqrt"), Some(1));
        assert_eq!(arity_of("roundtoeven"), Some(1));
        assert_eq!(arity_of("atan2"), Some(2));
        assert_eq!(arity_of("mod"), Some(2));
        assert_eq!(arity_of("fma"), Some(3));
        assert_eq!(arity_of("foo"), None);
        assert_eq!(arity_of("Sqrt"), None, "names are case-sensitive");
    }

    #[test]
    fn test_registry_iter_lists_every_name_once() {
        let registry = FunctionRegistry::standard();
        let infos: Vec<FunctionInfo> = registry.iter().collect();
        assert_eq!(infos.len(), registry.len());
        assert_eq!(
            infos.first(),
            Some(&FunctionInfo {
                name: "abs",
                arity: 1
            })
        );
        for info in &infos {
            assert!(registry.contains(info.name));
        }
    }

    #[test]
    fn test_function_call_checks_arity() {
        let pow = Function::Binary(functions::pow);
        assert_eq!(pow.call(&[2.0, 10.0]), Some(1024.0));
        assert_eq!(pow.call(&[2.0]), None);
        assert_eq!(pow.call(&[]), None);

        let fma = Function::Ternary(functions::fma);
        assert_eq!(fma.call(&[2.0, 3.0, 4.0]), Some(10.0));

        let nan = Function::Nullary(functions::nan);
        assert!(nan.call(&[]).is_some_and(f64::is_nan));
        assert_eq!(nan.call(&[1.0]), None);

        let atan2 = FunctionRegistry::standard().lookup("atan2").unwrap();
        assert_approx_eq!(atan2.call(&[1.0, 1.0]).unwrap(), core::f64::consts::FRAC_PI_4);
    }

    #[test]
    fn test_function_equality() {
        let registry = FunctionRegistry::standard();
        assert_eq!(registry.lookup("sqrt"), registry.lookup("sqrt"));
        assert_ne!(registry.lookup("sqrt"), registry.lookup("cbrt"));
        assert_ne!(registry.lookup("sqrt"), registry.lookup("pow"));
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FunctionRegistry>();
    }
}
