//! Function registry
//!
//! Functions are looked up by name in the [`Scope`] and called with the
//! unresolved argument trees, so each function decides how (and whether) to
//! evaluate its arguments. `sum` relies on this to bind its loop variable.
//!
//! Built-in metadata lives in a compile-time perfect hash map (phf), giving
//! allocation-free name lookups for arity and dispatch.

mod math;
mod radical;
mod sum;
mod user;

use std::fmt;
use std::sync::Arc;

use phf::phf_map;

use crate::ast::EquationNode;
use crate::error::{Arity, ErrorKind, ResolveError, Result};
use crate::resolve::resolve_node;
use crate::scope::{FunctionLookup, Scope};
use crate::value::ResultValue;

pub use math::{NumberFunction, Validator};
pub use user::{create_resolver_function, UserFunction};

/// A function invocation as seen by a [`ResolverFunction`].
#[derive(Debug, Clone, Copy)]
pub struct FunctionCall<'a> {
    /// The whole call node, used for errors not tied to one argument.
    pub node: &'a EquationNode,
    /// Name the function was called by.
    pub name: &'a str,
    /// Unresolved argument trees.
    pub args: &'a [EquationNode],
}

impl<'a> FunctionCall<'a> {
    /// Error attributed to the call node.
    pub fn error(&self, kind: ErrorKind) -> ResolveError {
        ResolveError::new(kind, self.node)
    }

    /// Error attributed to argument `index`, or to the call when that
    /// argument does not exist.
    pub fn arg_error(&self, index: usize, kind: ErrorKind) -> ResolveError {
        ResolveError::new(kind, self.args.get(index).unwrap_or(self.node))
    }

    /// Resolve every argument in order, stopping at the first failure.
    pub fn resolve_args(&self, scope: &Scope) -> Result<Vec<ResultValue>> {
        self.args.iter().map(|arg| resolve_node(arg, scope)).collect()
    }

    /// `functionArgLength` for a call outside `min..=max`.
    pub fn arity_error(&self, min: usize, max: Option<usize>) -> ResolveError {
        self.error(ErrorKind::FunctionArgLength {
            name: self.name.to_string(),
            arity: Arity { min, max },
            found: self.args.len(),
        })
    }

    pub(crate) fn violation(&self, violation: ArgumentViolation) -> ResolveError {
        self.arg_error(violation.index, violation.kind)
    }
}

/// Something callable from an equation.
///
/// Implemented for plain closures, so a host can register
/// `|call: &FunctionCall<'_>, scope: &Scope| ...` directly.
pub trait ResolverFunction: Send + Sync {
    fn call(&self, call: &FunctionCall<'_>, scope: &Scope) -> Result<ResultValue>;
}

impl<F> ResolverFunction for F
where
    F: Fn(&FunctionCall<'_>, &Scope) -> Result<ResultValue> + Send + Sync,
{
    fn call(&self, call: &FunctionCall<'_>, scope: &Scope) -> Result<ResultValue> {
        self(call, scope)
    }
}

/// Fail with `functionArgLength` unless the call has between `min` and
/// `max` arguments (`None` = unbounded).
pub fn check_args(call: &FunctionCall<'_>, min: usize, max: Option<usize>) -> Result<()> {
    let found = call.args.len();
    if found < min || max.is_some_and(|max| found > max) {
        return Err(call.arity_error(min, max));
    }
    Ok(())
}

/// A domain check failure: which argument broke the rule, and how.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentViolation {
    pub index: usize,
    pub kind: ErrorKind,
}

/// How a built-in computes its value.
#[derive(Clone, Copy)]
pub enum Implementation {
    /// Plain numeric function over bare numbers.
    Number(fn(&[f64]) -> f64),
    /// Square root, dividing unit exponents by two.
    Sqrt,
    /// `root(index, x)`, dividing unit exponents by the index.
    Root,
    /// `sum(variable, start, end, expression)`.
    Sum,
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(_) => f.write_str("Number"),
            Self::Sqrt => f.write_str("Sqrt"),
            Self::Root => f.write_str("Root"),
            Self::Sum => f.write_str("Sum"),
        }
    }
}

/// Function metadata
#[derive(Debug, Clone, Copy)]
pub struct FunctionMetadata {
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: Option<usize>, // None = unbounded
    pub implementation: Implementation,
}

impl FunctionMetadata {
    pub fn arity(&self) -> Arity {
        Arity {
            min: self.min_args,
            max: self.max_args,
        }
    }
}

static BUILTINS: phf::Map<&'static str, FunctionMetadata> = phf_map! {
    // Trigonometry
    "sin" => FunctionMetadata { name: "sin", min_args: 1, max_args: Some(1), implementation: Implementation::Number(math::sin) },
    "cos" => FunctionMetadata { name: "cos", min_args: 1, max_args: Some(1), implementation: Implementation::Number(math::cos) },
    "tan" => FunctionMetadata { name: "tan", min_args: 1, max_args: Some(1), implementation: Implementation::Number(math::tan) },
    "asin" => FunctionMetadata { name: "asin", min_args: 1, max_args: Some(1), implementation: Implementation::Number(math::asin) },
    "acos" => FunctionMetadata { name: "acos", min_args: 1, max_args: Some(1), implementation: Implementation::Number(math::acos) },
    "atan" => FunctionMetadata { name: "atan", min_args: 1, max_args: Some(1), implementation: Implementation::Number(math::atan) },
    "atan2" => FunctionMetadata { name: "atan2", min_args: 2, max_args: Some(2), implementation: Implementation::Number(math::atan2) },

    // Rounding and magnitude
    "abs" => FunctionMetadata { name: "abs", min_args: 1, max_args: Some(1), implementation: Implementation::Number(math::abs) },
    "ceil" => FunctionMetadata { name: "ceil", min_args: 1, max_args: Some(1), implementation: Implementation::Number(math::ceil) },
    "floor" => FunctionMetadata { name: "floor", min_args: 1, max_args: Some(1), implementation: Implementation::Number(math::floor) },
    "round" => FunctionMetadata { name: "round", min_args: 1, max_args: Some(2), implementation: Implementation::Number(math::round) },
    "max" => FunctionMetadata { name: "max", min_args: 1, max_args: None, implementation: Implementation::Number(math::max) },
    "min" => FunctionMetadata { name: "min", min_args: 1, max_args: None, implementation: Implementation::Number(math::min) },

    // Powers, roots and logarithms
    "pow" => FunctionMetadata { name: "pow", min_args: 2, max_args: Some(2), implementation: Implementation::Number(math::pow) },
    "sqrt" => FunctionMetadata { name: "sqrt", min_args: 1, max_args: Some(1), implementation: Implementation::Sqrt },
    "root" => FunctionMetadata { name: "root", min_args: 2, max_args: Some(2), implementation: Implementation::Root },
    "ln" => FunctionMetadata { name: "ln", min_args: 1, max_args: Some(1), implementation: Implementation::Number(math::ln) },
    "log" => FunctionMetadata { name: "log", min_args: 1, max_args: Some(2), implementation: Implementation::Number(math::log) },

    // Series
    "sum" => FunctionMetadata { name: "sum", min_args: 4, max_args: Some(4), implementation: Implementation::Sum },
};

/// Metadata of a built-in function.
pub fn builtin(name: &str) -> Option<&'static FunctionMetadata> {
    BUILTINS.get(name)
}

pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.keys().copied()
}

/// A built-in function, dispatched through its metadata.
#[derive(Debug, Clone, Copy)]
pub struct Builtin(&'static FunctionMetadata);

impl Builtin {
    pub fn metadata(&self) -> &'static FunctionMetadata {
        self.0
    }
}

impl ResolverFunction for Builtin {
    fn call(&self, call: &FunctionCall<'_>, scope: &Scope) -> Result<ResultValue> {
        let metadata = self.0;
        check_args(call, metadata.min_args, metadata.max_args)?;
        match metadata.implementation {
            Implementation::Number(apply) => math::call_number(call, scope, apply, None),
            Implementation::Sqrt => radical::sqrt(call, scope),
            Implementation::Root => radical::root(call, scope),
            Implementation::Sum => sum::sum(call, scope),
        }
    }
}

/// Every built-in, keyed by name, ready to seed a [`Scope`].
pub fn default_functions() -> FunctionLookup {
    BUILTINS
        .entries()
        .map(|(name, metadata)| {
            let function: Arc<dyn ResolverFunction> = Arc::new(Builtin(metadata));
            (Arc::from(*name), function)
        })
        .collect()
}
