//! Numeric built-ins.
//!
//! These only accept bare numbers. Arity is checked before the function
//! runs, so every `args[i]` below up to the declared minimum exists.

use crate::error::{Arity, ErrorKind, ResolveError, Result};
use crate::resolve::resolve_node;
use crate::scope::Scope;
use crate::value::ResultValue;

use super::{check_args, ArgumentViolation, FunctionCall, ResolverFunction};

/// Domain check run on the resolved numbers before the function is applied.
/// Receives the name the function was called by.
pub type Validator = fn(&str, &[f64]) -> std::result::Result<(), ArgumentViolation>;

/// Resolve every argument to a bare number.
///
/// The first argument that resolves to anything else (a matrix or a
/// unit-tagged value) fails with `functionNumberOnly` pointing at it.
pub(crate) fn resolve_numbers(call: &FunctionCall<'_>, scope: &Scope) -> Result<Vec<f64>> {
    call.args
        .iter()
        .map(|arg| match resolve_node(arg, scope)? {
            ResultValue::Number(x) => Ok(x),
            _ => Err(ResolveError::new(
                ErrorKind::FunctionNumberOnly {
                    name: call.name.to_string(),
                },
                arg,
            )),
        })
        .collect()
}

pub(crate) fn call_number(
    call: &FunctionCall<'_>,
    scope: &Scope,
    apply: fn(&[f64]) -> f64,
    validate: Option<Validator>,
) -> Result<ResultValue> {
    let numbers = resolve_numbers(call, scope)?;
    if let Some(validate) = validate {
        validate(call.name, &numbers).map_err(|violation| call.violation(violation))?;
    }
    Ok(ResultValue::Number(apply(&numbers)))
}

/// A host-defined numeric function: fixed arity, bare numbers in, a bare
/// number out, with an optional domain check.
#[derive(Clone, Copy)]
pub struct NumberFunction {
    arity: Arity,
    apply: fn(&[f64]) -> f64,
    validate: Option<Validator>,
}

impl NumberFunction {
    pub fn new(min_args: usize, max_args: Option<usize>, apply: fn(&[f64]) -> f64) -> Self {
        Self {
            arity: Arity {
                min: min_args,
                max: max_args,
            },
            apply,
            validate: None,
        }
    }

    pub fn with_validator(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }
}

impl ResolverFunction for NumberFunction {
    fn call(&self, call: &FunctionCall<'_>, scope: &Scope) -> Result<ResultValue> {
        check_args(call, self.arity.min, self.arity.max)?;
        call_number(call, scope, self.apply, self.validate)
    }
}

pub(super) fn sin(args: &[f64]) -> f64 {
    args[0].sin()
}

pub(super) fn cos(args: &[f64]) -> f64 {
    args[0].cos()
}

pub(super) fn tan(args: &[f64]) -> f64 {
    args[0].tan()
}

pub(super) fn asin(args: &[f64]) -> f64 {
    args[0].asin()
}

pub(super) fn acos(args: &[f64]) -> f64 {
    args[0].acos()
}

pub(super) fn atan(args: &[f64]) -> f64 {
    args[0].atan()
}

/// `atan2(y, x)`
pub(super) fn atan2(args: &[f64]) -> f64 {
    args[0].atan2(args[1])
}

pub(super) fn abs(args: &[f64]) -> f64 {
    args[0].abs()
}

pub(super) fn ceil(args: &[f64]) -> f64 {
    args[0].ceil()
}

pub(super) fn floor(args: &[f64]) -> f64 {
    args[0].floor()
}

/// `round(x, precision = 0)`: round to `precision` decimal places.
/// Halves round away from zero.
pub(super) fn round(args: &[f64]) -> f64 {
    let precision = args.get(1).copied().unwrap_or(0.0);
    let factor = 10f64.powf(precision);
    (args[0] * factor).round() / factor
}

pub(super) fn max(args: &[f64]) -> f64 {
    args.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

pub(super) fn min(args: &[f64]) -> f64 {
    args.iter().copied().fold(f64::INFINITY, f64::min)
}

pub(super) fn pow(args: &[f64]) -> f64 {
    args[0].powf(args[1])
}

pub(super) fn ln(args: &[f64]) -> f64 {
    args[0].ln()
}

/// `log(x, base = 10)`
pub(super) fn log(args: &[f64]) -> f64 {
    match args.get(1) {
        Some(base) => args[0].ln() / base.ln(),
        None => args[0].log10(),
    }
}
