use std::sync::Arc;

use crate::ast::EquationNode;
use crate::error::{ErrorKind, Result};
use crate::operators;
use crate::resolve::resolve_node;
use crate::scope::Scope;
use crate::value::ResultValue;

use super::FunctionCall;

/// Largest bound magnitude; every integer up to 2^53 is exact in an `f64`.
const MAX_BOUND: f64 = 9_007_199_254_740_992.0;

/// `sum(variable, start, end, expression)`
///
/// Evaluates `expression` once for every integer from `start` to `end`
/// inclusive, with `variable` bound to the current integer, and adds the
/// terms with the unit-aware `+`. Reversed bounds are swapped.
pub(super) fn sum(call: &FunctionCall<'_>, scope: &Scope) -> Result<ResultValue> {
    let (variable, start, end, expression) = match call.args {
        [variable, start, end, expression] => (variable, start, end, expression),
        _ => return Err(call.arity_error(4, Some(4))),
    };

    let name: Arc<str> = match variable {
        EquationNode::Variable { name } => Arc::from(name.as_str()),
        other => {
            return Err(call.arg_error(
                0,
                ErrorKind::FunctionSum1Variable {
                    name: call.name.to_string(),
                    found: other.kind_name().to_string(),
                },
            ))
        }
    };

    let first = integer_bound(call, scope, start, 1)?;
    let last = integer_bound(call, scope, end, 2)?;
    let (first, last) = if first > last {
        (last, first)
    } else {
        (first, last)
    };
    tracing::debug!(variable = %name, first, last, "summing series");

    let mut inner = scope.clone();
    let mut terms = (first..=last).map(|i| {
        inner.set_variable(name.clone(), ResultValue::Number(i as f64));
        resolve_node(expression, &inner)
    });
    let mut total = match terms.next() {
        Some(term) => term?,
        None => ResultValue::Number(0.0),
    };
    for term in terms {
        total = operators::plus(call.node, total, term?)?;
    }
    Ok(total)
}

/// Resolve a bound, which must be an integer-valued bare number no larger
/// than 2^53 in magnitude.
fn integer_bound(
    call: &FunctionCall<'_>,
    scope: &Scope,
    node: &EquationNode,
    index: usize,
) -> Result<i64> {
    let value = resolve_node(node, scope)?;
    match value.as_number() {
        Some(x) if value.is_integer() && x.abs() <= MAX_BOUND => Ok(x as i64),
        _ => {
            let name = call.name.to_string();
            let kind = if index == 1 {
                ErrorKind::FunctionSum2Integer { name }
            } else {
                ErrorKind::FunctionSum3Integer { name }
            };
            Err(call.arg_error(index, kind))
        }
    }
}
