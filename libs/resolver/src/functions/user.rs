use std::fmt;
use std::sync::Arc;

use crate::ast::EquationNode;
use crate::error::Result;
use crate::resolve::resolve_node;
use crate::scope::Scope;
use crate::value::ResultValue;

use super::{check_args, FunctionCall, ResolverFunction};

/// A function defined by an equation: `f(x, y) = body`.
///
/// The defining scope is captured when the function is created. Each call
/// binds the arguments, resolved in the caller's scope, into a fresh copy of
/// that capture, so neither the capture nor the caller ever sees them.
#[derive(Clone)]
pub struct UserFunction {
    arg_names: Vec<Arc<str>>,
    body: EquationNode,
    captured: Scope,
}

impl UserFunction {
    pub fn new<I, S>(arg_names: I, body: EquationNode, scope: &Scope) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self {
            arg_names: arg_names.into_iter().map(Into::into).collect(),
            body,
            captured: scope.clone(),
        }
    }

    pub fn arg_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.arg_names.iter().map(|name| name.as_ref())
    }

    pub fn body(&self) -> &EquationNode {
        &self.body
    }
}

impl ResolverFunction for UserFunction {
    fn call(&self, call: &FunctionCall<'_>, scope: &Scope) -> Result<ResultValue> {
        let arity = self.arg_names.len();
        check_args(call, arity, Some(arity))?;
        tracing::debug!(function = call.name, args = arity, "calling user function");

        let mut bound = self
            .captured
            .clone()
            .with_options(*scope.options())
            .at_depth(scope.depth());
        for (name, arg) in self.arg_names.iter().zip(call.args) {
            bound.set_variable(name.clone(), resolve_node(arg, scope)?);
        }
        resolve_node(&self.body, &bound)
    }
}

impl fmt::Debug for UserFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserFunction")
            .field("arg_names", &self.arg_names)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

/// Build a [`ResolverFunction`] from argument names and a body, closing over
/// a snapshot of `scope`.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use equate_resolver::{
///     create_resolver_function, resolve, BinaryOperator, EquationNode, ResultValue, Scope,
/// };
///
/// let body = EquationNode::binary(
///     BinaryOperator::MultiplyDot,
///     EquationNode::variable("x"),
///     EquationNode::variable("x"),
/// );
/// let square = create_resolver_function(["x"], body, &Scope::new());
/// let scope = Scope::new().with_function("square", square);
///
/// let call = EquationNode::function("square", vec![EquationNode::number(7.0)]);
/// assert_eq!(resolve(&call, &scope), Ok(ResultValue::Number(49.0)));
/// ```
pub fn create_resolver_function<I, S>(
    arg_names: I,
    body: EquationNode,
    scope: &Scope,
) -> Arc<dyn ResolverFunction>
where
    I: IntoIterator<Item = S>,
    S: Into<Arc<str>>,
{
    Arc::new(UserFunction::new(arg_names, body, scope))
}
