//! Tree evaluator
//!
//! [`resolve`] walks an [`EquationNode`] tree, looks names up in a [`Scope`]
//! and hands arithmetic to the [`operators`](crate::operators) and function
//! calls to the registered [`ResolverFunction`](crate::ResolverFunction)s.

use equate_units::UnitMap;

use crate::ast::{BinaryOperator, EquationNode, UnaryOperator};
use crate::error::{ErrorKind, ResolveError, Result};
use crate::functions::FunctionCall;
use crate::operators;
use crate::scope::Scope;
use crate::value::{Matrix, Quantity, ResultValue};

/// Evaluation options, carried by the [`Scope`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ResolveOptions {
    /// Maximum tree depth evaluated before giving up with `depthExceeded`.
    /// `None`, the default, evaluates trees of any depth.
    pub max_depth: Option<usize>,
}

/// Evaluate `tree` in `scope`.
///
/// Failures come back as a [`ResolveError`] naming the smallest sub-tree
/// responsible. A parser-error token anywhere in the tree is reported as
/// `invalidEquation` carrying the token unchanged.
///
/// # Example
///
/// ```
/// use equate_resolver::{resolve, BinaryOperator, EquationNode, ResultValue, Scope};
///
/// let tree = EquationNode::binary(
///     BinaryOperator::Plus,
///     EquationNode::number(10.0),
///     EquationNode::number(5.0),
/// );
/// assert_eq!(resolve(&tree, &Scope::new()), Ok(ResultValue::Number(15.0)));
/// ```
pub fn resolve(tree: &EquationNode, scope: &Scope) -> Result<ResultValue> {
    let result = resolve_node(tree, scope);
    if let Err(err) = &result {
        tracing::debug!(
            kind = err.name(),
            node = err.node.kind_name(),
            "equation resolve failed: {}",
            err
        );
    }
    result
}

pub(crate) fn resolve_node(node: &EquationNode, scope: &Scope) -> Result<ResultValue> {
    let scope = scope.descend(node)?;

    match node {
        EquationNode::Number { value } => Ok(ResultValue::Number(*value)),
        EquationNode::Variable { name } => scope.get_variable(name).cloned().ok_or_else(|| {
            ResolveError::new(ErrorKind::VariableUnknown { name: name.clone() }, node)
        }),
        EquationNode::Block { child } => resolve_node(child, &scope),
        EquationNode::Unary { operator, value } => match operator {
            UnaryOperator::Positive => resolve_node(value, &scope),
            UnaryOperator::Negative => Ok(resolve_node(value, &scope)?.negate()),
            UnaryOperator::PositiveNegative => {
                Err(ResolveError::new(ErrorKind::PlusminusUnhandled, node))
            }
        },
        EquationNode::Binary { operator, a, b } => {
            if *operator == BinaryOperator::PlusMinus {
                return Err(ResolveError::new(ErrorKind::PlusminusUnhandled, node));
            }
            let a = resolve_node(a, &scope)?;
            let b = resolve_node(b, &scope)?;
            operators::apply(*operator, node, a, b)
        }
        EquationNode::Comparison { operator, .. } => Err(ResolveError::new(
            ErrorKind::NoComparison {
                operator: *operator,
            },
            node,
        )),
        EquationNode::Function { name, args } => {
            let function = scope.get_function(name).ok_or_else(|| {
                ResolveError::new(ErrorKind::FunctionUnknown { name: name.clone() }, node)
            })?;
            tracing::trace!(function = %name, args = args.len(), "calling function");
            function.call(&FunctionCall { node, name, args }, &scope)
        }
        EquationNode::Matrix { values } => resolve_matrix(node, values, &scope),
        EquationNode::OperandPlaceholder
        | EquationNode::OperatorPlaceholder { .. }
        | EquationNode::OperatorUnaryPlaceholder { .. }
        | EquationNode::FunctionPlaceholder { .. } => {
            Err(ResolveError::new(ErrorKind::Placeholder, node))
        }
        EquationNode::ParserError(error) => Err(ResolveError::new(
            ErrorKind::InvalidEquation(error.clone()),
            node,
        )),
    }
}

/// Every cell must resolve to a scalar, and all cells must share one unit.
fn resolve_matrix(
    node: &EquationNode,
    values: &[Vec<EquationNode>],
    scope: &Scope,
) -> Result<ResultValue> {
    let mut unit: Option<UnitMap> = None;
    let mut cells = Vec::with_capacity(values.len());

    for row in values {
        let mut resolved_row = Vec::with_capacity(row.len());
        for cell in row {
            let (cell_units, value) = resolve_node(cell, scope)?.into_parts();
            match &unit {
                Some(expected) if !expected.same_unit(&cell_units) => {
                    return Err(ResolveError::new(
                        ErrorKind::MatrixDifferentUnits {
                            expected: expected.clone(),
                            found: cell_units,
                        },
                        cell,
                    ));
                }
                Some(_) => {}
                None => unit = Some(cell_units),
            }
            match value {
                Quantity::Number(x) => resolved_row.push(x),
                Quantity::Matrix(_) => {
                    return Err(ResolveError::new(ErrorKind::MatrixNoNesting, cell));
                }
            }
        }
        cells.push(resolved_row);
    }

    let matrix =
        Matrix::new(cells).ok_or_else(|| ResolveError::new(ErrorKind::MatrixMalformed, node))?;
    Ok(ResultValue::from_parts(
        unit.unwrap_or_default(),
        Quantity::Matrix(matrix),
    ))
}
