#![allow(dead_code)]

use equate_resolver::{
    resolve, BinaryOperator, EquationNode, Matrix, ResolveError, ResultValue, Scope, UnitMap,
};

pub fn num(value: f64) -> EquationNode {
    EquationNode::number(value)
}

pub fn var(name: &str) -> EquationNode {
    EquationNode::variable(name)
}

pub fn neg(value: EquationNode) -> EquationNode {
    EquationNode::negative(value)
}

pub fn block(child: EquationNode) -> EquationNode {
    EquationNode::block(child)
}

pub fn plus(a: EquationNode, b: EquationNode) -> EquationNode {
    EquationNode::binary(BinaryOperator::Plus, a, b)
}

pub fn minus(a: EquationNode, b: EquationNode) -> EquationNode {
    EquationNode::binary(BinaryOperator::Minus, a, b)
}

/// Juxtaposition: `2a`
pub fn implicit(a: EquationNode, b: EquationNode) -> EquationNode {
    EquationNode::binary(BinaryOperator::MultiplyImplicit, a, b)
}

pub fn dot(a: EquationNode, b: EquationNode) -> EquationNode {
    EquationNode::binary(BinaryOperator::MultiplyDot, a, b)
}

pub fn cross(a: EquationNode, b: EquationNode) -> EquationNode {
    EquationNode::binary(BinaryOperator::MultiplyCross, a, b)
}

pub fn divide(a: EquationNode, b: EquationNode) -> EquationNode {
    EquationNode::binary(BinaryOperator::DivideFraction, a, b)
}

pub fn power(a: EquationNode, b: EquationNode) -> EquationNode {
    EquationNode::binary(BinaryOperator::Power, a, b)
}

pub fn call(name: &str, args: Vec<EquationNode>) -> EquationNode {
    EquationNode::function(name, args)
}

/// Matrix literal of number nodes.
pub fn matrix_node(rows: &[&[f64]]) -> EquationNode {
    EquationNode::matrix(
        rows.iter()
            .map(|row| row.iter().map(|&cell| num(cell)).collect())
            .collect(),
    )
}

/// Matrix literal of zeros with the given shape.
pub fn zeros_node(rows: usize, cols: usize) -> EquationNode {
    EquationNode::matrix(vec![vec![num(0.0); cols]; rows])
}

pub fn matrix(rows: &[&[f64]]) -> ResultValue {
    ResultValue::Matrix(
        Matrix::new(rows.iter().map(|row| row.to_vec()).collect()).expect("rectangular matrix"),
    )
}

pub fn vector(cells: &[f64]) -> ResultValue {
    ResultValue::Matrix(Matrix::column(cells.to_vec()).expect("non-empty vector"))
}

pub fn units(text: &str) -> UnitMap {
    text.parse().expect("valid unit notation")
}

/// Tag a bare number or matrix value with parsed units.
pub fn with_units(value: impl Into<ResultValue>, text: &str) -> ResultValue {
    let (existing, quantity) = value.into().into_parts();
    assert!(existing.is_empty(), "value already carries {existing}");
    ResultValue::with_units(quantity, &units(text))
}

/// Resolve in a scope with the built-in functions and constants.
pub fn eval(tree: &EquationNode) -> Result<ResultValue, ResolveError> {
    resolve(tree, &Scope::with_defaults())
}

pub fn eval_in(tree: &EquationNode, scope: &Scope) -> Result<ResultValue, ResolveError> {
    resolve(tree, scope)
}
