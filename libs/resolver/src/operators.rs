//! Arithmetic operators
//!
//! Every operator follows the same two steps: combine the unit maps of both
//! operands with an operator-specific rule, then compute on the unitless
//! quantities. A combination an operator has no rule for is reported as
//! `operatorInvalidArguments`; unit exponents that stop fitting an exact
//! fraction are reported as `unitExponentRange`.
//!
//! Errors raised here are attributed to the operator node passed in.

use equate_units::UnitMap;

use crate::ast::{BinaryOperator, EquationNode};
use crate::error::{ErrorKind, ResolveError, Result};
use crate::value::{Matrix, Quantity, ResultValue};

/// How two column vectors multiply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorRule {
    /// Juxtaposition; two vectors are ambiguous and rejected.
    Implicit,
    /// Scalar product.
    Dot,
    /// 3D vector product.
    Cross,
}

impl VectorRule {
    fn operator(self) -> BinaryOperator {
        match self {
            Self::Implicit => BinaryOperator::MultiplyImplicit,
            Self::Dot => BinaryOperator::MultiplyDot,
            Self::Cross => BinaryOperator::MultiplyCross,
        }
    }
}

/// Apply a binary operator to two resolved operands.
pub fn apply(
    operator: BinaryOperator,
    node: &EquationNode,
    a: ResultValue,
    b: ResultValue,
) -> Result<ResultValue> {
    match operator {
        BinaryOperator::Plus => plus(node, a, b),
        BinaryOperator::Minus => minus(node, a, b),
        BinaryOperator::PlusMinus => Err(ResolveError::new(ErrorKind::PlusminusUnhandled, node)),
        BinaryOperator::MultiplyImplicit => multiply(node, a, b, VectorRule::Implicit),
        BinaryOperator::MultiplyDot => multiply(node, a, b, VectorRule::Dot),
        BinaryOperator::MultiplyCross => multiply(node, a, b, VectorRule::Cross),
        BinaryOperator::DivideFraction | BinaryOperator::DivideInline => divide(node, a, b),
        BinaryOperator::Power => power(node, a, b),
    }
}

/// `a + b`. Both operands must carry the same unit; a number is added to
/// every cell of a matrix.
pub fn plus(node: &EquationNode, a: ResultValue, b: ResultValue) -> Result<ResultValue> {
    dispatch(
        BinaryOperator::Plus,
        node,
        a,
        b,
        |a, b| {
            if a.same_unit(b) {
                Ok(a.clone())
            } else {
                Err(ResolveError::new(
                    ErrorKind::PlusDifferentUnits {
                        a: a.clone(),
                        b: b.clone(),
                    },
                    node,
                ))
            }
        },
        |a, b| match (a, b) {
            (Quantity::Number(x), Quantity::Number(y)) => Ok(Some(Quantity::Number(x + y))),
            (Quantity::Number(x), Quantity::Matrix(m)) | (Quantity::Matrix(m), Quantity::Number(x)) => {
                Ok(Some(Quantity::Matrix(m.map(|cell| cell + x))))
            }
            (Quantity::Matrix(p), Quantity::Matrix(q)) => {
                if p.shape() != q.shape() {
                    return Err(ResolveError::new(
                        ErrorKind::PlusMatrixMismatch {
                            a: p.shape(),
                            b: q.shape(),
                        },
                        node,
                    ));
                }
                Ok(Some(Quantity::Matrix(p.zip_with(&q, |x, y| x + y))))
            }
        },
    )
}

/// `a - b`, evaluated as `a + (-b)`.
pub fn minus(node: &EquationNode, a: ResultValue, b: ResultValue) -> Result<ResultValue> {
    plus(node, a, b.negate())
}

/// `a × b`. Units multiply. Two matrices use the matrix product unless both
/// are column vectors, in which case `rule` decides.
pub fn multiply(
    node: &EquationNode,
    a: ResultValue,
    b: ResultValue,
    rule: VectorRule,
) -> Result<ResultValue> {
    dispatch(
        rule.operator(),
        node,
        a,
        b,
        |a, b| a.multiply(b).ok_or_else(|| exponent_range(node, a)),
        |a, b| match (a, b) {
            (Quantity::Number(x), Quantity::Number(y)) => Ok(Some(Quantity::Number(x * y))),
            (Quantity::Number(x), Quantity::Matrix(m)) | (Quantity::Matrix(m), Quantity::Number(x)) => {
                Ok(Some(Quantity::Matrix(m.map(|cell| cell * x))))
            }
            (Quantity::Matrix(p), Quantity::Matrix(q)) => {
                let product = if p.is_column_vector() && q.is_column_vector() {
                    match rule {
                        VectorRule::Implicit => {
                            return Err(ResolveError::new(
                                ErrorKind::MultiplyImplicitNoVectors,
                                node,
                            ))
                        }
                        VectorRule::Dot => Quantity::Number(scalar_product(node, &p, &q)?),
                        VectorRule::Cross => Quantity::Matrix(vector_product(node, &p, &q)?),
                    }
                } else {
                    Quantity::Matrix(matrix_product(node, &p, &q)?)
                };
                Ok(Some(product))
            }
        },
    )
}

/// `a ÷ b`. Units divide. A zero divisor, or a divisor matrix with any zero
/// cell, is rejected instead of producing an infinity.
pub fn divide(node: &EquationNode, a: ResultValue, b: ResultValue) -> Result<ResultValue> {
    let not_zero = || ResolveError::new(ErrorKind::DivideNotZero, node);

    dispatch(
        BinaryOperator::DivideFraction,
        node,
        a,
        b,
        |a, b| a.divide(b).ok_or_else(|| exponent_range(node, a)),
        |a, b| match (a, b) {
            (Quantity::Matrix(_), Quantity::Matrix(_)) => {
                Err(ResolveError::new(ErrorKind::DivideMatrixMatrix, node))
            }
            (_, Quantity::Number(y)) if y == 0.0 => Err(not_zero()),
            (_, Quantity::Matrix(m)) if m.contains_zero() => Err(not_zero()),
            (Quantity::Number(x), Quantity::Number(y)) => Ok(Some(Quantity::Number(x / y))),
            (Quantity::Number(x), Quantity::Matrix(m)) => {
                Ok(Some(Quantity::Matrix(m.map(|cell| x / cell))))
            }
            (Quantity::Matrix(m), Quantity::Number(y)) => {
                Ok(Some(Quantity::Matrix(m.map(|cell| cell / y))))
            }
        },
    )
}

/// `a ^ b`. The exponent must be a bare number; unit exponents of the base
/// are scaled by it, which needs it to be a small fraction (see
/// [`UnitMap::powf`]).
pub fn power(node: &EquationNode, a: ResultValue, b: ResultValue) -> Result<ResultValue> {
    let exponent = match b {
        ResultValue::Number(y) => y,
        other => {
            return Err(ResolveError::new(
                ErrorKind::PowerUnitlessNumberExponent {
                    found: other.kind(),
                },
                node,
            ))
        }
    };
    dispatch(
        BinaryOperator::Power,
        node,
        a,
        ResultValue::Number(exponent),
        |a, _| a.powf(exponent).ok_or_else(|| exponent_range(node, a)),
        |a, b| match (a, b) {
            (Quantity::Number(x), Quantity::Number(y)) => Ok(Some(Quantity::Number(x.powf(y)))),
            (Quantity::Matrix(m), Quantity::Number(y)) => {
                Ok(Some(Quantity::Matrix(m.map(|cell| cell.powf(y)))))
            }
            _ => Ok(None),
        },
    )
}

/// Shared operator skeleton.
///
/// `units` combines the two unit maps, `compute` works on the unitless
/// quantities and returns `None` for a combination it does not support.
fn dispatch<U, C>(
    operator: BinaryOperator,
    node: &EquationNode,
    a: ResultValue,
    b: ResultValue,
    units: U,
    compute: C,
) -> Result<ResultValue>
where
    U: FnOnce(&UnitMap, &UnitMap) -> Result<UnitMap>,
    C: FnOnce(Quantity, Quantity) -> Result<Option<Quantity>>,
{
    let (a_units, a) = a.into_parts();
    let (b_units, b) = b.into_parts();
    let units = units(&a_units, &b_units)?;

    let (a_kind, b_kind) = (a.kind(), b.kind());
    let value = compute(a, b)?.ok_or_else(|| {
        ResolveError::new(
            ErrorKind::OperatorInvalidArguments {
                operator,
                a: a_kind,
                b: b_kind,
            },
            node,
        )
    })?;
    Ok(ResultValue::from_parts(units, value))
}

fn exponent_range(node: &EquationNode, units: &UnitMap) -> ResolveError {
    ResolveError::new(
        ErrorKind::UnitExponentRange {
            units: units.clone(),
        },
        node,
    )
}

/// Sum of cell-wise products of two column vectors of equal length.
pub fn scalar_product(node: &EquationNode, a: &Matrix, b: &Matrix) -> Result<f64> {
    if a.rows() != b.rows() {
        return Err(ResolveError::new(
            ErrorKind::ScalarProductUnbalanced {
                a: a.rows(),
                b: b.rows(),
            },
            node,
        ));
    }
    Ok(a
        .cells()
        .iter()
        .zip(b.cells())
        .map(|(x, y)| x[0] * y[0])
        .sum())
}

/// Cross product of two 3-element column vectors.
pub fn vector_product(node: &EquationNode, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.rows() != 3 || b.rows() != 3 {
        return Err(ResolveError::new(
            ErrorKind::VectorProduct3VectorOnly {
                a: a.rows(),
                b: b.rows(),
            },
            node,
        ));
    }
    let x = |m: &Matrix, i: usize| m.cells()[i][0];
    Ok(Matrix::from_fn(3, 1, |row, _| {
        let (i, j) = ((row + 1) % 3, (row + 2) % 3);
        x(a, i) * x(b, j) - x(a, j) * x(b, i)
    }))
}

/// Row-by-column product; `a.cols` must equal `b.rows`.
pub fn matrix_product(node: &EquationNode, a: &Matrix, b: &Matrix) -> Result<Matrix> {
    if a.cols() != b.rows() {
        return Err(ResolveError::new(
            ErrorKind::MatrixProductMatrixMismatch {
                a: a.shape(),
                b: b.shape(),
            },
            node,
        ));
    }
    Ok(Matrix::from_fn(a.rows(), b.cols(), |row, col| {
        (0..a.cols())
            .map(|k| a.cells()[row][k] * b.cells()[k][col])
            .sum()
    }))
}
