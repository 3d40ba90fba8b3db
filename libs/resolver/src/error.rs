//! Error types for equation resolution

use std::fmt;

use equate_units::UnitMap;
use thiserror::Error;

use crate::ast::{BinaryOperator, ComparisonOperator, EquationNode, ParserError};
use crate::value::{Shape, ValueKind};

/// Result type alias
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Accepted argument count of a function; `max: None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arity {
    pub min: usize,
    pub max: Option<usize>,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "{}", max),
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "at least {}", self.min),
        }
    }
}

/// What went wrong, with the context values a formatter needs to explain it.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    #[error("unknown function \"{name}\"")]
    FunctionUnknown { name: String },

    #[error("function \"{name}\" takes {arity} arguments, not {found}")]
    FunctionArgLength {
        name: String,
        arity: Arity,
        found: usize,
    },

    #[error("arguments of {name} must be numbers")]
    FunctionNumberOnly { name: String },

    #[error("radicand of {name} cannot be negative")]
    FunctionSqrt1Positive { name: String },

    #[error("index of {name} must be a positive integer")]
    FunctionRoot1PositiveInteger { name: String },

    #[error("radicand of {name} cannot be negative when index is even")]
    FunctionRoot2Positive { name: String },

    #[error("first argument of {name} must be a variable, not {found}")]
    FunctionSum1Variable { name: String, found: String },

    #[error("second argument of {name} must be an integer")]
    FunctionSum2Integer { name: String },

    #[error("third argument of {name} must be an integer")]
    FunctionSum3Integer { name: String },

    #[error("unknown variable \"{name}\"")]
    VariableUnknown { name: String },

    #[error("cannot add {a} and {b}")]
    PlusDifferentUnits { a: UnitMap, b: UnitMap },

    #[error("cannot add a {a} matrix and a {b} matrix")]
    PlusMatrixMismatch { a: Shape, b: Shape },

    #[error("cannot handle ± operator")]
    PlusminusUnhandled,

    #[error("scalar product of vectors with lengths {a} and {b}")]
    ScalarProductUnbalanced { a: usize, b: usize },

    #[error("vector product needs two 3-vectors, got lengths {a} and {b}")]
    VectorProduct3VectorOnly { a: usize, b: usize },

    #[error("cannot multiply a {a} matrix with a {b} matrix")]
    MatrixProductMatrixMismatch { a: Shape, b: Shape },

    #[error("implicit multiplication of two vectors is ambiguous")]
    MultiplyImplicitNoVectors,

    #[error("cannot divide by zero")]
    DivideNotZero,

    #[error("cannot divide a matrix by a matrix")]
    DivideMatrixMatrix,

    #[error("exponent must be a unitless number, not a {found}")]
    PowerUnitlessNumberExponent { found: ValueKind },

    #[error("unit exponents of {units} leave the representable range")]
    UnitExponentRange { units: UnitMap },

    #[error("operator {operator} cannot take {a} and {b}")]
    OperatorInvalidArguments {
        operator: BinaryOperator,
        a: ValueKind,
        b: ValueKind,
    },

    #[error("cannot resolve comparison ({operator})")]
    NoComparison { operator: ComparisonOperator },

    #[error("matrix cells must share one unit: expected {expected}, found {found}")]
    MatrixDifferentUnits { expected: UnitMap, found: UnitMap },

    #[error("cannot resolve nested matrices")]
    MatrixNoNesting,

    #[error("matrix literal must be non-empty and rectangular")]
    MatrixMalformed,

    #[error("equation is incomplete")]
    Placeholder,

    #[error("equation failed to parse: {0}")]
    InvalidEquation(ParserError),

    #[error("equation nests deeper than {limit} levels")]
    DepthExceeded { limit: usize },
}

impl ErrorKind {
    /// Stable camelCase identifier of the kind (`"plusMatrixMismatch"`).
    pub fn name(&self) -> &'static str {
        match self {
            Self::FunctionUnknown { .. } => "functionUnknown",
            Self::FunctionArgLength { .. } => "functionArgLength",
            Self::FunctionNumberOnly { .. } => "functionNumberOnly",
            Self::FunctionSqrt1Positive { .. } => "functionSqrt1Positive",
            Self::FunctionRoot1PositiveInteger { .. } => "functionRoot1PositiveInteger",
            Self::FunctionRoot2Positive { .. } => "functionRoot2Positive",
            Self::FunctionSum1Variable { .. } => "functionSum1Variable",
            Self::FunctionSum2Integer { .. } => "functionSum2Integer",
            Self::FunctionSum3Integer { .. } => "functionSum3Integer",
            Self::VariableUnknown { .. } => "variableUnknown",
            Self::PlusDifferentUnits { .. } => "plusDifferentUnits",
            Self::PlusMatrixMismatch { .. } => "plusMatrixMismatch",
            Self::PlusminusUnhandled => "plusminusUnhandled",
            Self::ScalarProductUnbalanced { .. } => "scalarProductUnbalanced",
            Self::VectorProduct3VectorOnly { .. } => "vectorProduct3VectorOnly",
            Self::MatrixProductMatrixMismatch { .. } => "matrixProductMatrixMismatch",
            Self::MultiplyImplicitNoVectors => "multiplyImplicitNoVectors",
            Self::DivideNotZero => "divideNotZero",
            Self::DivideMatrixMatrix => "divideMatrixMatrix",
            Self::PowerUnitlessNumberExponent { .. } => "powerUnitlessNumberExponent",
            Self::UnitExponentRange { .. } => "unitExponentRange",
            Self::OperatorInvalidArguments { .. } => "operatorInvalidArguments",
            Self::NoComparison { .. } => "noComparison",
            Self::MatrixDifferentUnits { .. } => "matrixDifferentUnits",
            Self::MatrixNoNesting => "matrixNoNesting",
            Self::MatrixMalformed => "matrixMalformed",
            Self::Placeholder => "placeholder",
            Self::InvalidEquation(_) => "invalidEquation",
            Self::DepthExceeded { .. } => "depthExceeded",
        }
    }

    /// Named context values, rendered as strings.
    pub fn values(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::FunctionUnknown { name }
            | Self::FunctionNumberOnly { name }
            | Self::FunctionSqrt1Positive { name }
            | Self::FunctionRoot1PositiveInteger { name }
            | Self::FunctionRoot2Positive { name }
            | Self::FunctionSum2Integer { name }
            | Self::FunctionSum3Integer { name } => vec![("name", name.clone())],
            Self::FunctionArgLength { name, arity, found } => vec![
                ("name", name.clone()),
                ("minArgs", arity.min.to_string()),
                (
                    "maxArgs",
                    arity.max.map_or_else(|| "∞".to_string(), |m| m.to_string()),
                ),
                ("found", found.to_string()),
            ],
            Self::FunctionSum1Variable { name, found } => {
                vec![("name", name.clone()), ("found", found.clone())]
            }
            Self::VariableUnknown { name } => vec![("name", name.clone())],
            Self::PlusDifferentUnits { a, b } => {
                vec![("aUnits", a.to_string()), ("bUnits", b.to_string())]
            }
            Self::PlusMatrixMismatch { a, b } | Self::MatrixProductMatrixMismatch { a, b } => {
                vec![("aDimensions", a.to_string()), ("bDimensions", b.to_string())]
            }
            Self::ScalarProductUnbalanced { a, b } | Self::VectorProduct3VectorOnly { a, b } => {
                vec![("aLength", a.to_string()), ("bLength", b.to_string())]
            }
            Self::PowerUnitlessNumberExponent { found } => vec![("found", found.to_string())],
            Self::UnitExponentRange { units } => vec![("units", units.to_string())],
            Self::OperatorInvalidArguments { operator, a, b } => vec![
                ("operator", operator.to_string()),
                ("a", a.to_string()),
                ("b", b.to_string()),
            ],
            Self::NoComparison { operator } => vec![("operator", operator.to_string())],
            Self::MatrixDifferentUnits { expected, found } => vec![
                ("expected", expected.to_string()),
                ("found", found.to_string()),
            ],
            Self::InvalidEquation(error) => vec![
                ("errorType", error.error_type.clone()),
                ("start", error.start.to_string()),
                ("end", error.end.to_string()),
            ],
            Self::DepthExceeded { limit } => vec![("limit", limit.to_string())],
            Self::PlusminusUnhandled
            | Self::MultiplyImplicitNoVectors
            | Self::DivideNotZero
            | Self::DivideMatrixMatrix
            | Self::MatrixNoNesting
            | Self::MatrixMalformed
            | Self::Placeholder => Vec::new(),
        }
    }
}

/// A failed resolution: the kind of failure plus the smallest sub-tree
/// responsible for it.
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{kind}")]
pub struct ResolveError {
    pub kind: ErrorKind,
    pub node: EquationNode,
}

impl ResolveError {
    pub fn new(kind: ErrorKind, node: &EquationNode) -> Self {
        Self {
            kind,
            node: node.clone(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn values(&self) -> Vec<(&'static str, String)> {
        self.kind.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_display() {
        let exact = Arity { min: 4, max: Some(4) };
        let range = Arity { min: 1, max: Some(2) };
        let open = Arity { min: 1, max: None };
        assert_eq!(exact.to_string(), "4");
        assert_eq!(range.to_string(), "1-2");
        assert_eq!(open.to_string(), "at least 1");
    }

    #[test]
    fn test_matrix_mismatch_values() {
        let kind = ErrorKind::PlusMatrixMismatch {
            a: Shape { rows: 4, cols: 3 },
            b: Shape { rows: 2, cols: 4 },
        };
        assert_eq!(kind.name(), "plusMatrixMismatch");
        assert_eq!(
            kind.values(),
            vec![
                ("aDimensions", "4x3".to_string()),
                ("bDimensions", "2x4".to_string())
            ]
        );
        assert_eq!(
            kind.to_string(),
            "cannot add a 4x3 matrix and a 2x4 matrix"
        );
    }

    #[test]
    fn test_error_carries_node() {
        let node = EquationNode::variable("x");
        let err = ResolveError::new(
            ErrorKind::VariableUnknown {
                name: "x".to_string(),
            },
            &node,
        );
        assert_eq!(err.node, node);
        assert_eq!(err.name(), "variableUnknown");
        assert_eq!(err.to_string(), "unknown variable \"x\"");
    }
}
