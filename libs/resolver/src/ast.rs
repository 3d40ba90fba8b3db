//! Equation tree
//!
//! The tree is produced by an external parser and consumed here as-is. Every
//! operator node owns its operand sub-trees, so a failing operand can be
//! reported back by cloning exactly that sub-tree.

use std::fmt;

/// A node of a parsed equation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "kebab-case"))]
pub enum EquationNode {
    /// Numeric literal.
    Number { value: f64 },

    /// Variable reference, looked up in the scope.
    Variable { name: String },

    /// Parenthesized expression: `(child)`
    Block { child: Box<EquationNode> },

    /// Prefix operator: `+x`, `-x`, `±x`
    Unary {
        operator: UnaryOperator,
        value: Box<EquationNode>,
    },

    /// Arithmetic operator: `a + b`, `a × b`, `a ^ b`, ...
    Binary {
        operator: BinaryOperator,
        a: Box<EquationNode>,
        b: Box<EquationNode>,
    },

    /// Comparison operator: `a = b`, `a < b`, ...
    Comparison {
        operator: ComparisonOperator,
        a: Box<EquationNode>,
        b: Box<EquationNode>,
    },

    /// Function call: `name(args...)`
    Function {
        name: String,
        args: Vec<EquationNode>,
    },

    /// Matrix literal, row-major.
    Matrix { values: Vec<Vec<EquationNode>> },

    /// Missing operand in an incomplete editor input.
    OperandPlaceholder,

    /// Missing binary operator between two operands.
    OperatorPlaceholder {
        a: Box<EquationNode>,
        b: Box<EquationNode>,
    },

    /// Missing prefix operator.
    OperatorUnaryPlaceholder { value: Box<EquationNode> },

    /// Call with a missing function name.
    FunctionPlaceholder { args: Vec<EquationNode> },

    /// Upstream parse failure, carried through untouched.
    ParserError(ParserError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum UnaryOperator {
    Positive,
    Negative,
    PositiveNegative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum BinaryOperator {
    Plus,
    Minus,
    PlusMinus,
    /// Juxtaposition: `2a`, `a b`
    MultiplyImplicit,
    /// `a · b`
    MultiplyDot,
    /// `a × b`
    MultiplyCross,
    /// `a / b` written as a stacked fraction
    DivideFraction,
    /// `a / b` written inline
    DivideInline,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ComparisonOperator {
    Equals,
    LessThan,
    LessThanEquals,
    GreaterThan,
    GreaterThanEquals,
    Approximates,
}

/// Parse failure token as emitted by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ParserError {
    pub error_type: String,
    pub start: usize,
    pub end: usize,
}

impl EquationNode {
    pub fn number(value: f64) -> Self {
        Self::Number { value }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable { name: name.into() }
    }

    pub fn block(child: EquationNode) -> Self {
        Self::Block {
            child: Box::new(child),
        }
    }

    pub fn unary(operator: UnaryOperator, value: EquationNode) -> Self {
        Self::Unary {
            operator,
            value: Box::new(value),
        }
    }

    pub fn negative(value: EquationNode) -> Self {
        Self::unary(UnaryOperator::Negative, value)
    }

    pub fn binary(operator: BinaryOperator, a: EquationNode, b: EquationNode) -> Self {
        Self::Binary {
            operator,
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    pub fn comparison(operator: ComparisonOperator, a: EquationNode, b: EquationNode) -> Self {
        Self::Comparison {
            operator,
            a: Box::new(a),
            b: Box::new(b),
        }
    }

    pub fn function(name: impl Into<String>, args: Vec<EquationNode>) -> Self {
        Self::Function {
            name: name.into(),
            args,
        }
    }

    pub fn matrix(values: Vec<Vec<EquationNode>>) -> Self {
        Self::Matrix { values }
    }

    /// Node type as the parser names it (`"number"`, `"multiply-dot"`, ...).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Number { .. } => "number",
            Self::Variable { .. } => "variable",
            Self::Block { .. } => "block",
            Self::Unary { operator, .. } => operator.name(),
            Self::Binary { operator, .. } => operator.name(),
            Self::Comparison { operator, .. } => operator.name(),
            Self::Function { .. } => "function",
            Self::Matrix { .. } => "matrix",
            Self::OperandPlaceholder => "operand-placeholder",
            Self::OperatorPlaceholder { .. } => "operator-placeholder",
            Self::OperatorUnaryPlaceholder { .. } => "operator-unary-placeholder",
            Self::FunctionPlaceholder { .. } => "function-placeholder",
            Self::ParserError(_) => "parser-error",
        }
    }
}

impl UnaryOperator {
    pub fn name(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::PositiveNegative => "positive-negative",
        }
    }
}

impl BinaryOperator {
    pub fn name(self) -> &'static str {
        match self {
            Self::Plus => "plus",
            Self::Minus => "minus",
            Self::PlusMinus => "plus-minus",
            Self::MultiplyImplicit => "multiply-implicit",
            Self::MultiplyDot => "multiply-dot",
            Self::MultiplyCross => "multiply-cross",
            Self::DivideFraction => "divide-fraction",
            Self::DivideInline => "divide-inline",
            Self::Power => "power",
        }
    }
}

impl ComparisonOperator {
    pub fn name(self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::LessThan => "less-than",
            Self::LessThanEquals => "less-than-equals",
            Self::GreaterThan => "greater-than",
            Self::GreaterThanEquals => "greater-than-equals",
            Self::Approximates => "approximates",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}..{}", self.error_type, self.start, self.end)
    }
}
