#![forbid(unsafe_code)]

//! Equation resolver: evaluates parsed equation trees.
//!
//! The input is a tree produced by an external equation parser; the output
//! is a number, a matrix, or either of those tagged with a unit. Evaluation
//! checks dimensions and matrix shapes as it goes and reports the first
//! violation as a [`ResolveError`] pointing at the offending sub-tree.
//!
//! # Architecture Overview
//!
//! ```text
//! EquationNode tree + Scope
//!      |
//!   resolve (tree walk, variable lookup)
//!      |---------------------------.
//!   operators (+ - × ÷ ^)      functions (built-ins, user functions)
//!      |                           |
//!   ResultValue (Number | Matrix | Unit) or ResolveError
//! ```
//!
//! # Example
//!
//! ```
//! use equate_resolver::{resolve, BinaryOperator, EquationNode, ResultValue, Scope, UnitMap};
//!
//! // 10a + 5a with a = 1 b2/c
//! let units: UnitMap = "b2/c".parse().unwrap();
//! let scope = Scope::with_defaults().with_variable("a", ResultValue::with_units(1.0, &units));
//! let term = |k: f64| {
//!     EquationNode::binary(
//!         BinaryOperator::MultiplyImplicit,
//!         EquationNode::number(k),
//!         EquationNode::variable("a"),
//!     )
//! };
//! let tree = EquationNode::binary(BinaryOperator::Plus, term(10.0), term(5.0));
//!
//! let value = resolve(&tree, &scope).unwrap();
//! assert_eq!(value, ResultValue::with_units(15.0, &units));
//! assert_eq!(value.to_string(), "15 b2.c-1");
//! ```

pub mod ast;
pub mod error;
pub mod functions;
pub mod operators;
pub mod resolve;
pub mod scope;
pub mod value;

// Re-export main types
pub use ast::{BinaryOperator, ComparisonOperator, EquationNode, ParserError, UnaryOperator};
pub use error::{Arity, ErrorKind, ResolveError, Result};
pub use functions::{
    check_args, create_resolver_function, default_functions, FunctionCall, NumberFunction,
    ResolverFunction, UserFunction,
};
pub use resolve::{resolve, ResolveOptions};
pub use scope::{default_variables, FunctionLookup, Scope, VariableLookup};
pub use value::{Matrix, Quantity, ResultValue, Shape, UnitValue, ValueKind};

pub use equate_units::{Exponent, UnitMap};
