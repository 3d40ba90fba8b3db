//! `sqrt` and `root`, the two built-ins that see through units.
//!
//! Both take a scalar radicand, bare or unit-tagged, and divide the unit's
//! exponents by the root index: `sqrt(4 m2)` is `2 m`.

use std::num::NonZeroU32;

use equate_units::UnitMap;

use crate::error::{ErrorKind, Result};
use crate::resolve::resolve_node;
use crate::scope::Scope;
use crate::value::{Quantity, ResultValue};

use super::{ArgumentViolation, FunctionCall};

const SQUARE: NonZeroU32 = match NonZeroU32::new(2) {
    Some(index) => index,
    None => panic!("2 is non-zero"),
};

pub(super) fn sqrt(call: &FunctionCall<'_>, scope: &Scope) -> Result<ResultValue> {
    let (units, x) = scalar_arg(call, scope, 0)?;
    validate_sqrt(call.name, &[x]).map_err(|violation| call.violation(violation))?;
    rooted(call, 0, &units, SQUARE, x.sqrt())
}

/// `root(index, x)`; odd roots of negative numbers keep the sign.
pub(super) fn root(call: &FunctionCall<'_>, scope: &Scope) -> Result<ResultValue> {
    let index = match resolve_node(&call.args[0], scope)? {
        ResultValue::Number(f) => f,
        _ => {
            return Err(call.arg_error(
                0,
                ErrorKind::FunctionNumberOnly {
                    name: call.name.to_string(),
                },
            ))
        }
    };
    let (units, x) = scalar_arg(call, scope, 1)?;
    validate_root(call.name, &[index, x]).map_err(|violation| call.violation(violation))?;

    let root_index = NonZeroU32::new(index as u32).ok_or_else(|| {
        call.arg_error(
            0,
            ErrorKind::FunctionRoot1PositiveInteger {
                name: call.name.to_string(),
            },
        )
    })?;
    let value = x.signum() * x.abs().powf(1.0 / index);
    rooted(call, 1, &units, root_index, value)
}

/// Tag `value` with the `index`-th root of the radicand's unit; the radicand
/// is argument `radicand`.
fn rooted(
    call: &FunctionCall<'_>,
    radicand: usize,
    units: &UnitMap,
    index: NonZeroU32,
    value: f64,
) -> Result<ResultValue> {
    let units = units.root(index).ok_or_else(|| {
        call.arg_error(
            radicand,
            ErrorKind::UnitExponentRange {
                units: units.clone(),
            },
        )
    })?;
    Ok(ResultValue::from_parts(units, Quantity::Number(value)))
}

/// Resolve argument `index` to a scalar, keeping its unit.
fn scalar_arg(call: &FunctionCall<'_>, scope: &Scope, index: usize) -> Result<(UnitMap, f64)> {
    match resolve_node(&call.args[index], scope)?.into_parts() {
        (units, Quantity::Number(x)) => Ok((units, x)),
        (_, Quantity::Matrix(_)) => Err(call.arg_error(
            index,
            ErrorKind::FunctionNumberOnly {
                name: call.name.to_string(),
            },
        )),
    }
}

fn validate_sqrt(name: &str, args: &[f64]) -> std::result::Result<(), ArgumentViolation> {
    if args[0] < 0.0 {
        return Err(ArgumentViolation {
            index: 0,
            kind: ErrorKind::FunctionSqrt1Positive {
                name: name.to_string(),
            },
        });
    }
    Ok(())
}

fn validate_root(name: &str, args: &[f64]) -> std::result::Result<(), ArgumentViolation> {
    let (index, x) = (args[0], args[1]);
    if index.fract() != 0.0 || index <= 0.0 || index > f64::from(u32::MAX) {
        return Err(ArgumentViolation {
            index: 0,
            kind: ErrorKind::FunctionRoot1PositiveInteger {
                name: name.to_string(),
            },
        });
    }
    if index % 2.0 == 0.0 && x < 0.0 {
        return Err(ArgumentViolation {
            index: 1,
            kind: ErrorKind::FunctionRoot2Positive {
                name: name.to_string(),
            },
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::EquationNode;
    use crate::resolve;
    use equate_units::Exponent;

    fn num(value: f64) -> EquationNode {
        EquationNode::number(value)
    }

    fn eval_in(scope: &Scope, name: &str, args: Vec<EquationNode>) -> Result<ResultValue> {
        resolve(&EquationNode::function(name, args), scope)
    }

    fn eval(name: &str, args: Vec<EquationNode>) -> Result<ResultValue> {
        eval_in(&Scope::with_defaults(), name, args)
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(eval("sqrt", vec![num(16.0)]), Ok(ResultValue::Number(4.0)));
        assert_eq!(eval("sqrt", vec![num(0.0)]), Ok(ResultValue::Number(0.0)));
    }

    #[test]
    fn test_sqrt_negative_points_at_argument() {
        let minus_one = EquationNode::negative(num(1.0));
        let err = eval("sqrt", vec![minus_one.clone()]).unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::FunctionSqrt1Positive {
                name: "sqrt".to_string()
            }
        );
        assert_eq!(err.node, minus_one);
    }

    #[test]
    fn test_sqrt_halves_unit_exponents() {
        let area = UnitMap::new().with_exponent("m", 2);
        let scope = Scope::with_defaults().with_variable("a", ResultValue::with_units(9.0, &area));
        assert_eq!(
            eval_in(&scope, "sqrt", vec![EquationNode::variable("a")]),
            Ok(ResultValue::with_units(3.0, &UnitMap::base("m")))
        );

        let length = Scope::with_defaults()
            .with_variable("l", ResultValue::with_units(4.0, &UnitMap::base("m")));
        let result = eval_in(&length, "sqrt", vec![EquationNode::variable("l")]).unwrap();
        assert_eq!(result.units().get("m"), Exponent::new(1, 2));
        assert_eq!(result.strip_units(), Quantity::Number(2.0));
    }

    #[test]
    fn test_sqrt_rejects_matrix() {
        let matrix = EquationNode::matrix(vec![vec![num(4.0)]]);
        let err = eval("sqrt", vec![matrix.clone()]).unwrap_err();
        assert_eq!(err.name(), "functionNumberOnly");
        assert_eq!(err.node, matrix);
    }

    #[test]
    fn test_root() {
        assert_eq!(
            eval("root", vec![num(3.0), num(27.0)]),
            Ok(ResultValue::Number(3.0))
        );
        assert_eq!(
            eval("root", vec![num(3.0), EquationNode::negative(num(8.0))]),
            Ok(ResultValue::Number(-2.0))
        );

        let volume = UnitMap::new().with_exponent("m", 3);
        let scope =
            Scope::with_defaults().with_variable("v", ResultValue::with_units(8.0, &volume));
        assert_eq!(
            eval_in(&scope, "root", vec![num(3.0), EquationNode::variable("v")]),
            Ok(ResultValue::with_units(2.0, &UnitMap::base("m")))
        );
    }

    #[test]
    fn test_root_validation() {
        let index = num(2.5);
        let err = eval("root", vec![index.clone(), num(4.0)]).unwrap_err();
        assert_eq!(err.name(), "functionRoot1PositiveInteger");
        assert_eq!(err.node, index);

        let err = eval("root", vec![num(0.0), num(4.0)]).unwrap_err();
        assert_eq!(err.name(), "functionRoot1PositiveInteger");

        let radicand = EquationNode::negative(num(16.0));
        let err = eval("root", vec![num(4.0), radicand.clone()]).unwrap_err();
        assert_eq!(err.name(), "functionRoot2Positive");
        assert_eq!(err.node, radicand);
    }

    #[test]
    fn test_root_of_unit_exponent_out_of_range() {
        let tiny = UnitMap::new().with_ratio("m", Exponent::new(1, i64::MAX));
        let scope = Scope::with_defaults().with_variable("t", ResultValue::with_units(8.0, &tiny));
        let radicand = EquationNode::variable("t");
        let err = eval_in(&scope, "root", vec![num(3.0), radicand.clone()]).unwrap_err();
        assert_eq!(err.name(), "unitExponentRange");
        assert_eq!(err.node, radicand);
    }
}
