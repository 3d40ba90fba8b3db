//! Built-in, host-registered and user-defined functions

use std::sync::Arc;

use equate_resolver::{
    check_args, create_resolver_function, functions, resolve, Arity, ErrorKind, FunctionCall,
    NumberFunction, ResolverFunction, ResultValue, Scope,
};

mod test_support;
use test_support::*;

#[test]
fn test_every_builtin_is_registered() {
    let scope = Scope::with_defaults();
    for name in functions::builtin_names() {
        assert!(scope.get_function(name).is_some(), "{name}");
    }
    let mut constants: Vec<&str> = scope.variable_names().collect();
    constants.sort_unstable();
    assert_eq!(constants, vec!["e", "pi"]);
}

#[test]
fn test_geometric_series() {
    // sum(k, 0, 4, 2^k) = 1 + 2 + 4 + 8 + 16
    let tree = call("sum", vec![var("k"), num(0.0), num(4.0), power(num(2.0), var("k"))]);
    assert_eq!(eval(&tree), Ok(ResultValue::Number(31.0)));
}

#[test]
fn test_nested_sums_shadow_independently() {
    // sum(i, 1, 3, sum(j, 1, i, j)) = 1 + 3 + 6
    let inner = call("sum", vec![var("j"), num(1.0), var("i"), var("j")]);
    let tree = call("sum", vec![var("i"), num(1.0), num(3.0), inner]);
    assert_eq!(eval(&tree), Ok(ResultValue::Number(10.0)));
}

#[test]
fn test_sum_bound_errors() {
    let tree = call("sum", vec![var("i"), var("pi"), num(3.0), var("i")]);
    let err = eval(&tree).unwrap_err();
    assert_eq!(err.name(), "functionSum2Integer");
    assert_eq!(err.node, var("pi"));

    let tree = call("sum", vec![plus(var("i"), num(1.0)), num(1.0), num(3.0), var("i")]);
    let err = eval(&tree).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::FunctionSum1Variable {
            name: "sum".to_string(),
            found: "plus".to_string(),
        }
    );
}

#[test]
fn test_root_and_log() {
    assert_eq!(
        eval(&call("root", vec![num(2.0), num(81.0)])),
        Ok(ResultValue::Number(9.0))
    );
    assert_eq!(
        eval(&call("log", vec![num(100.0)])),
        Ok(ResultValue::Number(2.0))
    );
    let err = eval(&call("log", vec![num(1.0), num(2.0), num(3.0)])).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::FunctionArgLength {
            name: "log".to_string(),
            arity: Arity { min: 1, max: Some(2) },
            found: 3,
        }
    );
}

#[test]
fn test_sqrt_of_area() {
    let scope = Scope::with_defaults().with_variable("a", with_units(25.0, "m2"));
    assert_eq!(
        eval_in(&call("sqrt", vec![var("a")]), &scope),
        Ok(with_units(5.0, "m"))
    );
}

#[test]
fn test_numeric_functions_reject_units() {
    let scope = Scope::with_defaults().with_variable("x", with_units(1.0, "m"));
    let err = eval_in(&call("sin", vec![var("x")]), &scope).unwrap_err();
    assert_eq!(err.name(), "functionNumberOnly");
    assert_eq!(err.node, var("x"));
}

#[test]
fn test_user_function() {
    // f(x, y) = x^2 + y
    let body = plus(power(var("x"), num(2.0)), var("y"));
    let defining = Scope::with_defaults();
    let f = create_resolver_function(["x", "y"], body, &defining);
    let scope = Scope::with_defaults().with_function("f", f);

    let tree = call("f", vec![num(3.0), num(1.0)]);
    assert_eq!(eval_in(&tree, &scope), Ok(ResultValue::Number(10.0)));
    assert!(defining.get_variable("x").is_none());
}

#[test]
fn test_user_function_calls_do_not_interfere() {
    let captured = Scope::new().with_variable("x", ResultValue::Number(0.0));
    let identity = create_resolver_function(["x"], var("x"), &captured);
    let constant = create_resolver_function(Vec::<&str>::new(), var("x"), &captured);
    let scope = Scope::new()
        .with_function("id", identity)
        .with_function("c", constant);

    // id(5) + c() + id(7) + c()
    let tree = plus(
        plus(call("id", vec![num(5.0)]), call("c", vec![])),
        plus(call("id", vec![num(7.0)]), call("c", vec![])),
    );
    assert_eq!(eval_in(&tree, &scope), Ok(ResultValue::Number(12.0)));
    assert_eq!(captured.get_variable("x"), Some(&ResultValue::Number(0.0)));
}

#[test]
fn test_user_function_with_units() {
    // kinetic(m, v) = m v^2 / 2
    let body = divide(implicit(var("m"), power(var("v"), num(2.0))), num(2.0));
    let kinetic = create_resolver_function(["m", "v"], body, &Scope::new());
    let scope = Scope::with_defaults()
        .with_variable("mass", with_units(4.0, "kg"))
        .with_variable("speed", with_units(3.0, "m/s"))
        .with_function("kinetic", kinetic);

    let tree = call("kinetic", vec![var("mass"), var("speed")]);
    assert_eq!(eval_in(&tree, &scope), Ok(with_units(18.0, "kg.m2.s-2")));
}

struct Clamp;

impl ResolverFunction for Clamp {
    fn call(&self, call: &FunctionCall<'_>, scope: &Scope) -> equate_resolver::Result<ResultValue> {
        check_args(call, 3, Some(3))?;
        let values = call.resolve_args(scope)?;
        let mut numbers = Vec::with_capacity(values.len());
        for (index, value) in values.iter().enumerate() {
            match value.as_number() {
                Some(x) => numbers.push(x),
                None => {
                    return Err(call.arg_error(
                        index,
                        ErrorKind::FunctionNumberOnly {
                            name: call.name.to_string(),
                        },
                    ))
                }
            }
        }
        Ok(ResultValue::Number(numbers[0].clamp(numbers[1], numbers[2])))
    }
}

#[test]
fn test_host_registered_functions() {
    fn hypot(args: &[f64]) -> f64 {
        args[0].hypot(args[1])
    }

    let scope = Scope::with_defaults()
        .with_function("clamp", Arc::new(Clamp))
        .with_function("hypot", Arc::new(NumberFunction::new(2, Some(2), hypot)));

    assert_eq!(
        eval_in(&call("clamp", vec![num(12.0), num(0.0), num(10.0)]), &scope),
        Ok(ResultValue::Number(10.0))
    );
    assert_eq!(
        eval_in(&call("hypot", vec![num(3.0), num(4.0)]), &scope),
        Ok(ResultValue::Number(5.0))
    );

    let bad = matrix_node(&[&[1.0]]);
    let err = eval_in(&call("clamp", vec![num(1.0), bad.clone(), num(2.0)]), &scope).unwrap_err();
    assert_eq!(err.name(), "functionNumberOnly");
    assert_eq!(err.node, bad);
}

#[test]
fn test_overriding_a_builtin() {
    let always_one = |call: &FunctionCall<'_>, _: &Scope| -> equate_resolver::Result<ResultValue> {
        check_args(call, 1, Some(1))?;
        Ok(ResultValue::Number(1.0))
    };
    let scope = Scope::with_defaults().with_function("sin", Arc::new(always_one));
    assert_eq!(
        resolve(&call("sin", vec![num(0.0)]), &scope),
        Ok(ResultValue::Number(1.0))
    );
    assert_eq!(
        resolve(&call("sin", vec![num(0.0)]), &Scope::with_defaults()),
        Ok(ResultValue::Number(0.0))
    );
}
