//! Criterion benchmarks for equation resolution

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use equate_resolver::{
    create_resolver_function, resolve, BinaryOperator, EquationNode, ResultValue, Scope, UnitMap,
};
use std::time::Duration;

fn custom_criterion() -> Criterion {
    Criterion::default()
        .sample_size(20)
        .warm_up_time(Duration::from_millis(100))
        .measurement_time(Duration::from_secs(1))
}

fn num(value: f64) -> EquationNode {
    EquationNode::number(value)
}

fn var(name: &str) -> EquationNode {
    EquationNode::variable(name)
}

fn binary(operator: BinaryOperator, a: EquationNode, b: EquationNode) -> EquationNode {
    EquationNode::binary(operator, a, b)
}

fn bench_scalar_arithmetic(c: &mut Criterion) {
    let scope = Scope::with_defaults();
    // (1 + 2) · 3 / 4 - 5^2
    let tree = binary(
        BinaryOperator::Minus,
        binary(
            BinaryOperator::DivideFraction,
            binary(
                BinaryOperator::MultiplyDot,
                EquationNode::block(binary(BinaryOperator::Plus, num(1.0), num(2.0))),
                num(3.0),
            ),
            num(4.0),
        ),
        binary(BinaryOperator::Power, num(5.0), num(2.0)),
    );

    c.bench_function("scalar_arithmetic", |b| {
        b.iter(|| resolve(black_box(&tree), &scope).unwrap())
    });
}

fn bench_unit_arithmetic(c: &mut Criterion) {
    let force: UnitMap = "kg.m/s2".parse().unwrap();
    let scope = Scope::with_defaults()
        .with_variable("f", ResultValue::with_units(10.0, &force))
        .with_variable("d", ResultValue::with_units(2.0, &UnitMap::base("m")));
    // f d + f d
    let work = binary(BinaryOperator::MultiplyImplicit, var("f"), var("d"));
    let tree = binary(BinaryOperator::Plus, work.clone(), work);

    c.bench_function("unit_arithmetic", |b| {
        b.iter(|| resolve(black_box(&tree), &scope).unwrap())
    });
}

fn bench_matrix_product(c: &mut Criterion) {
    let scope = Scope::with_defaults();
    let grid = |n: usize| {
        EquationNode::matrix(
            (0..n)
                .map(|r| (0..n).map(|c| num((r * n + c) as f64)).collect())
                .collect(),
        )
    };
    let tree = binary(BinaryOperator::MultiplyDot, grid(8), grid(8));

    c.bench_function("matrix_product_8x8", |b| {
        b.iter(|| resolve(black_box(&tree), &scope).unwrap())
    });
}

fn bench_sum(c: &mut Criterion) {
    let scope = Scope::with_defaults();
    let tree = EquationNode::function(
        "sum",
        vec![
            var("i"),
            num(1.0),
            num(1000.0),
            binary(BinaryOperator::Power, var("i"), num(2.0)),
        ],
    );

    c.bench_function("sum_1000_squares", |b| {
        b.iter(|| resolve(black_box(&tree), &scope).unwrap())
    });
}

fn bench_user_function(c: &mut Criterion) {
    let body = binary(
        BinaryOperator::Plus,
        binary(BinaryOperator::Power, var("x"), num(2.0)),
        EquationNode::function("sqrt", vec![var("x")]),
    );
    let defaults = Scope::with_defaults();
    let f = create_resolver_function(["x"], body, &defaults);
    let scope = defaults.with_function("f", f);
    let tree = EquationNode::function("f", vec![num(16.0)]);

    c.bench_function("user_function", |b| {
        b.iter(|| resolve(black_box(&tree), &scope).unwrap())
    });
}

criterion_group! {
    name = benches;
    config = custom_criterion();
    targets =
        bench_scalar_arithmetic,
        bench_unit_arithmetic,
        bench_matrix_product,
        bench_sum,
        bench_user_function
}
criterion_main!(benches);
