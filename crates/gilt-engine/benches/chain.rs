use std::rc::Rc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gilt_engine::{
    register_builtins, ClassDecl, ClassElement, DecoratorExpr, Engine, Environment, Expr,
    NativeFunction, Value,
};

fn method_body() -> Rc<NativeFunction> {
    Rc::new(NativeFunction::new("m", |_, _| Ok(Value::Null)))
}

fn decorated_class(elements: usize, depth: usize) -> ClassDecl {
    let mut decl = ClassDecl::new("Bench").decorator(DecoratorExpr::bare("annotation"));
    for i in 0..elements {
        let mut element = ClassElement::method(format!("m{}", i), method_body());
        for d in 0..depth {
            element = element.decorator(match d % 3 {
                0 => DecoratorExpr::bare("readonly"),
                1 => DecoratorExpr::call("enumerable", vec![Expr::bool(d % 2 == 0)]),
                _ => DecoratorExpr::bare("nonconfigurable"),
            });
        }
        decl = decl.element(element);
    }
    decl
}

fn bench_chain_depth(c: &mut Criterion) {
    let mut env = Environment::new();
    register_builtins(&mut env);
    let mut group = c.benchmark_group("chain_depth");

    for depth in [0, 1, 4, 16] {
        let decl = decorated_class(8, depth);
        group.bench_with_input(BenchmarkId::new("class", depth), &decl, |b, decl| {
            b.iter(|| {
                let mut engine = Engine::new();
                engine.evaluate_class(black_box(decl), &env).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_class_width(c: &mut Criterion) {
    let mut env = Environment::new();
    register_builtins(&mut env);
    let decl = decorated_class(128, 2);

    c.bench_function("class_128_elements", |b| {
        b.iter(|| {
            let mut engine = Engine::new();
            engine.evaluate_class(black_box(&decl), &env).unwrap()
        });
    });
}

criterion_group!(benches, bench_chain_depth, bench_class_width);
criterion_main!(benches);
