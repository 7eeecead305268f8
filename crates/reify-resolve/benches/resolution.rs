//! Resolution benchmarks for reify-resolve
//!
//! Member resolution runs once per member per serialized value, so the
//! pass-through and single-substitution paths dominate.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use reify_resolve::{Resolver, TypeDecl, TypeDeclarations, TypeExpr, TypeShape};

fn nested_array(depth: usize, element: TypeExpr) -> TypeExpr {
    (0..depth).fold(element, |ty, _| TypeExpr::array_of(ty))
}

fn bench_resolve_type(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_type");
    let resolver = Resolver::default();
    let context = TypeExpr::parameterized("Foo", [TypeExpr::raw("String")]);

    group.bench_function("raw_pass_through", |b| {
        let declared = TypeExpr::raw("Integer");
        b.iter(|| resolver.resolve_type(black_box(&declared), black_box(&context)))
    });

    group.bench_function("variable", |b| {
        let declared = TypeExpr::variable("Foo", "A", 0);
        b.iter(|| resolver.resolve_type(black_box(&declared), black_box(&context)))
    });

    for depth in [1, 4, 16] {
        group.bench_with_input(BenchmarkId::new("array_of_variable", depth), &depth, |b, &depth| {
            let declared = nested_array(depth, TypeExpr::variable("Foo", "A", 0));
            b.iter(|| resolver.resolve_type(black_box(&declared), black_box(&context)))
        });
    }

    group.finish();
}

fn bench_resolve_members(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_members");

    // A chain Level0<T> <- Level1<T> <- ... where each level adds one member.
    for levels in [1usize, 4, 8] {
        let declarations: TypeDeclarations = (0..levels)
            .map(|level| {
                let name = format!("Level{}", level);
                let mut decl = TypeDecl::new(name.as_str())
                    .with_param("T")
                    .with_member("value", TypeShape::variable(name.as_str(), "T", 0));
                if level > 0 {
                    decl = decl.with_supertype(TypeExpr::parameterized(
                        format!("Level{}", level - 1),
                        [TypeExpr::variable(name.as_str(), "T", 0)],
                    ));
                }
                decl
            })
            .collect();
        let resolver = Resolver::default().with_declarations(&declarations);
        let context = TypeExpr::parameterized(format!("Level{}", levels - 1), [TypeExpr::raw("String")]);

        group.bench_with_input(BenchmarkId::from_parameter(levels), &context, |b, context| {
            b.iter(|| resolver.resolve_members(black_box(context)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve_type, bench_resolve_members);
criterion_main!(benches);
