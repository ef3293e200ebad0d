use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use reify_compiler::TypeDescriptorBuilder;
use reify_types::{ClassKind, ResolvedType, TypeContext, TypeParameter, TypeProjection};

fn bench_simple(c: &mut Criterion) {
    let mut ctx = TypeContext::new();
    let list = ctx.declare_class("List", ClassKind::Interface).unwrap();
    let string = ctx.declare_class("String", ClassKind::Class).unwrap();
    let ty = ResolvedType::class(
        list,
        vec![TypeProjection::invariant(ResolvedType::class(string, vec![]))],
    );
    let builder = TypeDescriptorBuilder::new(&ctx);

    c.bench_function("lower_list_of_string", |b| {
        b.iter(|| builder.build(black_box(&ty)).unwrap());
    });
}

fn bench_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting");

    let mut ctx = TypeContext::new();
    let list = ctx.declare_class("List", ClassKind::Interface).unwrap();
    let string = ctx.declare_class("String", ClassKind::Class).unwrap();

    for depth in [1usize, 8, 32] {
        let mut ty = ResolvedType::class(string, vec![]);
        for _ in 0..depth {
            ty = ResolvedType::class(list, vec![TypeProjection::covariant(ty)]);
        }
        let builder = TypeDescriptorBuilder::new(&ctx);
        group.bench_with_input(BenchmarkId::new("list_of", depth), &ty, |b, ty| {
            b.iter(|| builder.build(black_box(ty)).unwrap());
        });
    }

    group.finish();
}

fn bench_recursive_bounds(c: &mut Criterion) {
    let mut ctx = TypeContext::new();
    let comparable = ctx.declare_class("Comparable", ClassKind::Interface).unwrap();
    let pair = ctx.declare_class("Pair", ClassKind::Class).unwrap();
    let t = ctx.declare_type_parameter(TypeParameter::new("T")).unwrap();
    let bound = ResolvedType::class(
        comparable,
        vec![TypeProjection::invariant(ResolvedType::type_parameter(t))],
    );
    ctx.set_upper_bounds(t, vec![bound]).unwrap();

    let ty = ResolvedType::class(
        pair,
        vec![
            TypeProjection::invariant(ResolvedType::type_parameter(t)),
            TypeProjection::invariant(ResolvedType::type_parameter(t)),
        ],
    );
    let builder = TypeDescriptorBuilder::new(&ctx);

    c.bench_function("lower_self_bounded_pair", |b| {
        b.iter(|| builder.build(black_box(&ty)).unwrap());
    });
}

criterion_group!(benches, bench_simple, bench_nesting, bench_recursive_bounds);
criterion_main!(benches);
