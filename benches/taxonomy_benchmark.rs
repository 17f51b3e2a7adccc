use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use taxosim::ic::{self, IcModelKind};
use taxosim::{DistanceField, EdgeWeighting, MeasureKind, MeasureRegistry, QueryConfig, Taxonomy, VertexId};

// Random multi-parent taxonomy: each vertex picks up to two parents among the
// previous `window` vertices, which keeps depths realistic.
fn random_taxonomy(size: usize, seed: u64) -> Taxonomy {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut t = Taxonomy::with_capacity(size);
    t.add_vertex(0, &[]).expect("root");
    let window = 64u64;
    for id in 1..size as u64 {
        let low = id.saturating_sub(window);
        let mut parents = vec![rng.gen_range(low..id)];
        if id > 2 && rng.gen_bool(0.2) {
            parents.push(rng.gen_range(0..id));
        }
        t.add_vertex(id, &parents).expect("parents exist");
    }
    t.compute_cached_attributes().expect("non-empty");
    ic::annotate(&mut t, IcModelKind::Seco).expect("indexed");
    t
}

fn random_pairs(t: &Taxonomy, count: usize, seed: u64) -> Vec<(VertexId, VertexId)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let n = t.vertex_count();
    (0..count)
        .map(|_| {
            (
                VertexId::from_index(rng.gen_range(0..n)),
                VertexId::from_index(rng.gen_range(0..n)),
            )
        })
        .collect()
}

// Mean and max of (ancspl - exact) / exact over pairs at positive distance.
fn ancspl_relative_error(t: &Taxonomy, pairs: &[(VertexId, VertexId)]) -> (f64, f64) {
    let mut field = DistanceField::with_capacity(t.vertex_count());
    let (mut total, mut max, mut counted) = (0.0, 0.0f64, 0usize);
    for &(x, y) in pairs {
        let exact = t.shortest_path_distance(x, y, EdgeWeighting::Unit, &mut field);
        let fast = t.fast_shortest_path_distance(x, y, EdgeWeighting::Unit, &mut field);
        if exact > 0.0 && exact.is_finite() {
            let error = (fast - exact) / exact;
            total += error;
            max = max.max(error);
            counted += 1;
        }
    }
    (total / counted.max(1) as f64, max)
}

fn bench_exact_vs_ancspl(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise_path_length");
    for size in [1_000usize, 10_000] {
        let t = random_taxonomy(size, 42);
        let pairs = random_pairs(&t, 64, 7);
        let (mean, max) = ancspl_relative_error(&t, &random_pairs(&t, 512, 17));
        println!("ancspl relative error at {size} vertices: mean={mean:.4} max={max:.4}");

        group.bench_with_input(BenchmarkId::new("exact", size), &pairs, |b, pairs| {
            let mut field = DistanceField::with_capacity(size);
            b.iter(|| {
                for &(x, y) in pairs {
                    black_box(t.shortest_path_distance(x, y, EdgeWeighting::Unit, &mut field));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("ancspl", size), &pairs, |b, pairs| {
            let mut field = DistanceField::with_capacity(size);
            b.iter(|| {
                for &(x, y) in pairs {
                    black_box(t.fast_shortest_path_distance(x, y, EdgeWeighting::Unit, &mut field));
                }
            });
        });
    }
    group.finish();
}

fn bench_distance_field_harvest(c: &mut Criterion) {
    let t = random_taxonomy(10_000, 1);
    let source = VertexId::from_index(t.vertex_count() / 2);
    let targets: Vec<VertexId> = t.vertex_ids().step_by(97).collect();

    c.bench_function("distance_field_harvest", |b| {
        let mut field = DistanceField::with_capacity(t.vertex_count());
        b.iter(|| {
            t.compute_distance_field(source, EdgeWeighting::EdgeWeight, &mut field);
            let total: f64 = targets.iter().map(|&v| field.distance(v)).sum();
            black_box(total)
        });
    });
}

fn bench_mica(c: &mut Criterion) {
    let t = random_taxonomy(10_000, 3);
    let pairs = random_pairs(&t, 256, 11);

    c.bench_function("mica", |b| {
        b.iter(|| {
            for &(x, y) in &pairs {
                black_box(t.mica(x, y));
            }
        });
    });
}

fn bench_measures(c: &mut Criterion) {
    let t = random_taxonomy(5_000, 5);
    let pairs = random_pairs(&t, 64, 13);
    let registry = MeasureRegistry::with_defaults();
    let mut group = c.benchmark_group("measure_compare");

    for kind in [MeasureKind::Lin, MeasureKind::JiangConrath, MeasureKind::Rada, MeasureKind::WuPalmer] {
        let measure = registry.build(kind, &t, QueryConfig::default()).expect("registered");
        group.bench_function(format!("{kind:?}"), |b| {
            let mut field = DistanceField::with_capacity(t.vertex_count());
            b.iter(|| {
                for &(x, y) in &pairs {
                    black_box(measure.compare(&t, &mut field, x, y).ok());
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_exact_vs_ancspl,
    bench_distance_field_harvest,
    bench_mica,
    bench_measures
);
criterion_main!(benches);
