/// Resampling Benchmarks
///
/// Measures the two randomized hot loops: streaming trial means of the CLT
/// simulation, and the label-permutation loop of the permutation test.
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use statreport::dataset::{Dataset, Dose};
use statreport::inference::permutation_test;
use statreport::random::RandomSource;
use statreport::simulation::{simulate_trial_means, Exponential};

fn bench_trial_means(c: &mut Criterion) {
    let mut group = c.benchmark_group("trial_means");
    let dist = Exponential::new(0.2).unwrap();

    for trials in [1_000usize, 10_000, 100_000] {
        group.throughput(Throughput::Elements((trials * 40) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(trials), &trials, |b, &trials| {
            let mut rng = RandomSource::seeded(42);
            b.iter(|| simulate_trial_means(&mut rng, black_box(&dist), trials, 40).unwrap());
        });
    }

    group.finish();
}

fn bench_permutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation_test");
    let data = Dataset::tooth_growth();
    let dose = Dose::new(0.5).unwrap();
    let a = data.values_for("OJ", dose);
    let b = data.values_for("VC", dose);

    for permutations in [1_000usize, 10_000] {
        group.throughput(Throughput::Elements(permutations as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(permutations),
            &permutations,
            |bench, &permutations| {
                let mut rng = RandomSource::seeded(42);
                bench.iter(|| {
                    let (a, b) = (black_box(&a), black_box(&b));
                    permutation_test(&mut rng, "dose 0.5", a, b, permutations).unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_trial_means, bench_permutation);
criterion_main!(benches);
