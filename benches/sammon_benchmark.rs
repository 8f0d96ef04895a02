use criterion::measurement::Measurement;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::distr::{Distribution, Uniform};
use rand::{rngs::StdRng, SeedableRng};
use sammon_map::{DistanceMatrix, Sammon};
use std::time::Duration;

#[derive(Clone)]
pub struct SammonBenchConfig {
    seed: u64,
    // (points, dimensions)
    data_sizes: Vec<(usize, usize)>,
    max_iterations: usize,
    measurement_time: u64,
    sample_size: usize,
}

impl Default for SammonBenchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            data_sizes: vec![(50, 10), (200, 10), (200, 100), (500, 50)],
            max_iterations: 20,
            measurement_time: 10,
            sample_size: 10,
        }
    }
}

fn create_test_data(rows: usize, cols: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let value_dist = Uniform::try_from(-1.0..1.0).unwrap();
    Array2::from_shape_fn((rows, cols), |_| value_dist.sample(&mut rng))
}

fn configure_group<'a, M: Measurement>(
    c: &'a mut Criterion<M>,
    name: &str,
    config: &SammonBenchConfig,
) -> BenchmarkGroup<'a, M> {
    let mut group = c.benchmark_group(name);
    group.measurement_time(Duration::from_secs(config.measurement_time));
    group.sample_size(config.sample_size);
    group
}

pub fn bench_distance_matrix(c: &mut Criterion) {
    let config = SammonBenchConfig::default();
    let mut group = configure_group(c, "Distance_Matrix", &config);

    for &(rows, cols) in config.data_sizes.iter() {
        let seed = config.seed + (rows * cols) as u64;
        let data = create_test_data(rows, cols, seed);

        group.bench_with_input(
            BenchmarkId::new("euclidean", format!("{}x{}", rows, cols)),
            &(rows, cols),
            |b, _| {
                b.iter(|| DistanceMatrix::from_points(data.view()));
            },
        );
    }
    group.finish();
}

pub fn bench_sammon_fit(c: &mut Criterion) {
    let config = SammonBenchConfig::default();
    let mut group = configure_group(c, "Sammon_Fit", &config);

    for &(rows, cols) in config.data_sizes.iter() {
        let seed = config.seed + (rows * cols) as u64;
        let data = create_test_data(rows, cols, seed);
        let sammon = Sammon::builder()
            .max_iterations(config.max_iterations)
            .random_seed(seed)
            .build();

        group.bench_with_input(
            BenchmarkId::new("fixed_iterations", format!("{}x{}", rows, cols)),
            &(rows, cols),
            |b, _| {
                b.iter(|| sammon.fit(data.view()).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(sammon_benches, bench_distance_matrix, bench_sammon_fit);
criterion_main!(sammon_benches);
