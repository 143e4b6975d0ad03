//! Neighbor-vote pass benchmarks.
//!
//! Measures a full vote pass with the brute-force index at varying K, on a
//! noisy two-class cloud. Dominated by the O(n²) neighbor scans; an
//! accelerated host index shifts the balance toward the tally itself.

use cloud_filters::{BruteForceIndex, NeighborVote, PointCloud, CLASSIFICATION};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn noisy_cloud(count: usize, seed: u64) -> PointCloud {
  let mut rng = StdRng::seed_from_u64(seed);
  let mut cloud = PointCloud::new();
  let dim = cloud.add_dim(CLASSIFICATION);
  for _ in 0..count {
    let id = cloud.append(DVec3::new(
      rng.random_range(0.0..100.0),
      rng.random_range(0.0..100.0),
      rng.random_range(0.0..10.0),
    ));
    // Mostly ground with scattered misclassifications
    let class = if rng.random_bool(0.9) { 2.0 } else { 7.0 };
    cloud.set_attr(id, dim, class);
  }
  cloud
}

fn bench_vote_pass(c: &mut Criterion) {
  let mut group = c.benchmark_group("vote_pass");
  group.sample_size(20);

  let cloud = noisy_cloud(2_000, 7);
  let index = BruteForceIndex::build(&cloud);

  for &k in &[4usize, 8, 16] {
    let prepared = NeighborVote::new(k).prepare(&cloud).unwrap();
    group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, _| {
      b.iter(|| {
        let mut working = cloud.clone();
        black_box(prepared.run(&mut working, &index));
      });
    });
  }

  group.finish();
}

criterion_group!(benches, bench_vote_pass);
criterion_main!(benches);
