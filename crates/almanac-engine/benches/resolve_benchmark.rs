// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use almanac_core::math::interval::Interval;
use almanac_engine::engine::{minimum_start, resolve};
use almanac_engine::solver::SolverBuilder;
use almanac_model::almanac::{Almanac, AlmanacBuilder};
use almanac_model::category::{LOCATION, SEED};
use almanac_model::category_map::CategoryMap;
use almanac_model::loading::AlmanacLoader;
use almanac_model::range_map::RangeMap;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;
use std::path::{Path, PathBuf};

const CATEGORIES: [&str; 8] = [
    "seed",
    "soil",
    "fertilizer",
    "water",
    "light",
    "temperature",
    "humidity",
    "location",
];

fn find_sample() -> Option<PathBuf> {
    let mut cur: Option<&Path> = Some(Path::new(env!("CARGO_MANIFEST_DIR")));
    while let Some(p) = cur {
        let cand = p.join("data").join("sample.txt");
        if cand.is_file() {
            return Some(cand);
        }
        cur = p.parent();
    }
    None
}

/// Builds an almanac with `num_seeds` seed ranges and `rules_per_map` disjoint
/// rules in each of the seven maps, shaped like real puzzle inputs.
fn synthetic_almanac(num_seeds: usize, rules_per_map: usize) -> Almanac<i64> {
    let mut rng = StdRng::seed_from_u64(2023);
    let mut bldr = AlmanacBuilder::new();

    for _ in 0..num_seeds {
        let start = rng.random_range(0..4_000_000_000_i64);
        bldr.add_seed(Interval::new(start, start + rng.random_range(1..200_000_000)));
    }

    for pair in CATEGORIES.windows(2) {
        let mut rules = Vec::with_capacity(rules_per_map);
        let mut cursor = 0_i64;
        for _ in 0..rules_per_map {
            let len = rng.random_range(1..150_000_000);
            let dst = rng.random_range(0..4_000_000_000_i64);
            rules.push(RangeMap::from_triple(dst, cursor, len).unwrap());
            cursor += len + rng.random_range(0..10_000_000);
        }
        bldr.add_category_map(CategoryMap::with_rules(pair[0], pair[1], rules));
    }
    bldr.build()
}

fn bench_sample(c: &mut Criterion) {
    let Some(path) = find_sample() else {
        eprintln!("No data/sample.txt found. Skipping sample benchmark.");
        return;
    };
    let almanac = AlmanacLoader::<i64>::new()
        .from_path(&path)
        .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));

    c.bench_function("resolve_sample", |b| {
        b.iter(|| {
            let out = resolve(
                black_box(almanac.seeds().to_vec()),
                SEED,
                black_box(almanac.chain()),
                LOCATION,
            )
            .unwrap();
            minimum_start(&out).unwrap()
        })
    });
}

fn bench_synthetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_synthetic");

    for &(seeds, rules) in &[(10, 30), (10, 50), (100, 50)] {
        let almanac = synthetic_almanac(seeds, rules);
        group.throughput(Throughput::Elements(seeds as u64));

        for threads in [1, 4] {
            let solver = SolverBuilder::new().with_threads(threads).build();
            group.bench_with_input(
                BenchmarkId::new(format!("{}x{}", seeds, rules), threads),
                &almanac,
                |b, almanac| b.iter(|| solver.solve(black_box(almanac)).unwrap().minimum()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sample, bench_synthetic);
criterion_main!(benches);
