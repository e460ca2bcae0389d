//! Benchmarks for registry construction and path resolution.
//!
//! These benchmarks measure the performance of:
//! - Registry building and duplicate validation
//! - BFS path resolution over linear chains
//! - BFS path resolution over wide, branching version graphs

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use migraph::migrator::FnMigrator;
use migraph::pathfinder::find_path;
use migraph::registry::{MigratorRegistry, RegistryBuilder};
use migraph::types::Version;

fn stamped(from: String, to: String) -> FnMigrator {
    let stamp = to.clone();
    FnMigrator::new(from, to, move |mut doc| {
        doc.set_version(stamp.clone());
        Ok(doc)
    })
}

/// Build a linear chain: v0 -> v1 -> ... -> vn
fn build_linear_chain(hops: usize) -> RegistryBuilder {
    let mut builder = RegistryBuilder::new();
    for i in 0..hops {
        builder = builder.add_migrator(stamped(format!("v{i}"), format!("v{}", i + 1)));
    }
    builder
}

/// Build a layered DAG: `depth` layers of `width` versions, each version
/// connected to one version of the next layer plus a shared spine, so BFS
/// has real branching to wade through.
fn build_layered_graph(depth: usize, width: usize) -> RegistryBuilder {
    let mut builder = RegistryBuilder::new();
    for layer in 0..depth.saturating_sub(1) {
        for node in 0..width {
            builder = builder.add_migrator(stamped(
                format!("L{layer}N{node}"),
                format!("L{}N{}", layer + 1, node % width),
            ));
            if node == 0 {
                // Spine edge fanning out across the next layer.
                for target in 1..width {
                    builder = builder.add_migrator(stamped(
                        format!("L{layer}N0"),
                        format!("L{}N{target}", layer + 1),
                    ));
                }
            }
        }
    }
    builder
}

fn bench_registry_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_build");

    for hops in [10, 100, 500] {
        group.bench_with_input(BenchmarkId::new("linear", hops), &hops, |b, &hops| {
            b.iter(|| {
                build_linear_chain(hops)
                    .build()
                    .expect("chain has no duplicates")
            });
        });
    }

    group.finish();
}

fn bench_find_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_path");

    for hops in [10, 100, 500] {
        let registry: MigratorRegistry = build_linear_chain(hops).build().unwrap();
        let start = Version::new("v0");
        let target = Version::new(format!("v{hops}"));

        group.bench_with_input(
            BenchmarkId::new("linear", hops),
            &registry,
            |b, registry| {
                b.iter(|| find_path(&start, &target, registry).expect("path exists"));
            },
        );
    }

    for (depth, width) in [(5, 10), (10, 10), (5, 20)] {
        let registry: MigratorRegistry = build_layered_graph(depth, width).build().unwrap();
        let start = Version::new("L0N0");
        let target = Version::new(format!("L{}N0", depth - 1));

        group.bench_with_input(
            BenchmarkId::new("layered", format!("{depth}x{width}")),
            &registry,
            |b, registry| {
                b.iter(|| find_path(&start, &target, registry).expect("path exists"));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_registry_build, bench_find_path);
criterion_main!(benches);
