//! Benchmarks for island partitioning.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Point3;
use splinter::algo::partition::build_canonical_map;
use splinter::prelude::*;

/// Grid of n x n quads, split into `pieces` horizontal bands that share no
/// vertices with each other.
fn create_banded_grid(n: usize, pieces: usize) -> IndexedMesh {
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let rows = n / pieces;

    for p in 0..pieces {
        let base = vertices.len();
        for j in 0..=rows {
            for i in 0..=n {
                vertices.push(Point3::new(i as f64, (p * (rows + 2) + j) as f64, 0.0));
            }
        }
        for j in 0..rows {
            for i in 0..n {
                let v00 = base + j * (n + 1) + i;
                let v10 = v00 + 1;
                let v01 = v00 + (n + 1);
                let v11 = v01 + 1;

                faces.push([v00, v10, v11]);
                faces.push([v00, v11, v01]);
            }
        }
    }

    build_from_triangles(&vertices, &faces).unwrap()
}

fn bench_weld(c: &mut Criterion) {
    let mesh = create_banded_grid(100, 1);
    let indices = mesh.submesh(SubMeshId::new(0));

    c.bench_function("canonical_map_grid_100", |b| {
        b.iter(|| build_canonical_map(mesh.positions(), indices.iter().map(|&i| i as usize)))
    });
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_grid_50");
    for pieces in [1, 10] {
        let mesh = create_banded_grid(50, pieces);
        for strategy in [Strategy::Greedy, Strategy::UnionFind] {
            let options = PartitionOptions::default()
                .with_strategy(strategy)
                .sequential();
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", strategy), pieces),
                &mesh,
                |b, mesh| b.iter(|| partition(mesh, &options).unwrap()),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_weld, bench_strategies);
criterion_main!(benches);
