//! Benchmarks for DCEL construction and queries.

use criterion::{criterion_group, criterion_main, Criterion};
use dcel::prelude::*;
use nalgebra::Point3;

fn grid(n: usize) -> (Vec<Point3<f64>>, Vec<usize>) {
    let mut positions = Vec::with_capacity((n + 1) * (n + 1));
    let mut indices = Vec::with_capacity(n * n * 6);

    for j in 0..=n {
        for i in 0..=n {
            positions.push(Point3::new(i as f64, j as f64, 0.0));
        }
    }

    for j in 0..n {
        for i in 0..n {
            let v00 = j * (n + 1) + i;
            let v10 = v00 + 1;
            let v01 = v00 + (n + 1);
            let v11 = v01 + 1;

            indices.extend_from_slice(&[v00, v10, v11, v00, v11, v01]);
        }
    }

    (positions, indices)
}

fn bench_construction(c: &mut Criterion) {
    let (positions, indices) = grid(100);

    c.bench_function("build_grid_100x100_parallel", |b| {
        b.iter(|| Dcel::new(&positions, &indices).unwrap());
    });

    let sequential = BuildOptions::default().sequential();
    c.bench_function("build_grid_100x100_sequential", |b| {
        b.iter(|| Dcel::with_options(&positions, &indices, &sequential).unwrap());
    });
}

fn bench_queries(c: &mut Criterion) {
    let (positions, indices) = grid(100);
    let dcel = Dcel::new(&positions, &indices).unwrap();

    c.bench_function("adjacent_faces_all", |b| {
        b.iter(|| {
            dcel.face_ids()
                .map(|f| dcel.adjacent_faces(f).iter().flatten().count())
                .sum::<usize>()
        });
    });

    c.bench_function("face_vertices_all", |b| {
        b.iter(|| {
            dcel.face_ids()
                .map(|f| dcel.face_vertices(f)[0].index())
                .sum::<usize>()
        });
    });
}

criterion_group!(benches, bench_construction, bench_queries);
criterion_main!(benches);
