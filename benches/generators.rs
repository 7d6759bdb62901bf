use criterion::{criterion_group, criterion_main, Criterion};
use treemaze::{
    generators,
    graph::VertexId,
    grids::{rect_grid_graph, RectGridDimensions},
    units::{ColumnsCount, RowsCount},
};

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let g = rect_grid_graph(RectGridDimensions::new(RowsCount(32), ColumnsCount(32)));
    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| generators::recursive_backtracker(&g, VertexId(0), None))
    });
}

fn bench_recursive_backtracker_seeded_maze_100(c: &mut Criterion) {
    let g = rect_grid_graph(RectGridDimensions::new(RowsCount(100), ColumnsCount(100)));
    c.bench_function("recursive_backtracker_seeded_maze_100", move |b| {
        b.iter(|| generators::recursive_backtracker(&g, VertexId(0), Some(42)))
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_seeded_maze_100
);
criterion_main!(benches);
