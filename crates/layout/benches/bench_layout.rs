use std::hint::black_box;
use std::time::Instant;

use glam::DVec2;
use tilefield_common::Viewport;
use tilefield_layout::{
    ColumnSpeed, ImageCatalog, LayoutConfig, SizingMode, TileArena, compute_grid_config,
    compute_layout,
};

fn make_catalog(len: usize) -> ImageCatalog {
    ImageCatalog::new((0..len).map(|i| format!("image_{i}.jpg")).collect())
        .expect("non-empty catalog")
}

fn make_layout(cell: f64) -> LayoutConfig {
    LayoutConfig::new(SizingMode::Fixed {
        cell_width: cell,
        cell_height: cell,
        gap_x: cell / 30.0,
        gap_y: cell / 30.0,
    })
}

fn bench_compute_layout(cell: f64, iterations: usize) {
    let viewport = Viewport::new(16.0, 9.0, 1920, 1080);
    let layout = make_layout(cell);
    let grid = compute_grid_config(&viewport, &layout).expect("valid grid");
    let catalog = make_catalog(22);

    let start = Instant::now();
    for i in 0..iterations {
        let offset = DVec2::new(i as f64 * 0.05, i as f64 * -0.03);
        let _ = black_box(compute_layout(
            black_box(&grid),
            &ColumnSpeed::default(),
            black_box(offset),
            &catalog,
        ));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  compute_layout ({} tiles, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        grid.tile_count()
    );
}

fn bench_arena_relayout(cell: f64, iterations: usize) {
    let viewport = Viewport::new(16.0, 9.0, 1920, 1080);
    let layout = make_layout(cell);
    let grid = compute_grid_config(&viewport, &layout).expect("valid grid");
    let catalog = make_catalog(22);
    let mut arena = TileArena::new(&grid, &catalog);

    let start = Instant::now();
    for i in 0..iterations {
        let offset = DVec2::new(i as f64 * 0.05, i as f64 * -0.03);
        arena.relayout(&grid, &ColumnSpeed::default(), black_box(offset));
        black_box(arena.placements());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  arena relayout ({} tiles, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        arena.len()
    );
}

fn bench_grid_config(iterations: usize) {
    let layout = make_layout(1.0);
    let start = Instant::now();
    for i in 0..iterations {
        let viewport = Viewport::new(8.0 + (i % 100) as f64 * 0.1, 9.0, 1920, 1080);
        let _ = black_box(compute_grid_config(black_box(&viewport), &layout));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  grid config ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Layout Benchmarks ===\n");

    println!("Fresh layout per frame:");
    bench_compute_layout(3.0, 10000);
    bench_compute_layout(0.5, 1000);
    bench_compute_layout(0.1, 100);

    println!("\nArena relayout (reused buffer):");
    bench_arena_relayout(3.0, 10000);
    bench_arena_relayout(0.5, 1000);
    bench_arena_relayout(0.1, 100);

    println!("\nViewport sizing:");
    bench_grid_config(100000);

    println!("\n=== Done ===");
}
