// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Size};
use understory_placement::{ArrowDirections, PlacementConfig, PlacementRequest, compute};
use understory_popover::touch::{OutsideTouchDetector, PointerEvent};

/// Anchors spread over the display, n per axis.
fn gen_anchor_grid(n: usize, display: Rect) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    let step_x = display.width() / n as f64;
    let step_y = display.height() / n as f64;
    for y in 0..n {
        for x in 0..n {
            let origin = Point::new(x as f64 * step_x, y as f64 * step_y);
            out.push(Rect::from_origin_size(origin, (20.0, 20.0)));
        }
    }
    out
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    let config = PlacementConfig::default();
    let display = Rect::new(0.0, 0.0, 1024.0, 768.0);
    for (label, content) in [
        ("fits", Size::new(200.0, 150.0)),
        ("clipped", Size::new(900.0, 700.0)),
    ] {
        let anchors = gen_anchor_grid(16, display);
        group.throughput(Throughput::Elements(anchors.len() as u64));
        for (dirs_label, dirs) in [
            ("any", ArrowDirections::ANY),
            ("horizontal", ArrowDirections::HORIZONTAL),
        ] {
            group.bench_function(format!("{label}_{dirs_label}"), |b| {
                b.iter(|| {
                    for &anchor in &anchors {
                        let request = PlacementRequest::new(content, anchor, display, dirs);
                        let _ = black_box(compute(&config, &request));
                    }
                });
            });
        }
    }
    group.finish();
}

fn bench_update_rotation(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    let config = PlacementConfig::default();
    let landscape = Rect::new(0.0, 0.0, 1024.0, 768.0);
    let portrait = Rect::new(0.0, 0.0, 768.0, 1024.0);
    let anchor = Rect::from_origin_size((700.0, 20.0), (44.0, 44.0));
    let request = PlacementRequest::new(
        Size::new(320.0, 240.0),
        anchor,
        landscape,
        ArrowDirections::ANY,
    );
    let Ok(start) = compute(&config, &request) else {
        return;
    };
    group.bench_function("rotate_back_and_forth", |b| {
        b.iter(|| {
            let turned = PlacementRequest {
                display_area: portrait,
                ..request
            };
            let p = start.update(&config, &turned);
            black_box(p.map(|p| p.update(&config, &request)))
        });
    });
    group.finish();
}

fn bench_outside_touch(c: &mut Criterion) {
    let mut group = c.benchmark_group("outside_touch");
    for &regions in &[0usize, 8, 64] {
        let passthrough: Vec<Rect> = (0..regions)
            .map(|i| Rect::from_origin_size((i as f64 * 10.0, 0.0), (8.0, 8.0)))
            .collect();
        let points: Vec<Point> = gen_anchor_grid(32, Rect::new(0.0, 0.0, 1024.0, 768.0))
            .iter()
            .map(|r| r.center())
            .collect();
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("classify_regions{regions}"), |b| {
            b.iter_batched(
                || {
                    let mut d = OutsideTouchDetector::new(Rect::new(300.0, 200.0, 700.0, 500.0));
                    d.set_passthrough_regions(&passthrough);
                    d
                },
                |d| {
                    for &p in &points {
                        black_box(d.handle_pointer(PointerEvent::down(p)));
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compute, bench_update_rotation, bench_outside_touch);
criterion_main!(benches);
