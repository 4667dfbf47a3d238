// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size, Vec2};
use std::time::Duration;
use understory_photo_view::clamp::clamp_offset;
use understory_photo_view::gesture::GestureEvent;
use understory_photo_view::{PhotoView, PhotoViewConfig, ViewportWidget};

const FRAME: Duration = Duration::from_micros(16_667);

fn expanded_view() -> PhotoView {
    let mut view = PhotoView::new(Size::new(4000.0, 3000.0), PhotoViewConfig::default());
    let _ = view.on_resize(Size::new(1080.0, 1920.0));
    view.on_gesture_event(GestureEvent::DoubleTap {
        position: Point::new(540.0, 960.0),
    });
    let mut now = Duration::ZERO;
    while view.wants_frame() {
        let _ = view.on_frame(now);
        now += FRAME;
    }
    view
}

fn bench_clamp(c: &mut Criterion) {
    let image = Size::new(4000.0, 3000.0);
    let viewport = Size::new(1080.0, 1920.0);
    let offsets: Vec<Vec2> = (0..1_024)
        .map(|i| {
            let t = f64::from(i);
            Vec2::new((t * 37.0) % 5000.0 - 2500.0, (t * 91.0) % 3000.0 - 1500.0)
        })
        .collect();

    c.bench_function("photo_view/clamp_offset_1024", |b| {
        b.iter(|| {
            for &offset in &offsets {
                black_box(clamp_offset(image, viewport, black_box(0.96), offset));
            }
        });
    });
}

fn bench_fling_to_rest(c: &mut Criterion) {
    let mut group = c.benchmark_group("photo_view/fling_to_rest");

    // Frame count grows with ln(|v0|), so even large velocities stay cheap.
    for speed in [500.0_f64, 5_000.0, 50_000.0] {
        group.bench_with_input(BenchmarkId::from_parameter(speed), &speed, |b, &speed| {
            b.iter_batched(
                expanded_view,
                |mut view| {
                    view.on_gesture_event(GestureEvent::FlingStart {
                        velocity: Vec2::new(speed, -speed / 2.0),
                    });
                    let mut now = Duration::from_secs(10);
                    while view.wants_frame() {
                        black_box(view.on_frame(now));
                        now += FRAME;
                    }
                    black_box(view);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_drag_stream(c: &mut Criterion) {
    c.bench_function("photo_view/drag_stream_256", |b| {
        b.iter_batched(
            expanded_view,
            |mut view| {
                for i in 0..256 {
                    let d = if i % 32 < 16 { 12.0 } else { -12.0 };
                    black_box(view.on_gesture_event(GestureEvent::Drag {
                        delta: Vec2::new(d, -d),
                    }));
                }
                black_box(view.on_draw());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_clamp, bench_fling_to_rest, bench_drag_stream);
criterion_main!(benches);
