use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::RgbImage;
use vision_pairs::{
    Contour, ContourFrame, FrameGeometry, FrameProcessor, MemoryTelemetry, ProcessorParams,
};
use vision_pairs_targets::{classify_contours, form_pairs, sort_targets, ClassifierParams};

/// `count` strips alternating `/` and `\` across a 320 px wide frame.
fn alternating_strips(count: usize) -> Vec<Contour> {
    let step = 300.0 / count as f64;
    (0..count)
        .map(|i| {
            let x = 10.0 + i as f64 * step;
            let lean = if i % 2 == 0 { -8.0 } else { 8.0 };
            Contour::from_xy(&[
                (x, 90.0),
                (x + 5.0, 90.0),
                (x + 5.0 + lean, 150.0),
                (x + lean, 150.0),
            ])
        })
        .collect()
}

fn bench_pairing(c: &mut Criterion) {
    let contours = alternating_strips(24);
    let params = ClassifierParams::default();
    c.bench_function("classify_sort_pair_24", |b| {
        b.iter(|| {
            let mut targets = classify_contours(black_box(&contours), false, &params);
            sort_targets(&mut targets, false);
            black_box(form_pairs(&targets).len())
        })
    });
}

fn bench_frame_cycle(c: &mut Criterion) {
    let processor = FrameProcessor::new(
        FrameGeometry::new(320, 240),
        ProcessorParams::default(),
        false,
    );
    let telemetry = MemoryTelemetry::new();
    let contours = alternating_strips(8);
    c.bench_function("frame_cycle_320x240_8", |b| {
        b.iter(|| {
            let frame = ContourFrame {
                contours: contours.clone(),
                image: RgbImage::new(320, 240),
                process_time: Duration::from_millis(2),
            };
            black_box(processor.process(frame, &telemetry))
        })
    });
}

criterion_group!(frame_cycle, bench_pairing, bench_frame_cycle);
criterion_main!(frame_cycle);
