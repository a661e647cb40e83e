//! Per-frame pipeline throughput on a synthetic 22-player scene.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgb as Px, RgbImage};
use sva_core::config::AnnotatorConfig;
use sva_core::entity::Detection;
use sva_core::formation::TeamFormationStats;
use sva_core::geometry::{BoundingBox, Point};
use sva_core::{FrameInput, TacticalPipeline};

fn scene() -> (RgbImage, Vec<Detection>) {
    let mut frame = RgbImage::from_pixel(1280, 720, Px([90, 90, 90]));
    let mut detections = Vec::with_capacity(22);

    for i in 0..22u32 {
        let x = 40 + (i % 11) * 110;
        let y = (if i < 11 { 120 } else { 420 }) + (i % 3) * 40;
        let colour = if i < 11 { Px([255, 20, 147]) } else { Px([0, 128, 0]) };
        for py in y..y + 60 {
            for px in x..x + 30 {
                frame.put_pixel(px, py, colour);
            }
        }
        detections.push(Detection::new(
            i as u64,
            BoundingBox::from_corners(x as f32, y as f32, (x + 30) as f32, (y + 60) as f32),
            0.8,
        ));
    }
    (frame, detections)
}

fn bench_process_frame(c: &mut Criterion) {
    let (frame, detections) = scene();
    let ball = Detection::new(99, BoundingBox::from_corners(72.0, 176.0, 78.0, 182.0), 0.9);
    let mut pipeline = TacticalPipeline::new(AnnotatorConfig::default()).expect("default config is valid");

    c.bench_function("process_frame_22_players", |b| {
        b.iter(|| {
            let input = FrameInput::new(&frame, detections.clone(), vec![ball.clone()]);
            black_box(pipeline.process_frame(input))
        })
    });
}

fn bench_formation_stats(c: &mut Criterion) {
    let points: Vec<Point> = (0..11)
        .map(|i| Point::new(100.0 + 150.0 * i as f32, 200.0 + 60.0 * (i % 4) as f32))
        .collect();

    c.bench_function("team_formation_stats_11", |b| {
        b.iter(|| TeamFormationStats::compute(black_box(&points), 250.0, 1920.0, 1080.0))
    });
}

criterion_group!(benches, bench_process_frame, bench_formation_stats);
criterion_main!(benches);
