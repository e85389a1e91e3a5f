use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use popup_placer::memory::MemorySurface;
use popup_placer::render::render_svg;
use popup_placer::scenario::parse_scenario;
use popup_placer::theme::Theme;
use popup_placer::{LastResort, Placement, Positioner, Rect, Settings, Size, Strategy};
use std::hint::black_box;

struct Case {
    name: &'static str,
    anchor: Rect,
    panel: Size,
    viewport: Size,
    settings: Settings,
}

fn cases() -> Vec<Case> {
    vec![
        Case {
            name: "fits_first_try",
            anchor: Rect::new(200.0, 300.0, 60.0, 20.0),
            panel: Size::new(120.0, 40.0),
            viewport: Size::new(800.0, 600.0),
            settings: Settings::default(),
        },
        Case {
            name: "opposite_flip",
            anchor: Rect::new(10.0, 100.0, 40.0, 20.0),
            panel: Size::new(80.0, 30.0),
            viewport: Size::new(400.0, 300.0),
            settings: Settings::default(),
        },
        Case {
            name: "adjacent_walk",
            anchor: Rect::new(100.0, 330.0, 60.0, 20.0),
            panel: Size::new(80.0, 30.0),
            viewport: Size::new(400.0, 300.0),
            settings: Settings {
                position: Placement::BOTTOM_LEFT,
                prefer: Strategy::Adjacent,
                ..Default::default()
            },
        },
        Case {
            name: "exhausted_unplaceable",
            anchor: Rect::new(40.0, 40.0, 20.0, 20.0),
            panel: Size::new(300.0, 300.0),
            viewport: Size::new(100.0, 100.0),
            settings: Settings::default(),
        },
        Case {
            name: "exhausted_last_resort",
            anchor: Rect::new(40.0, 40.0, 20.0, 20.0),
            panel: Size::new(300.0, 300.0),
            viewport: Size::new(100.0, 100.0),
            settings: Settings {
                last_resort: LastResort::Fixed(Placement::BOTTOM_CENTER),
                ..Default::default()
            },
        },
    ]
}

fn bench_compute_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_position");
    for case in cases() {
        let surface = MemorySurface::in_window(case.anchor, case.panel, case.viewport);
        group.bench_with_input(BenchmarkId::from_parameter(case.name), &case, |b, case| {
            let mut positioner = Positioner::new(case.settings.clone()).expect("valid settings");
            b.iter(|| {
                let mut surface = surface.clone();
                let report = positioner
                    .compute_position(black_box(&mut surface), None)
                    .expect("position failed");
                black_box(report.attempts.len());
            });
        });
    }
    group.finish();
}

fn bench_search_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_depth");
    let surface = MemorySurface::in_window(
        Rect::new(40.0, 40.0, 20.0, 20.0),
        Size::new(300.0, 300.0),
        Size::new(100.0, 100.0),
    );
    for depth in [0u32, 4, 15, 64] {
        let settings = Settings {
            max_search_depth: depth,
            ..Default::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(depth), &settings, |b, settings| {
            let mut positioner = Positioner::new(settings.clone()).expect("valid settings");
            b.iter(|| {
                let mut surface = surface.clone();
                let report = positioner
                    .compute_position(&mut surface, None)
                    .expect("position failed");
                black_box(report.is_placed());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let theme = Theme::light();
    let input = r#"{
        settings: { position: "top center", prefer: "opposite" },
        surface: {
            anchor: { top: 12, left: 180, width: 60, height: 24 },
            panel: { width: 160, height: 48 },
            boundary: { kind: "window", viewport: { width: 480, height: 320 } },
        },
    }"#;
    group.bench_function("scenario_to_svg", |b| {
        b.iter(|| {
            let scenario = parse_scenario(black_box(input)).expect("parse failed");
            let (surface, report) = scenario.run().expect("run failed");
            let svg = render_svg(&surface, &report, &theme);
            black_box(svg.len());
        });
    });
    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_compute_position, bench_search_depth, bench_end_to_end
);
criterion_main!(benches);
