use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use xy_chart::api::{LineSeriesProps, ScaleSpec};
use xy_chart::axis::AxisProps;
use xy_chart::core::{
    DataPoint, DataValue, MissingValuePolicy, ScaleConfig, ScaleDomain, TickOptions, Viewport,
    generate_ticks, project_line_path, resolve,
};
use xy_chart::render::NullRenderer;
use xy_chart::{ChartElement, ChartEngine, XyChartConfig};

fn series(len: usize) -> Vec<DataPoint> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            if i % 97 == 0 {
                DataPoint::missing(t)
            } else {
                DataPoint::new(t, 100.0 + (t * 0.01).sin() * 40.0)
            }
        })
        .collect()
}

fn bench_scale_resolve_and_map(c: &mut Criterion) {
    let linear = ScaleConfig::linear(0.0, 10_000.0)
        .with_range(0.0, 1920.0)
        .with_nice(true);
    let categories: Vec<String> = (0..64).map(|i| format!("c{i}")).collect();
    let band = ScaleConfig::band(categories).with_range(0.0, 1920.0);

    c.bench_function("linear_scale_resolve_map", |b| {
        b.iter(|| {
            let scale = resolve(black_box(&linear)).expect("valid scale");
            let _ = scale.map_number(black_box(4_321.123));
        })
    });

    let resolved_band = resolve(&band).expect("valid band scale");
    let key = DataValue::category("c42");
    c.bench_function("band_scale_map", |b| {
        b.iter(|| {
            let _ = resolved_band.map(black_box(&key));
        })
    });
}

fn bench_generate_ticks(c: &mut Criterion) {
    let scale = resolve(&ScaleConfig::linear(-3.7, 9_871.2).with_range(1080.0, 0.0))
        .expect("valid scale");
    let options = TickOptions::default().with_count(10);

    c.bench_function("generate_linear_ticks", |b| {
        b.iter(|| {
            let _ = generate_ticks(black_box(&scale), black_box(&options));
        })
    });
}

fn bench_line_projection_10k(c: &mut Criterion) {
    let data = series(10_000);
    let x = resolve(&ScaleConfig::linear(0.0, 10_000.0).with_range(0.0, 1920.0))
        .expect("valid x scale");
    let y =
        resolve(&ScaleConfig::linear(0.0, 200.0).with_range(1080.0, 0.0)).expect("valid y scale");

    c.bench_function("line_projection_10k", |b| {
        b.iter(|| {
            let _ = project_line_path(
                black_box(&data),
                black_box(&x),
                black_box(&y),
                MissingValuePolicy::Gap,
            );
        })
    });
}

fn bench_engine_render_2k(c: &mut Criterion) {
    let config = XyChartConfig::new(Viewport::new(1600, 900))
        .with_x_scale(ScaleSpec::linear())
        .with_y_scale(ScaleSpec::linear().with_domain(ScaleDomain::Continuous {
            min: 0.0,
            max: 200.0,
        }));
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_elements(vec![
        ChartElement::LineSeries(LineSeriesProps::new("bench", series(2_000))),
        ChartElement::XAxis(AxisProps::new()),
        ChartElement::YAxis(AxisProps::new()),
    ]);

    c.bench_function("engine_render_2k_cached", |b| {
        b.iter(|| {
            engine.render().expect("render");
        })
    });

    c.bench_function("engine_pointer_move_2k", |b| {
        b.iter(|| {
            let _ = engine.pointer_move(black_box(800.0), black_box(450.0));
        })
    });
}

criterion_group!(
    benches,
    bench_scale_resolve_and_map,
    bench_generate_ticks,
    bench_line_projection_10k,
    bench_engine_render_2k
);
criterion_main!(benches);
