use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gpui_timechart::{
    ChartConfig, ChartRenderer, Color, ScreenRect, Series, SeriesGroup, TimeRange,
};

fn build_chart(samples: i64) -> ChartRenderer {
    let series = (0..4)
        .map(|index| {
            let phase = index as f64 * 0.7;
            Series::from_pairs(
                format!("series-{index}"),
                Color::new(0.2 * index as f32, 0.6, 0.9, 1.0),
                (0..samples).map(|i| {
                    let t = i as f64 * 0.01 + phase;
                    (i * 1_000, 50.0 + 40.0 * t.sin())
                }),
            )
            .expect("valid series")
        })
        .collect();
    let mut chart = ChartRenderer::builder()
        .config(ChartConfig::default())
        .bounds(ScreenRect::from_origin_size(0.0, 0.0, 800.0, 500.0))
        .build();
    chart.set_data(SeriesGroup::new(series).expect("non-empty group"));
    chart
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_pass");
    for &n in &[10_000i64, 100_000i64] {
        group.bench_function(format!("full_{n}"), |b| {
            let mut chart = build_chart(n);
            b.iter(|| black_box(chart.render()));
        });
        group.bench_function(format!("window_{n}"), |b| {
            let mut chart = build_chart(n);
            chart
                .set_time_range(
                    TimeRange {
                        from: n * 400,
                        to: n * 600,
                    },
                    false,
                )
                .expect("valid time range");
            b.iter(|| black_box(chart.render()));
        });
        group.bench_function(format!("animated_{n}"), |b| {
            let mut chart = build_chart(n);
            let mut now = Duration::ZERO;
            let mut visible = false;
            b.iter(|| {
                if !chart.is_animating() {
                    chart.set_visible(1, visible);
                    visible = !visible;
                }
                now += Duration::from_millis(16);
                chart.tick(now);
                black_box(chart.render())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
