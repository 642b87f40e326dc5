use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};

use gpui_timechart::gpui_backend::GpuiChartView;
use gpui_timechart::{
    ChartConfig, ChartRenderer, Color, Series, SeriesGroup, Theme, TimeRange,
};

const DAY_MS: i64 = 86_400_000;

fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(720.0), px(480.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |_window, cx| {
            let joined = Series::from_pairs(
                "joined",
                Color::from_rgb8(0x3c, 0xc2, 0x3f),
                (0..120).map(|day| {
                    let t = day as f64 * 0.12;
                    (day * DAY_MS, 60.0 + 40.0 * t.sin() + day as f64 * 0.5)
                }),
            )
            .unwrap();
            let left = Series::from_pairs(
                "left",
                Color::from_rgb8(0xf3, 0x4c, 0x44),
                (0..120).map(|day| {
                    let t = day as f64 * 0.09;
                    (day * DAY_MS, 30.0 + 20.0 * t.cos())
                }),
            )
            .unwrap();
            let group = SeriesGroup::new(vec![joined, left]).unwrap();

            let mut chart = ChartRenderer::builder()
                .config(ChartConfig::default())
                .theme(Theme::dark())
                .build();
            chart.set_data(group);

            let view = GpuiChartView::new(chart);
            let handle = view.chart_handle();
            handle.write(|chart| {
                let _ = chart.set_time_range(
                    TimeRange {
                        from: 60 * DAY_MS,
                        to: 119 * DAY_MS,
                    },
                    true,
                );
            });
            cx.new(|_| view)
        })
        .unwrap();
    });
}
