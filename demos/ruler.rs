use gpui::{AppContext, Application, Bounds, Focusable, WindowBounds, WindowOptions, px, size};

use gpui_ruler::{
    AxisConfig, Color, GpuiRulerView, LineStyle, MarkerStyle, Plot, Range, RulerConfig, Series,
    SeriesKind, Viewport,
};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(720.0), px(480.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let series = Series::from_xy(
                "reference",
                [0.0, 1.0, 2.0, 3.0, 4.0],
                [0.0, 1.0, -3.0, 5.0, -3.0],
                SeriesKind::Line(LineStyle {
                    color: Color::new(0.2, 0.45, 0.8, 1.0),
                    width: 2.0,
                    ..LineStyle::default()
                }),
            );

            let plot = Plot::builder()
                .x_axis(AxisConfig::linear().with_title("x"))
                .y_axis(AxisConfig::linear().with_title("y"))
                .viewport(Viewport::new(Range::new(0.0, 5.0), Range::new(-5.0, 5.0)))
                .series(series)
                .build();

            let defaults = RulerConfig::default();
            let config = RulerConfig {
                line_style: LineStyle {
                    color: Color::RED,
                    ..defaults.line_style
                },
                marker_style: MarkerStyle {
                    edge_color: Some(Color::RED),
                    ..defaults.marker_style
                },
                ..defaults
            };

            cx.new(|cx| {
                let view = GpuiRulerView::new(plot, config, cx)
                    .expect("reference viewport is valid");
                window.focus(&view.focus_handle(cx));
                view
            })
        })
        .unwrap();
    });
}
