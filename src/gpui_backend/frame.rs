use gpui::{Bounds, Pixels};
use log::{debug, trace};

use crate::geom::{Point as DataPoint, ScreenPoint, ScreenRect};
use crate::plot::Plot;
use crate::render::{
    Color, LineSegment, LineStyle, RectStyle, RenderCacheKey, RenderCommand, RenderList,
    TextMeasurer, TextStyle, build_line_segments, build_scatter_points,
};
use crate::ruler::Ruler;
use crate::series::SeriesKind;
use crate::surface::Surface;
use crate::view::Viewport;

use super::config::ViewConfig;

#[derive(Debug, Clone, Default)]
pub(crate) struct RulerFrame {
    pub(crate) background: RenderList,
    pub(crate) overlay: RenderList,
}

/// Screen regions of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrameLayout {
    pub(crate) plot: ScreenRect,
    pub(crate) x_axis: ScreenRect,
    pub(crate) y_axis: ScreenRect,
}

pub(crate) fn build_frame(
    plot: &Plot,
    ruler: &mut Ruler,
    config: &ViewConfig,
    bounds: Bounds<Pixels>,
    measurer: &dyn TextMeasurer,
) -> RulerFrame {
    let full = ScreenRect::from_origin_size(
        ScreenPoint::new(f32::from(bounds.origin.x), f32::from(bounds.origin.y)),
        (f32::from(bounds.size.width), f32::from(bounds.size.height)),
    );
    compose_frame(plot, ruler, config, full, measurer)
}

/// Lay out the plot in `full`, then reuse or rebuild the background and
/// append the ruler overlay.
pub(crate) fn compose_frame(
    plot: &Plot,
    ruler: &mut Ruler,
    config: &ViewConfig,
    full: ScreenRect,
    measurer: &dyn TextMeasurer,
) -> RulerFrame {
    let mut frame = RulerFrame::default();
    if full.width() <= 1.0 || full.height() <= 1.0 {
        return frame;
    }

    let viewport = plot.resolve_viewport(config.padding_frac, config.min_padding);
    let layout = layout_frame(plot, viewport, config, full, measurer);
    let surface = match Surface::new(viewport, layout.plot) {
        Ok(surface) => surface,
        Err(err) => {
            debug!(err:% = err; "Skipping ruler frame");
            push_invalid_message(&mut frame.background, plot, layout.plot, measurer);
            return frame;
        }
    };
    ruler.set_surface(surface);

    let key = RenderCacheKey {
        viewport,
        size: (
            layout.plot.width().round() as u32,
            layout.plot.height().round() as u32,
        ),
        generation: plot.generation(),
    };
    ruler.on_draw(&key);

    frame.background = match ruler.cached_background(&key) {
        Some(cached) => cached.clone(),
        None => {
            trace!(generation = key.generation; "Rebuilding plot background");
            let background = build_background(plot, ruler.surface(), &layout, config, measurer);
            ruler.store_background(key, background.clone());
            background
        }
    };

    if ruler.is_visible() {
        ruler.build_overlay(&mut frame.overlay, measurer);
    }
    frame
}

pub(crate) fn layout_frame(
    plot: &Plot,
    viewport: Viewport,
    config: &ViewConfig,
    full: ScreenRect,
    measurer: &dyn TextMeasurer,
) -> FrameLayout {
    let label_height = measurer.measure("0", config.label_size).1;
    let y_label_width = plot
        .y_axis()
        .ticks(viewport.y)
        .into_iter()
        .map(|value| {
            measurer
                .measure(&plot.y_axis().format_value(value), config.label_size)
                .0
        })
        .fold(0.0_f32, f32::max);
    let x_title_height = plot
        .x_axis()
        .title()
        .map(|title| measurer.measure(title, config.label_size).1 + config.axis_padding)
        .unwrap_or(0.0);
    let y_title_width = plot
        .y_axis()
        .title()
        .map(|title| measurer.measure(title, config.label_size).1 + config.axis_padding)
        .unwrap_or(0.0);

    let x_axis_height = (label_height
        + config.tick_length
        + config.axis_padding * 2.0
        + x_title_height)
        .clamp(0.0, full.height() - 1.0);
    let y_axis_width = (y_label_width + config.tick_length + config.axis_padding * 2.0)
        .clamp(0.0, full.width() - 1.0);
    let top = y_title_width.clamp(0.0, full.height() - x_axis_height - 1.0);
    let right = config.axis_padding * 2.0;

    let plot_rect = ScreenRect::new(
        ScreenPoint::new(full.min.x + y_axis_width, full.min.y + top),
        ScreenPoint::new(
            (full.max.x - right).max(full.min.x + y_axis_width + 1.0),
            full.max.y - x_axis_height,
        ),
    );
    FrameLayout {
        plot: plot_rect,
        x_axis: ScreenRect::new(
            ScreenPoint::new(plot_rect.min.x, plot_rect.max.y),
            ScreenPoint::new(plot_rect.max.x, full.max.y),
        ),
        y_axis: ScreenRect::new(
            ScreenPoint::new(full.min.x, full.min.y),
            ScreenPoint::new(plot_rect.min.x, plot_rect.max.y),
        ),
    }
}

/// Everything beneath the ruler: backgrounds, grid, series, axes and titles.
pub(crate) fn build_background(
    plot: &Plot,
    surface: &Surface,
    layout: &FrameLayout,
    config: &ViewConfig,
    measurer: &dyn TextMeasurer,
) -> RenderList {
    let mut render = RenderList::new();
    let theme = plot.theme();
    let full = ScreenRect::new(layout.y_axis.min, layout.x_axis.max);

    render.push(RenderCommand::Rect {
        rect: full,
        style: RectStyle {
            fill: theme.background,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
        },
    });
    render.push(RenderCommand::Rect {
        rect: layout.plot,
        style: RectStyle {
            fill: theme.plot_background,
            stroke: Color::TRANSPARENT,
            stroke_width: 0.0,
        },
    });

    build_grid(&mut render, plot, surface);
    build_series(&mut render, plot, surface);
    build_axes(&mut render, plot, surface, layout, config, measurer);
    build_axis_titles(&mut render, plot, layout, config, measurer);
    render
}

fn build_grid(render: &mut RenderList, plot: &Plot, surface: &Surface) {
    let rect = surface.rect();
    let viewport = surface.viewport();
    let mut lines = Vec::new();

    if plot.x_axis().show_grid() {
        for value in plot.x_axis().ticks(viewport.x) {
            if let Some(screen) = surface.data_to_screen(DataPoint::new(value, viewport.y.min)) {
                lines.push(LineSegment::new(
                    ScreenPoint::new(screen.x, rect.min.y),
                    ScreenPoint::new(screen.x, rect.max.y),
                ));
            }
        }
    }
    if plot.y_axis().show_grid() {
        for value in plot.y_axis().ticks(viewport.y) {
            if let Some(screen) = surface.data_to_screen(DataPoint::new(viewport.x.min, value)) {
                lines.push(LineSegment::new(
                    ScreenPoint::new(rect.min.x, screen.y),
                    ScreenPoint::new(rect.max.x, screen.y),
                ));
            }
        }
    }

    if !lines.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: lines,
            style: LineStyle {
                color: plot.theme().grid,
                width: 1.0,
                ..LineStyle::default()
            },
        });
    }
}

fn build_series(render: &mut RenderList, plot: &Plot, surface: &Surface) {
    let rect = surface.rect();
    let transform = surface.transform();

    render.push(RenderCommand::ClipRect(rect));
    for series in plot.series() {
        if !series.is_visible() {
            continue;
        }
        match series.kind() {
            SeriesKind::Line(style) => {
                let mut segments = Vec::new();
                build_line_segments(series.points(), transform, rect, &mut segments);
                if !segments.is_empty() {
                    render.push(RenderCommand::LineSegments {
                        segments,
                        style: *style,
                    });
                }
            }
            SeriesKind::Scatter(style) => {
                let mut points = Vec::new();
                build_scatter_points(series.points(), transform, rect, &mut points);
                if !points.is_empty() {
                    render.push(RenderCommand::Points {
                        points,
                        style: *style,
                    });
                }
            }
        }
    }
    render.push(RenderCommand::ClipEnd);
}

fn build_axes(
    render: &mut RenderList,
    plot: &Plot,
    surface: &Surface,
    layout: &FrameLayout,
    config: &ViewConfig,
    measurer: &dyn TextMeasurer,
) {
    let theme = plot.theme();
    let rect = surface.rect();
    let viewport = surface.viewport();
    let label_style = TextStyle {
        color: theme.label,
        size: config.label_size,
        background: None,
    };
    let mut ticks = Vec::new();
    let mut last_x_label_right = f32::NEG_INFINITY;
    let mut last_y_label_top = f32::INFINITY;

    render.push(RenderCommand::Rect {
        rect,
        style: RectStyle {
            fill: Color::TRANSPARENT,
            stroke: theme.axis,
            stroke_width: 1.0,
        },
    });

    for value in plot.x_axis().ticks(viewport.x) {
        let Some(x) = surface
            .data_to_screen(DataPoint::new(value, viewport.y.min))
            .map(|p| p.x)
        else {
            continue;
        };
        ticks.push(LineSegment::new(
            ScreenPoint::new(x, rect.max.y),
            ScreenPoint::new(x, rect.max.y + config.tick_length),
        ));
        let label = plot.x_axis().format_value(value);
        let size = measurer.measure(&label, config.label_size);
        let pos = clamp_label_position(
            ScreenPoint::new(
                x - size.0 * 0.5,
                rect.max.y + config.tick_length + config.axis_padding,
            ),
            size,
            layout.x_axis,
        );
        if pos.x >= last_x_label_right + config.axis_padding {
            last_x_label_right = pos.x + size.0;
            render.push(RenderCommand::Text {
                position: pos,
                text: label,
                style: label_style,
            });
        }
    }

    for value in plot.y_axis().ticks(viewport.y) {
        let Some(y) = surface
            .data_to_screen(DataPoint::new(viewport.x.min, value))
            .map(|p| p.y)
        else {
            continue;
        };
        ticks.push(LineSegment::new(
            ScreenPoint::new(rect.min.x - config.tick_length, y),
            ScreenPoint::new(rect.min.x, y),
        ));
        let label = plot.y_axis().format_value(value);
        let size = measurer.measure(&label, config.label_size);
        let pos = clamp_label_position(
            ScreenPoint::new(
                rect.min.x - config.tick_length - config.axis_padding - size.0,
                y - size.1 * 0.5,
            ),
            size,
            layout.y_axis,
        );
        if pos.y + size.1 <= last_y_label_top - config.axis_padding {
            last_y_label_top = pos.y;
            render.push(RenderCommand::Text {
                position: pos,
                text: label,
                style: label_style,
            });
        }
    }

    if !ticks.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: ticks,
            style: LineStyle {
                color: theme.axis,
                width: 1.0,
                ..LineStyle::default()
            },
        });
    }
}

fn build_axis_titles(
    render: &mut RenderList,
    plot: &Plot,
    layout: &FrameLayout,
    config: &ViewConfig,
    measurer: &dyn TextMeasurer,
) {
    let style = TextStyle {
        color: plot.theme().label,
        size: config.label_size,
        background: None,
    };
    if let Some(title) = plot.x_axis().title() {
        let size = measurer.measure(title, config.label_size);
        let pos = clamp_label_position(
            ScreenPoint::new(
                layout.plot.min.x + (layout.plot.width() - size.0) * 0.5,
                layout.x_axis.max.y - size.1 - config.axis_padding,
            ),
            size,
            layout.x_axis,
        );
        render.push(RenderCommand::Text {
            position: pos,
            text: title.to_string(),
            style,
        });
    }
    if let Some(title) = plot.y_axis().title() {
        let size = measurer.measure(title, config.label_size);
        let pos = ScreenPoint::new(
            layout.y_axis.min.x + config.axis_padding,
            (layout.plot.min.y - size.1).max(layout.y_axis.min.y),
        );
        render.push(RenderCommand::Text {
            position: pos,
            text: title.to_string(),
            style,
        });
    }
}

fn push_invalid_message(
    render: &mut RenderList,
    plot: &Plot,
    rect: ScreenRect,
    measurer: &dyn TextMeasurer,
) {
    let message = "Invalid axis range";
    let size = measurer.measure(message, 14.0);
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(
            rect.min.x + (rect.width() - size.0) * 0.5,
            rect.min.y + (rect.height() - size.1) * 0.5,
        ),
        text: message.to_string(),
        style: TextStyle {
            color: plot.theme().axis,
            size: 14.0,
            background: None,
        },
    });
}

fn clamp_label_position(pos: ScreenPoint, size: (f32, f32), rect: ScreenRect) -> ScreenPoint {
    let max_x = (rect.max.x - size.0).max(rect.min.x);
    let max_y = (rect.max.y - size.1).max(rect.min.y);
    ScreenPoint::new(pos.x.clamp(rect.min.x, max_x), pos.y.clamp(rect.min.y, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruler::RulerConfig;
    use crate::series::Series;
    use crate::view::Range;

    struct FixedMeasurer;

    impl TextMeasurer for FixedMeasurer {
        fn measure(&self, text: &str, _size: f32) -> (f32, f32) {
            (text.chars().count() as f32 * 7.0, 14.0)
        }
    }

    fn reference_plot() -> Plot {
        Plot::builder()
            .viewport(Viewport::new(Range::new(0.0, 5.0), Range::new(-5.0, 5.0)))
            .series(Series::from_xy(
                "reference",
                [0.0, 1.0, 2.0, 3.0, 4.0],
                [0.0, 1.0, -3.0, 5.0, -3.0],
                SeriesKind::Line(LineStyle {
                    color: Color::RED,
                    ..LineStyle::default()
                }),
            ))
            .build()
    }

    fn full_rect() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(640.0, 480.0))
    }

    fn placeholder_ruler(plot: &Plot) -> Ruler {
        Ruler::attach(
            plot.resolve_viewport(0.05, 1e-6),
            ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(1.0, 1.0)),
            RulerConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn layout_leaves_room_for_axes() {
        let plot = reference_plot();
        let config = ViewConfig::default();
        let viewport = plot.resolve_viewport(config.padding_frac, config.min_padding);
        let layout = layout_frame(&plot, viewport, &config, full_rect(), &FixedMeasurer);
        assert!(layout.plot.min.x > 0.0);
        assert!(layout.plot.max.y < 480.0);
        assert_eq!(layout.x_axis.min.y, layout.plot.max.y);
        assert_eq!(layout.y_axis.max.x, layout.plot.min.x);
    }

    #[test]
    fn frame_updates_ruler_surface() {
        let plot = reference_plot();
        let mut ruler = placeholder_ruler(&plot);
        let frame = compose_frame(
            &plot,
            &mut ruler,
            &ViewConfig::default(),
            full_rect(),
            &FixedMeasurer,
        );
        assert!(!frame.background.is_empty());
        assert!(ruler.surface().rect().width() > 100.0);
    }

    #[test]
    fn background_is_reused_until_plot_changes() {
        let mut plot = reference_plot();
        let mut ruler = placeholder_ruler(&plot);
        let config = ViewConfig::default();
        let first = compose_frame(&plot, &mut ruler, &config, full_rect(), &FixedMeasurer);
        let second = compose_frame(&plot, &mut ruler, &config, full_rect(), &FixedMeasurer);
        assert_eq!(first.background, second.background);

        let key = RenderCacheKey {
            viewport: plot.resolve_viewport(config.padding_frac, config.min_padding),
            size: (
                ruler.surface().rect().width().round() as u32,
                ruler.surface().rect().height().round() as u32,
            ),
            generation: plot.generation(),
        };
        assert!(ruler.cached_background(&key).is_some());

        plot.add_series(Series::from_iter_y(
            "extra",
            [1.0, 2.0],
            SeriesKind::Line(LineStyle::default()),
        ));
        let next_key = RenderCacheKey {
            generation: plot.generation(),
            ..key
        };
        assert!(ruler.cached_background(&next_key).is_none());
    }

    #[test]
    fn hiding_a_series_rebuilds_background() {
        let mut plot = reference_plot();
        let mut ruler = placeholder_ruler(&plot);
        let config = ViewConfig::default();
        let shown = compose_frame(&plot, &mut ruler, &config, full_rect(), &FixedMeasurer);

        assert!(plot.set_series_visible("reference", false));
        let hidden = compose_frame(&plot, &mut ruler, &config, full_rect(), &FixedMeasurer);
        assert_ne!(shown.background, hidden.background);
        assert!(hidden.background.len() < shown.background.len());
    }

    #[test]
    fn tiny_bounds_draw_nothing() {
        let plot = reference_plot();
        let mut ruler = placeholder_ruler(&plot);
        let tiny = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(1.0, 1.0));
        let frame = compose_frame(
            &plot,
            &mut ruler,
            &ViewConfig::default(),
            tiny,
            &FixedMeasurer,
        );
        assert!(frame.background.is_empty());
        assert!(frame.overlay.is_empty());
    }
}
