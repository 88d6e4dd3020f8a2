//! The plot a ruler measures on.

use crate::axis::AxisConfig;
use crate::series::Series;
use crate::style::Theme;
use crate::view::{Range, Viewport};

/// Plot content: theme, axes, series and the visible viewport.
///
/// Every mutation bumps [`Plot::generation`], which keys the cached
/// background used by the ruler's fast-redraw path.
#[derive(Debug, Clone)]
pub struct Plot {
    theme: Theme,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    viewport: Option<Viewport>,
    series: Vec<Series>,
    generation: u64,
}

impl Plot {
    /// Create a plot with default configuration.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a plot with custom configuration.
    pub fn builder() -> PlotBuilder {
        PlotBuilder::default()
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Access the X axis configuration.
    pub fn x_axis(&self) -> &AxisConfig {
        &self.x_axis
    }

    /// Access the Y axis configuration.
    pub fn y_axis(&self) -> &AxisConfig {
        &self.y_axis
    }

    /// Access all series.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Add a series to the plot.
    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
        self.generation += 1;
    }

    /// Show or hide the series called `name`.
    ///
    /// Returns `false` when no series has that name.
    pub fn set_series_visible(&mut self, name: &str, visible: bool) -> bool {
        let Some(series) = self.series.iter_mut().find(|series| series.name() == name) else {
            return false;
        };
        if series.is_visible() != visible {
            series.set_visible(visible);
            self.generation += 1;
        }
        true
    }

    /// Fix the viewport instead of fitting it to the data.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
        self.generation += 1;
    }

    /// Go back to fitting the viewport to the data.
    pub fn clear_viewport(&mut self) {
        self.viewport = None;
        self.generation += 1;
    }

    /// Content generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Bounds across all visible series.
    pub fn data_bounds(&self) -> Option<Viewport> {
        self.series
            .iter()
            .filter(|series| series.is_visible())
            .filter_map(Series::bounds)
            .reduce(|acc, bounds| {
                let mut x = acc.x;
                let mut y = acc.y;
                x.expand_to_include(bounds.x.min);
                x.expand_to_include(bounds.x.max);
                y.expand_to_include(bounds.y.min);
                y.expand_to_include(bounds.y.max);
                Viewport::new(x, y)
            })
    }

    /// Viewport to draw: the fixed one, or the padded data bounds.
    ///
    /// Falls back to the unit square for an empty plot.
    pub fn resolve_viewport(&self, padding_frac: f64, min_padding: f64) -> Viewport {
        if let Some(viewport) = self.viewport {
            return viewport;
        }
        self.data_bounds()
            .map(|bounds| bounds.padded(padding_frac, min_padding))
            .filter(Viewport::is_valid)
            .unwrap_or_else(|| Viewport::new(Range::new(0.0, 1.0), Range::new(0.0, 1.0)))
    }
}

impl Default for Plot {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a plot before construction.
#[derive(Debug, Default)]
pub struct PlotBuilder {
    theme: Theme,
    x_axis: AxisConfig,
    y_axis: AxisConfig,
    viewport: Option<Viewport>,
    series: Vec<Series>,
}

impl PlotBuilder {
    /// Set the theme used by the plot.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the X axis configuration.
    pub fn x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    /// Set the Y axis configuration.
    pub fn y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    /// Fix the viewport.
    pub fn viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// Add a series to the plot.
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Build the plot.
    pub fn build(self) -> Plot {
        Plot {
            theme: self.theme,
            x_axis: self.x_axis,
            y_axis: self.y_axis,
            viewport: self.viewport,
            series: self.series,
            generation: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LineStyle;
    use crate::series::SeriesKind;

    fn reference_series() -> Series {
        Series::from_xy(
            "reference",
            [0.0, 1.0, 2.0, 3.0, 4.0],
            [0.0, 1.0, -3.0, 5.0, -3.0],
            SeriesKind::Line(LineStyle::default()),
        )
    }

    #[test]
    fn mutations_bump_generation() {
        let mut plot = Plot::new();
        let before = plot.generation();
        plot.add_series(reference_series());
        assert!(plot.generation() > before);
        let after_series = plot.generation();
        plot.set_viewport(Viewport::new(Range::new(0.0, 5.0), Range::new(-5.0, 5.0)));
        assert!(plot.generation() > after_series);
    }

    #[test]
    fn hiding_a_series_bumps_generation() {
        let mut plot = Plot::builder().series(reference_series()).build();
        assert!(plot.set_series_visible("reference", false));
        assert_eq!(plot.generation(), 1);
        assert!(!plot.series()[0].is_visible());
        assert!(plot.data_bounds().is_none());

        assert!(plot.set_series_visible("reference", false));
        assert_eq!(plot.generation(), 1);
        assert!(!plot.set_series_visible("missing", true));
        assert_eq!(plot.generation(), 1);
    }

    #[test]
    fn fixed_viewport_wins() {
        let viewport = Viewport::new(Range::new(0.0, 5.0), Range::new(-5.0, 5.0));
        let plot = Plot::builder()
            .series(reference_series())
            .viewport(viewport)
            .build();
        assert_eq!(plot.resolve_viewport(0.05, 1e-6), viewport);
    }

    #[test]
    fn fitted_viewport_is_padded() {
        let plot = Plot::builder().series(reference_series()).build();
        let viewport = plot.resolve_viewport(0.1, 1e-6);
        assert!(viewport.x.min < 0.0 && viewport.x.max > 4.0);
        assert!(viewport.y.min < -3.0 && viewport.y.max > 5.0);
    }

    #[test]
    fn empty_plot_uses_unit_square() {
        let viewport = Plot::new().resolve_viewport(0.1, 1e-6);
        assert_eq!(viewport.x, Range::new(0.0, 1.0));
    }
}
