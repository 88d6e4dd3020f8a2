//! Data series drawn beneath the ruler.

use crate::geom::Point;
use crate::render::{LineStyle, MarkerStyle};
use crate::view::{Range, Viewport};

/// Series rendering kind.
#[derive(Debug, Clone)]
pub enum SeriesKind {
    /// Line series with styling.
    Line(LineStyle),
    /// Scatter series with styling.
    Scatter(MarkerStyle),
}

/// A named set of points with styling.
#[derive(Debug, Clone)]
pub struct Series {
    name: String,
    kind: SeriesKind,
    points: Vec<Point>,
    visible: bool,
}

impl Series {
    /// Create a series from explicit points.
    pub fn new(name: impl Into<String>, points: Vec<Point>, kind: SeriesKind) -> Self {
        Self {
            name: name.into(),
            kind,
            points,
            visible: true,
        }
    }

    /// Pair X and Y values; the shorter input decides the length.
    pub fn from_xy<X, Y>(name: impl Into<String>, xs: X, ys: Y, kind: SeriesKind) -> Self
    where
        X: IntoIterator,
        X::Item: Into<f64>,
        Y: IntoIterator,
        Y::Item: Into<f64>,
    {
        let points = xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| Point::new(x.into(), y.into()))
            .collect();
        Self::new(name, points, kind)
    }

    /// Build a series from Y values with implicit X indices.
    pub fn from_iter_y<I, T>(name: impl Into<String>, iter: I, kind: SeriesKind) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<f64>,
    {
        let points = iter
            .into_iter()
            .enumerate()
            .map(|(index, y)| Point::new(index as f64, y.into()))
            .collect();
        Self::new(name, points, kind)
    }

    /// Series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rendering kind.
    pub fn kind(&self) -> &SeriesKind {
        &self.kind
    }

    /// Data points.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Whether the series is drawn.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the series.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Bounds of the finite points, if any.
    pub fn bounds(&self) -> Option<Viewport> {
        let mut finite = self.points.iter().filter(|point| point.is_finite());
        let first = finite.next()?;
        let mut x = Range::new(first.x, first.x);
        let mut y = Range::new(first.y, first.y);
        for point in finite {
            x.expand_to_include(point.x);
            y.expand_to_include(point.y);
        }
        Some(Viewport::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_skip_non_finite() {
        let series = Series::from_xy(
            "s",
            [0.0, 1.0, 2.0, 3.0],
            [0.0, f64::NAN, -3.0, 5.0],
            SeriesKind::Line(LineStyle::default()),
        );
        let bounds = series.bounds().unwrap();
        assert_eq!(bounds.x, Range::new(0.0, 3.0));
        assert_eq!(bounds.y, Range::new(-3.0, 5.0));
    }

    #[test]
    fn indexed_series() {
        let series = Series::from_iter_y("s", [4.0, 5.0], SeriesKind::Line(LineStyle::default()));
        assert_eq!(series.points()[1], Point::new(1.0, 5.0));
    }
}
