//! Coordinate transforms between data and screen space.

use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::view::{Range, Viewport};

const MIN_SPAN: f64 = 1e-12;

/// Linear transform from data coordinates into screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transform {
    viewport: Viewport,
    screen: ScreenRect,
    x_axis: Range,
    y_axis: Range,
}

impl Transform {
    /// Create a transform for the given viewport and screen rectangle.
    pub(crate) fn new(viewport: Viewport, screen: ScreenRect) -> Option<Self> {
        if !screen.is_valid() || !viewport.x.is_finite() || !viewport.y.is_finite() {
            return None;
        }
        Some(Self {
            viewport,
            screen,
            x_axis: viewport.x.with_min_span(MIN_SPAN),
            y_axis: viewport.y.with_min_span(MIN_SPAN),
        })
    }

    /// Access the viewport.
    pub(crate) fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Access the screen rectangle.
    pub(crate) fn screen(&self) -> ScreenRect {
        self.screen
    }

    /// Map a data point into screen space.
    pub(crate) fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        if !point.is_finite() {
            return None;
        }
        let x_norm = (point.x - self.x_axis.min) / self.x_axis.span();
        let y_norm = (point.y - self.y_axis.min) / self.y_axis.span();
        let sx = self.screen.min.x as f64 + x_norm * self.screen.width() as f64;
        let sy = self.screen.max.y as f64 - y_norm * self.screen.height() as f64;
        Some(ScreenPoint::new(sx as f32, sy as f32))
    }

    /// Map a screen point into data space.
    pub(crate) fn screen_to_data(&self, point: ScreenPoint) -> Option<Point> {
        let x_norm = (point.x as f64 - self.screen.min.x as f64) / self.screen.width() as f64;
        let y_norm = (self.screen.max.y as f64 - point.y as f64) / self.screen.height() as f64;
        let x = self.x_axis.min + x_norm * self.x_axis.span();
        let y = self.y_axis.min + y_norm * self.y_axis.span();
        let point = Point::new(x, y);
        point.is_finite().then_some(point)
    }
}
