//! The drawing surface a ruler is attached to.

use crate::error::RulerError;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::transform::Transform;
use crate::view::Viewport;

/// Data area of a plot: where it sits on screen and which data it shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    transform: Transform,
}

impl Surface {
    /// Create a surface from a viewport and its on-screen data rectangle.
    pub fn new(viewport: Viewport, rect: ScreenRect) -> Result<Self, RulerError> {
        if !rect.is_valid() {
            return Err(RulerError::InvalidSurface {
                reason: "data area has no on-screen extent",
            });
        }
        if !viewport.is_valid() {
            return Err(RulerError::InvalidSurface {
                reason: "viewport must be finite with a positive span",
            });
        }
        let transform = Transform::new(viewport, rect).ok_or(RulerError::InvalidSurface {
            reason: "viewport cannot be mapped onto the data area",
        })?;
        Ok(Self { transform })
    }

    /// Visible data ranges.
    pub fn viewport(&self) -> Viewport {
        self.transform.viewport()
    }

    /// On-screen data rectangle.
    pub fn rect(&self) -> ScreenRect {
        self.transform.screen()
    }

    /// Check whether a screen position lies inside the data area.
    pub fn contains(&self, position: ScreenPoint) -> bool {
        self.rect().contains(position)
    }

    /// Map a screen position into data coordinates.
    pub fn screen_to_data(&self, position: ScreenPoint) -> Option<Point> {
        self.transform.screen_to_data(position)
    }

    /// Map a data point into screen coordinates.
    pub fn data_to_screen(&self, point: Point) -> Option<ScreenPoint> {
        self.transform.data_to_screen(point)
    }

    pub(crate) fn transform(&self) -> &Transform {
        &self.transform
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Range;

    fn rect() -> ScreenRect {
        ScreenRect::new(ScreenPoint::new(10.0, 20.0), ScreenPoint::new(510.0, 420.0))
    }

    #[test]
    fn rejects_zero_size_rect() {
        let viewport = Viewport::new(Range::new(0.0, 5.0), Range::new(-5.0, 5.0));
        let rect = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(0.0, 0.0));
        let err = Surface::new(viewport, rect).unwrap_err();
        assert!(matches!(err, RulerError::InvalidSurface { .. }));
    }

    #[test]
    fn rejects_non_finite_viewport() {
        let viewport = Viewport::new(Range::new(0.0, f64::INFINITY), Range::new(-5.0, 5.0));
        assert!(Surface::new(viewport, rect()).is_err());
    }

    #[test]
    fn maps_corners() {
        let viewport = Viewport::new(Range::new(0.0, 5.0), Range::new(-5.0, 5.0));
        let surface = Surface::new(viewport, rect()).expect("valid surface");
        let origin = surface.data_to_screen(Point::new(0.0, -5.0)).unwrap();
        assert_eq!(origin, ScreenPoint::new(10.0, 420.0));
        assert!(surface.contains(origin));
        assert!(!surface.contains(ScreenPoint::new(5.0, 100.0)));
    }
}
