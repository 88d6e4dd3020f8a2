//! gpui_ruler is an interactive on-canvas ruler for GPUI plots.
//!
//! Drag across a chart to measure the length and angle of a line in data
//! coordinates. The ruler core is backend-agnostic: it turns pointer and key
//! events into state and a [`RenderList`], and [`gpui_backend`] paints it.

#![forbid(unsafe_code)]

pub mod axis;
pub mod error;
pub mod geom;
pub mod gpui_backend;
pub mod input;
pub mod measure;
pub mod plot;
pub mod render;
pub mod ruler;
pub mod series;
pub mod style;
pub mod surface;
mod transform;
pub mod view;

pub use axis::{AxisConfig, AxisFormatter};
pub use error::RulerError;
pub use geom::{Point, ScreenPoint, ScreenRect};
pub use gpui_backend::{GpuiRulerView, RulerHandle, ViewConfig};
pub use input::{KeyChord, Modifiers, PointerButton, PointerEvent};
pub use measure::{AngleRange, AngleUnit, Measurement, MeasurementFormat, compute_measurement};
pub use plot::{Plot, PlotBuilder};
pub use render::{
    Color, LineDash, LineSegment, LineStyle, MarkerShape, MarkerStyle, RectStyle,
    RenderCacheKey, RenderCommand, RenderList, TextMeasurer, TextStyle,
};
pub use ruler::{
    AxisLock, CursorHint, DragSource, LabelPlacement, Redraw, Ruler, RulerArtists, RulerConfig,
    RulerState,
};
pub use series::{Series, SeriesKind};
pub use style::Theme;
pub use surface::Surface;
pub use view::{Range, Viewport};
