use crate::input::{KeyChord, Modifiers};
use crate::measure::MeasurementFormat;
use crate::render::{Color, LineDash, LineStyle, MarkerShape, MarkerStyle, RectStyle, TextStyle};

/// Where the measurement label is anchored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelPlacement {
    /// Next to the midpoint of the line.
    #[default]
    Midpoint,
    /// Next to the end point.
    End,
}

/// Configuration for a [`Ruler`](super::Ruler).
///
/// Style values are handed to the renderer as they are.
#[derive(Debug, Clone)]
pub struct RulerConfig {
    /// Whether the ruler reacts to the pointer right away.
    pub active: bool,
    /// Repaint only the ruler over a cached background while dragging.
    pub fast_redraw: bool,
    /// Stroke of the ruler line.
    pub line_style: LineStyle,
    /// Style of the endpoint markers and the midpoint handle.
    pub marker_style: MarkerStyle,
    /// Style of the label and the detail readout.
    pub text_style: TextStyle,
    /// Measurement precision, units and angle range.
    pub format: MeasurementFormat,
    /// Label anchor.
    pub label_placement: LabelPlacement,
    /// Show the detail readout in the top-left corner of the data area.
    pub show_detail: bool,
    /// Pixel tolerance for grabbing a marker.
    pub grab_radius_px: f32,
    /// Let a primary-button drag move the label and detail boxes.
    pub draggable_text: bool,
    /// Chord toggling the active flag.
    pub toggle_active_key: KeyChord,
    /// Chord toggling visibility.
    pub toggle_visible_key: KeyChord,
}

impl Default for RulerConfig {
    fn default() -> Self {
        Self {
            active: true,
            fast_redraw: true,
            line_style: LineStyle {
                color: Color::BLACK,
                width: 1.5,
                dash: LineDash::Solid,
            },
            marker_style: MarkerStyle {
                color: Color::WHITE,
                size: 6.0,
                shape: MarkerShape::Square,
                edge_color: Some(Color::BLACK),
                edge_width: 1.0,
            },
            text_style: TextStyle {
                color: Color::BLACK,
                size: 12.0,
                background: Some(RectStyle {
                    fill: Color::WHITE.with_alpha(0.7),
                    stroke: Color::new(0.75, 0.75, 0.75, 1.0),
                    stroke_width: 1.0,
                }),
            },
            format: MeasurementFormat::default(),
            label_placement: LabelPlacement::Midpoint,
            show_detail: true,
            grab_radius_px: 8.0,
            draggable_text: true,
            toggle_active_key: KeyChord::new("m", Modifiers::NONE),
            toggle_visible_key: KeyChord::new("m", Modifiers::CONTROL),
        }
    }
}
