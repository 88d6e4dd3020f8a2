//! Renderable pieces of a ruler.
//!
//! Artists are created once, hidden, and only ever repositioned. All of them
//! are written together by [`RulerArtists::sync`], so the line, the markers
//! and the text always describe the same two points.

use crate::geom::Point;
use crate::measure::{MeasurementFormat, compute_measurement};

use super::config::LabelPlacement;

/// The ruler line in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LineArtist {
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Whether the line is drawn.
    pub visible: bool,
}

/// A marker in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerArtist {
    /// Marker center.
    pub position: Point,
    /// Whether the marker is drawn.
    pub visible: bool,
}

/// A text artist anchored in data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextArtist {
    /// Anchor the text is placed next to.
    pub anchor: Point,
    /// Text content.
    pub text: String,
    /// Whether the text is drawn.
    pub visible: bool,
}

/// Every artist owned by a ruler.
#[derive(Debug, Clone, PartialEq)]
pub struct RulerArtists {
    /// The ruler line.
    pub line: LineArtist,
    /// Marker on the start point.
    pub start_marker: MarkerArtist,
    /// Marker on the end point.
    pub end_marker: MarkerArtist,
    /// Handle on the midpoint.
    pub mid_marker: MarkerArtist,
    /// Short measurement label next to the line.
    pub label: TextArtist,
    /// Full readout pinned to the corner of the data area; the anchor is unused.
    pub detail: TextArtist,
}

impl RulerArtists {
    pub(crate) fn hidden() -> Self {
        let origin = Point::new(0.0, 0.0);
        let marker = MarkerArtist {
            position: origin,
            visible: false,
        };
        let text = TextArtist {
            anchor: origin,
            text: String::new(),
            visible: false,
        };
        Self {
            line: LineArtist {
                start: origin,
                end: origin,
                visible: false,
            },
            start_marker: marker.clone(),
            end_marker: marker.clone(),
            mid_marker: marker,
            label: text.clone(),
            detail: text,
        }
    }

    /// Reposition every artist on the segment `start -> end`.
    pub(crate) fn sync(
        &mut self,
        start: Point,
        end: Point,
        format: &MeasurementFormat,
        placement: LabelPlacement,
    ) {
        let measurement = compute_measurement(start, end, format);
        let mid = start.midpoint(end);

        self.line.start = start;
        self.line.end = end;
        self.start_marker.position = start;
        self.end_marker.position = end;
        self.mid_marker.position = mid;
        self.label.anchor = match placement {
            LabelPlacement::Midpoint => mid,
            LabelPlacement::End => end,
        };
        self.label.text = format.label(&measurement);
        self.detail.anchor = start;
        self.detail.text = format.detail(&measurement);
    }

    /// Show or hide every artist at once.
    pub(crate) fn set_visible(&mut self, visible: bool, show_detail: bool) {
        self.line.visible = visible;
        self.start_marker.visible = visible;
        self.end_marker.visible = visible;
        self.mid_marker.visible = visible;
        self.label.visible = visible;
        self.detail.visible = visible && show_detail;
    }
}
