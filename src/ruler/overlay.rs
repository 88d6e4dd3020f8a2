use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    LineSegment, RenderCommand, RenderList, TextMeasurer, TextStyle, clip_segment,
};

use super::Ruler;

const LABEL_OFFSET: f32 = 8.0;
const TEXT_PADDING: f32 = 4.0;

/// Text box rectangles from the last overlay, used to grab them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct TextBoxes {
    pub(crate) label: Option<ScreenRect>,
    pub(crate) detail: Option<ScreenRect>,
}

impl Ruler {
    /// Append the ruler's visible artists to `render`.
    ///
    /// The line and markers are clipped to the data area; the text boxes are
    /// kept inside it. The detail readout sits in the top-left corner unless
    /// it was dragged away. The laid-out boxes are remembered so a later
    /// press can grab them.
    pub fn build_overlay(&mut self, render: &mut RenderList, measurer: &dyn TextMeasurer) {
        let mut boxes = TextBoxes::default();
        let artists = &self.artists;
        let rect = self.surface.rect();
        let style = &self.config;

        render.push(RenderCommand::ClipRect(rect));

        if artists.line.visible {
            let start = self.surface.data_to_screen(artists.line.start);
            let end = self.surface.data_to_screen(artists.line.end);
            if let (Some(start), Some(end)) = (start, end) {
                if let Some((start, end)) = clip_segment(start, end, rect) {
                    render.push(RenderCommand::LineSegments {
                        segments: vec![LineSegment::new(start, end)],
                        style: style.line_style,
                    });
                }
            }
        }

        let markers: Vec<ScreenPoint> = [
            &artists.start_marker,
            &artists.end_marker,
            &artists.mid_marker,
        ]
        .into_iter()
        .filter(|marker| marker.visible)
        .filter_map(|marker| self.surface.data_to_screen(marker.position))
        .filter(|screen| rect.contains(*screen))
        .collect();
        if !markers.is_empty() {
            render.push(RenderCommand::Points {
                points: markers,
                style: style.marker_style,
            });
        }

        if artists.label.visible && !artists.label.text.is_empty() {
            if let Some(anchor) = self.surface.data_to_screen(artists.label.anchor) {
                let size = text_box_size(measurer, &artists.label.text, &style.text_style);
                let origin = ScreenPoint::new(
                    anchor.x + LABEL_OFFSET + self.label_offset.0,
                    anchor.y - LABEL_OFFSET - size.1 + self.label_offset.1,
                );
                let boxed = clamp_box(ScreenRect::from_origin_size(origin, size), rect);
                push_text_box(render, boxed, &artists.label.text, style.text_style);
                boxes.label = Some(boxed);
            }
        }

        render.push(RenderCommand::ClipEnd);

        if artists.detail.visible && !artists.detail.text.is_empty() {
            let size = text_box_size(measurer, &artists.detail.text, &style.text_style);
            let origin = ScreenPoint::new(
                rect.min.x + LABEL_OFFSET + self.detail_offset.0,
                rect.min.y + LABEL_OFFSET + self.detail_offset.1,
            );
            let boxed = clamp_box(ScreenRect::from_origin_size(origin, size), rect);
            push_text_box(render, boxed, &artists.detail.text, style.text_style);
            boxes.detail = Some(boxed);
        }

        self.text_boxes = boxes;
    }
}

fn text_box_size(measurer: &dyn TextMeasurer, text: &str, style: &TextStyle) -> (f32, f32) {
    let (width, height) = measurer.measure(text, style.size);
    (width + TEXT_PADDING * 2.0, height + TEXT_PADDING * 2.0)
}

fn clamp_box(boxed: ScreenRect, bounds: ScreenRect) -> ScreenRect {
    let size = (boxed.width(), boxed.height());
    let mut x = boxed.min.x;
    let mut y = boxed.min.y;
    if x + size.0 > bounds.max.x {
        x = bounds.max.x - size.0;
    }
    if y + size.1 > bounds.max.y {
        y = bounds.max.y - size.1;
    }
    x = x.max(bounds.min.x);
    y = y.max(bounds.min.y);
    ScreenRect::from_origin_size(ScreenPoint::new(x, y), size)
}

fn push_text_box(render: &mut RenderList, boxed: ScreenRect, text: &str, style: TextStyle) {
    if let Some(background) = style.background {
        render.push(RenderCommand::Rect {
            rect: boxed,
            style: background,
        });
    }
    render.push(RenderCommand::Text {
        position: ScreenPoint::new(boxed.min.x + TEXT_PADDING, boxed.min.y + TEXT_PADDING),
        text: text.to_string(),
        style,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_box_pulls_inside() {
        let bounds = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(100.0, 100.0));
        let boxed = ScreenRect::from_origin_size(ScreenPoint::new(90.0, -5.0), (20.0, 10.0));
        let clamped = clamp_box(boxed, bounds);
        assert_eq!(clamped.min, ScreenPoint::new(80.0, 0.0));
        assert_eq!(clamped.max, ScreenPoint::new(100.0, 10.0));
    }
}
