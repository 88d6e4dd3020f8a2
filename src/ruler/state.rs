use crate::geom::{Point, ScreenPoint};
use crate::input::Modifiers;

/// Axis constraint applied while dragging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AxisLock {
    /// Free movement.
    #[default]
    None,
    /// The moving point keeps its reference point's Y (shift held).
    Horizontal,
    /// The moving point keeps its reference point's X (control held).
    Vertical,
}

impl AxisLock {
    /// Derive the lock from the modifiers held during a motion event.
    ///
    /// Shift wins when both shift and control are held.
    pub fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.shift {
            Self::Horizontal
        } else if modifiers.control {
            Self::Vertical
        } else {
            Self::None
        }
    }

    /// Constrain `free` against `anchor`.
    pub fn constrain(self, anchor: Point, free: Point) -> Point {
        match self {
            Self::None => free,
            Self::Horizontal => Point::new(free.x, anchor.y),
            Self::Vertical => Point::new(anchor.x, free.y),
        }
    }
}

/// What a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    /// Drawing a new ruler from the press point.
    New,
    /// Moving the start point; the end point stays fixed.
    RepositionStart,
    /// Moving the end point; the start point stays fixed.
    RepositionEnd,
    /// Moving the whole ruler by its midpoint handle.
    Translate,
    /// Moving the measurement label box.
    MoveLabel,
    /// Moving the detail readout box.
    MoveDetail,
}

/// Observable ruler state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RulerState {
    /// Pointer events are ignored.
    Inactive,
    /// Active, waiting for a press.
    Idle,
    /// A drag is in progress.
    Dragging {
        /// Fixed reference point of the drag.
        anchor: Point,
        /// What the drag moves.
        source: DragSource,
        /// Lock evaluated on the latest motion event.
        lock: AxisLock,
    },
}

/// Redraw request issued back to the host after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Nothing changed.
    None,
    /// Only the ruler changed; repaint it over the cached background.
    Blit,
    /// Repaint everything and recapture the background.
    Full,
}

/// Cursor the host should show at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    /// Default arrow.
    Pointer,
    /// Ready to draw a ruler.
    Crosshair,
    /// Over a handle or text box, or moving one.
    Move,
    /// Moving with the horizontal lock.
    ResizeHorizontal,
    /// Moving with the vertical lock.
    ResizeVertical,
}

/// Handle hit by a secondary-button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Handle {
    Start,
    End,
    Middle,
}

/// Text box hit by a primary-button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TextTarget {
    Label,
    Detail,
}

/// Screen-space grab of a text box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TextGrab {
    pub(crate) target: TextTarget,
    pub(crate) press: ScreenPoint,
    /// Box offset when the drag began.
    pub(crate) offset: (f32, f32),
}

impl TextGrab {
    /// Box offset for a pointer at `position`.
    pub(crate) fn offset_at(&self, position: ScreenPoint) -> (f32, f32) {
        (
            self.offset.0 + position.x - self.press.x,
            self.offset.1 + position.y - self.press.y,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragState {
    pub(crate) source: DragSource,
    pub(crate) anchor: Point,
    /// Endpoints when the drag began.
    pub(crate) origin: (Point, Point),
    pub(crate) lock: AxisLock,
    pub(crate) text: Option<TextGrab>,
}

impl DragState {
    pub(crate) fn new(source: DragSource, anchor: Point, origin: (Point, Point)) -> Self {
        Self {
            source,
            anchor,
            origin,
            lock: AxisLock::None,
            text: None,
        }
    }

    /// A drag moving a text box; the endpoints stay at `origin`.
    pub(crate) fn text(grab: TextGrab, anchor: Point, origin: (Point, Point)) -> Self {
        let source = match grab.target {
            TextTarget::Label => DragSource::MoveLabel,
            TextTarget::Detail => DragSource::MoveDetail,
        };
        Self {
            text: Some(grab),
            ..Self::new(source, anchor, origin)
        }
    }

    /// Endpoints for a cursor position under the current lock.
    pub(crate) fn endpoints_at(&self, cursor: Point) -> (Point, Point) {
        let (start, end) = self.origin;
        match self.source {
            DragSource::New => (self.anchor, self.lock.constrain(self.anchor, cursor)),
            // A repositioned endpoint slides along its own row or column.
            DragSource::RepositionStart => (self.lock.constrain(start, cursor), end),
            DragSource::RepositionEnd => (start, self.lock.constrain(end, cursor)),
            DragSource::Translate => {
                let moved = self.lock.constrain(self.anchor, cursor);
                let dx = moved.x - self.anchor.x;
                let dy = moved.y - self.anchor.y;
                (start.offset(dx, dy), end.offset(dx, dy))
            }
            DragSource::MoveLabel | DragSource::MoveDetail => (start, end),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_wins_over_control() {
        let both = Modifiers {
            shift: true,
            control: true,
            alt: false,
        };
        assert_eq!(AxisLock::from_modifiers(both), AxisLock::Horizontal);
        assert_eq!(
            AxisLock::from_modifiers(Modifiers::CONTROL),
            AxisLock::Vertical
        );
        assert_eq!(AxisLock::from_modifiers(Modifiers::NONE), AxisLock::None);
    }

    #[test]
    fn reposition_start_keeps_end() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(2.0, 2.0);
        let mut drag = DragState::new(DragSource::RepositionStart, end, (start, end));
        drag.lock = AxisLock::Horizontal;
        let (moved, fixed) = drag.endpoints_at(Point::new(-1.0, 5.0));
        assert_eq!(fixed, end);
        assert_eq!(moved, Point::new(-1.0, 0.0));
    }

    #[test]
    fn locked_reposition_end_keeps_its_own_row() {
        let start = Point::new(1.0, 0.0);
        let end = Point::new(4.0, 3.0);
        let mut drag = DragState::new(DragSource::RepositionEnd, start, (start, end));
        drag.lock = AxisLock::Horizontal;
        assert_eq!(
            drag.endpoints_at(Point::new(3.5, 1.0)),
            (start, Point::new(3.5, 3.0))
        );
        drag.lock = AxisLock::Vertical;
        assert_eq!(
            drag.endpoints_at(Point::new(3.5, 1.0)),
            (start, Point::new(4.0, 1.0))
        );
    }

    #[test]
    fn translate_moves_both_endpoints() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(2.0, 2.0);
        let drag = DragState::new(DragSource::Translate, Point::new(1.0, 1.0), (start, end));
        let (a, b) = drag.endpoints_at(Point::new(2.0, 0.5));
        assert_eq!(a, Point::new(1.0, -0.5));
        assert_eq!(b, Point::new(3.0, 1.5));
    }

    #[test]
    fn text_drag_tracks_pointer_in_pixels() {
        let start = Point::new(0.0, 0.0);
        let end = Point::new(2.0, 2.0);
        let grab = TextGrab {
            target: TextTarget::Detail,
            press: ScreenPoint::new(20.0, 15.0),
            offset: (5.0, -5.0),
        };
        let drag = DragState::text(grab, start, (start, end));
        assert_eq!(drag.source, DragSource::MoveDetail);
        assert_eq!(drag.endpoints_at(Point::new(1.0, 1.0)), (start, end));
        assert_eq!(grab.offset_at(ScreenPoint::new(30.0, 10.0)), (15.0, -10.0));
    }
}
