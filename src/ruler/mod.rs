//! The interactive ruler.
//!
//! A [`Ruler`] turns pointer and key events on one [`Surface`] into a line,
//! endpoint markers, a midpoint handle and measurement text.
//!
//! - Primary-button drag draws a new ruler from the press point.
//! - Secondary-button drag on an endpoint marker moves that endpoint; on the
//!   midpoint handle it moves the whole ruler.
//! - Holding shift while moving locks the ruler horizontally, control locks
//!   it vertically.
//! - Primary-button drag on the label or detail box moves that box.
//! - `m` toggles the ruler on and off, `ctrl+m` toggles its visibility.
//!
//! Handlers never fail. Events outside the data area, or that do not apply to
//! the current state, are ignored and report [`Redraw::None`].

mod artists;
mod blit;
mod config;
mod overlay;
mod state;

use log::{debug, info};

use crate::error::RulerError;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::input::{KeyChord, Modifiers, PointerButton, PointerEvent};
use crate::measure::{Measurement, compute_measurement};
use crate::render::{RenderCacheKey, RenderList};
use crate::surface::Surface;
use crate::view::Viewport;

pub use artists::{LineArtist, MarkerArtist, RulerArtists, TextArtist};
pub use config::{LabelPlacement, RulerConfig};
pub use state::{AxisLock, CursorHint, DragSource, Redraw, RulerState};

use blit::BackgroundCache;
use overlay::TextBoxes;
use state::{DragState, Handle, TextGrab, TextTarget};

/// Interactive length and angle ruler attached to one surface.
#[derive(Debug, Clone)]
pub struct Ruler {
    surface: Surface,
    config: RulerConfig,
    artists: RulerArtists,
    segment: Option<(Point, Point)>,
    active: bool,
    visible: bool,
    drag: Option<DragState>,
    background: BackgroundCache,
    label_offset: (f32, f32),
    detail_offset: (f32, f32),
    text_boxes: TextBoxes,
}

impl Ruler {
    /// Create a ruler on a surface. Artists start hidden.
    pub fn new(surface: Surface, config: RulerConfig) -> Self {
        Self {
            surface,
            active: config.active,
            config,
            artists: RulerArtists::hidden(),
            segment: None,
            visible: true,
            drag: None,
            background: BackgroundCache::default(),
            label_offset: (0.0, 0.0),
            detail_offset: (0.0, 0.0),
            text_boxes: TextBoxes::default(),
        }
    }

    /// Build the surface from a viewport and data rectangle, then attach.
    ///
    /// Fails with [`RulerError::InvalidSurface`] when the pair cannot host a
    /// ruler.
    pub fn attach(
        viewport: Viewport,
        rect: ScreenRect,
        config: RulerConfig,
    ) -> Result<Self, RulerError> {
        Ok(Self::new(Surface::new(viewport, rect)?, config))
    }

    /// Access the configuration.
    pub fn config(&self) -> &RulerConfig {
        &self.config
    }

    /// Access the surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Replace the surface after the host re-laid out or changed its view.
    ///
    /// Endpoints are kept in data coordinates. A different surface drops the
    /// cached background.
    pub fn set_surface(&mut self, surface: Surface) {
        if surface != self.surface {
            self.background.invalidate();
            self.surface = surface;
        }
    }

    /// Whether pointer events are handled.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the ruler is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current artists.
    pub fn artists(&self) -> &RulerArtists {
        &self.artists
    }

    /// Start and end point, once a ruler has been drawn.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        self.segment
    }

    /// Measurement of the current ruler, once drawn.
    pub fn measurement(&self) -> Option<Measurement> {
        self.segment
            .map(|(start, end)| compute_measurement(start, end, &self.config.format))
    }

    /// Pixel offset of the label box from its default position.
    pub fn label_offset(&self) -> (f32, f32) {
        self.label_offset
    }

    /// Pixel offset of the detail box from its default position.
    pub fn detail_offset(&self) -> (f32, f32) {
        self.detail_offset
    }

    /// Current state.
    pub fn state(&self) -> RulerState {
        if !self.active {
            return RulerState::Inactive;
        }
        match self.drag {
            Some(drag) => RulerState::Dragging {
                anchor: drag.anchor,
                source: drag.source,
                lock: drag.lock,
            },
            None => RulerState::Idle,
        }
    }

    /// Handle a key press.
    pub fn on_key_press(&mut self, chord: &KeyChord) -> Redraw {
        if *chord == self.config.toggle_active_key {
            self.toggle_active();
            self.full_redraw()
        } else if *chord == self.config.toggle_visible_key {
            self.toggle_visible();
            self.full_redraw()
        } else {
            Redraw::None
        }
    }

    /// Handle a button press.
    pub fn on_button_press(&mut self, event: &PointerEvent) -> Redraw {
        if !self.accepts_pointer() || self.drag.is_some() {
            return Redraw::None;
        }
        if !self.surface.contains(event.position) {
            return Redraw::None;
        }
        let Some(cursor) = self.surface.screen_to_data(event.position) else {
            return Redraw::None;
        };

        let drag = match event.button {
            PointerButton::Primary => match (self.text_at(event.position), self.segment) {
                (Some(target), Some(origin)) => {
                    let grab = TextGrab {
                        target,
                        press: event.position,
                        offset: self.text_offset(target),
                    };
                    DragState::text(grab, cursor, origin)
                }
                _ => {
                    self.place(cursor, cursor);
                    DragState::new(DragSource::New, cursor, (cursor, cursor))
                }
            },
            PointerButton::Secondary => {
                let (Some(handle), Some((start, end))) =
                    (self.handle_at(event.position), self.segment)
                else {
                    return Redraw::None;
                };
                match handle {
                    Handle::Start => DragState::new(DragSource::RepositionStart, end, (start, end)),
                    Handle::End => DragState::new(DragSource::RepositionEnd, start, (start, end)),
                    Handle::Middle => DragState::new(DragSource::Translate, cursor, (start, end)),
                }
            }
            PointerButton::Middle | PointerButton::Other => return Redraw::None,
        };

        debug!(source:? = drag.source, x = drag.anchor.x, y = drag.anchor.y; "Ruler drag started");
        self.drag = Some(drag);
        self.full_redraw()
    }

    /// Handle pointer motion.
    pub fn on_motion(&mut self, event: &PointerEvent) -> Redraw {
        if !self.active || !self.surface.contains(event.position) {
            return Redraw::None;
        }
        let Some(mut drag) = self.drag else {
            return Redraw::None;
        };
        let Some(cursor) = self.surface.screen_to_data(event.position) else {
            return Redraw::None;
        };

        drag.lock = AxisLock::from_modifiers(event.modifiers);
        self.drag = Some(drag);

        if let Some(grab) = drag.text {
            let offset = grab.offset_at(event.position);
            match grab.target {
                TextTarget::Label => self.label_offset = offset,
                TextTarget::Detail => self.detail_offset = offset,
            }
        } else {
            let (start, end) = drag.endpoints_at(cursor);
            self.place(start, end);
            debug!(lock:? = drag.lock; "{}", self.artists.detail.text);
        }

        if self.config.fast_redraw {
            Redraw::Blit
        } else {
            self.full_redraw()
        }
    }

    /// Handle a button release. The ruler stays where it is.
    pub fn on_button_release(&mut self, _event: &PointerEvent) -> Redraw {
        let Some(drag) = self.drag.take() else {
            return Redraw::None;
        };
        debug!(source:? = drag.source; "Ruler drag finished");
        if self.config.fast_redraw {
            Redraw::Blit
        } else {
            self.full_redraw()
        }
    }

    /// Handle a host draw event; drops a background captured under another key.
    pub fn on_draw(&mut self, key: &RenderCacheKey) {
        self.background.retain_if(key);
    }

    /// Background to blit the ruler over, when one was captured under `key`.
    pub fn cached_background(&self, key: &RenderCacheKey) -> Option<&RenderList> {
        if !self.config.fast_redraw {
            return None;
        }
        self.background.get(key)
    }

    /// Capture the background rendered beneath the ruler.
    ///
    /// Ignored when fast redraw is disabled.
    pub fn store_background(&mut self, key: RenderCacheKey, render: RenderList) {
        if self.config.fast_redraw {
            self.background.store(key, render);
        }
    }

    /// Cursor the host should show at `position`.
    pub fn cursor_hint(&self, position: ScreenPoint, modifiers: Modifiers) -> CursorHint {
        if !self.accepts_pointer() {
            return CursorHint::Pointer;
        }
        let idle = self.drag.is_none();
        if self.drag.is_some_and(|drag| drag.text.is_some())
            || (idle && self.text_at(position).is_some())
        {
            return CursorHint::Move;
        }
        let repositioning = self
            .drag
            .is_some_and(|drag| drag.source != DragSource::New);
        if repositioning || (idle && self.handle_at(position).is_some()) {
            return match AxisLock::from_modifiers(modifiers) {
                AxisLock::Horizontal => CursorHint::ResizeHorizontal,
                AxisLock::Vertical => CursorHint::ResizeVertical,
                AxisLock::None => CursorHint::Move,
            };
        }
        if self.surface.contains(position) {
            CursorHint::Crosshair
        } else {
            CursorHint::Pointer
        }
    }

    fn accepts_pointer(&self) -> bool {
        self.active && self.visible
    }

    fn toggle_active(&mut self) {
        self.active = !self.active;
        if !self.active {
            self.drag = None;
        }
        info!(active = self.active; "Ruler toggled");
    }

    fn toggle_visible(&mut self) {
        self.visible = !self.visible;
        if !self.visible {
            self.active = false;
            self.drag = None;
        }
        let shown = self.visible && self.segment.is_some();
        self.artists.set_visible(shown, self.config.show_detail);
        info!(visible = self.visible, active = self.active; "Ruler visibility toggled");
    }

    fn full_redraw(&mut self) -> Redraw {
        self.background.invalidate();
        Redraw::Full
    }

    /// Move the ruler to `start -> end`, updating every artist together.
    fn place(&mut self, start: Point, end: Point) {
        let first = self.segment.is_none();
        self.segment = Some((start, end));
        self.artists.sync(
            start,
            end,
            &self.config.format,
            self.config.label_placement,
        );
        if first {
            self.artists.set_visible(self.visible, self.config.show_detail);
        }
    }

    /// Text box under `position`, as laid out by the last overlay.
    fn text_at(&self, position: ScreenPoint) -> Option<TextTarget> {
        if !self.config.draggable_text || !self.visible {
            return None;
        }
        let hit = |boxed: Option<ScreenRect>| boxed.is_some_and(|rect| rect.contains(position));
        if self.artists.detail.visible && hit(self.text_boxes.detail) {
            Some(TextTarget::Detail)
        } else if self.artists.label.visible && hit(self.text_boxes.label) {
            Some(TextTarget::Label)
        } else {
            None
        }
    }

    fn text_offset(&self, target: TextTarget) -> (f32, f32) {
        match target {
            TextTarget::Label => self.label_offset,
            TextTarget::Detail => self.detail_offset,
        }
    }

    fn handle_at(&self, position: ScreenPoint) -> Option<Handle> {
        let (start, end) = self.segment?;
        if !self.visible {
            return None;
        }
        let radius_sq = self.config.grab_radius_px * self.config.grab_radius_px;
        let near = |point: Point| {
            self.surface
                .data_to_screen(point)
                .is_some_and(|screen| screen.distance_sq(position) <= radius_sq)
        };
        if near(end) {
            Some(Handle::End)
        } else if near(start) {
            Some(Handle::Start)
        } else if near(start.midpoint(end)) {
            Some(Handle::Middle)
        } else {
            None
        }
    }
}
