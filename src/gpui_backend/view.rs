use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{
    App, CursorStyle, FocusHandle, Focusable, KeyDownEvent, ModifiersChangedEvent, MouseButton,
    MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point, Window, canvas, div,
};
use log::trace;

use crate::error::RulerError;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::input::{KeyChord, Modifiers, PointerButton, PointerEvent};
use crate::plot::Plot;
use crate::ruler::{CursorHint, Redraw, Ruler, RulerConfig};

use super::config::ViewConfig;
use super::frame::build_frame;
use super::paint::{paint_frame, to_hsla};
use super::text::GpuiTextMeasurer;

/// A GPUI view that renders a [`Plot`] with a [`Ruler`] on top.
///
/// Left-drag draws a ruler or moves a text box, right-drag on a marker moves
/// it, `m` and `ctrl+m` toggle it. The view takes keyboard focus on click.
pub struct GpuiRulerView {
    plot: Arc<RwLock<Plot>>,
    ruler: Arc<RwLock<Ruler>>,
    config: ViewConfig,
    focus_handle: FocusHandle,
    cursor: CursorHint,
    last_position: Option<ScreenPoint>,
}

impl GpuiRulerView {
    /// Create a view with the default [`ViewConfig`].
    ///
    /// Fails when the plot's fixed viewport cannot host a ruler.
    pub fn new(
        plot: Plot,
        ruler_config: RulerConfig,
        cx: &mut Context<Self>,
    ) -> Result<Self, RulerError> {
        Self::with_config(plot, ruler_config, ViewConfig::default(), cx)
    }

    /// Create a view with a custom configuration.
    pub fn with_config(
        plot: Plot,
        ruler_config: RulerConfig,
        config: ViewConfig,
        cx: &mut Context<Self>,
    ) -> Result<Self, RulerError> {
        let viewport = plot.resolve_viewport(config.padding_frac, config.min_padding);
        // Replaced by the laid-out data area on the first frame.
        let placeholder = ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(1.0, 1.0));
        let ruler = Ruler::attach(viewport, placeholder, ruler_config)?;
        Ok(Self {
            plot: Arc::new(RwLock::new(plot)),
            ruler: Arc::new(RwLock::new(ruler)),
            config,
            focus_handle: cx.focus_handle(),
            cursor: CursorHint::Pointer,
            last_position: None,
        })
    }

    /// Get a handle for reading or driving the ruler from outside the view.
    pub fn ruler_handle(&self) -> RulerHandle {
        RulerHandle {
            ruler: Arc::clone(&self.ruler),
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        window.focus(&self.focus_handle);
        let event = PointerEvent::new(
            screen_point(ev.position),
            pointer_button(ev.button),
            modifiers(&ev.modifiers),
        );
        let redraw = self
            .ruler
            .write()
            .expect("ruler lock")
            .on_button_press(&event);
        self.finish(event.position, event.modifiers, redraw, cx);
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let event = PointerEvent::motion(screen_point(ev.position), modifiers(&ev.modifiers));
        let redraw = self.ruler.write().expect("ruler lock").on_motion(&event);
        self.finish(event.position, event.modifiers, redraw, cx);
    }

    fn on_mouse_up(&mut self, ev: &MouseUpEvent, cx: &mut Context<Self>) {
        let event = PointerEvent::new(
            screen_point(ev.position),
            pointer_button(ev.button),
            modifiers(&ev.modifiers),
        );
        let redraw = self
            .ruler
            .write()
            .expect("ruler lock")
            .on_button_release(&event);
        self.finish(event.position, event.modifiers, redraw, cx);
    }

    fn on_key_down(&mut self, ev: &KeyDownEvent, cx: &mut Context<Self>) {
        // Platform shortcuts (cmd+m) belong to the application.
        if ev.keystroke.modifiers.platform {
            return;
        }
        let mods = modifiers(&ev.keystroke.modifiers);
        let chord = KeyChord::new(ev.keystroke.key.as_str(), mods);
        let redraw = self.ruler.write().expect("ruler lock").on_key_press(&chord);
        if let Some(position) = self.last_position {
            self.finish(position, mods, redraw, cx);
        } else {
            notify_for(redraw, cx);
        }
    }

    fn on_modifiers_changed(&mut self, ev: &ModifiersChangedEvent, cx: &mut Context<Self>) {
        if let Some(position) = self.last_position {
            self.finish(position, modifiers(&ev.modifiers), Redraw::None, cx);
        }
    }

    fn finish(
        &mut self,
        position: ScreenPoint,
        modifiers: Modifiers,
        redraw: Redraw,
        cx: &mut Context<Self>,
    ) {
        self.last_position = Some(position);
        let cursor = self
            .ruler
            .read()
            .expect("ruler lock")
            .cursor_hint(position, modifiers);
        if cursor != self.cursor {
            self.cursor = cursor;
            cx.notify();
        }
        notify_for(redraw, cx);
    }
}

impl Focusable for GpuiRulerView {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for GpuiRulerView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let plot = Arc::clone(&self.plot);
        let ruler = Arc::clone(&self.ruler);
        let config = self.config.clone();
        let theme = plot.read().expect("plot lock").theme().clone();

        div()
            .size_full()
            .track_focus(&self.focus_handle)
            .cursor(cursor_style(self.cursor))
            .bg(to_hsla(theme.background))
            .child(
                canvas(
                    move |bounds, window, _| {
                        let plot = plot.read().expect("plot lock");
                        let mut ruler = ruler.write().expect("ruler lock");
                        let measurer = GpuiTextMeasurer::new(window);
                        build_frame(&plot, &mut ruler, &config, bounds, &measurer)
                    },
                    move |_, frame, window, cx| {
                        paint_frame(&frame, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_down(ev, window, cx);
                }),
            )
            .on_mouse_down(
                MouseButton::Right,
                cx.listener(|this, ev, window, cx| {
                    this.on_mouse_down(ev, window, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_up(
                MouseButton::Right,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_up_out(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_mouse_up_out(
                MouseButton::Right,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_key_down(cx.listener(|this, ev, _, cx| {
                this.on_key_down(ev, cx);
            }))
            .on_modifiers_changed(cx.listener(|this, ev, _, cx| {
                this.on_modifiers_changed(ev, cx);
            }))
    }
}

/// A handle to the [`Ruler`] held inside a `GpuiRulerView`.
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct RulerHandle {
    ruler: Arc<RwLock<Ruler>>,
}

impl RulerHandle {
    /// Read the ruler state.
    ///
    /// The ruler is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Ruler) -> R) -> R {
        let ruler = self.ruler.read().expect("ruler lock");
        f(&ruler)
    }

    /// Mutate the ruler state.
    ///
    /// The ruler is locked for the duration of the callback. Call
    /// `notify` on the view entity afterwards to repaint.
    pub fn write<R>(&self, f: impl FnOnce(&mut Ruler) -> R) -> R {
        let mut ruler = self.ruler.write().expect("ruler lock");
        f(&mut ruler)
    }
}

fn notify_for<T: 'static>(redraw: Redraw, cx: &mut Context<T>) {
    match redraw {
        Redraw::None => {}
        Redraw::Blit | Redraw::Full => {
            trace!(redraw:? = redraw; "Ruler requested redraw");
            cx.notify();
        }
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

fn modifiers(modifiers: &gpui::Modifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.shift,
        control: modifiers.control,
        alt: modifiers.alt,
    }
}

fn cursor_style(hint: CursorHint) -> CursorStyle {
    match hint {
        CursorHint::Pointer => CursorStyle::Arrow,
        CursorHint::Crosshair => CursorStyle::Crosshair,
        CursorHint::Move => CursorStyle::OpenHand,
        CursorHint::ResizeHorizontal => CursorStyle::ResizeLeftRight,
        CursorHint::ResizeVertical => CursorStyle::ResizeUpDown,
    }
}
