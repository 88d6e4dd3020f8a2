use float_cmp::assert_approx_eq;
use gpui_ruler::{
    KeyChord, Modifiers, Point, PointerButton, PointerEvent, Range, Redraw, Ruler, RulerConfig,
    RulerState, ScreenPoint, ScreenRect, Viewport,
};
use proptest::prelude::*;

/// x in [0, 5], y in [-5, 5] on a 500 x 1000 px data area.
fn reference_ruler() -> Ruler {
    let _ = env_logger::builder().is_test(true).try_init();
    Ruler::attach(
        Viewport::new(Range::new(0.0, 5.0), Range::new(-5.0, 5.0)),
        ScreenRect::new(ScreenPoint::new(0.0, 0.0), ScreenPoint::new(500.0, 1000.0)),
        RulerConfig::default(),
    )
    .expect("reference surface is valid")
}

fn screen(ruler: &Ruler, x: f64, y: f64) -> ScreenPoint {
    ruler
        .surface()
        .data_to_screen(Point::new(x, y))
        .expect("point maps to screen")
}

fn drag(ruler: &mut Ruler, from: (f64, f64), to: (f64, f64), modifiers: Modifiers) {
    let press = PointerEvent::new(
        screen(ruler, from.0, from.1),
        PointerButton::Primary,
        Modifiers::NONE,
    );
    ruler.on_button_press(&press);
    let motion = PointerEvent::motion(screen(ruler, to.0, to.1), modifiers);
    ruler.on_motion(&motion);
    let release = PointerEvent::new(motion.position, PointerButton::Primary, modifiers);
    ruler.on_button_release(&release);
}

fn key(chord: &str) -> KeyChord {
    chord.parse().expect("valid chord")
}

#[test]
fn diagonal_drag_measures_length_and_angle() {
    let mut ruler = reference_ruler();
    drag(&mut ruler, (1.0, 0.0), (4.0, 3.0), Modifiers::NONE);

    let measurement = ruler.measurement().expect("ruler drawn");
    assert_approx_eq!(f64, measurement.length, 18.0_f64.sqrt(), epsilon = 1e-6);
    assert_approx_eq!(f64, measurement.angle, 45.0, epsilon = 1e-4);

    let artists = ruler.artists();
    assert_approx_eq!(f64, artists.start_marker.position.x, 1.0, epsilon = 1e-6);
    assert_approx_eq!(f64, artists.start_marker.position.y, 0.0, epsilon = 1e-6);
    assert_approx_eq!(f64, artists.end_marker.position.x, 4.0, epsilon = 1e-6);
    assert_approx_eq!(f64, artists.end_marker.position.y, 3.0, epsilon = 1e-6);
    assert_eq!(artists.line.start, artists.start_marker.position);
    assert_eq!(artists.line.end, artists.end_marker.position);
    assert_eq!(artists.label.text, "length: 4.24, angle: 45.0°");
    assert_eq!(ruler.state(), RulerState::Idle);
}

#[test]
fn shift_drag_stays_horizontal() {
    let mut ruler = reference_ruler();
    drag(&mut ruler, (1.0, 0.0), (4.0, 3.0), Modifiers::SHIFT);

    let (start, end) = ruler.endpoints().expect("ruler drawn");
    assert_eq!(end.y, start.y);
    assert_approx_eq!(f64, end.x, 4.0, epsilon = 1e-6);

    let measurement = ruler.measurement().expect("ruler drawn");
    assert_approx_eq!(f64, measurement.length, 3.0, epsilon = 1e-6);
    assert_approx_eq!(f64, measurement.angle, 0.0, epsilon = 1e-9);
    assert_eq!(ruler.artists().label.text, "length: 3.00, angle: 0.0°");
}

#[test]
fn toggling_active_twice_restores_it() {
    let mut ruler = reference_ruler();
    let toggle = key("m");

    assert_eq!(ruler.on_key_press(&toggle), Redraw::Full);
    assert!(!ruler.is_active());
    assert_eq!(ruler.state(), RulerState::Inactive);

    let press = PointerEvent::new(
        screen(&ruler, 1.0, 0.0),
        PointerButton::Primary,
        Modifiers::NONE,
    );
    assert_eq!(ruler.on_button_press(&press), Redraw::None);
    let motion = PointerEvent::motion(screen(&ruler, 2.0, 2.0), Modifiers::NONE);
    assert_eq!(ruler.on_motion(&motion), Redraw::None);
    assert!(ruler.endpoints().is_none());

    ruler.on_key_press(&toggle);
    assert!(ruler.is_active());
    assert_eq!(ruler.on_button_press(&press), Redraw::Full);
}

#[test]
fn visibility_toggle_hides_and_restores_everything() {
    let mut ruler = reference_ruler();
    drag(&mut ruler, (1.0, 0.0), (4.0, 3.0), Modifiers::NONE);
    let shown = ruler.artists().clone();
    let toggle = key("ctrl+m");

    ruler.on_key_press(&toggle);
    let hidden = ruler.artists();
    assert!(!ruler.is_visible());
    assert!(!hidden.line.visible);
    assert!(!hidden.start_marker.visible);
    assert!(!hidden.end_marker.visible);
    assert!(!hidden.mid_marker.visible);
    assert!(!hidden.label.visible);
    assert!(!hidden.detail.visible);

    ruler.on_key_press(&toggle);
    assert!(ruler.is_visible());
    assert_eq!(ruler.artists(), &shown);
}

fn inside() -> impl Strategy<Value = (f64, f64)> {
    (0.1..4.9_f64, -4.9..4.9_f64)
}

proptest! {
    #[test]
    fn shift_pins_free_endpoint_to_anchor_row(from in inside(), to in inside()) {
        let mut ruler = reference_ruler();
        drag(&mut ruler, from, to, Modifiers::SHIFT);
        let (start, end) = ruler.endpoints().expect("ruler drawn");
        prop_assert_eq!(end.y, start.y);
    }

    #[test]
    fn control_pins_free_endpoint_to_anchor_column(from in inside(), to in inside()) {
        let mut ruler = reference_ruler();
        drag(&mut ruler, from, to, Modifiers::CONTROL);
        let (start, end) = ruler.endpoints().expect("ruler drawn");
        prop_assert_eq!(end.x, start.x);
    }
}
