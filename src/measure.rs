//! Length and angle measurement between two data points.
//!
//! Angles follow the mathematical convention: counter-clockwise from the
//! positive X axis, computed as `atan2(dy, dx)` and then folded into an
//! [`AngleRange`]. A zero-length ruler measures an angle of zero.

use std::f64::consts::PI;

use crate::geom::Point;

/// Unit used for displayed angles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AngleUnit {
    /// Degrees, suffixed with `°`.
    #[default]
    Degrees,
    /// Radians, suffixed with ` rad`.
    Radians,
}

impl AngleUnit {
    /// One full turn in this unit.
    pub fn full_turn(self) -> f64 {
        match self {
            Self::Degrees => 360.0,
            Self::Radians => 2.0 * PI,
        }
    }

    fn from_radians(self, radians: f64) -> f64 {
        match self {
            Self::Degrees => radians.to_degrees(),
            Self::Radians => radians,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Degrees => "°",
            Self::Radians => " rad",
        }
    }
}

/// Interval displayed angles are folded into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AngleRange {
    /// Half-open `[-180°, 180°)`.
    #[default]
    Signed,
    /// Half-open `[0°, 360°)`.
    Unsigned,
    /// Half-open `[0°, 180°)`; direction is ignored.
    Undirected,
}

impl AngleRange {
    /// Lower (inclusive) and upper (exclusive) bounds in the given unit.
    pub fn bounds(self, unit: AngleUnit) -> (f64, f64) {
        let full = unit.full_turn();
        match self {
            Self::Signed => (-full * 0.5, full * 0.5),
            Self::Unsigned => (0.0, full),
            Self::Undirected => (0.0, full * 0.5),
        }
    }

    /// Fold an angle expressed in `unit` into this range.
    pub fn normalize(self, angle: f64, unit: AngleUnit) -> f64 {
        let (lower, upper) = self.bounds(unit);
        let span = upper - lower;
        let folded = (angle - lower).rem_euclid(span);
        // rem_euclid may round up to `span` for tiny negative inputs.
        let folded = if folded >= span { 0.0 } else { folded };
        // `+ 0.0` turns a negative zero into a positive one.
        let angle = lower + folded + 0.0;
        if angle >= upper { lower } else { angle }
    }
}

/// Measured values between a start and an end point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// `end.x - start.x`.
    pub dx: f64,
    /// `end.y - start.y`.
    pub dy: f64,
    /// Euclidean distance.
    pub length: f64,
    /// Angle in the configured unit and range.
    pub angle: f64,
}

/// How measurements are computed for display and rendered as text.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementFormat {
    /// Digits after the decimal point for lengths and offsets.
    pub length_precision: usize,
    /// Digits after the decimal point for angles.
    pub angle_precision: usize,
    /// Suffix appended to lengths, such as `m`. No conversion is applied.
    pub length_unit: Option<String>,
    /// Angle unit.
    pub angle_unit: AngleUnit,
    /// Angle range.
    pub angle_range: AngleRange,
}

impl Default for MeasurementFormat {
    fn default() -> Self {
        Self {
            length_precision: 2,
            angle_precision: 1,
            length_unit: None,
            angle_unit: AngleUnit::Degrees,
            angle_range: AngleRange::Signed,
        }
    }
}

impl MeasurementFormat {
    /// Format a length or offset.
    pub fn format_length(&self, value: f64) -> String {
        let precision = self.length_precision;
        match &self.length_unit {
            Some(unit) => format!("{value:.precision$} {unit}"),
            None => format!("{value:.precision$}"),
        }
    }

    /// Format an angle already expressed in [`Self::angle_unit`].
    pub fn format_angle(&self, value: f64) -> String {
        let precision = self.angle_precision;
        format!("{value:.precision$}{}", self.angle_unit.suffix())
    }

    /// Short text shown next to the ruler, e.g. `length: 4.24, angle: 45.0°`.
    pub fn label(&self, measurement: &Measurement) -> String {
        format!(
            "length: {}, angle: {}",
            self.format_length(measurement.length),
            self.format_angle(measurement.angle)
        )
    }

    /// Full readout, e.g. `L: 4.24; dx: 3.00; dy: 3.00; ang: 45.0°`.
    pub fn detail(&self, measurement: &Measurement) -> String {
        format!(
            "L: {}; dx: {}; dy: {}; ang: {}",
            self.format_length(measurement.length),
            self.format_length(measurement.dx),
            self.format_length(measurement.dy),
            self.format_angle(measurement.angle)
        )
    }
}

/// Measure the segment from `start` to `end`.
pub fn compute_measurement(start: Point, end: Point, format: &MeasurementFormat) -> Measurement {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let length = dx.hypot(dy);
    let radians = if dx == 0.0 && dy == 0.0 {
        0.0
    } else {
        dy.atan2(dx)
    };
    let angle = format
        .angle_range
        .normalize(format.angle_unit.from_radians(radians), format.angle_unit);
    Measurement {
        dx,
        dy,
        length,
        angle,
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn three_three_diagonal() {
        let format = MeasurementFormat::default();
        let m = compute_measurement(Point::new(1.0, 0.0), Point::new(4.0, 3.0), &format);
        assert_approx_eq!(f64, m.length, 18.0_f64.sqrt(), epsilon = 1e-12);
        assert_approx_eq!(f64, m.angle, 45.0, epsilon = 1e-12);
        assert_eq!(format.label(&m), "length: 4.24, angle: 45.0°");
        assert_eq!(format.detail(&m), "L: 4.24; dx: 3.00; dy: 3.00; ang: 45.0°");
    }

    #[test]
    fn horizontal_segment_has_zero_angle() {
        let format = MeasurementFormat::default();
        let m = compute_measurement(Point::new(1.0, 0.0), Point::new(4.0, 0.0), &format);
        assert_eq!(m.length, 3.0);
        assert_eq!(m.angle, 0.0);
        assert_eq!(format.label(&m), "length: 3.00, angle: 0.0°");
    }

    #[test]
    fn leftward_segment_folds_to_lower_bound() {
        let format = MeasurementFormat::default();
        let m = compute_measurement(Point::new(4.0, 0.0), Point::new(1.0, 0.0), &format);
        assert_approx_eq!(f64, m.angle, -180.0, epsilon = 1e-12);
    }

    #[test]
    fn undirected_range_ignores_direction() {
        let format = MeasurementFormat {
            angle_range: AngleRange::Undirected,
            ..Default::default()
        };
        let forward = compute_measurement(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &format);
        let backward = compute_measurement(Point::new(1.0, 1.0), Point::new(0.0, 0.0), &format);
        assert_approx_eq!(f64, forward.angle, 45.0, epsilon = 1e-12);
        assert_approx_eq!(f64, backward.angle, 45.0, epsilon = 1e-12);
    }

    #[test]
    fn unsigned_radians() {
        let format = MeasurementFormat {
            angle_unit: AngleUnit::Radians,
            angle_range: AngleRange::Unsigned,
            angle_precision: 3,
            ..Default::default()
        };
        let m = compute_measurement(Point::new(0.0, 0.0), Point::new(0.0, -2.0), &format);
        assert_approx_eq!(f64, m.angle, 1.5 * PI, epsilon = 1e-12);
        assert_eq!(format.format_angle(m.angle), "4.712 rad");
    }

    #[test]
    fn zero_length_measures_zero_angle() {
        let format = MeasurementFormat::default();
        let p = Point::new(2.0, -1.0);
        let m = compute_measurement(p, p, &format);
        assert_eq!(m.length, 0.0);
        assert_eq!(m.angle, 0.0);
    }

    #[test]
    fn unit_suffix_is_appended() {
        let format = MeasurementFormat {
            length_unit: Some("m".to_string()),
            length_precision: 3,
            ..Default::default()
        };
        assert_eq!(format.format_length(2.5), "2.500 m");
    }

    #[test]
    fn normalize_negative_zero() {
        let angle = AngleRange::Unsigned.normalize(-0.0, AngleUnit::Degrees);
        assert!(angle.is_sign_positive());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f64..1000.0, -1000.0f64..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn range_strategy() -> impl Strategy<Value = AngleRange> {
        prop_oneof![
            Just(AngleRange::Signed),
            Just(AngleRange::Unsigned),
            Just(AngleRange::Undirected),
        ]
    }

    fn unit_strategy() -> impl Strategy<Value = AngleUnit> {
        prop_oneof![Just(AngleUnit::Degrees), Just(AngleUnit::Radians)]
    }

    proptest! {
        #[test]
        fn length_is_symmetric(a in point_strategy(), b in point_strategy()) {
            let format = MeasurementFormat::default();
            let forward = compute_measurement(a, b, &format);
            let backward = compute_measurement(b, a, &format);
            prop_assert_eq!(forward.length, backward.length);
        }

        #[test]
        fn angle_stays_in_range(
            a in point_strategy(),
            b in point_strategy(),
            range in range_strategy(),
            unit in unit_strategy(),
        ) {
            let format = MeasurementFormat {
                angle_range: range,
                angle_unit: unit,
                ..Default::default()
            };
            let m = compute_measurement(a, b, &format);
            let (lower, upper) = range.bounds(unit);
            prop_assert!(m.angle >= lower, "{} below {}", m.angle, lower);
            prop_assert!(m.angle < upper, "{} not below {}", m.angle, upper);
        }

        #[test]
        fn measurement_is_deterministic(a in point_strategy(), b in point_strategy()) {
            let format = MeasurementFormat::default();
            let first = compute_measurement(a, b, &format);
            let second = compute_measurement(a, b, &format);
            prop_assert_eq!(first, second);
            prop_assert_eq!(format.label(&first), format.label(&second));
        }

        #[test]
        fn normalize_is_idempotent(angle in -10_000.0f64..10_000.0, range in range_strategy()) {
            let once = range.normalize(angle, AngleUnit::Degrees);
            let twice = range.normalize(once, AngleUnit::Degrees);
            prop_assert!((once - twice).abs() < 1e-9);
        }
    }
}
