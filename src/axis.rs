//! Axis configuration, tick generation and formatting.

use std::sync::Arc;

use crate::view::Range;

const MAX_TICKS: usize = 1000;

/// Formatter for axis tick labels.
#[derive(Clone, Default)]
pub enum AxisFormatter {
    /// Shortest decimal representation, rounded to 1e-9.
    #[default]
    Default,
    /// Custom formatter callback.
    Custom(Arc<dyn Fn(f64) -> String + Send + Sync>),
}

impl AxisFormatter {
    /// Format a value for display.
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Default => {
                let rounded = (value * 1e9).round() / 1e9 + 0.0;
                format!("{rounded}")
            }
            Self::Custom(formatter) => formatter(value),
        }
    }
}

impl std::fmt::Debug for AxisFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "AxisFormatter::Default"),
            Self::Custom(_) => write!(f, "AxisFormatter::Custom(..)"),
        }
    }
}

/// Axis configuration.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    title: Option<String>,
    formatter: AxisFormatter,
    show_grid: bool,
    tick_count: usize,
}

impl AxisConfig {
    /// Create a linear axis configuration.
    pub fn linear() -> Self {
        Self {
            title: None,
            formatter: AxisFormatter::default(),
            show_grid: true,
            tick_count: 6,
        }
    }

    /// Set the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the axis formatter.
    pub fn with_formatter(mut self, formatter: AxisFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Show or hide grid lines.
    pub fn with_grid(mut self, show_grid: bool) -> Self {
        self.show_grid = show_grid;
        self
    }

    /// Set the approximate number of ticks.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Access the axis title.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Whether grid lines are drawn.
    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// Format a value with this axis' formatter.
    pub fn format_value(&self, value: f64) -> String {
        self.formatter.format(value)
    }

    /// Tick values for a range.
    pub fn ticks(&self, range: Range) -> Vec<f64> {
        ticks(range, self.tick_count)
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::linear()
    }
}

/// "Nice" tick values (steps of 1, 2 or 5 times a power of ten) inside `range`.
pub fn ticks(range: Range, target: usize) -> Vec<f64> {
    if !range.is_valid() || target == 0 {
        return Vec::new();
    }
    let raw = range.span() / target as f64;
    let magnitude = 10_f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let step = if residual <= 1.0 {
        magnitude
    } else if residual <= 2.0 {
        2.0 * magnitude
    } else if residual <= 5.0 {
        5.0 * magnitude
    } else {
        10.0 * magnitude
    };
    let first = (range.min / step).ceil();
    let last = (range.max / step).floor();
    if !first.is_finite() || !last.is_finite() || last - first > MAX_TICKS as f64 {
        return Vec::new();
    }
    (first as i64..=last as i64)
        .map(|index| index as f64 * step)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_steps() {
        assert_eq!(
            ticks(Range::new(0.0, 5.0), 5),
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]
        );
    }

    #[test]
    fn two_steps_across_zero() {
        assert_eq!(
            ticks(Range::new(-5.0, 5.0), 5),
            vec![-4.0, -2.0, 0.0, 2.0, 4.0]
        );
    }

    #[test]
    fn empty_for_degenerate_range() {
        assert!(ticks(Range::new(1.0, 1.0), 5).is_empty());
    }

    #[test]
    fn default_formatter_trims_noise() {
        let formatter = AxisFormatter::Default;
        assert_eq!(formatter.format(0.1 + 0.2), "0.3");
        assert_eq!(formatter.format(-0.0), "0");
        assert_eq!(formatter.format(2.0), "2");
    }

    #[test]
    fn custom_formatter() {
        let axis = AxisConfig::linear()
            .with_formatter(AxisFormatter::Custom(Arc::new(|v| format!("{v:.1} s"))));
        assert_eq!(axis.format_value(1.3), "1.3 s");
    }
}
