//! Plot themes.

use crate::render::Color;

/// Colors used for the plot beneath the ruler.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Canvas background.
    pub background: Color,
    /// Data area background.
    pub plot_background: Color,
    /// Axis lines and frame.
    pub axis: Color,
    /// Grid lines.
    pub grid: Color,
    /// Tick labels and titles.
    pub label: Color,
}

impl Theme {
    /// Light theme (the default).
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            plot_background: Color::WHITE,
            axis: Color::new(0.2, 0.2, 0.2, 1.0),
            grid: Color::new(0.88, 0.88, 0.88, 1.0),
            label: Color::new(0.15, 0.15, 0.15, 1.0),
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::new(0.08, 0.09, 0.11, 1.0),
            plot_background: Color::new(0.1, 0.11, 0.13, 1.0),
            axis: Color::new(0.7, 0.72, 0.75, 1.0),
            grid: Color::new(0.22, 0.24, 0.27, 1.0),
            label: Color::new(0.85, 0.86, 0.88, 1.0),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
