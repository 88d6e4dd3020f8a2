/// Configuration for the GPUI ruler view.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Padding fraction applied when auto-fitting data.
    pub padding_frac: f64,
    /// Minimum padding applied when auto-fitting data.
    pub min_padding: f64,
    /// Font size of tick labels and axis titles.
    pub label_size: f32,
    /// Tick mark length in pixels.
    pub tick_length: f32,
    /// Gap between ticks, labels and titles in pixels.
    pub axis_padding: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            padding_frac: 0.05,
            min_padding: 1e-6,
            label_size: 12.0,
            tick_length: 5.0,
            axis_padding: 4.0,
        }
    }
}
