//! Text measurement
//!
//! Label gutters are sized before the grid is resolved, so the layout pass
//! needs text widths up front. Hosts plug in their own shaping-backed
//! measurer; [`HeuristicTextMeasurer`] is a font-agnostic estimate.

/// Font parameters handed to the measurer
#[derive(Debug, Clone, PartialEq)]
pub struct FontContext {
    /// Font size in pixels
    pub size: f64,
    pub family: Option<String>,
}

impl FontContext {
    pub fn new(size: f64) -> Self {
        Self { size, family: None }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }
}

impl Default for FontContext {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Measurement service used to size label gutters
pub trait TextMeasurer {
    /// Width of `text` in pixels
    fn measure_text_width(&self, text: &str, font: &FontContext) -> f64;

    /// Height of one line of text
    fn line_height(&self, font: &FontContext) -> f64 {
        font.size * 1.2
    }

    /// Width of the widest text, 0 for none
    fn max_text_width(&self, texts: &[String], font: &FontContext) -> f64 {
        texts
            .iter()
            .map(|t| self.measure_text_width(t, font))
            .fold(0.0, f64::max)
    }
}

/// Estimates every glyph at 0.6em
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_text_width(&self, text: &str, font: &FontContext) -> f64 {
        text.chars().count() as f64 * font.size * 0.6
    }
}
