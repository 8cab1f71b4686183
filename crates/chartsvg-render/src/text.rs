use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f64,
    pub bold: bool,
}

impl TextStyle {
    pub fn sized(font_size: f64) -> Self {
        Self {
            font_size,
            bold: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

/// Font-independent measurer: every glyph is `char_width_factor` ems wide.
///
/// Output depends only on the text and the style, so layouts are reproducible across machines.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl DeterministicTextMeasurer {
    pub fn normalized_text_lines(text: &str) -> Vec<&str> {
        let out: Vec<&str> = text.split('\n').collect();
        if out.is_empty() { vec![""] } else { out }
    }
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            1.2
        } else {
            self.line_height_factor
        };
        // Bold glyphs run roughly a tenth wider.
        let weight_factor = if style.bold { 1.1 } else { 1.0 };

        let lines = Self::normalized_text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_chars = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        TextMetrics {
            width: max_chars as f64 * font_size * char_width_factor * weight_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_measurer_scales_with_font_size() {
        let m = DeterministicTextMeasurer::default();
        let small = m.measure("abcd", &TextStyle::sized(10.0));
        let large = m.measure("abcd", &TextStyle::sized(20.0));
        assert_eq!(small.width, 24.0);
        assert_eq!(large.width, 48.0);
        assert_eq!(small.height, 12.0);
    }

    #[test]
    fn multi_line_text_uses_widest_line() {
        let m = DeterministicTextMeasurer::default();
        let metrics = m.measure("ab\nabcdef", &TextStyle::sized(10.0));
        assert_eq!(metrics.line_count, 2);
        assert_eq!(metrics.width, 36.0);
        assert_eq!(metrics.height, 24.0);
    }
}
