//! Label measurement

use nalgebra::Vector2;

use crate::menu::constants::{TEXT_CHAR_WIDTH, TEXT_LINE_HEIGHT};

/// Measures the natural size of a label.
///
/// Hosts with a real text shaper implement this on top of it; the menu tree only needs
/// a width and a height per label.
pub trait TextMetrics {
    /// Size of `text` without any padding.
    fn measure(&self, text: &str) -> Vector2<f64>;
}

/// Estimates label sizes from a fixed character width and line height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproximateMetrics {
    /// Width of a single character.
    pub char_width: f64,
    /// Height of a single line.
    pub line_height: f64,
}

impl Default for ApproximateMetrics {
    fn default() -> Self {
        Self {
            char_width: TEXT_CHAR_WIDTH,
            line_height: TEXT_LINE_HEIGHT,
        }
    }
}

impl TextMetrics for ApproximateMetrics {
    fn measure(&self, text: &str) -> Vector2<f64> {
        let mut lines = 0usize;
        let mut widest = 0usize;
        for line in text.lines() {
            lines += 1;
            widest = widest.max(line.chars().count());
        }
        Vector2::new(
            widest as f64 * self.char_width,
            lines.max(1) as f64 * self.line_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_uses_longest_line() {
        let metrics = ApproximateMetrics::default();
        let size = metrics.measure("Open\nOpen with...");
        assert_eq!(size.x, 12.0 * TEXT_CHAR_WIDTH);
        assert_eq!(size.y, 2.0 * TEXT_LINE_HEIGHT);
    }

    #[test]
    fn test_empty_label_keeps_one_line() {
        let size = ApproximateMetrics::default().measure("");
        assert_eq!(size.x, 0.0);
        assert_eq!(size.y, TEXT_LINE_HEIGHT);
    }
}
