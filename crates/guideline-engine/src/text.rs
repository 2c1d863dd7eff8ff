//! Text leaves and the measurer seam they sit on
//!
//! Shaping is not this crate's business: a [`TextMeasurer`] turns a string and
//! an optional wrap width into metrics, and [`TextLeaf`] adapts that to the
//! negotiation protocol.

use std::sync::Arc;

use guideline_geometry::Size;
use guideline_layout::{Baselines, LeafMeasure, ProposedDimension, ProposedSize};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    /// Height of a single line of text
    pub line_height: f64,
    pub line_count: usize,
    /// Baseline of the first line, from the top of the text box
    pub first_baseline: f64,
    /// Baseline of the last line, from the top of the text box
    pub last_baseline: f64,
}

impl TextMetrics {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

pub trait TextMeasurer: Send + Sync + 'static {
    /// Measures `text`, wrapping at `max_width` when given.
    fn measure(&self, text: &str, max_width: Option<f64>) -> TextMetrics;
}

/// Fixed-advance measurer with greedy word wrapping.
///
/// Good enough for tests and demos; every character is `char_width` wide.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospacedTextMeasurer {
    char_width: f64,
    line_height: f64,
    ascent: f64,
}

impl MonospacedTextMeasurer {
    pub const CHAR_WIDTH: f64 = 8.0;
    pub const LINE_HEIGHT: f64 = 20.0;
    pub const ASCENT: f64 = 16.0;

    pub fn new(char_width: f64, line_height: f64, ascent: f64) -> Self {
        Self {
            char_width,
            line_height,
            ascent,
        }
    }

    pub fn shared() -> Arc<dyn TextMeasurer> {
        Arc::new(Self::default())
    }

    /// Splits `text` into lines no wider than `max_chars` characters.
    fn wrap(&self, text: &str, max_chars: Option<usize>) -> Vec<usize> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let Some(max_chars) = max_chars else {
                lines.push(paragraph.chars().count());
                continue;
            };
            let mut current = 0usize;
            for word in paragraph.split_whitespace() {
                let mut remaining = word.chars().count();
                let needed = if current == 0 { remaining } else { current + 1 + remaining };
                if needed <= max_chars {
                    current = needed;
                    continue;
                }
                if current > 0 {
                    lines.push(current);
                }
                // words longer than a line are broken at the limit
                while remaining > max_chars {
                    lines.push(max_chars);
                    remaining -= max_chars;
                }
                current = remaining;
            }
            lines.push(current);
        }
        lines
    }
}

impl Default for MonospacedTextMeasurer {
    fn default() -> Self {
        Self::new(Self::CHAR_WIDTH, Self::LINE_HEIGHT, Self::ASCENT)
    }
}

impl TextMeasurer for MonospacedTextMeasurer {
    fn measure(&self, text: &str, max_width: Option<f64>) -> TextMetrics {
        let max_chars = max_width
            .filter(|width| width.is_finite())
            .map(|width| ((width / self.char_width).floor() as usize).max(1));
        let lines = self.wrap(text, max_chars);
        let line_count = lines.len().max(1);
        let widest = lines.iter().copied().max().unwrap_or(0);

        TextMetrics {
            width: widest as f64 * self.char_width,
            height: line_count as f64 * self.line_height,
            line_height: self.line_height,
            line_count,
            first_baseline: self.ascent,
            last_baseline: (line_count - 1) as f64 * self.line_height + self.ascent,
        }
    }
}

/// Leaf that lays out a string through a [`TextMeasurer`].
///
/// An exact width wraps the text; `Unspecified` and `Infinite` widths lay it
/// out on as few lines as its hard breaks allow. The proposed height is never
/// taken: text reports the height its lines need.
pub struct TextLeaf {
    text: String,
    measurer: Arc<dyn TextMeasurer>,
}

impl TextLeaf {
    pub fn new(text: impl Into<String>, measurer: Arc<dyn TextMeasurer>) -> Self {
        Self {
            text: text.into(),
            measurer,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn metrics(&self, proposal: ProposedSize) -> TextMetrics {
        let max_width = match proposal.width {
            ProposedDimension::Exact(width) => Some(width),
            ProposedDimension::Unspecified | ProposedDimension::Infinite => None,
        };
        self.measurer.measure(&self.text, max_width)
    }
}

impl LeafMeasure for TextLeaf {
    fn measure(&self, proposal: ProposedSize) -> Size {
        self.metrics(proposal).size()
    }

    fn baselines(&self, proposal: ProposedSize, _size: Size) -> Baselines {
        let metrics = self.metrics(proposal);
        Baselines::new(metrics.first_baseline, metrics.last_baseline)
    }

    fn handles_infinite(&self) -> bool {
        true
    }

    fn debug_name(&self) -> &str {
        "Text"
    }
}

#[cfg(test)]
#[path = "tests/text_tests.rs"]
mod tests;
