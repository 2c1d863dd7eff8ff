//! Immutable ambient inputs threaded through a layout pass

use guideline_geometry::{EdgeInsets, PixelScale};
use guideline_layout::ProposedSize;

/// Everything a pass needs besides the tree itself.
///
/// The context never changes while a pass runs; build a new one for the next
/// invalidation instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutContext {
    proposal: ProposedSize,
    scale: PixelScale,
    safe_area: EdgeInsets,
}

impl LayoutContext {
    pub fn new(proposal: ProposedSize) -> Self {
        Self {
            proposal,
            scale: PixelScale::ONE,
            safe_area: EdgeInsets::ZERO,
        }
    }

    /// Context for a window or device of `width` x `height` points.
    pub fn window(width: f64, height: f64) -> Self {
        Self::new(ProposedSize::exact(width, height))
    }

    pub fn with_scale(mut self, factor: f64) -> Self {
        self.scale = PixelScale::new(factor);
        self
    }

    /// Insets applied by `safe_area` modifiers. Negative or non-finite
    /// components are treated as zero.
    pub fn with_safe_area(mut self, insets: EdgeInsets) -> Self {
        let sanitize = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
        self.safe_area = EdgeInsets::from_components(
            sanitize(insets.left),
            sanitize(insets.top),
            sanitize(insets.right),
            sanitize(insets.bottom),
        );
        self
    }

    /// Root proposal, usually the window bounds.
    pub fn proposal(&self) -> ProposedSize {
        self.proposal
    }

    pub fn scale(&self) -> PixelScale {
        self.scale
    }

    pub fn safe_area(&self) -> EdgeInsets {
        self.safe_area
    }
}
