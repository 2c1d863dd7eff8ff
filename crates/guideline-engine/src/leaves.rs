//! Built-in leaves

use guideline_geometry::Size;
use guideline_layout::{LeafMeasure, ProposedDimension, ProposedSize};

/// Layout-neutral leaf: reports back whatever it is offered.
///
/// `ideal` answers `Unspecified` components. A solid color or a shape is a
/// `Fill`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Fill {
    ideal: Size,
}

impl Fill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ideal(width: f64, height: f64) -> Self {
        Self {
            ideal: Size::new(width.max(0.0), height.max(0.0)),
        }
    }

    pub fn ideal(&self) -> Size {
        self.ideal
    }
}

impl LeafMeasure for Fill {
    fn measure(&self, proposal: ProposedSize) -> Size {
        let pick = |offered: ProposedDimension, ideal: f64| match offered {
            ProposedDimension::Exact(value) => value,
            ProposedDimension::Unspecified | ProposedDimension::Infinite => ideal,
        };
        Size::new(
            pick(proposal.width, self.ideal.width),
            pick(proposal.height, self.ideal.height),
        )
    }

    fn debug_name(&self) -> &str {
        "Fill"
    }
}

/// Rigid leaf: always reports its intrinsic size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedLeaf {
    size: Size,
}

impl FixedLeaf {
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

impl LeafMeasure for FixedLeaf {
    fn measure(&self, _proposal: ProposedSize) -> Size {
        self.size
    }

    fn handles_infinite(&self) -> bool {
        true
    }

    fn debug_name(&self) -> &str {
        "FixedLeaf"
    }
}

#[cfg(test)]
#[path = "tests/leaves_tests.rs"]
mod tests;
