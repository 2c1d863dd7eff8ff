//! Extension points: custom leaves and custom modifiers

use guideline_geometry::{Point, Size};

use crate::alignment::Alignment;
use crate::axis::Axis;
use crate::dimensions::{Baselines, ViewDimensions};
use crate::proposal::ProposedSize;

/// Intrinsic measurement of a childless node.
///
/// Implementations must be pure: the same proposal always yields the same
/// size, with no side effects. The engine memoizes on that assumption.
pub trait LeafMeasure: Send + Sync {
    /// Returns the size this leaf chooses for `proposal`.
    ///
    /// An `Unspecified` component asks for the natural size on that axis.
    /// `Infinite` components only reach leaves that return true from
    /// [`handles_infinite`](Self::handles_infinite).
    fn measure(&self, proposal: ProposedSize) -> Size;

    /// Text metrics for the size chosen under `proposal`.
    fn baselines(&self, _proposal: ProposedSize, _size: Size) -> Baselines {
        Baselines::NONE
    }

    /// Whether the leaf understands an `Infinite` proposal. Leaves that do
    /// not are handed the nearest bounded ancestor's extent instead.
    fn handles_infinite(&self) -> bool {
        false
    }

    fn debug_name(&self) -> &str {
        "Leaf"
    }
}

impl<F> LeafMeasure for F
where
    F: Fn(ProposedSize) -> Size + Send + Sync,
{
    fn measure(&self, proposal: ProposedSize) -> Size {
        self(proposal)
    }
}

/// A single-child layout transform.
///
/// The engine calls [`propose`](Self::propose) to derive the child's offer,
/// measures the child, then [`derive`](Self::derive) to choose its own size.
/// During placement [`place_child`](Self::place_child) returns the child's
/// origin in the modifier's local box.
pub trait LayoutModifier: Send + Sync {
    fn propose(&self, proposal: ProposedSize) -> ProposedSize {
        proposal
    }

    fn derive(&self, child: Size, _proposal: ProposedSize) -> Size {
        child
    }

    /// Default rule: center the child in the modifier's own box.
    fn place_child(&self, own: Size, child: &ViewDimensions) -> Point {
        align_in(Alignment::CENTER, own, child)
    }

    fn debug_name(&self) -> &str {
        "LayoutModifier"
    }
}

/// Origin that lines up `child`'s guides with the geometric guides of a box
/// of size `own`, along both axes of `alignment`.
pub fn align_in(alignment: Alignment, own: Size, child: &ViewDimensions) -> Point {
    let own_dimensions = ViewDimensions::new(own);
    let offset = |axis: Axis| {
        let guide = alignment.guide(axis);
        own_dimensions.guide(guide) - child.guide(guide)
    };
    Point::new(offset(Axis::Horizontal), offset(Axis::Vertical))
}
