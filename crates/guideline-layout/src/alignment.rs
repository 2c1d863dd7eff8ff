//! Alignment of content inside a box, expressed as a pair of guides

use crate::axis::Axis;
use crate::guide::GuideId;

/// Alignment across both axes used for positioning content within a box.
///
/// Each component is a guide: children are positioned so that their guide
/// lines up with the parent's (or with each other's, inside containers).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Alignment {
    /// Guide measured along x.
    pub horizontal: GuideId,
    /// Guide measured along y.
    pub vertical: GuideId,
}

impl Alignment {
    /// Creates a new [`Alignment`] from explicit horizontal and vertical guides.
    pub const fn new(horizontal: GuideId, vertical: GuideId) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub const TOP_LEADING: Self = Self::new(GuideId::LEADING, GuideId::TOP);
    pub const TOP: Self = Self::new(GuideId::CENTER_X, GuideId::TOP);
    pub const TOP_TRAILING: Self = Self::new(GuideId::TRAILING, GuideId::TOP);
    pub const LEADING: Self = Self::new(GuideId::LEADING, GuideId::CENTER_Y);
    pub const CENTER: Self = Self::new(GuideId::CENTER_X, GuideId::CENTER_Y);
    pub const TRAILING: Self = Self::new(GuideId::TRAILING, GuideId::CENTER_Y);
    pub const BOTTOM_LEADING: Self = Self::new(GuideId::LEADING, GuideId::BOTTOM);
    pub const BOTTOM: Self = Self::new(GuideId::CENTER_X, GuideId::BOTTOM);
    pub const BOTTOM_TRAILING: Self = Self::new(GuideId::TRAILING, GuideId::BOTTOM);
    pub const FIRST_BASELINE: Self = Self::new(GuideId::CENTER_X, GuideId::FIRST_BASELINE);
    pub const LAST_BASELINE: Self = Self::new(GuideId::CENTER_X, GuideId::LAST_BASELINE);

    /// Returns the guide used along `axis`.
    #[inline]
    pub fn guide(&self, axis: Axis) -> GuideId {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Returns a copy with the guide for `guide.axis()` replaced.
    pub fn with_guide(self, guide: GuideId) -> Self {
        match guide.axis() {
            Axis::Horizontal => Self {
                horizontal: guide,
                ..self
            },
            Axis::Vertical => Self {
                vertical: guide,
                ..self
            },
        }
    }

    /// Returns the first component whose guide does not measure along the
    /// axis it is used for.
    pub fn misplaced_guide(&self) -> Option<(GuideId, Axis)> {
        if self.horizontal.axis() != Axis::Horizontal {
            return Some((self.horizontal, Axis::Horizontal));
        }
        if self.vertical.axis() != Axis::Vertical {
            return Some((self.vertical, Axis::Vertical));
        }
        None
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::CENTER
    }
}
