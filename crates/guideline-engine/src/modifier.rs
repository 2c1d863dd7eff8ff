//! Built-in single-child transforms
//!
//! Each [`ModifierKind`] answers three questions for the measurement and
//! placement passes: what to offer the child, what size to report for itself
//! once the child has answered, and where the child's origin goes inside its
//! own box.

use std::fmt;
use std::sync::Arc;

use guideline_geometry::{Color, EdgeInsets, Point, Size};
use guideline_layout::{
    align_in, Alignment, Axis, LayoutModifier, ProposedDimension, ProposedSize, ViewDimensions,
};

use crate::context::LayoutContext;

/// Fixed or flexible frame around a child.
///
/// A fixed `width`/`height` decides the frame's own extent regardless of the
/// child. `min_*`/`max_*` clamp the offer passed to the child and the frame's
/// own extent. Axes with neither take the child's extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameSpec {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
    pub min_height: Option<f64>,
    pub max_height: Option<f64>,
    /// Where the child sits inside the frame.
    pub alignment: Alignment,
}

impl FrameSpec {
    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn width(width: f64) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    pub fn height(height: f64) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }

    /// Takes every bit of offered space on both axes.
    pub fn fill() -> Self {
        Self {
            max_width: Some(f64::INFINITY),
            max_height: Some(f64::INFINITY),
            ..Self::default()
        }
    }

    pub fn with_min_width(mut self, value: f64) -> Self {
        self.min_width = Some(value);
        self
    }

    pub fn with_max_width(mut self, value: f64) -> Self {
        self.max_width = Some(value);
        self
    }

    pub fn with_min_height(mut self, value: f64) -> Self {
        self.min_height = Some(value);
        self
    }

    pub fn with_max_height(mut self, value: f64) -> Self {
        self.max_height = Some(value);
        self
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Drops values that cannot describe an extent. Maxima may be +inf.
    pub(crate) fn sanitized(self) -> Self {
        let extent = |value: Option<f64>| value.filter(|v| v.is_finite() && *v >= 0.0);
        let limit = |value: Option<f64>| value.filter(|v| !v.is_nan() && *v >= 0.0);
        Self {
            width: extent(self.width),
            height: extent(self.height),
            min_width: extent(self.min_width),
            max_width: limit(self.max_width),
            min_height: extent(self.min_height),
            max_height: limit(self.max_height),
            alignment: self.alignment,
        }
    }

    fn axis(&self, axis: Axis) -> (Option<f64>, Option<f64>, Option<f64>) {
        match axis {
            Axis::Horizontal => (self.width, self.min_width, self.max_width),
            Axis::Vertical => (self.height, self.min_height, self.max_height),
        }
    }

    fn propose_axis(&self, axis: Axis, offered: ProposedDimension) -> ProposedDimension {
        match self.axis(axis) {
            (Some(fixed), _, _) => ProposedDimension::exact(fixed),
            (None, None, None) => offered,
            (None, min, max) => offered.clamp(min, max),
        }
    }

    fn extent(&self, axis: Axis, offered: ProposedDimension, child: f64) -> f64 {
        match self.axis(axis) {
            (Some(fixed), _, _) => fixed,
            (None, None, None) => child,
            (None, min, max) => {
                let target = offered.value().unwrap_or(child);
                let lower = min.unwrap_or(child);
                let upper = max.unwrap_or(child).max(lower);
                target.max(lower).min(upper)
            }
        }
    }
}

#[derive(Clone)]
pub enum ModifierKind {
    /// Insets the child on each edge.
    Padding(EdgeInsets),
    Frame(FrameSpec),
    /// Shifts the child where it is drawn. Layout is unaffected.
    Offset(Point),
    /// Takes all available space and puts the child's origin at a point.
    Position(Point),
    /// Paints behind the child. Its own frame is the painted area.
    Background(Color),
    /// Carries guide overrides only.
    Guides,
    /// Padding by the context's safe-area insets.
    SafeArea,
    /// Proposes `Infinite` along one axis, scroll-view style.
    Unbounded(Axis),
    Custom(Arc<dyn LayoutModifier>),
}

impl ModifierKind {
    pub fn name(&self) -> &str {
        match self {
            ModifierKind::Padding(_) => "Padding",
            ModifierKind::Frame(_) => "Frame",
            ModifierKind::Offset(_) => "Offset",
            ModifierKind::Position(_) => "Position",
            ModifierKind::Background(_) => "Background",
            ModifierKind::Guides => "Guides",
            ModifierKind::SafeArea => "SafeArea",
            ModifierKind::Unbounded(_) => "Unbounded",
            ModifierKind::Custom(modifier) => modifier.debug_name(),
        }
    }

    pub(crate) fn propose(&self, proposal: ProposedSize, context: &LayoutContext) -> ProposedSize {
        match self {
            ModifierKind::Padding(insets) => deflate(proposal, *insets),
            ModifierKind::SafeArea => deflate(proposal, context.safe_area()),
            ModifierKind::Frame(spec) => ProposedSize::new(
                spec.propose_axis(Axis::Horizontal, proposal.width),
                spec.propose_axis(Axis::Vertical, proposal.height),
            ),
            ModifierKind::Unbounded(axis) => proposal.with(*axis, ProposedDimension::Infinite),
            ModifierKind::Custom(modifier) => modifier.propose(proposal),
            ModifierKind::Offset(_)
            | ModifierKind::Position(_)
            | ModifierKind::Background(_)
            | ModifierKind::Guides => proposal,
        }
    }

    /// Own size once the child has been measured. `available` is the nearest
    /// bounded extent on each axis, this modifier's own proposal included.
    pub(crate) fn derive(
        &self,
        child: Size,
        proposal: ProposedSize,
        available: ProposedSize,
        context: &LayoutContext,
    ) -> Size {
        match self {
            ModifierKind::Padding(insets) => inflate(child, *insets),
            ModifierKind::SafeArea => inflate(child, context.safe_area()),
            ModifierKind::Frame(spec) => Size::new(
                spec.extent(Axis::Horizontal, proposal.width, child.width),
                spec.extent(Axis::Vertical, proposal.height, child.height),
            ),
            ModifierKind::Position(_) => Size::new(
                available.width.resolve(child.width),
                available.height.resolve(child.height),
            ),
            ModifierKind::Unbounded(axis) => {
                let along = proposal.get(*axis);
                match axis {
                    Axis::Horizontal => Size::new(along.resolve(child.width), child.height),
                    Axis::Vertical => Size::new(child.width, along.resolve(child.height)),
                }
            }
            ModifierKind::Custom(modifier) => modifier.derive(child, proposal),
            ModifierKind::Offset(_) | ModifierKind::Background(_) | ModifierKind::Guides => child,
        }
    }

    /// Child origin in this modifier's local box.
    pub(crate) fn place_child(
        &self,
        own: Size,
        child: &ViewDimensions,
        context: &LayoutContext,
    ) -> Point {
        match self {
            ModifierKind::Padding(insets) => Point::new(insets.left, insets.top),
            ModifierKind::SafeArea => {
                let insets = context.safe_area();
                Point::new(insets.left, insets.top)
            }
            ModifierKind::Frame(spec) => align_in(spec.alignment, own, child),
            ModifierKind::Position(point) => *point,
            ModifierKind::Offset(_) | ModifierKind::Unbounded(_) => Point::ZERO,
            ModifierKind::Custom(modifier) => modifier.place_child(own, child),
            ModifierKind::Background(_) | ModifierKind::Guides => {
                align_in(Alignment::CENTER, own, child)
            }
        }
    }

    /// Drawing-time shift applied to the child and everything below it.
    pub(crate) fn draw_shift(&self) -> Point {
        match self {
            ModifierKind::Offset(delta) => *delta,
            _ => Point::ZERO,
        }
    }
}

impl fmt::Debug for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKind::Padding(insets) => f.debug_tuple("Padding").field(insets).finish(),
            ModifierKind::Frame(spec) => f.debug_tuple("Frame").field(spec).finish(),
            ModifierKind::Offset(delta) => f.debug_tuple("Offset").field(delta).finish(),
            ModifierKind::Position(point) => f.debug_tuple("Position").field(point).finish(),
            ModifierKind::Background(color) => f.debug_tuple("Background").field(color).finish(),
            ModifierKind::Guides => f.write_str("Guides"),
            ModifierKind::SafeArea => f.write_str("SafeArea"),
            ModifierKind::Unbounded(axis) => f.debug_tuple("Unbounded").field(axis).finish(),
            ModifierKind::Custom(modifier) => {
                f.debug_tuple("Custom").field(&modifier.debug_name()).finish()
            }
        }
    }
}

fn deflate(proposal: ProposedSize, insets: EdgeInsets) -> ProposedSize {
    proposal.deflate(insets.horizontal_sum(), insets.vertical_sum())
}

fn inflate(size: Size, insets: EdgeInsets) -> Size {
    Size::new(
        size.width + insets.horizontal_sum(),
        size.height + insets.vertical_sum(),
    )
}

#[cfg(test)]
#[path = "tests/modifier_tests.rs"]
mod tests;
