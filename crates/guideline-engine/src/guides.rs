//! Alignment guide resolution
//!
//! A view's guides are always expressed in its own box. When a parent is
//! measured, every guide its children define explicitly is translated into
//! the parent's box and re-exported, so an ancestor can align subtrees that
//! know nothing about each other.

use guideline_geometry::{Point, Size};
use guideline_layout::{Axis, Baselines, GuideId, GuideOverride, ViewDimensions};
use smallvec::SmallVec;

/// Resolves `guide` in `dimensions`: overrides first, then the geometric
/// default. Never fails; an unknown custom guide is 0.
#[inline]
pub fn resolve_guide(dimensions: &ViewDimensions, guide: GuideId) -> f64 {
    dimensions.guide(guide)
}

/// Shared-guide algorithm.
///
/// `participants` pairs each participant's accumulated offset with its guide
/// value. Returns the offset that puts every guide on the common reference
/// line `max(accumulated + guide)`.
pub fn shared_guide_offsets(participants: &[(f64, f64)]) -> SmallVec<[f64; 4]> {
    let reference = participants
        .iter()
        .map(|(accumulated, guide)| accumulated + guide)
        .fold(f64::NEG_INFINITY, f64::max);
    participants
        .iter()
        .map(|(_, guide)| reference - guide)
        .collect()
}

/// Aligns siblings on `guide` and returns each one's offset along the
/// guide's axis.
pub(crate) fn align_on(guide: GuideId, children: &[&ViewDimensions]) -> SmallVec<[f64; 4]> {
    let participants: SmallVec<[(f64, f64); 4]> = children
        .iter()
        .map(|dimensions| (0.0, resolve_guide(dimensions, guide)))
        .collect();
    shared_guide_offsets(&participants)
}

fn along(point: Point, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => point.x,
        Axis::Vertical => point.y,
    }
}

fn translate_baselines(baselines: Baselines, origin: Point) -> Baselines {
    Baselines {
        first: baselines.first.map(|value| value + origin.y),
        last: baselines.last.map(|value| value + origin.y),
    }
}

/// Dimensions of a modifier of size `own` whose child sits at `origin`.
/// `overrides` are evaluated against the propagated dimensions and win.
pub(crate) fn modifier_dimensions(
    own: Size,
    child: &ViewDimensions,
    origin: Point,
    overrides: &[(GuideId, GuideOverride)],
) -> ViewDimensions {
    let mut dimensions =
        ViewDimensions::new(own).with_baselines(translate_baselines(child.baselines(), origin));
    for (guide, value) in child.explicit_guides() {
        dimensions.set_explicit(guide, value + along(origin, guide.axis()));
    }
    if overrides.is_empty() {
        return dimensions;
    }
    let base = dimensions.clone();
    for (guide, value) in overrides {
        dimensions.set_explicit(*guide, value.resolve(&base));
    }
    dimensions
}

/// Dimensions of a container of size `own`. The first child (in order) that
/// defines a guide decides its value; baselines come from the first and last
/// children that have text.
pub(crate) fn container_dimensions(
    own: Size,
    children: &[(&ViewDimensions, Point)],
) -> ViewDimensions {
    let first = children.iter().find_map(|(dimensions, origin)| {
        dimensions.baselines().first.map(|value| value + origin.y)
    });
    let last = children.iter().rev().find_map(|(dimensions, origin)| {
        dimensions.baselines().last.map(|value| value + origin.y)
    });
    let mut result = ViewDimensions::new(own).with_baselines(Baselines { first, last });
    for (dimensions, origin) in children {
        for (guide, value) in dimensions.explicit_guides() {
            result.define_if_absent(guide, value + along(*origin, guide.axis()));
        }
    }
    result
}

#[cfg(test)]
#[path = "tests/guides_tests.rs"]
mod tests;
