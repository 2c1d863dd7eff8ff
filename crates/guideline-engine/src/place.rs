//! Placement pass
//!
//! Measurement already fixed every size and every child's origin inside its
//! parent. Placement walks the measured tree top-down and accumulates those
//! origins into root coordinates.

use guideline_geometry::{Frame, Point, Size};
use guideline_layout::{Alignment, Axis, StackAxis, ViewDimensions};
use smallvec::SmallVec;

use crate::geometry::FrameMap;
use crate::guides::align_on;
use crate::measure::{MeasureCache, MeasureKey};

#[inline]
pub(crate) fn extent(size: Size, axis: Axis) -> f64 {
    match axis {
        Axis::Horizontal => size.width,
        Axis::Vertical => size.height,
    }
}

fn point_on(primary: Axis, main: f64, cross: f64) -> Point {
    match primary {
        Axis::Horizontal => Point::new(main, cross),
        Axis::Vertical => Point::new(cross, main),
    }
}

fn size_on(primary: Axis, main: f64, cross: f64) -> Size {
    match primary {
        Axis::Horizontal => Size::new(main, cross),
        Axis::Vertical => Size::new(cross, main),
    }
}

/// Positions measured children of a container.
///
/// Linear stacks advance along the primary axis by each child's extent plus
/// `spacing` and align the cross axis on the shared guide. Depth stacks align
/// both axes. Returns the union extent of the children and their origins.
pub(crate) fn arrange_stack(
    axis: StackAxis,
    spacing: f64,
    alignment: Alignment,
    children: &[&ViewDimensions],
) -> (Size, SmallVec<[Point; 4]>) {
    let mut origins = SmallVec::with_capacity(children.len());
    match axis.primary() {
        Some(primary) => {
            let cross = primary.cross_axis();
            let cross_offsets = align_on(alignment.guide(cross), children);
            let mut cursor = 0.0;
            let mut cross_extent = 0.0_f64;
            for (index, (dimensions, cross_offset)) in
                children.iter().zip(cross_offsets).enumerate()
            {
                if index > 0 {
                    cursor += spacing;
                }
                origins.push(point_on(primary, cursor, cross_offset));
                cursor += extent(dimensions.size(), primary);
                cross_extent = cross_extent.max(cross_offset + extent(dimensions.size(), cross));
            }
            (size_on(primary, cursor, cross_extent), origins)
        }
        None => {
            let xs = align_on(alignment.horizontal, children);
            let ys = align_on(alignment.vertical, children);
            let mut width = 0.0_f64;
            let mut height = 0.0_f64;
            for ((dimensions, x), y) in children.iter().zip(xs).zip(ys) {
                origins.push(Point::new(x, y));
                width = width.max(x + dimensions.width());
                height = height.max(y + dimensions.height());
            }
            (Size::new(width, height), origins)
        }
    }
}

/// Turns the measured tree under `root` into absolute frames, in pre-order.
pub(crate) fn place_tree(cache: &MeasureCache, root: MeasureKey) -> FrameMap {
    let mut frames = FrameMap::with_capacity(cache.len());
    let mut pending: Vec<(MeasureKey, Point)> = vec![(root, Point::ZERO)];

    while let Some((key, origin)) = pending.pop() {
        let Some(record) = cache.get(&key) else {
            log::warn!("node {} was never measured under {:?}", key.node, key.proposal);
            continue;
        };
        frames.insert(key.node, Frame::new(origin, record.dimensions.size()));
        for child in record.children.iter().rev() {
            pending.push((child.key, origin + child.origin + child.shift));
        }
    }
    frames
}

#[cfg(test)]
#[path = "tests/place_tests.rs"]
mod tests;
