//! Pixel snapping
//!
//! A pure post-process: rounds every origin and size component onto the
//! device grid independently, ties to even. Nothing here feeds back into
//! measurement or placement.

use guideline_geometry::{Frame, PixelScale, Point, Size};

use crate::geometry::FrameMap;

pub fn snap_frame(frame: Frame, scale: PixelScale) -> Frame {
    Frame::new(
        Point::new(scale.snap(frame.origin.x), scale.snap(frame.origin.y)),
        Size::new(scale.snap(frame.size.width), scale.snap(frame.size.height)),
    )
}

pub fn snap_frames(frames: &FrameMap, scale: PixelScale) -> FrameMap {
    frames
        .iter()
        .map(|(node, frame)| (node, snap_frame(frame, scale)))
        .collect()
}

#[cfg(test)]
#[path = "tests/snap_tests.rs"]
mod tests;
