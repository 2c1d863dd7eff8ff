//! Assertion helpers for frames and sizes
//!
//! Layout math is done in `f64`; these helpers compare with an explicit
//! tolerance and name the component that differs.

use guideline_geometry::{EdgeInsets, Frame, Point, Size};

/// Default tolerance for frame comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f64, expected: f64, tolerance: f64, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

pub fn assert_size_approx_eq(actual: Size, expected: Size, tolerance: f64, msg: &str) {
    assert_approx_eq(actual.width, expected.width, tolerance, &format!("{msg} - width"));
    assert_approx_eq(
        actual.height,
        expected.height,
        tolerance,
        &format!("{msg} - height"),
    );
}

/// Assert that a frame is approximately equal to another.
pub fn assert_frame_approx_eq(actual: Frame, expected: Frame, tolerance: f64, msg: &str) {
    assert_approx_eq(actual.x(), expected.x(), tolerance, &format!("{msg} - x"));
    assert_approx_eq(actual.y(), expected.y(), tolerance, &format!("{msg} - y"));
    assert_size_approx_eq(actual.size, expected.size, tolerance, msg);
}

/// Assert that `inner` sits inside `outer` at exactly `insets` from each edge.
pub fn assert_inset_by(outer: Frame, inner: Frame, insets: EdgeInsets, tolerance: f64, msg: &str) {
    assert_frame_approx_eq(inner, outer.inset(insets), tolerance, msg);
}

/// Assert that a frame contains a point.
pub fn assert_frame_contains_point(frame: Frame, point: Point, msg: &str) {
    assert!(
        frame.contains(point),
        "{}: point ({}, {}) not in frame {:?}",
        msg,
        point.x,
        point.y,
        frame
    );
}

/// Assert that a size is finite and non-negative.
pub fn assert_valid_size(size: Size, msg: &str) {
    assert!(
        size.is_valid(),
        "{}: {}x{} is not a legal size",
        msg,
        size.width,
        size.height
    );
}

/// Assert that `a` and `b` are the same frame bit for bit.
pub fn assert_frame_bits_eq(a: Frame, b: Frame, msg: &str) {
    let bits = |frame: Frame| {
        [
            frame.origin.x.to_bits(),
            frame.origin.y.to_bits(),
            frame.size.width.to_bits(),
            frame.size.height.to_bits(),
        ]
    };
    assert_eq!(bits(a), bits(b), "{msg}: {a:?} != {b:?}");
}

#[cfg(test)]
#[path = "tests/assertions_tests.rs"]
mod tests;
