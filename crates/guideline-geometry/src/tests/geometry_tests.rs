use super::*;
use crate::PixelScale;

#[test]
fn inset_never_produces_negative_size() {
    let frame = Frame::new(Point::new(10.0, 10.0), Size::new(8.0, 30.0));
    let inner = frame.inset(EdgeInsets::uniform(5.0));
    assert_eq!(inner.origin, Point::new(15.0, 15.0));
    assert_eq!(inner.size, Size::new(0.0, 20.0));
}

#[test]
fn contains_includes_edges() {
    let frame = Frame::new(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    assert!(frame.contains(Point::new(10.0, 10.0)));
    assert!(!frame.contains(Point::new(10.5, 2.0)));
}

#[test]
fn size_validity_rejects_nan_and_negative() {
    assert!(Size::new(0.0, 3.0).is_valid());
    assert!(!Size::new(f64::NAN, 3.0).is_valid());
    assert!(!Size::new(-1.0, 3.0).is_valid());
    assert!(!Size::new(1.0, f64::INFINITY).is_valid());
}

#[test]
fn snap_rounds_half_to_even_on_device_grid() {
    let scale = PixelScale::new(2.0);
    // 0.25pt = 0.5px -> 0px, 0.75pt = 1.5px -> 2px
    assert_eq!(scale.snap(0.25), 0.0);
    assert_eq!(scale.snap(0.75), 1.0);
    assert_eq!(scale.snap(10.3), 10.5);
}

#[test]
fn invalid_scale_falls_back_to_one() {
    assert_eq!(PixelScale::new(0.0), PixelScale::ONE);
    assert_eq!(PixelScale::new(f64::NAN), PixelScale::ONE);
    assert_eq!(PixelScale::new(-3.0), PixelScale::ONE);
}

#[test]
fn rgb_is_opaque_rgba() {
    assert_eq!(crate::Color::rgb(0.2, 0.4, 0.6), crate::Color::rgba(0.2, 0.4, 0.6, 1.0));
    assert_eq!(crate::Color::rgba(0.0, 0.0, 0.0, 0.0), crate::Color::TRANSPARENT);
}
