use super::*;
use guideline_geometry::EdgeInsets;
use guideline_layout::{GuideId, ProposedSize};

use crate::context::LayoutContext;
use crate::measure::Measurer;
use crate::tree::{LayoutTree, NodeId};

fn dims(width: f64, height: f64) -> ViewDimensions {
    ViewDimensions::new(Size::new(width, height))
}

#[test]
fn row_advances_and_centers_cross_axis() {
    let (a, b) = (dims(20.0, 10.0), dims(30.0, 40.0));
    let (size, origins) = arrange_stack(StackAxis::Horizontal, 10.0, Alignment::CENTER, &[&a, &b]);

    assert_eq!(size, Size::new(60.0, 40.0));
    assert_eq!(origins.as_slice(), &[Point::new(0.0, 15.0), Point::new(30.0, 0.0)]);
}

#[test]
fn column_aligns_leading_edges() {
    let (a, b) = (dims(20.0, 10.0), dims(50.0, 10.0));
    let alignment = Alignment::CENTER.with_guide(GuideId::LEADING);
    let (size, origins) = arrange_stack(StackAxis::Vertical, 0.0, alignment, &[&a, &b]);

    assert_eq!(size, Size::new(50.0, 20.0));
    assert_eq!(origins.as_slice(), &[Point::ZERO, Point::new(0.0, 10.0)]);
}

#[test]
fn column_trailing_alignment() {
    let (a, b) = (dims(30.0, 10.0), dims(50.0, 10.0));
    let alignment = Alignment::CENTER.with_guide(GuideId::TRAILING);
    let (_, origins) = arrange_stack(StackAxis::Vertical, 4.0, alignment, &[&a, &b]);

    assert_eq!(origins.as_slice(), &[Point::new(20.0, 0.0), Point::new(0.0, 14.0)]);
}

#[test]
fn overlay_aligns_both_axes() {
    let (back, badge) = (dims(100.0, 100.0), dims(20.0, 20.0));
    let (size, origins) =
        arrange_stack(StackAxis::Depth, 0.0, Alignment::BOTTOM_TRAILING, &[&back, &badge]);

    assert_eq!(size, Size::new(100.0, 100.0));
    assert_eq!(origins.as_slice(), &[Point::ZERO, Point::new(80.0, 80.0)]);
}

#[test]
fn explicit_guides_drive_cross_alignment() {
    let mut a = dims(10.0, 10.0);
    a.set_explicit(GuideId::CENTER_Y, 0.0);
    let b = dims(10.0, 30.0);
    let (size, origins) = arrange_stack(StackAxis::Horizontal, 0.0, Alignment::CENTER, &[&a, &b]);

    assert_eq!(origins.as_slice(), &[Point::new(0.0, 15.0), Point::new(10.0, 0.0)]);
    assert_eq!(size, Size::new(20.0, 30.0));
}

fn layout(tree: &LayoutTree, context: &LayoutContext) -> FrameMap {
    let root = tree.root().expect("tree has a root");
    let mut measurer = Measurer::new(tree, context);
    let measured = measurer.measure_root(root);
    let (cache, _) = measurer.finish();
    place_tree(&cache, measured.key)
}

#[test]
fn origins_accumulate_down_the_tree() {
    let mut tree = LayoutTree::new();
    let a = tree.fixed(10.0, 10.0);
    let b = tree.fixed(10.0, 10.0);
    let shifted = tree.offset(b, 5.0, 5.0).unwrap();
    let column = tree.vstack(&[a, shifted], 0.0, GuideId::CENTER_X).unwrap();
    let root = tree.padding(column, EdgeInsets::uniform(10.0)).unwrap();
    tree.set_root(root).unwrap();

    let frames = layout(&tree, &LayoutContext::new(ProposedSize::UNSPECIFIED));

    let order: Vec<NodeId> = frames.iter().map(|(node, _)| node).collect();
    assert_eq!(order, vec![root, column, a, shifted, b]);
    assert_eq!(frames.get(root), Some(Frame::new(Point::ZERO, Size::new(30.0, 40.0))));
    assert_eq!(frames.get(column), Some(Frame::new(Point::new(10.0, 10.0), Size::new(10.0, 20.0))));
    assert_eq!(frames.get(a), Some(Frame::new(Point::new(10.0, 10.0), Size::new(10.0, 10.0))));
    // the offset keeps its layout slot, only its content moves
    assert_eq!(frames.get(shifted), Some(Frame::new(Point::new(10.0, 20.0), Size::new(10.0, 10.0))));
    assert_eq!(frames.get(b), Some(Frame::new(Point::new(15.0, 25.0), Size::new(10.0, 10.0))));
}

#[test]
fn unmeasured_keys_place_nothing() {
    let mut tree = LayoutTree::new();
    let node = tree.fill();
    let key = MeasureKey {
        node,
        proposal: ProposedSize::UNSPECIFIED,
        bounds: ProposedSize::UNSPECIFIED,
    };

    assert!(place_tree(&MeasureCache::default(), key).is_empty());
}
