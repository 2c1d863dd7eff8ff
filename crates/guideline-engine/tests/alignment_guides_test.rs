//! Alignment guides: geometric defaults, overrides, and the shared-guide
//! rule across subtrees that do not know about each other.

use std::sync::Arc;

use guideline_engine::prelude::*;
use guideline_engine::resolve_guide;
use guideline_testing::prelude::*;

fn layout(tree: &LayoutTree) -> Arc<LayoutSnapshot> {
    LayoutEngine::new()
        .run(tree, &LayoutContext::window(390.0, 844.0))
        .expect("tree has a root")
        .expect("pass was not superseded")
}

fn frame(snapshot: &LayoutSnapshot, node: NodeId) -> Frame {
    snapshot.frame(node).expect("node was placed")
}

#[test]
fn leaf_guides_have_geometric_defaults() {
    let leaf = ViewDimensions::new(Size::new(30.0, 20.0));

    assert_eq!(resolve_guide(&leaf, GuideId::LEADING), 0.0);
    assert_eq!(resolve_guide(&leaf, GuideId::TRAILING), 30.0);
    assert_eq!(resolve_guide(&leaf, GuideId::CENTER_X), 15.0);
    assert_eq!(resolve_guide(&leaf, GuideId::TOP), 0.0);
    assert_eq!(resolve_guide(&leaf, GuideId::BOTTOM), 20.0);
    assert_eq!(resolve_guide(&leaf, GuideId::CENTER_Y), 10.0);
    assert_eq!(resolve_guide(&leaf, GuideId::FIRST_BASELINE), 0.0);
    assert_eq!(resolve_guide(&leaf, GuideId::LAST_BASELINE), 20.0);
}

#[test]
fn column_lines_up_trailing_edges() {
    let mut tree = LayoutTree::new();
    let short = tree.fixed(30.0, 10.0);
    let long = tree.fixed(50.0, 10.0);
    let column = tree.vstack(&[short, long], 0.0, GuideId::TRAILING).unwrap();
    tree.set_root(column).unwrap();

    let snapshot = layout(&tree);

    assert_eq!(frame(&snapshot, short).max_x(), frame(&snapshot, long).max_x());
    assert_eq!(frame(&snapshot, short).x() - frame(&snapshot, column).x(), 20.0);
}

#[test]
fn baselines_of_shapes_fall_back_to_edges() {
    let mut tree = LayoutTree::new();
    let small = tree.fixed(10.0, 20.0);
    let large = tree.fixed(10.0, 40.0);
    let row = tree.hstack(&[small, large], 0.0, GuideId::LAST_BASELINE).unwrap();
    tree.set_root(row).unwrap();

    let snapshot = layout(&tree);

    assert_eq!(frame(&snapshot, small).max_y(), frame(&snapshot, large).max_y());

    let mut tree = LayoutTree::new();
    let small = tree.fixed(10.0, 20.0);
    let large = tree.fixed(10.0, 40.0);
    let row = tree.hstack(&[small, large], 0.0, GuideId::FIRST_BASELINE).unwrap();
    tree.set_root(row).unwrap();

    let snapshot = layout(&tree);

    assert_eq!(frame(&snapshot, small).y(), frame(&snapshot, large).y());
}

#[test]
fn computed_guides_line_up_siblings() {
    let mut tree = LayoutTree::new();
    let mid = tree.vertical_guide("mid");
    let a = tree.fixed(30.0, 20.0);
    let b = tree.fixed(30.0, 60.0);
    let guided_a = tree
        .alignment_guide(a, mid, GuideOverride::computed(|d| d.height() / 2.0))
        .unwrap();
    let guided_b = tree
        .alignment_guide(b, mid, GuideOverride::computed(|d| d.height() / 2.0))
        .unwrap();
    let row = tree.hstack(&[guided_a, guided_b], 0.0, mid).unwrap();
    tree.set_root(row).unwrap();

    let snapshot = layout(&tree);

    let row_y = frame(&snapshot, row).y();
    let offset_a = frame(&snapshot, a).y() - row_y;
    let offset_b = frame(&snapshot, b).y() - row_y;
    assert_eq!(offset_a, 20.0);
    assert_eq!(offset_b, 0.0);
    assert_eq!(offset_a + 10.0, offset_b + 30.0);
}

#[test]
fn guides_travel_out_of_nested_subtrees() {
    let mut tree = LayoutTree::new();
    let mid = tree.vertical_guide("mid");

    let caption = tree.fixed(30.0, 15.0);
    let a = tree.fixed(30.0, 20.0);
    let guided_a = tree.alignment_guide(a, mid, 10.0).unwrap();
    let padded_a = tree.padding(guided_a, EdgeInsets::uniform(5.0)).unwrap();
    let left = tree.vstack(&[caption, padded_a], 0.0, GuideId::CENTER_X).unwrap();

    let b = tree.fixed(30.0, 100.0);
    let guided_b = tree
        .alignment_guide(b, mid, GuideOverride::computed(|d| d.height() / 2.0))
        .unwrap();

    let row = tree.hstack(&[left, guided_b], 0.0, mid).unwrap();
    tree.set_root(row).unwrap();

    let snapshot = layout(&tree);

    let guide_a = frame(&snapshot, a).y() + 10.0;
    let guide_b = frame(&snapshot, b).y() + 50.0;
    assert_eq!(guide_a, guide_b);
    assert_eq!(frame(&snapshot, left).y() - frame(&snapshot, row).y(), 20.0);
}

#[test]
fn text_baselines_align_across_fonts() {
    let body: Arc<dyn TextMeasurer> = Arc::new(MonospacedTextMeasurer::new(8.0, 20.0, 16.0));
    let title: Arc<dyn TextMeasurer> = Arc::new(MonospacedTextMeasurer::new(12.0, 30.0, 24.0));
    let mut tree = LayoutTree::new();
    let small = tree.text("Hi", body);
    let large = tree.text("Hi", title);
    let row = tree.hstack(&[small, large], 4.0, GuideId::FIRST_BASELINE).unwrap();
    tree.set_root(row).unwrap();

    let snapshot = layout(&tree);

    assert_eq!(
        frame(&snapshot, small).y() + 16.0,
        frame(&snapshot, large).y() + 24.0
    );
}

#[test]
fn container_reexports_text_baselines() {
    let mut tree = LayoutTree::new();
    let icon = tree.fixed(20.0, 20.0);
    let label = tree.text("Label", text_measurer());
    let cell = tree.vstack(&[icon, label], 0.0, GuideId::LEADING).unwrap();
    let other = tree.text("Other", text_measurer());
    let row = tree.hstack(&[cell, other], 0.0, GuideId::FIRST_BASELINE).unwrap();
    tree.set_root(row).unwrap();

    let snapshot = layout(&tree);

    // the cell's first baseline is its label's, 20pt below the icon
    assert_eq!(frame(&snapshot, label).y() + 16.0, frame(&snapshot, other).y() + 16.0);
}

#[test]
fn unknown_custom_guide_resolves_to_zero() {
    let mut tree = LayoutTree::new();
    let nobody = tree.vertical_guide("nobody");
    let a = tree.fixed(10.0, 10.0);
    let b = tree.fixed(10.0, 50.0);
    let row = tree.hstack(&[a, b], 0.0, nobody).unwrap();
    tree.set_root(row).unwrap();

    let snapshot = layout(&tree);

    assert_eq!(frame(&snapshot, a).y(), frame(&snapshot, b).y());
}

#[test]
fn offset_moves_drawing_not_alignment() {
    let mut tree = LayoutTree::new();
    let mid = tree.vertical_guide("mid");
    let a = tree.fixed(30.0, 20.0);
    let guided_a = tree.alignment_guide(a, mid, 5.0).unwrap();
    let shifted = tree.offset(guided_a, 0.0, 100.0).unwrap();
    let b = tree.fixed(30.0, 60.0);
    let guided_b = tree.alignment_guide(b, mid, 30.0).unwrap();
    let row = tree.hstack(&[shifted, guided_b], 0.0, mid).unwrap();
    tree.set_root(row).unwrap();

    let snapshot = layout(&tree);

    let row_y = frame(&snapshot, row).y();
    assert_eq!(frame(&snapshot, shifted).y() - row_y, 25.0);
    assert_eq!(frame(&snapshot, a).y() + 5.0, frame(&snapshot, b).y() + 30.0 + 100.0);
}

#[test]
fn horizontal_custom_guide_aligns_a_column() {
    let mut tree = LayoutTree::new();
    let colon = tree.horizontal_guide("colon");
    let name = tree.fixed(40.0, 10.0);
    let name = tree.alignment_guide(name, colon, 40.0).unwrap();
    let email = tree.fixed(70.0, 10.0);
    let email = tree.alignment_guide(email, colon, 50.0).unwrap();
    let form = tree.vstack(&[name, email], 0.0, colon).unwrap();
    tree.set_root(form).unwrap();

    let snapshot = layout(&tree);

    assert_eq!(
        frame(&snapshot, name).x() + 40.0,
        frame(&snapshot, email).x() + 50.0
    );
}
