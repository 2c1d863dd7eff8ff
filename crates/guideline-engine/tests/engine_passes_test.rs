//! Pass-level behavior: publishing, invalidation, memoization, faults,
//! snapping, and the geometry queries that read a finished pass.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread;

use guideline_engine::prelude::*;
use guideline_testing::prelude::*;

fn run(engine: &LayoutEngine, tree: &LayoutTree, context: &LayoutContext) -> Arc<LayoutSnapshot> {
    engine
        .run(tree, context)
        .expect("tree has a root")
        .expect("pass was not superseded")
}

#[test]
fn each_proposal_is_measured_once_per_pass() {
    let counting = CountingLeaf::new(50.0, 10.0);
    let calls = counting.calls();
    let mut tree = LayoutTree::new();
    let leaf = tree.leaf(counting);
    let wrapped = tree.padding(leaf, EdgeInsets::uniform(2.0)).unwrap();
    let wrapped = tree.background(wrapped, Color::GREEN).unwrap();
    let left = tree.fill();
    let right = tree.fill();
    let row = tree.hstack(&[left, wrapped, right], 0.0, GuideId::CENTER_Y).unwrap();
    tree.set_root(row).unwrap();
    let engine = LayoutEngine::new();

    let snapshot = run(&engine, &tree, &LayoutContext::window(400.0, 100.0));

    // once for its natural width, once for its share of the row
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(snapshot.frame(leaf).unwrap().size, Size::new(50.0, 10.0));
    assert!(snapshot.measurement_count() >= tree.len());

    run(&engine, &tree, &LayoutContext::window(400.0, 100.0));
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[test]
fn broken_leaf_is_laid_out_empty() {
    let mut tree = LayoutTree::new();
    let broken = tree.leaf(FaultyLeaf(Size::new(f64::INFINITY, -1.0)));
    let neighbour = tree.fixed(20.0, 20.0);
    let row = tree.hstack(&[broken, neighbour], 10.0, GuideId::TOP).unwrap();
    tree.set_root(row).unwrap();

    let snapshot = run(&LayoutEngine::new(), &tree, &LayoutContext::window(200.0, 100.0));

    assert_eq!(snapshot.frame(broken).unwrap().size, Size::ZERO);
    assert_eq!(snapshot.frame(neighbour).unwrap().x(), 10.0);
    assert!(snapshot.faults().iter().any(|fault| matches!(
        fault,
        LayoutFault::MeasurementFault { node, .. } if *node == broken
    )));
}

#[test]
fn scroll_content_sees_the_viewport_when_it_cannot_be_infinite() {
    let recording = RecordingLeaf::new();
    let mut tree = LayoutTree::new();
    let leaf = tree.leaf(recording.clone());
    let scroll = tree.unbounded(leaf, Axis::Vertical).unwrap();
    tree.set_root(scroll).unwrap();

    let snapshot = run(&LayoutEngine::new(), &tree, &LayoutContext::window(390.0, 844.0));

    assert_eq!(recording.proposals(), vec![ProposedSize::exact(390.0, 844.0)]);
    assert_eq!(
        snapshot.faults(),
        &[LayoutFault::AmbiguousProposal {
            node: leaf,
            axis: Axis::Vertical,
            substituted: ProposedDimension::Exact(844.0),
        }]
    );
}

#[test]
fn scroll_content_may_overflow_the_viewport() {
    let mut tree = LayoutTree::new();
    let content = tree.fixed(390.0, 2000.0);
    let scroll = tree.unbounded(content, Axis::Vertical).unwrap();
    tree.set_root(scroll).unwrap();

    let snapshot = run(&LayoutEngine::new(), &tree, &LayoutContext::window(390.0, 844.0));

    assert_eq!(snapshot.frame(scroll).unwrap().size, Size::new(390.0, 844.0));
    assert_eq!(
        snapshot.frame(content),
        Some(Frame::new(Point::ZERO, Size::new(390.0, 2000.0)))
    );
    assert!(snapshot.faults().is_empty());
}

#[test]
fn position_places_the_child_at_a_point() {
    let mut tree = LayoutTree::new();
    let dot = tree.fixed(10.0, 10.0);
    let positioned = tree.position(dot, 30.0, 40.0).unwrap();
    tree.set_root(positioned).unwrap();

    let snapshot = run(&LayoutEngine::new(), &tree, &LayoutContext::window(390.0, 844.0));

    assert_eq!(snapshot.root_frame().size, Size::new(390.0, 844.0));
    assert_eq!(snapshot.frame(dot).unwrap().origin, Point::new(30.0, 40.0));
}

#[test]
fn safe_area_keeps_content_clear_of_insets() {
    let mut tree = LayoutTree::new();
    let content = tree.fill();
    let safe = tree.safe_area(content).unwrap();
    tree.set_root(safe).unwrap();
    let context = LayoutContext::window(390.0, 844.0)
        .with_safe_area(EdgeInsets::from_components(0.0, 47.0, 0.0, 34.0));

    let snapshot = run(&LayoutEngine::new(), &tree, &context);

    assert_eq!(
        snapshot.frame(content),
        Some(Frame::new(Point::new(0.0, 47.0), Size::new(390.0, 763.0)))
    );
}

#[test]
fn fill_frame_aligns_its_child() {
    let mut tree = LayoutTree::new();
    let badge = tree.fixed(10.0, 10.0);
    let framed = tree
        .frame(badge, FrameSpec::fill().aligned(Alignment::BOTTOM_TRAILING))
        .unwrap();
    tree.set_root(framed).unwrap();

    let snapshot = run(&LayoutEngine::new(), &tree, &LayoutContext::window(390.0, 844.0));

    assert_eq!(snapshot.frame(framed).unwrap().size, Size::new(390.0, 844.0));
    assert_eq!(snapshot.frame(badge).unwrap().origin, Point::new(380.0, 834.0));
}

#[test]
fn snapped_frames_sit_on_the_device_grid() {
    let mut tree = LayoutTree::new();
    let thirds: Vec<NodeId> = (0..3).map(|_| tree.fill()).collect();
    let row = tree.hstack(&thirds, 0.0, GuideId::TOP).unwrap();
    tree.set_root(row).unwrap();
    let context = LayoutContext::window(100.0, 10.0).with_scale(2.0);

    let snapshot = run(&LayoutEngine::new(), &tree, &context);

    for &node in &thirds {
        let exact = snapshot.frame(node).unwrap();
        let snapped = snapshot.snapped_frame(node).unwrap();
        for (value, original) in [
            (snapped.x(), exact.x()),
            (snapped.width(), exact.width()),
        ] {
            assert_eq!((value * 2.0).fract(), 0.0, "{value} is off the half-point grid");
            assert!((value - original).abs() <= 0.25);
        }
    }
    assert_approx_eq(snapshot.frame(thirds[1]).unwrap().x(), 100.0 / 3.0, TOLERANCE, "exact x");
    assert_eq!(snapshot.snapped_frame(thirds[1]).unwrap().x(), 33.5);
}

#[test]
fn geometry_answers_from_the_last_pass() {
    let mut tree = LayoutTree::new();
    let card = tree.fixed(100.0, 60.0);
    let padded = tree.padding(card, EdgeInsets::uniform(20.0)).unwrap();
    let fill = tree.fill();
    let page = tree.zstack(&[fill, padded], Alignment::TOP_LEADING).unwrap();
    tree.set_root(page).unwrap();
    let engine = LayoutEngine::new();
    let geometry = engine.geometry();

    run(&engine, &tree, &LayoutContext::window(390.0, 844.0));

    assert_eq!(
        geometry.frame(card),
        Some(Frame::new(Point::new(20.0, 20.0), Size::new(100.0, 60.0)))
    );
    assert_eq!(
        geometry.convert(Point::new(5.0, 5.0), CoordinateSpace::Node(card), CoordinateSpace::Root),
        Some(Point::new(25.0, 25.0))
    );
    assert_eq!(geometry.hit_test(Point::new(50.0, 50.0)), Some(card));
    assert_eq!(geometry.hit_test(Point::new(10.0, 10.0)), Some(padded));
    assert_eq!(geometry.hit_test(Point::new(300.0, 500.0)), Some(fill));
    assert_frame_contains_point(
        geometry.snapped_frame(card).unwrap(),
        Point::new(120.0, 80.0),
        "card corner",
    );
}

#[test]
fn invalidation_during_a_pass_keeps_the_old_snapshot() {
    let engine = LayoutEngine::new();
    let context = LayoutContext::window(100.0, 100.0);
    let mut stable = LayoutTree::new();
    let fill = stable.fill();
    stable.set_root(fill).unwrap();
    let published = run(&engine, &stable, &context);

    let handle = engine.clone();
    let mut tree = LayoutTree::new();
    let leaf = tree.leaf(move |_: ProposedSize| {
        handle.invalidate();
        Size::new(1.0, 1.0)
    });
    tree.set_root(leaf).unwrap();

    assert!(engine.run(&tree, &context).unwrap().is_none());
    let current = engine.snapshot().unwrap();
    assert!(Arc::ptr_eq(&current, &published));
    assert_eq!(current.frame(fill).unwrap().size, Size::new(100.0, 100.0));
}

#[test]
fn deep_modifier_chains_fit_on_a_small_stack() {
    const DEPTH: usize = 5_000;
    let layout = thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(|| {
            let mut tree = LayoutTree::with_capacity(DEPTH + 1);
            let leaf = tree.fixed(10.0, 10.0);
            let mut node = leaf;
            for _ in 0..DEPTH {
                node = tree.padding(node, EdgeInsets::uniform(1.0)).unwrap();
            }
            tree.set_root(node).unwrap();
            let snapshot = run(&LayoutEngine::new(), &tree, &LayoutContext::window(390.0, 844.0));
            (snapshot.root_frame(), snapshot.frame(leaf), snapshot.frames().len())
        })
        .expect("spawn layout thread");

    let (root, leaf, placed) = layout.join().expect("layout finished on a 2 MiB stack");

    assert_eq!(root.size, Size::new(10_010.0, 10_010.0));
    assert_eq!(
        leaf,
        Some(Frame::new(Point::new(5_000.0, 5_000.0), Size::new(10.0, 10.0)))
    );
    assert_eq!(placed, DEPTH + 1);
}
