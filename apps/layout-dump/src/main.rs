use guideline_engine::prelude::*;
use guideline_engine::NodeKind;

const DEFAULT_WIDTH: f64 = 390.0;
const DEFAULT_HEIGHT: f64 = 844.0;
const DEFAULT_SCALE: f64 = 3.0;

/// `layout-dump [width] [height] [scale]`
fn context_from_args() -> LayoutContext {
    let mut args = std::env::args().skip(1).map(|arg| arg.parse::<f64>());
    let mut next = |fallback: f64| match args.next() {
        Some(Ok(value)) => value,
        Some(Err(err)) => {
            log::warn!("ignoring unparsable argument ({err}), using {fallback}");
            fallback
        }
        None => fallback,
    };
    let width = next(DEFAULT_WIDTH);
    let height = next(DEFAULT_HEIGHT);
    let scale = next(DEFAULT_SCALE);
    LayoutContext::window(width, height)
        .with_scale(scale)
        .with_safe_area(EdgeInsets::from_components(0.0, 47.0, 0.0, 34.0))
}

/// A settings-style screen: title, a list of labelled rows, a pinned footer.
fn sample_screen() -> Result<LayoutTree, TreeError> {
    let text = MonospacedTextMeasurer::shared();
    let mut tree = LayoutTree::new();
    let label_column = tree.horizontal_guide("label-column");

    let title = tree.text("Settings", text.clone());
    let title = tree.padding(title, EdgeInsets::symmetric(16.0, 12.0))?;

    let mut rows = Vec::new();
    for (label, value) in [
        ("Name", "Ada Lovelace"),
        ("Email", "ada@example.com"),
        ("Notifications", "On"),
    ] {
        let label = tree.text(label, text.clone());
        let label = tree.frame(label, FrameSpec::width(120.0).aligned(Alignment::LEADING))?;
        let value = tree.text(value, text.clone());
        let value = tree.alignment_guide(value, label_column, 0.0)?;
        let spacer = tree.fill();
        let row = tree.hstack(&[label, value, spacer], 8.0, GuideId::FIRST_BASELINE)?;
        rows.push(tree.padding(row, EdgeInsets::symmetric(16.0, 6.0))?);
    }
    let list = tree.vstack(&rows, 0.0, label_column)?;
    let list = tree.unbounded(list, Axis::Vertical)?;

    let button = tree.text("Save", text);
    let button = tree.padding(button, EdgeInsets::symmetric(24.0, 10.0))?;
    let button = tree.background(button, Color::rgb(0.0, 0.48, 1.0))?;
    let footer = tree.frame(button, FrameSpec::fill().with_max_height(64.0))?;

    let page = tree.vstack(&[title, list, footer], 0.0, GuideId::LEADING)?;
    let page = tree.safe_area(page)?;
    tree.set_root(page)?;
    Ok(tree)
}

fn describe(tree: &LayoutTree, node: NodeId) -> String {
    match tree.node(node).map(|node| node.kind()) {
        Some(NodeKind::Leaf(leaf)) => leaf.debug_name().to_string(),
        Some(NodeKind::Modifier(modifier)) => modifier.kind().name().to_string(),
        Some(NodeKind::Container(container)) => format!("{:?}Stack", container.axis()),
        None => "?".to_string(),
    }
}

fn depth(tree: &LayoutTree, node: NodeId) -> usize {
    std::iter::successors(tree.node(node).and_then(|n| n.parent()), |&parent| {
        tree.node(parent).and_then(|n| n.parent())
    })
    .count()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let context = context_from_args();
    let tree = match sample_screen() {
        Ok(tree) => tree,
        Err(err) => {
            log::error!("could not build the sample screen: {err}");
            std::process::exit(1);
        }
    };

    let engine = LayoutEngine::new();
    let snapshot = match engine.run(&tree, &context) {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => {
            log::error!("layout pass was superseded before it finished");
            std::process::exit(1);
        }
        Err(err) => {
            log::error!("layout failed: {err}");
            std::process::exit(1);
        }
    };

    log::info!(
        "{} nodes, {} measurements at scale {}",
        snapshot.frames().len(),
        snapshot.measurement_count(),
        context.scale().factor()
    );
    for (node, frame) in snapshot.frames().iter() {
        let snapped = snapshot.snapped_frame(node).unwrap_or(frame);
        log::info!(
            "{:indent$}{node} {}: ({:.2}, {:.2}) {:.2}x{:.2} -> ({}, {}) {}x{}",
            "",
            describe(&tree, node),
            frame.x(),
            frame.y(),
            frame.width(),
            frame.height(),
            snapped.x(),
            snapped.y(),
            snapped.width(),
            snapped.height(),
            indent = depth(&tree, node) * 2,
        );
    }
    for fault in snapshot.faults() {
        log::warn!("{fault}");
    }
}
