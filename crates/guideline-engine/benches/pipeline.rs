use guideline_engine::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const SECTION_COUNT: usize = 4;
const ROWS_PER_SECTION_SAMPLES: &[usize] = &[16, 64];
const RECURSIVE_ROWS_PER_LEVEL: usize = 8;
const RECURSIVE_DEPTH_SAMPLES: &[usize] = &[4, 8];

fn root_context() -> LayoutContext {
    LayoutContext::window(1080.0, 1920.0).with_scale(3.0)
}

/// Sections of text rows, each row a flexible title next to a detail label.
fn pipeline_tree(sections: usize, rows_per_section: usize) -> LayoutTree {
    let measurer = MonospacedTextMeasurer::shared();
    let mut tree = LayoutTree::new();
    let mut section_nodes = Vec::with_capacity(sections);
    for section in 0..sections {
        let mut rows = Vec::with_capacity(rows_per_section + 1);
        rows.push(tree.text(format!("Section {section}"), measurer.clone()));
        for row in 0..rows_per_section {
            let title = tree.text(format!("Item {section}-{row} title"), measurer.clone());
            let title = tree
                .frame(title, FrameSpec::default().with_max_width(f64::INFINITY).aligned(Alignment::LEADING))
                .expect("fresh node");
            let detail = tree.text(format!("Detail {section}-{row}"), measurer.clone());
            let line = tree
                .hstack(&[title, detail], 8.0, GuideId::FIRST_BASELINE)
                .expect("fresh nodes");
            rows.push(tree.padding(line, EdgeInsets::symmetric(16.0, 4.0)).expect("fresh node"));
        }
        section_nodes.push(tree.vstack(&rows, 0.0, GuideId::LEADING).expect("fresh nodes"));
    }
    let page = tree.vstack(&section_nodes, 12.0, GuideId::LEADING).expect("fresh nodes");
    let scroll = tree.unbounded(page, Axis::Vertical).expect("fresh node");
    tree.set_root(scroll).expect("detached root");
    tree
}

fn recursive_section(tree: &mut LayoutTree, depth: usize, rows_per_level: usize, level: usize) -> NodeId {
    let measurer = MonospacedTextMeasurer::shared();
    let mut children = vec![tree.text(format!("Level {level}"), measurer.clone())];
    for row in 0..rows_per_level {
        let title = tree.text(format!("Node {level}-{row} title"), measurer.clone());
        let spacer = tree.fill();
        let detail = tree.text(format!("Detail {level}-{row}"), measurer.clone());
        children.push(
            tree.hstack(&[title, spacer, detail], 4.0, GuideId::CENTER_Y)
                .expect("fresh nodes"),
        );
    }
    if depth > 1 {
        let nested = recursive_section(tree, depth - 1, rows_per_level, level + 1);
        children.push(tree.padding(nested, EdgeInsets::horizontal(8.0)).expect("fresh node"));
    }
    tree.vstack(&children, 0.0, GuideId::LEADING).expect("fresh nodes")
}

fn recursive_tree(depth: usize, rows_per_level: usize) -> LayoutTree {
    let mut tree = LayoutTree::new();
    let root = recursive_section(&mut tree, depth, rows_per_level, 0);
    tree.set_root(root).expect("detached root");
    tree
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_run");
    let context = root_context();
    for &rows_per_section in ROWS_PER_SECTION_SAMPLES {
        let tree = pipeline_tree(SECTION_COUNT, rows_per_section);
        let engine = LayoutEngine::new();
        group.bench_with_input(BenchmarkId::new("nodes", tree.len()), &tree, |b, tree| {
            b.iter(|| {
                let snapshot = engine.run(black_box(tree), &context).expect("root set");
                black_box(snapshot);
            });
        });
    }
    group.finish();
}

fn bench_recursive(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline_recursive");
    let context = root_context();
    for &depth in RECURSIVE_DEPTH_SAMPLES {
        let tree = recursive_tree(depth, RECURSIVE_ROWS_PER_LEVEL);
        let engine = LayoutEngine::new();
        group.bench_with_input(BenchmarkId::new("depth", depth), &tree, |b, tree| {
            b.iter(|| {
                let snapshot = engine.run(black_box(tree), &context).expect("root set");
                black_box(snapshot);
            });
        });
    }
    group.finish();
}

fn bench_invalidated(c: &mut Criterion) {
    let tree = pipeline_tree(SECTION_COUNT, 64);
    let context = root_context();
    let engine = LayoutEngine::new();
    c.bench_function("pipeline_invalidate_and_run", |b| {
        b.iter(|| {
            engine.invalidate();
            black_box(engine.run(&tree, &context).expect("root set"));
        });
    });
}

criterion_group!(benches, bench_pipeline, bench_recursive, bench_invalidated);
criterion_main!(benches);
