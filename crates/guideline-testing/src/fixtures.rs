//! Canned leaves and tree shapes shared by integration tests

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use guideline_engine::{LayoutTree, MonospacedTextMeasurer, NodeId, TextMeasurer};
use guideline_geometry::Size;
use guideline_layout::{LeafMeasure, ProposedSize};

/// Text measurer every fixture uses: 8pt advance, 20pt lines, 16pt ascent.
pub fn text_measurer() -> Arc<dyn TextMeasurer> {
    MonospacedTextMeasurer::shared()
}

/// Leaf that counts how often it is measured.
#[derive(Clone, Default)]
pub struct CountingLeaf {
    size: Size,
    calls: Arc<AtomicUsize>,
}

impl CountingLeaf {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            calls: Arc::default(),
        }
    }

    /// Shared counter; stays readable after the leaf moves into a tree.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl LeafMeasure for CountingLeaf {
    fn measure(&self, _proposal: ProposedSize) -> Size {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.size
    }

    fn handles_infinite(&self) -> bool {
        true
    }

    fn debug_name(&self) -> &str {
        "CountingLeaf"
    }
}

/// Leaf that reports whatever broken size it was built with.
#[derive(Clone, Copy, Debug)]
pub struct FaultyLeaf(pub Size);

impl LeafMeasure for FaultyLeaf {
    fn measure(&self, _proposal: ProposedSize) -> Size {
        self.0
    }

    fn debug_name(&self) -> &str {
        "FaultyLeaf"
    }
}

/// Leaf that records every proposal it receives, in order.
#[derive(Clone, Default)]
pub struct RecordingLeaf {
    seen: Arc<std::sync::Mutex<Vec<ProposedSize>>>,
}

impl RecordingLeaf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn proposals(&self) -> Vec<ProposedSize> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl LeafMeasure for RecordingLeaf {
    fn measure(&self, proposal: ProposedSize) -> Size {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(proposal);
        }
        Size::new(proposal.width.resolve(0.0), proposal.height.resolve(0.0))
    }

    fn debug_name(&self) -> &str {
        "RecordingLeaf"
    }
}

/// Three fixed leaves of the given widths (height 10) in a horizontal stack
/// with no spacing. Returns the stack and its children.
pub fn fixed_row(tree: &mut LayoutTree, widths: [f64; 3]) -> (NodeId, [NodeId; 3]) {
    let children = widths.map(|width| tree.fixed(width, 10.0));
    let row = tree
        .hstack(&children, 0.0, guideline_layout::GuideId::CENTER_Y)
        .expect("fresh children attach");
    (row, children)
}
