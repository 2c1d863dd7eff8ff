//! Geometry query façade
//!
//! Read-only access to the frames of a completed pass. [`LayoutSnapshot`] is
//! the immutable result of one pass; [`Geometry`] is a cloneable handle onto
//! whatever snapshot the engine last published.

use std::sync::Arc;

use guideline_geometry::{Frame, Point};
use indexmap::IndexMap;

use crate::engine::EngineShared;
use crate::error::LayoutFault;
use crate::tree::NodeId;

/// Frames keyed by node, in pre-order (parents before children, siblings in
/// order).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameMap {
    frames: IndexMap<NodeId, Frame>,
}

impl FrameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: IndexMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, node: NodeId) -> Option<Frame> {
        self.frames.get(&node).copied()
    }

    pub fn insert(&mut self, node: NodeId, frame: Frame) {
        self.frames.insert(node, frame);
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.frames.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeId, Frame)> + '_ {
        self.frames.iter().map(|(node, frame)| (*node, *frame))
    }
}

impl FromIterator<(NodeId, Frame)> for FrameMap {
    fn from_iter<I: IntoIterator<Item = (NodeId, Frame)>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

/// A coordinate space for [`LayoutSnapshot::convert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoordinateSpace {
    Root,
    /// The local box of a node: its top-leading corner is (0, 0).
    Node(NodeId),
}

/// Everything one completed pass produced.
#[derive(Clone, Debug)]
pub struct LayoutSnapshot {
    pub(crate) generation: u64,
    pub(crate) root: NodeId,
    pub(crate) frames: FrameMap,
    pub(crate) snapped: FrameMap,
    pub(crate) faults: Vec<LayoutFault>,
    pub(crate) measurements: usize,
}

impl LayoutSnapshot {
    /// Engine generation this pass was started under.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_frame(&self) -> Frame {
        self.frames.get(self.root).unwrap_or_default()
    }

    /// Exact, unsnapped frame in root space.
    pub fn frame(&self, node: NodeId) -> Option<Frame> {
        self.frames.get(node)
    }

    /// Frame rounded onto the device pixel grid.
    pub fn snapped_frame(&self, node: NodeId) -> Option<Frame> {
        self.snapped.get(node)
    }

    pub fn frames(&self) -> &FrameMap {
        &self.frames
    }

    pub fn snapped_frames(&self) -> &FrameMap {
        &self.snapped
    }

    pub fn faults(&self) -> &[LayoutFault] {
        &self.faults
    }

    /// Distinct `(node, proposal)` measurements the pass performed.
    pub fn measurement_count(&self) -> usize {
        self.measurements
    }

    fn origin(&self, space: CoordinateSpace) -> Option<Point> {
        match space {
            CoordinateSpace::Root => Some(Point::ZERO),
            CoordinateSpace::Node(node) => self.frames.get(node).map(|frame| frame.origin),
        }
    }

    /// Re-expresses `point` from one space in another. `None` if either space
    /// names a node this pass did not place.
    pub fn convert(
        &self,
        point: Point,
        from: CoordinateSpace,
        to: CoordinateSpace,
    ) -> Option<Point> {
        let from = self.origin(from)?;
        let to = self.origin(to)?;
        Some(point + from - to)
    }

    /// Topmost node whose frame contains a root-space point: later siblings
    /// draw over earlier ones and children over their parents.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.frames
            .iter()
            .rev()
            .find(|(_, frame)| frame.contains(point))
            .map(|(node, _)| node)
    }
}

/// Cloneable handle onto the engine's most recently published pass.
///
/// Meant for code that runs after a pass completes. Other threads may read
/// freely while the next pass runs and see the last published pass. A query
/// made from inside one of the engine's own passes would read geometry that
/// pass is still computing: debug builds panic, release builds log it and
/// answer from the last published pass.
#[derive(Clone)]
pub struct Geometry {
    pub(crate) shared: Arc<EngineShared>,
}

impl Geometry {
    pub fn frame(&self, node: NodeId) -> Option<Frame> {
        self.query(Some(node), |snapshot| snapshot.frame(node))
    }

    pub fn snapped_frame(&self, node: NodeId) -> Option<Frame> {
        self.query(Some(node), |snapshot| snapshot.snapped_frame(node))
    }

    pub fn convert(
        &self,
        point: Point,
        from: CoordinateSpace,
        to: CoordinateSpace,
    ) -> Option<Point> {
        let node = match (from, to) {
            (CoordinateSpace::Node(node), _) | (_, CoordinateSpace::Node(node)) => Some(node),
            _ => None,
        };
        self.query(node, |snapshot| snapshot.convert(point, from, to))
    }

    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.query(None, |snapshot| snapshot.hit_test(point))
    }

    pub fn snapshot(&self) -> Option<Arc<LayoutSnapshot>> {
        self.check_idle(None);
        self.shared.published()
    }

    fn query<T>(
        &self,
        node: Option<NodeId>,
        read: impl FnOnce(&LayoutSnapshot) -> Option<T>,
    ) -> Option<T> {
        self.check_idle(node);
        self.shared
            .published()
            .and_then(|snapshot| read(&snapshot))
    }

    fn check_idle(&self, node: Option<NodeId>) {
        if !self.shared.pass_active() {
            return;
        }
        let fault = LayoutFault::CyclicGeometryQuery { node };
        if cfg!(debug_assertions) {
            panic!("{fault}");
        }
        log::warn!("{fault}; answering from the last published pass");
        self.shared.record_stray(fault);
    }
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod tests;
