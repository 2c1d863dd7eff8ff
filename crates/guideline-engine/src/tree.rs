//! Flat arena of layout nodes
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. A node is
//! created before its parent, so the arena can never contain a cycle, and
//! attaching checks that every child has exactly one parent.

use std::fmt;
use std::sync::Arc;

use guideline_geometry::{Color, EdgeInsets, Point, Size};
use guideline_layout::{
    Alignment, Axis, GuideId, GuideOverride, GuideRegistry, LayoutModifier, LeafMeasure,
    StackAxis,
};
use smallvec::SmallVec;

use crate::error::{Result, TreeError};
use crate::leaves::{Fill, FixedLeaf};
use crate::modifier::{FrameSpec, ModifierKind};
use crate::text::{TextLeaf, TextMeasurer};

/// Stable identity of a node within one [`LayoutTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Leaf(_) => &[],
            NodeKind::Modifier(modifier) => std::slice::from_ref(&modifier.child),
            NodeKind::Container(container) => container.children.as_slice(),
        }
    }
}

pub enum NodeKind {
    Leaf(Arc<dyn LeafMeasure>),
    Modifier(ModifierNode),
    Container(ContainerNode),
}

impl fmt::Debug for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf(leaf) => f.debug_tuple("Leaf").field(&leaf.debug_name()).finish(),
            NodeKind::Modifier(modifier) => f.debug_tuple("Modifier").field(modifier).finish(),
            NodeKind::Container(container) => {
                f.debug_tuple("Container").field(container).finish()
            }
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("parent", &self.parent)
            .finish()
    }
}

/// Single-child node: a transform plus optional guide overrides.
#[derive(Debug)]
pub struct ModifierNode {
    pub(crate) child: NodeId,
    pub(crate) kind: ModifierKind,
    pub(crate) guides: SmallVec<[(GuideId, GuideOverride); 1]>,
}

impl ModifierNode {
    pub fn child(&self) -> NodeId {
        self.child
    }

    pub fn kind(&self) -> &ModifierKind {
        &self.kind
    }

    pub fn guides(&self) -> &[(GuideId, GuideOverride)] {
        &self.guides
    }
}

/// Ordered children arranged along `axis`.
#[derive(Debug)]
pub struct ContainerNode {
    pub(crate) children: SmallVec<[NodeId; 4]>,
    pub(crate) axis: StackAxis,
    pub(crate) spacing: f64,
    pub(crate) alignment: Alignment,
}

impl ContainerNode {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn axis(&self) -> StackAxis {
        self.axis
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }
}

/// Immutable input of a layout pass, produced by the view builder.
#[derive(Debug, Default)]
pub struct LayoutTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
    guides: GuideRegistry,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Ids are only minted by this arena and validated on attach.
    pub(crate) fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }

    pub fn guides(&self) -> &GuideRegistry {
        &self.guides
    }

    pub fn guides_mut(&mut self) -> &mut GuideRegistry {
        &mut self.guides
    }

    /// Custom guide measured along x, registered on first use.
    pub fn horizontal_guide(&mut self, name: &str) -> GuideId {
        self.guides.horizontal(name)
    }

    /// Custom guide measured along y, registered on first use.
    pub fn vertical_guide(&mut self, name: &str) -> GuideId {
        self.guides.vertical(name)
    }

    pub fn set_root(&mut self, id: NodeId) -> Result<()> {
        let node = self.node(id).ok_or(TreeError::MissingNode { id })?;
        if node.parent.is_some() {
            return Err(TreeError::AlreadyAttached { id });
        }
        self.root = Some(id);
        Ok(())
    }

    // Leaves

    pub fn leaf(&mut self, measure: impl LeafMeasure + 'static) -> NodeId {
        self.leaf_shared(Arc::new(measure))
    }

    pub fn leaf_shared(&mut self, measure: Arc<dyn LeafMeasure>) -> NodeId {
        self.push(NodeKind::Leaf(measure))
    }

    /// Layout-neutral fill with no ideal size.
    pub fn fill(&mut self) -> NodeId {
        self.leaf(Fill::default())
    }

    pub fn fixed(&mut self, width: f64, height: f64) -> NodeId {
        self.leaf(FixedLeaf::new(Size::new(width, height)))
    }

    pub fn text(&mut self, text: impl Into<String>, measurer: Arc<dyn TextMeasurer>) -> NodeId {
        self.leaf(TextLeaf::new(text, measurer))
    }

    // Modifiers

    pub fn modifier(&mut self, child: NodeId, kind: ModifierKind) -> Result<NodeId> {
        self.attach_modifier(child, kind, SmallVec::new())
    }

    /// Negative or non-finite insets are treated as zero.
    pub fn padding(&mut self, child: NodeId, insets: EdgeInsets) -> Result<NodeId> {
        let clean = |value: f64| if value.is_finite() { value.max(0.0) } else { 0.0 };
        let insets = EdgeInsets::from_components(
            clean(insets.left),
            clean(insets.top),
            clean(insets.right),
            clean(insets.bottom),
        );
        self.modifier(child, ModifierKind::Padding(insets))
    }

    pub fn frame(&mut self, child: NodeId, spec: FrameSpec) -> Result<NodeId> {
        check_alignment(spec.alignment)?;
        self.modifier(child, ModifierKind::Frame(spec.sanitized()))
    }

    pub fn offset(&mut self, child: NodeId, dx: f64, dy: f64) -> Result<NodeId> {
        self.modifier(child, ModifierKind::Offset(finite_point(dx, dy)))
    }

    pub fn position(&mut self, child: NodeId, x: f64, y: f64) -> Result<NodeId> {
        self.modifier(child, ModifierKind::Position(finite_point(x, y)))
    }

    pub fn background(&mut self, child: NodeId, color: Color) -> Result<NodeId> {
        self.modifier(child, ModifierKind::Background(color))
    }

    /// Overrides `guide` for `child`. Nothing moves directly; ancestors that
    /// align on `guide` see the new value.
    pub fn alignment_guide(
        &mut self,
        child: NodeId,
        guide: GuideId,
        value: impl Into<GuideOverride>,
    ) -> Result<NodeId> {
        let mut guides = SmallVec::new();
        guides.push((guide, value.into()));
        self.attach_modifier(child, ModifierKind::Guides, guides)
    }

    pub fn safe_area(&mut self, child: NodeId) -> Result<NodeId> {
        self.modifier(child, ModifierKind::SafeArea)
    }

    /// Proposes `Infinite` along `axis` to `child`, the way a scroll view does.
    pub fn unbounded(&mut self, child: NodeId, axis: Axis) -> Result<NodeId> {
        self.modifier(child, ModifierKind::Unbounded(axis))
    }

    pub fn custom(
        &mut self,
        child: NodeId,
        modifier: impl LayoutModifier + 'static,
    ) -> Result<NodeId> {
        self.modifier(child, ModifierKind::Custom(Arc::new(modifier)))
    }

    // Containers

    /// Horizontal stack; `guide` must measure along y.
    pub fn hstack(&mut self, children: &[NodeId], spacing: f64, guide: GuideId) -> Result<NodeId> {
        check_guide(guide, Axis::Vertical)?;
        let alignment = Alignment::CENTER.with_guide(guide);
        self.container(children, StackAxis::Horizontal, spacing, alignment)
    }

    /// Vertical stack; `guide` must measure along x.
    pub fn vstack(&mut self, children: &[NodeId], spacing: f64, guide: GuideId) -> Result<NodeId> {
        check_guide(guide, Axis::Horizontal)?;
        let alignment = Alignment::CENTER.with_guide(guide);
        self.container(children, StackAxis::Vertical, spacing, alignment)
    }

    /// Overlay; every child is offered the full proposal.
    pub fn zstack(&mut self, children: &[NodeId], alignment: Alignment) -> Result<NodeId> {
        self.container(children, StackAxis::Depth, 0.0, alignment)
    }

    pub fn container(
        &mut self,
        children: &[NodeId],
        axis: StackAxis,
        spacing: f64,
        alignment: Alignment,
    ) -> Result<NodeId> {
        check_alignment(alignment)?;
        for (position, &child) in children.iter().enumerate() {
            self.check_detached(child)?;
            if children[..position].contains(&child) {
                return Err(TreeError::AlreadyAttached { id: child });
            }
        }
        let spacing = if spacing.is_finite() {
            spacing.max(0.0)
        } else {
            0.0
        };
        let id = self.push(NodeKind::Container(ContainerNode {
            children: children.iter().copied().collect(),
            axis,
            spacing,
            alignment,
        }));
        for &child in children {
            self.nodes[child.index()].parent = Some(id);
        }
        Ok(id)
    }

    fn attach_modifier(
        &mut self,
        child: NodeId,
        kind: ModifierKind,
        guides: SmallVec<[(GuideId, GuideOverride); 1]>,
    ) -> Result<NodeId> {
        self.check_detached(child)?;
        let id = self.push(NodeKind::Modifier(ModifierNode {
            child,
            kind,
            guides,
        }));
        self.nodes[child.index()].parent = Some(id);
        Ok(id)
    }

    fn check_detached(&self, id: NodeId) -> Result<()> {
        let node = self.node(id).ok_or(TreeError::MissingNode { id })?;
        if node.parent.is_some() || self.root == Some(id) {
            return Err(TreeError::AlreadyAttached { id });
        }
        Ok(())
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node { kind, parent: None });
        id
    }
}

fn check_guide(guide: GuideId, expected: Axis) -> Result<()> {
    if guide.axis() != expected {
        return Err(TreeError::GuideAxisMismatch { guide, expected });
    }
    Ok(())
}

fn check_alignment(alignment: Alignment) -> Result<()> {
    match alignment.misplaced_guide() {
        Some((guide, expected)) => Err(TreeError::GuideAxisMismatch { guide, expected }),
        None => Ok(()),
    }
}

fn finite_point(x: f64, y: f64) -> Point {
    let clean = |value: f64| if value.is_finite() { value } else { 0.0 };
    Point::new(clean(x), clean(y))
}

#[cfg(test)]
#[path = "tests/tree_tests.rs"]
mod tests;
