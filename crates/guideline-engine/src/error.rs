use std::fmt;
use std::mem::{self, Discriminant};

use guideline_geometry::Size;
use guideline_layout::{Axis, GuideId, ProposedDimension};
use thiserror::Error;

use crate::tree::NodeId;

/// Structural misuse of a [`LayoutTree`](crate::LayoutTree).
///
/// These are rejected while the tree is built. Layout itself never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {id} does not exist in this tree")]
    MissingNode { id: NodeId },
    #[error("node {id} already has a parent or is the root")]
    AlreadyAttached { id: NodeId },
    #[error("guide {guide:?} does not measure along the {expected:?} axis")]
    GuideAxisMismatch { guide: GuideId, expected: Axis },
    #[error("tree has no root node")]
    NoRoot,
}

pub type Result<T> = std::result::Result<T, TreeError>;

/// Non-fatal problem recovered from during a pass.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutFault {
    /// A leaf or custom modifier reported a negative or non-finite size. The
    /// node was laid out at (0, 0).
    MeasurementFault { node: NodeId, reported: Size },
    /// An `Infinite` component reached a leaf that cannot express it.
    AmbiguousProposal {
        node: NodeId,
        axis: Axis,
        substituted: ProposedDimension,
    },
    /// Geometry was queried while a pass was still computing it.
    CyclicGeometryQuery { node: Option<NodeId> },
}

impl LayoutFault {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            LayoutFault::MeasurementFault { node, .. }
            | LayoutFault::AmbiguousProposal { node, .. } => Some(*node),
            LayoutFault::CyclicGeometryQuery { node } => *node,
        }
    }

    /// Identity used to report a fault once per pass: the node, the kind of
    /// fault and, for proposals, the axis.
    pub(crate) fn dedup_key(&self) -> FaultKey {
        let axis = match self {
            LayoutFault::AmbiguousProposal { axis, .. } => Some(*axis),
            LayoutFault::MeasurementFault { .. } | LayoutFault::CyclicGeometryQuery { .. } => None,
        };
        (self.node(), mem::discriminant(self), axis)
    }
}

pub(crate) type FaultKey = (Option<NodeId>, Discriminant<LayoutFault>, Option<Axis>);

impl fmt::Display for LayoutFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutFault::MeasurementFault { node, reported } => write!(
                f,
                "node {node} reported invalid size {}x{}",
                reported.width, reported.height
            ),
            LayoutFault::AmbiguousProposal {
                node,
                axis,
                substituted,
            } => write!(
                f,
                "node {node} cannot take an infinite {axis:?} proposal, offered {substituted:?}"
            ),
            LayoutFault::CyclicGeometryQuery { node: Some(node) } => {
                write!(f, "geometry of node {node} queried during an active pass")
            }
            LayoutFault::CyclicGeometryQuery { node: None } => {
                f.write_str("geometry queried during an active pass")
            }
        }
    }
}
