//! Layout negotiation engine for Guideline
//!
//! A [`LayoutTree`] of leaves, modifiers and containers goes in together with
//! a [`LayoutContext`]; a [`LayoutSnapshot`] of absolute frames comes out.
//! Each pass measures top-down with memoized proposals, places children
//! using alignment guides, then snaps the frames onto the device pixel grid.
//!
//! ```
//! use guideline_engine::prelude::*;
//!
//! let mut tree = LayoutTree::new();
//! let fill = tree.fill();
//! tree.set_root(fill).unwrap();
//!
//! let engine = LayoutEngine::new();
//! let snapshot = engine
//!     .run(&tree, &LayoutContext::window(390.0, 844.0))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(snapshot.root_frame().size, Size::new(390.0, 844.0));
//! ```

pub mod collections;
mod context;
mod engine;
mod error;
mod geometry;
mod guides;
mod leaves;
mod measure;
mod modifier;
mod place;
mod snap;
mod stack;
mod text;
mod tree;

pub use context::LayoutContext;
pub use engine::LayoutEngine;
pub use error::{LayoutFault, Result, TreeError};
pub use geometry::{CoordinateSpace, FrameMap, Geometry, LayoutSnapshot};
pub use guides::{resolve_guide, shared_guide_offsets};
pub use leaves::{Fill, FixedLeaf};
pub use modifier::{FrameSpec, ModifierKind};
pub use snap::{snap_frame, snap_frames};
pub use text::{MonospacedTextMeasurer, TextLeaf, TextMeasurer, TextMetrics};
pub use tree::{ContainerNode, LayoutTree, ModifierNode, Node, NodeId, NodeKind};

pub mod prelude {
    pub use crate::context::LayoutContext;
    pub use crate::engine::LayoutEngine;
    pub use crate::error::{LayoutFault, TreeError};
    pub use crate::geometry::{CoordinateSpace, Geometry, LayoutSnapshot};
    pub use crate::leaves::{Fill, FixedLeaf};
    pub use crate::modifier::FrameSpec;
    pub use crate::text::{MonospacedTextMeasurer, TextMeasurer};
    pub use crate::tree::{LayoutTree, NodeId};
    pub use guideline_geometry::prelude::*;
    pub use guideline_layout::prelude::*;
}
