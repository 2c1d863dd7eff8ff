//! Layout negotiation contracts for Guideline
//!
//! Parents and children only ever exchange the values defined here:
//! [`ProposedSize`] going down, [`Size`](guideline_geometry::Size) coming back
//! up, and [`GuideId`] lookups against [`ViewDimensions`]. Nothing in this crate
//! inspects what a leaf draws.

mod alignment;
mod axis;
mod dimensions;
mod guide;
mod proposal;
mod traits;

pub use alignment::*;
pub use axis::*;
pub use dimensions::*;
pub use guide::*;
pub use proposal::*;
pub use traits::*;

pub mod prelude {
    pub use crate::alignment::Alignment;
    pub use crate::axis::{Axis, StackAxis};
    pub use crate::dimensions::{Baselines, ViewDimensions};
    pub use crate::guide::{BuiltinGuide, GuideId, GuideOverride, GuideRegistry};
    pub use crate::proposal::{ProposedDimension, ProposedSize};
    pub use crate::traits::{LayoutModifier, LeafMeasure};
}
