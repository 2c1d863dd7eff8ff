//! Pure math/data for frames, sizes and device units in Guideline
//!
//! This crate contains the geometry primitives, color payloads and unit
//! types shared by every other Guideline crate. Nothing here knows about
//! layout negotiation.

mod color;
mod geometry;
mod unit;

pub use color::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{EdgeInsets, Frame, Point, Size};
    pub use crate::unit::PixelScale;
}
