//! Resolved dimensions of a view and its alignment guide lookup

use guideline_geometry::Size;
use smallvec::SmallVec;

use crate::guide::{BuiltinGuide, GuideId};

/// Text metrics a leaf may report. `None` means the view has no text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Baselines {
    pub first: Option<f64>,
    pub last: Option<f64>,
}

impl Baselines {
    pub const NONE: Baselines = Baselines {
        first: None,
        last: None,
    };

    pub fn new(first: f64, last: f64) -> Self {
        Self {
            first: Some(first),
            last: Some(last),
        }
    }

    pub fn is_none(&self) -> bool {
        self.first.is_none() && self.last.is_none()
    }
}

/// A view's resolved size plus every guide explicitly defined inside it.
///
/// Values are expressed in the view's own local box (origin at its
/// top-leading corner), never in parent coordinates. Only valid once the
/// view's size has been resolved.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewDimensions {
    size: Size,
    baselines: Baselines,
    explicit: SmallVec<[(GuideId, f64); 2]>,
}

impl ViewDimensions {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            baselines: Baselines::NONE,
            explicit: SmallVec::new(),
        }
    }

    pub fn with_baselines(mut self, baselines: Baselines) -> Self {
        self.baselines = baselines;
        self
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn baselines(&self) -> Baselines {
        self.baselines
    }

    /// Resolves `id`, consulting explicit values before the geometric default.
    pub fn guide(&self, id: GuideId) -> f64 {
        self.explicit(id).unwrap_or_else(|| self.default_guide(id))
    }

    /// Returns the explicitly defined value for `id`, if any.
    pub fn explicit(&self, id: GuideId) -> Option<f64> {
        self.explicit
            .iter()
            .find(|(guide, _)| *guide == id)
            .map(|(_, value)| *value)
    }

    /// Geometric default. Custom guides have none and resolve to 0.
    pub fn default_guide(&self, id: GuideId) -> f64 {
        let GuideId::Builtin(builtin) = id else {
            return 0.0;
        };
        match builtin {
            BuiltinGuide::Leading => 0.0,
            BuiltinGuide::Trailing => self.size.width,
            BuiltinGuide::Top => 0.0,
            BuiltinGuide::Bottom => self.size.height,
            BuiltinGuide::CenterX => self.size.width / 2.0,
            BuiltinGuide::CenterY => self.size.height / 2.0,
            BuiltinGuide::FirstBaseline => self.baselines.first.unwrap_or(0.0),
            BuiltinGuide::LastBaseline => self.baselines.last.unwrap_or(self.size.height),
        }
    }

    /// Defines `id`, replacing any value already present.
    pub fn set_explicit(&mut self, id: GuideId, value: f64) {
        if let Some(entry) = self.explicit.iter_mut().find(|(guide, _)| *guide == id) {
            entry.1 = value;
        } else {
            self.explicit.push((id, value));
        }
    }

    /// Defines `id` only if nothing defined it yet. Returns true if stored.
    pub fn define_if_absent(&mut self, id: GuideId, value: f64) -> bool {
        if self.explicit(id).is_some() {
            return false;
        }
        self.explicit.push((id, value));
        true
    }

    pub fn explicit_guides(&self) -> impl Iterator<Item = (GuideId, f64)> + '_ {
        self.explicit.iter().copied()
    }

    pub fn has_explicit_guides(&self) -> bool {
        !self.explicit.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/dimensions_tests.rs"]
mod tests;
