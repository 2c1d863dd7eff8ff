//! Alignment guide identifiers, the custom-guide registry and overrides

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::axis::Axis;
use crate::dimensions::ViewDimensions;

/// Guides every view has, with a geometric default.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinGuide {
    Leading,
    Trailing,
    Top,
    Bottom,
    CenterX,
    CenterY,
    FirstBaseline,
    LastBaseline,
}

impl BuiltinGuide {
    /// Axis the guide measures along.
    pub fn axis(self) -> Axis {
        match self {
            BuiltinGuide::Leading | BuiltinGuide::Trailing | BuiltinGuide::CenterX => {
                Axis::Horizontal
            }
            BuiltinGuide::Top
            | BuiltinGuide::Bottom
            | BuiltinGuide::CenterY
            | BuiltinGuide::FirstBaseline
            | BuiltinGuide::LastBaseline => Axis::Vertical,
        }
    }
}

/// Interned name of a custom guide. Only meaningful together with the
/// [`GuideRegistry`] that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GuideName(u32);

impl GuideName {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Names a coordinate inside a view's own box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuideId {
    Builtin(BuiltinGuide),
    /// User-defined guide. Custom guides are axis-qualified so that a value
    /// found deep in a subtree can be translated into an ancestor's box.
    Custom { axis: Axis, name: GuideName },
}

impl GuideId {
    pub const LEADING: GuideId = GuideId::Builtin(BuiltinGuide::Leading);
    pub const TRAILING: GuideId = GuideId::Builtin(BuiltinGuide::Trailing);
    pub const TOP: GuideId = GuideId::Builtin(BuiltinGuide::Top);
    pub const BOTTOM: GuideId = GuideId::Builtin(BuiltinGuide::Bottom);
    pub const CENTER_X: GuideId = GuideId::Builtin(BuiltinGuide::CenterX);
    pub const CENTER_Y: GuideId = GuideId::Builtin(BuiltinGuide::CenterY);
    pub const FIRST_BASELINE: GuideId = GuideId::Builtin(BuiltinGuide::FirstBaseline);
    pub const LAST_BASELINE: GuideId = GuideId::Builtin(BuiltinGuide::LastBaseline);

    pub fn axis(&self) -> Axis {
        match self {
            GuideId::Builtin(builtin) => builtin.axis(),
            GuideId::Custom { axis, .. } => *axis,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, GuideId::Custom { .. })
    }
}

/// Small interning table for custom guide names.
///
/// Owned by the tree that uses it, so two trees never share ids by accident.
#[derive(Clone, Debug, Default)]
pub struct GuideRegistry {
    names: IndexSet<Box<str>>,
}

impl GuideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the interned handle for `name`, registering it on first use.
    pub fn intern(&mut self, name: &str) -> GuideName {
        if let Some(index) = self.names.get_index_of(name) {
            return GuideName(index as u32);
        }
        let (index, _) = self.names.insert_full(Box::from(name));
        GuideName(index as u32)
    }

    /// Returns (registering if needed) a custom guide measured along x.
    pub fn horizontal(&mut self, name: &str) -> GuideId {
        GuideId::Custom {
            axis: Axis::Horizontal,
            name: self.intern(name),
        }
    }

    /// Returns (registering if needed) a custom guide measured along y.
    pub fn vertical(&mut self, name: &str) -> GuideId {
        GuideId::Custom {
            axis: Axis::Vertical,
            name: self.intern(name),
        }
    }

    /// Looks up an already registered guide without registering it.
    pub fn lookup(&self, name: &str, axis: Axis) -> Option<GuideId> {
        self.names
            .get_index_of(name)
            .map(|index| GuideId::Custom {
                axis,
                name: GuideName(index as u32),
            })
    }

    pub fn name(&self, name: GuideName) -> Option<&str> {
        self.names.get_index(name.index()).map(|name| name.as_ref())
    }

    /// Human readable label for logging.
    pub fn describe(&self, id: GuideId) -> String {
        match id {
            GuideId::Builtin(builtin) => format!("{builtin:?}"),
            GuideId::Custom { axis, name } => format!(
                "{}({axis:?})",
                self.name(name).unwrap_or("<unregistered>")
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

type ComputedGuide = dyn Fn(&ViewDimensions) -> f64 + Send + Sync;

/// Per-view replacement for a guide's value.
#[derive(Clone)]
pub enum GuideOverride {
    /// A fixed coordinate in the view's own box.
    Value(f64),
    /// Computed from the view's base dimensions once its size is known.
    Computed(Arc<ComputedGuide>),
}

impl GuideOverride {
    pub fn computed(f: impl Fn(&ViewDimensions) -> f64 + Send + Sync + 'static) -> Self {
        GuideOverride::Computed(Arc::new(f))
    }

    /// Evaluates the override. Non-finite results resolve to 0.
    pub fn resolve(&self, dimensions: &ViewDimensions) -> f64 {
        let value = match self {
            GuideOverride::Value(value) => *value,
            GuideOverride::Computed(f) => f(dimensions),
        };
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }
}

impl fmt::Debug for GuideOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GuideOverride::Value(value) => f.debug_tuple("Value").field(value).finish(),
            GuideOverride::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<f64> for GuideOverride {
    fn from(value: f64) -> Self {
        GuideOverride::Value(value)
    }
}

#[cfg(test)]
#[path = "tests/guide_tests.rs"]
mod tests;
