//! Size proposals a parent offers a child during measurement

use std::hash::{Hash, Hasher};

use crate::axis::Axis;

/// What a parent offers a child along one axis.
#[derive(Clone, Copy, Debug)]
pub enum ProposedDimension {
    /// Exactly this much room.
    Exact(f64),
    /// No opinion: the child reports its natural size.
    Unspecified,
    /// Unbounded room. Must eventually be bounded by some ancestor.
    Infinite,
}

impl ProposedDimension {
    /// Creates an `Exact` component, normalizing values that cannot be
    /// offered: NaN and negatives become `Exact(0)`, +inf becomes `Infinite`.
    pub fn exact(value: f64) -> Self {
        if value.is_nan() || value <= 0.0 {
            ProposedDimension::Exact(0.0)
        } else if value.is_infinite() {
            ProposedDimension::Infinite
        } else {
            ProposedDimension::Exact(value)
        }
    }

    /// Returns the offered extent for `Exact` proposals.
    #[inline]
    pub fn value(self) -> Option<f64> {
        match self {
            ProposedDimension::Exact(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn is_exact(self) -> bool {
        matches!(self, ProposedDimension::Exact(_))
    }

    #[inline]
    pub fn is_unspecified(self) -> bool {
        matches!(self, ProposedDimension::Unspecified)
    }

    #[inline]
    pub fn is_infinite(self) -> bool {
        matches!(self, ProposedDimension::Infinite)
    }

    /// Removes `amount` from an `Exact` offer. `Unspecified` and `Infinite`
    /// are unchanged.
    pub fn shrink(self, amount: f64) -> Self {
        match self {
            ProposedDimension::Exact(value) => ProposedDimension::exact(value - amount),
            other => other,
        }
    }

    /// Clamps an `Exact` offer into `[min, max]`. An `Infinite` offer becomes
    /// `Exact(max)` when a finite maximum is given.
    pub fn clamp(self, min: Option<f64>, max: Option<f64>) -> Self {
        match self {
            ProposedDimension::Exact(value) => {
                let mut value = value;
                if let Some(max) = max {
                    value = value.min(max);
                }
                if let Some(min) = min {
                    value = value.max(min);
                }
                ProposedDimension::exact(value)
            }
            ProposedDimension::Infinite => match max {
                Some(max) if max.is_finite() => ProposedDimension::exact(max),
                _ => ProposedDimension::Infinite,
            },
            ProposedDimension::Unspecified => ProposedDimension::Unspecified,
        }
    }

    /// Returns the offered extent, or `natural` when the offer is not exact.
    #[inline]
    pub fn resolve(self, natural: f64) -> f64 {
        self.value().unwrap_or(natural)
    }

    fn key(self) -> (u8, u64) {
        match self {
            // +0.0 and -0.0 must hash alike
            ProposedDimension::Exact(value) => (0, (value + 0.0).to_bits()),
            ProposedDimension::Unspecified => (1, 0),
            ProposedDimension::Infinite => (2, 0),
        }
    }
}

impl PartialEq for ProposedDimension {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for ProposedDimension {}

impl Hash for ProposedDimension {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let (tag, bits) = self.key();
        state.write_u8(tag);
        state.write_u64(bits);
    }
}

/// A per-axis size hint offered to a child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProposedSize {
    pub width: ProposedDimension,
    pub height: ProposedDimension,
}

impl ProposedSize {
    pub const UNSPECIFIED: ProposedSize = ProposedSize {
        width: ProposedDimension::Unspecified,
        height: ProposedDimension::Unspecified,
    };

    pub const INFINITE: ProposedSize = ProposedSize {
        width: ProposedDimension::Infinite,
        height: ProposedDimension::Infinite,
    };

    pub const fn new(width: ProposedDimension, height: ProposedDimension) -> Self {
        Self { width, height }
    }

    /// Proposes exactly `width` x `height`.
    pub fn exact(width: f64, height: f64) -> Self {
        Self {
            width: ProposedDimension::exact(width),
            height: ProposedDimension::exact(height),
        }
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> ProposedDimension {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Returns a copy with the component along `axis` replaced.
    #[inline]
    pub fn with(self, axis: Axis, dimension: ProposedDimension) -> Self {
        match axis {
            Axis::Horizontal => Self {
                width: dimension,
                ..self
            },
            Axis::Vertical => Self {
                height: dimension,
                ..self
            },
        }
    }

    /// Removes padding from exact offers.
    pub fn deflate(self, horizontal: f64, vertical: f64) -> Self {
        Self {
            width: self.width.shrink(horizontal),
            height: self.height.shrink(vertical),
        }
    }

    /// Returns true when neither component is `Infinite`.
    pub fn is_bounded(&self) -> bool {
        !self.width.is_infinite() && !self.height.is_infinite()
    }
}

#[cfg(test)]
#[path = "tests/proposal_tests.rs"]
mod tests;
