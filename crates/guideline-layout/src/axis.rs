/// One of the two geometric axes of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// x: leading to trailing.
    Horizontal,
    /// y: top to bottom.
    Vertical,
}

impl Axis {
    /// Returns the opposite axis.
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }
}

/// Primary axis of a container.
///
/// `Horizontal` and `Vertical` stack children one after another along that
/// axis and align them on the cross axis. `Depth` overlays every child in
/// the same box and aligns them on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackAxis {
    Horizontal,
    Vertical,
    Depth,
}

impl StackAxis {
    /// Returns the geometric main axis, or `None` for overlays.
    #[inline]
    pub fn primary(self) -> Option<Axis> {
        match self {
            StackAxis::Horizontal => Some(Axis::Horizontal),
            StackAxis::Vertical => Some(Axis::Vertical),
            StackAxis::Depth => None,
        }
    }
}
