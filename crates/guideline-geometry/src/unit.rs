//! Device units: logical points vs. physical pixels

/// Number of physical device pixels per logical point.
///
/// Frames are computed in logical points; snapping rounds them onto the
/// grid this scale describes.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct PixelScale(pub f64);

impl PixelScale {
    pub const ONE: PixelScale = PixelScale(1.0);

    /// Returns a usable scale, falling back to 1.0 for zero, negative or
    /// non-finite factors.
    pub fn new(factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Self(factor)
        } else {
            Self::ONE
        }
    }

    pub fn factor(&self) -> f64 {
        self.0
    }

    pub fn to_pixels(&self, points: f64) -> f64 {
        points * self.0
    }

    pub fn to_points(&self, pixels: f64) -> f64 {
        pixels / self.0
    }

    /// Rounds a logical coordinate to the nearest device pixel, ties to even.
    pub fn snap(&self, points: f64) -> f64 {
        let snapped = self.to_pixels(points).round_ties_even();
        // avoid handing out -0.0
        self.to_points(snapped) + 0.0
    }
}

impl Default for PixelScale {
    fn default() -> Self {
        Self::ONE
    }
}
