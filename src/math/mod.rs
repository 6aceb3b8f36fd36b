pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Exact-value key for a point, usable in hash sets.
///
/// Two points map to the same key iff their coordinates compare equal with
/// `==`. Negative zero is folded onto positive zero. Coordinates are assumed
/// not to be NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointKey(u64, u64);

impl PointKey {
    /// Builds the key for a point.
    #[must_use]
    pub fn new(point: &Point2) -> Self {
        // Adding +0.0 maps -0.0 to +0.0 and leaves every other value unchanged.
        Self((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits())
    }
}

impl From<&Point2> for PointKey {
    fn from(point: &Point2) -> Self {
        Self::new(point)
    }
}

/// Returns `true` if both coordinates of `point` are finite.
#[must_use]
pub fn is_finite(point: &Point2) -> bool {
    point.x.is_finite() && point.y.is_finite()
}
