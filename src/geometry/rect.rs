use crate::math::Point2;

use super::Segment;

/// An axis-aligned rectangle given by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    min: Point2,
    max: Point2,
}

impl Rect {
    /// Creates a rectangle from its corners.
    #[must_use]
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// Smallest rectangle enclosing every point, or `None` if there are none.
    #[must_use]
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Point2>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| {
            (
                Point2::new(min.x.min(p.x), min.y.min(p.y)),
                Point2::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Self { min, max })
    }

    /// Smallest rectangle enclosing every segment endpoint.
    #[must_use]
    pub fn of_segments(segments: &[Segment]) -> Option<Self> {
        let points: Vec<Point2> = segments
            .iter()
            .flat_map(|s| [s.start(), s.end()])
            .collect();
        Self::from_points(&points)
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Point2 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Point2 {
        self.max
    }

    /// Closed-interval containment test on both axes.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
    }
}
