use std::hash::{Hash, Hasher};

use crate::math::intersect_2d::segments_intersect;
use crate::math::{Point2, PointKey, Vector2};

/// A straight line segment between two points.
///
/// Equality is undirected: a segment equals its reverse.
#[derive(Debug, Clone, Copy)]
pub struct Segment {
    start: Point2,
    end: Point2,
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    #[must_use]
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> Point2 {
        self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// Returns the vector from start to end.
    #[must_use]
    pub fn vector(&self) -> Vector2 {
        self.end - self.start
    }

    /// Returns the Euclidean length.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.vector().norm()
    }

    /// Returns the unit direction, or the zero vector for a degenerate segment.
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        let v = self.vector();
        let len = v.norm();
        if len == 0.0 {
            return Vector2::zeros();
        }
        v / len
    }

    /// Returns the geometric midpoint.
    #[must_use]
    pub fn midpoint(&self) -> Point2 {
        nalgebra::center(&self.start, &self.end)
    }

    /// Returns the same segment traversed end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Returns the point at arc length `distance` from the start along the
    /// segment's direction. `distance` is not clamped.
    #[must_use]
    pub fn point_at(&self, distance: f64) -> Point2 {
        self.start + self.direction() * distance
    }

    /// Pulls the end point back towards the start by `amount`.
    #[must_use]
    pub fn shrink_end(&self, amount: f64) -> Self {
        Self::new(self.start, self.point_at(self.length() - amount))
    }

    /// Pushes the start point forward towards the end by `amount`.
    #[must_use]
    pub fn shrink_start(&self, amount: f64) -> Self {
        Self::new(self.point_at(amount), self.end)
    }

    /// Splits the segment into `pieces` equal consecutive segments.
    ///
    /// The last piece ends exactly at the original end point. Returns an empty
    /// list when `pieces` is zero.
    #[must_use]
    pub fn split(&self, pieces: u32) -> Vec<Self> {
        if pieces == 0 {
            return Vec::new();
        }
        let step = self.vector() / f64::from(pieces);
        let mut out = Vec::with_capacity(pieces as usize);
        let mut cursor = self.start;
        for i in 1..=pieces {
            let next = if i == pieces {
                self.end
            } else {
                self.start + step * f64::from(i)
            };
            out.push(Self::new(cursor, next));
            cursor = next;
        }
        out
    }

    /// Returns `true` if this segment touches or crosses `other`.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        segments_intersect(&self.start, &self.end, &other.start, &other.end)
    }

    /// Returns `true` if either endpoint equals `point` exactly.
    #[must_use]
    pub fn has_endpoint(&self, point: &Point2) -> bool {
        self.start == *point || self.end == *point
    }

    /// Direction-independent key: endpoint keys in ascending order.
    pub(crate) fn key(&self) -> (PointKey, PointKey) {
        let a = PointKey::new(&self.start);
        let b = PointKey::new(&self.end);
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

impl Eq for Segment {}

impl Hash for Segment {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
