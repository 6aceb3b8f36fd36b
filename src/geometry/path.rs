use std::collections::HashSet;

use crate::math::{Point2, PointKey};

use super::Segment;

/// A connected set of segments together with the vertices it touches.
///
/// Vertices are compared by exact value, so segments should share endpoints
/// exactly (see [`crate::unify()`]).
#[derive(Debug, Clone)]
pub struct Path {
    segments: Vec<Segment>,
    vertices: HashSet<PointKey>,
    is_loop: bool,
}

impl Path {
    /// Creates a path holding a single segment.
    #[must_use]
    pub fn new(seed: Segment) -> Self {
        let mut vertices = HashSet::new();
        vertices.insert(PointKey::new(&seed.start()));
        vertices.insert(PointKey::new(&seed.end()));
        Self {
            segments: vec![seed],
            vertices,
            is_loop: false,
        }
    }

    /// Appends a segment and returns the updated loop flag.
    ///
    /// The path becomes a loop when both endpoints of the added segment were
    /// already vertices of the path. The flag is never cleared.
    pub fn add(&mut self, segment: Segment) -> bool {
        let start = PointKey::new(&segment.start());
        let end = PointKey::new(&segment.end());
        let closes = self.vertices.contains(&start) && self.vertices.contains(&end);

        self.segments.push(segment);
        self.vertices.insert(start);
        self.vertices.insert(end);
        self.is_loop = self.is_loop || closes;
        self.is_loop
    }

    /// Moves every segment of `other` into this path, one at a time.
    pub fn merge(&mut self, other: Path) {
        for segment in other.segments {
            self.add(segment);
        }
    }

    /// Returns `true` if `segment` shares at least one endpoint with the path.
    #[must_use]
    pub fn touches(&self, segment: &Segment) -> bool {
        self.contains_vertex(&segment.start()) || self.contains_vertex(&segment.end())
    }

    /// Returns `true` if `point` is a vertex of the path.
    #[must_use]
    pub fn contains_vertex(&self, point: &Point2) -> bool {
        self.vertices.contains(&PointKey::new(point))
    }

    /// Returns the segments in the order they were added.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consumes the path, returning its segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Returns the number of distinct vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the path holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` once some added segment has closed a cycle.
    #[must_use]
    pub fn is_loop(&self) -> bool {
        self.is_loop
    }

    pub(crate) fn vertex_keys(&self) -> &HashSet<PointKey> {
        &self.vertices
    }
}
