use robust::{orient2d as robust_orient2d, Coord};

use super::Point2;

/// Result of an orientation test on three points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `r` lies left of the directed line `p -> q`.
    CounterClockwise,
    /// `r` lies right of the directed line `p -> q`.
    Clockwise,
    /// The three points are collinear.
    Collinear,
}

/// Orientation of the ordered triple `(p, q, r)`.
///
/// Uses Shewchuk's adaptive-precision predicate, so nearly collinear triples
/// are classified exactly rather than by the sign of a rounded cross product.
#[must_use]
pub fn orientation(p: &Point2, q: &Point2, r: &Point2) -> Orientation {
    let det = robust_orient2d(
        Coord { x: p.x, y: p.y },
        Coord { x: q.x, y: q.y },
        Coord { x: r.x, y: r.y },
    );
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Returns `true` if `q` lies inside the closed bounding box of `p` and `r`.
///
/// Only meaningful when the three points are already known to be collinear.
#[must_use]
pub fn on_segment(p: &Point2, q: &Point2, r: &Point2) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Closed segment-segment intersection test.
///
/// Segments `p1 q1` and `p2 q2` intersect if they cross in general position,
/// or if an endpoint of one lies on the other (collinear touching and
/// overlapping included).
#[must_use]
pub fn segments_intersect(p1: &Point2, q1: &Point2, p2: &Point2, q2: &Point2) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}
