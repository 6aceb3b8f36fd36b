use std::collections::HashSet;

use crate::error::{GeometryError, Result};
use crate::math::intersect_2d::{on_segment, orientation, Orientation};
use crate::math::{is_finite, Point2};

use super::{Rect, Segment};

/// A polygon made of one outer loop and any number of hole loops.
///
/// Each loop is implicitly closed. Containment uses the even-odd rule over
/// the edges of every loop, so holes subtract from the outer area.
#[derive(Debug, Clone)]
pub struct Polygon {
    loops: Vec<Vec<Point2>>,
    edges: Vec<Segment>,
    bounds: Rect,
}

impl Polygon {
    /// Creates a polygon from an outer loop and its holes.
    ///
    /// Edges shared by several loops are kept once.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewPoints` if any loop has fewer than three
    /// points, or `GeometryError::NonFinite` if any coordinate is NaN or
    /// infinite.
    pub fn new(outer: Vec<Point2>, holes: Vec<Vec<Point2>>) -> Result<Self> {
        let mut loops = Vec::with_capacity(holes.len() + 1);
        loops.push(outer);
        loops.extend(holes);

        for points in &loops {
            if points.len() < 3 {
                return Err(GeometryError::TooFewPoints {
                    count: points.len(),
                }
                .into());
            }
            if let Some(bad) = points.iter().find(|p| !is_finite(p)) {
                return Err(GeometryError::NonFinite { x: bad.x, y: bad.y }.into());
            }
        }

        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for points in &loops {
            let n = points.len();
            for i in 0..n {
                let edge = Segment::new(points[i], points[(i + 1) % n]);
                if seen.insert(edge) {
                    edges.push(edge);
                }
            }
        }

        let bounds = Rect::from_points(loops.iter().flatten())
            .ok_or(GeometryError::TooFewPoints { count: 0 })?;

        Ok(Self {
            loops,
            edges,
            bounds,
        })
    }

    /// Returns the outer loop.
    #[must_use]
    pub fn outer(&self) -> &[Point2] {
        &self.loops[0]
    }

    /// Returns the hole loops.
    #[must_use]
    pub fn holes(&self) -> &[Vec<Point2>] {
        &self.loops[1..]
    }

    /// Returns the boundary edges of all loops.
    #[must_use]
    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    /// Returns the bounding box of every loop vertex.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        self.bounds
    }

    /// Even-odd point containment.
    ///
    /// Points lying on any edge are inside. Otherwise a horizontal ray is cast
    /// from just left of the bounding box to `point` and the boundary edges
    /// it crosses are counted. A vertex lying on the ray counts only for the
    /// edge that leaves it upwards, and edges collinear with the ray are
    /// skipped, so grazing a vertex does not flip parity.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        if self.edges.iter().any(|edge| on_edge(point, edge)) {
            return true;
        }

        let ray_start = Point2::new(self.bounds.min().x - 1.0, point.y);
        let crossings = self
            .edges
            .iter()
            .filter(|edge| ray_crosses(&ray_start, point, edge))
            .count();

        crossings % 2 == 1
    }

    /// Returns the sorted x coordinates where the line `y` crosses the
    /// boundary.
    ///
    /// An edge spans the half-open range from its lower to its upper end, so
    /// a vertex on the line is reported once for a pass-through and not at
    /// all for a turning point. Horizontal edges are skipped.
    #[must_use]
    pub fn crossings(&self, y: f64) -> Vec<f64> {
        let mut xs: Vec<f64> = self
            .edges
            .iter()
            .filter_map(|edge| {
                let a = edge.start();
                let b = edge.end();
                if (a.y <= y) == (b.y <= y) {
                    return None;
                }
                Some(a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y))
            })
            .collect();
        xs.sort_by(f64::total_cmp);
        xs
    }
}

fn on_edge(point: &Point2, edge: &Segment) -> bool {
    orientation(&edge.start(), &edge.end(), point) == Orientation::Collinear
        && on_segment(&edge.start(), point, &edge.end())
}

/// Tests whether the horizontal ray `ray_start -> point` crosses `edge`.
fn ray_crosses(ray_start: &Point2, point: &Point2, edge: &Segment) -> bool {
    let a = edge.start();
    let b = edge.end();
    let oa = orientation(ray_start, point, &a);
    let ob = orientation(ray_start, point, &b);

    match (oa, ob) {
        (Orientation::Collinear, Orientation::Collinear) => false,
        (Orientation::Collinear, _) => b.y > point.y && on_segment(ray_start, &a, point),
        (_, Orientation::Collinear) => a.y > point.y && on_segment(ray_start, &b, point),
        _ if oa == ob => false,
        _ => orientation(&a, &b, ray_start) != orientation(&a, &b, point),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CutplanError;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn unit_square() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)]
    }

    #[test]
    fn point_outside_square() {
        let square = Polygon::new(unit_square(), Vec::new()).unwrap();
        assert!(!square.contains(&p(0.5, 1.5)));
    }

    #[test]
    fn point_inside_square() {
        let square = Polygon::new(unit_square(), Vec::new()).unwrap();
        assert!(square.contains(&p(0.5, 0.5)));
    }

    #[test]
    fn point_inside_hole() {
        let outer = vec![p(-1.0, -1.0), p(-1.0, 2.0), p(2.0, 2.0), p(2.0, -1.0)];
        let framed = Polygon::new(outer, vec![unit_square()]).unwrap();
        assert!(!framed.contains(&p(0.5, 0.5)));
        assert!(framed.contains(&p(-0.5, 0.5)));
        assert!(framed.contains(&p(1.5, 1.5)));
        assert!(!framed.contains(&p(3.0, 0.5)));
    }

    #[test]
    fn ray_through_vertex() {
        let diamond = vec![p(0.0, -1.0), p(1.0, 0.0), p(0.0, 1.0), p(-1.0, 0.0)];
        let poly = Polygon::new(diamond, Vec::new()).unwrap();
        assert!(poly.contains(&p(0.5, 0.0)));
        assert!(poly.contains(&p(0.0, 0.0)));
        assert!(!poly.contains(&p(0.9, 0.9)));
    }

    #[test]
    fn ray_along_edge() {
        // Bottom edge of the notch lies on y = 1.
        let notched = vec![
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ];
        let poly = Polygon::new(notched, Vec::new()).unwrap();
        assert!(poly.contains(&p(2.5, 1.0)));
        assert!(poly.contains(&p(2.5, 1.5)));
        assert!(!poly.contains(&p(1.5, 1.5)));
    }

    #[test]
    fn concave_polygon() {
        let l_shape = vec![
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 2.0),
            p(0.0, 2.0),
        ];
        let poly = Polygon::new(l_shape, Vec::new()).unwrap();
        assert!(poly.contains(&p(0.5, 1.5)));
        assert!(poly.contains(&p(1.5, 0.5)));
        assert!(!poly.contains(&p(1.5, 1.5)));
    }

    #[test]
    fn boundary_counts_as_inside() {
        let square = Polygon::new(unit_square(), Vec::new()).unwrap();
        assert!(square.contains(&p(0.0, 0.5)));
        assert!(square.contains(&p(1.0, 0.5)));
        assert!(square.contains(&p(0.5, 0.0)));
        assert!(square.contains(&p(0.5, 1.0)));
        assert!(square.contains(&p(1.0, 1.0)));
        assert!(!square.contains(&p(1.0, 1.000_001)));
    }

    #[test]
    fn hole_boundary_counts_as_inside() {
        let outer = vec![p(-1.0, -1.0), p(-1.0, 2.0), p(2.0, 2.0), p(2.0, -1.0)];
        let framed = Polygon::new(outer, vec![unit_square()]).unwrap();
        assert!(framed.contains(&p(1.0, 0.5)));
        assert!(framed.contains(&p(0.5, 1.0)));
    }

    #[test]
    fn scanline_crossings() {
        let outer = vec![p(-1.0, -1.0), p(-1.0, 2.0), p(2.0, 2.0), p(2.0, -1.0)];
        let framed = Polygon::new(outer, vec![unit_square()]).unwrap();
        assert_eq!(framed.crossings(0.5), vec![-1.0, 0.0, 1.0, 2.0]);
        assert!(framed.crossings(3.0).is_empty());

        // Apex of the diamond is a turning point, its waist a pass-through.
        let diamond = vec![p(0.0, -1.0), p(1.0, 0.0), p(0.0, 1.0), p(-1.0, 0.0)];
        let poly = Polygon::new(diamond, Vec::new()).unwrap();
        assert_eq!(poly.crossings(0.0), vec![-1.0, 1.0]);
        assert_eq!(poly.crossings(1.0).len() % 2, 0);
    }

    #[test]
    fn accessors() {
        let outer = vec![p(-1.0, -1.0), p(-1.0, 2.0), p(2.0, 2.0), p(2.0, -1.0)];
        let framed = Polygon::new(outer, vec![unit_square()]).unwrap();
        assert_eq!(framed.outer().len(), 4);
        assert_eq!(framed.holes().len(), 1);
        assert_eq!(framed.edges().len(), 8);
        assert_eq!(framed.bounding_box().min(), p(-1.0, -1.0));
        assert_eq!(framed.bounding_box().max(), p(2.0, 2.0));
    }

    #[test]
    fn short_loop_rejected() {
        let err = Polygon::new(vec![p(0.0, 0.0), p(1.0, 0.0)], Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            CutplanError::Geometry(GeometryError::TooFewPoints { count: 2 })
        ));
        assert!(Polygon::new(unit_square(), vec![vec![p(0.2, 0.2)]]).is_err());
    }

    #[test]
    fn non_finite_rejected() {
        let pts = vec![p(0.0, 0.0), p(f64::NAN, 1.0), p(1.0, 0.0)];
        assert!(Polygon::new(pts, Vec::new()).is_err());
    }
}
