use crate::geometry::{Rect, Segment};
use crate::math::Point2;

use super::travel::ideal_travel_distance_from;

/// Reorders segments to shorten idle travel with a greedy nearest-neighbour
/// walk.
///
/// Starting from the lower-left corner of the bounding box, the walk
/// repeatedly picks the remaining segment with an endpoint closest to the
/// cursor, flips it so that endpoint comes first, and moves the cursor to its
/// far end. Ties go to the segment that appears first in the remaining pool.
#[derive(Debug)]
pub struct OptimiseOrder<'a> {
    segments: &'a [Segment],
}

impl<'a> OptimiseOrder<'a> {
    /// Creates a new ordering operation.
    #[must_use]
    pub fn new(segments: &'a [Segment]) -> Self {
        Self { segments }
    }

    /// Executes the ordering.
    ///
    /// The output holds exactly the input segments, each possibly reversed.
    #[must_use]
    pub fn execute(&self) -> Vec<Segment> {
        let Some(bounds) = Rect::of_segments(self.segments) else {
            return Vec::new();
        };

        let mut remaining: Vec<Segment> = self.segments.to_vec();
        let mut ordered = Vec::with_capacity(remaining.len());
        let mut cursor = bounds.min();

        while let Some((index, reverse)) = nearest(&remaining, &cursor) {
            let segment = remaining.remove(index);
            let segment = if reverse { segment.reversed() } else { segment };
            cursor = segment.end();
            ordered.push(segment);
        }

        tracing::debug!(
            segments = ordered.len(),
            before = ideal_travel_distance_from(self.segments, &bounds.min()),
            after = ideal_travel_distance_from(&ordered, &bounds.min()),
            "optimised segment order"
        );
        ordered
    }
}

/// Reorders and orients segments to reduce idle tool travel.
#[must_use]
pub fn optimise(segments: &[Segment]) -> Vec<Segment> {
    OptimiseOrder::new(segments).execute()
}

/// Index of the segment with an endpoint closest to `cursor`, and whether it
/// must be reversed so that endpoint comes first.
fn nearest(pool: &[Segment], cursor: &Point2) -> Option<(usize, bool)> {
    let mut best: Option<(usize, bool, f64)> = None;
    for (index, segment) in pool.iter().enumerate() {
        let to_start = nalgebra::distance(cursor, &segment.start());
        let to_end = nalgebra::distance(cursor, &segment.end());
        let (reverse, dist) = if to_end < to_start {
            (true, to_end)
        } else {
            (false, to_start)
        };
        let closer = match best {
            Some((_, _, d)) => dist < d,
            None => true,
        };
        if closer {
            best = Some((index, reverse, dist));
        }
    }
    best.map(|(index, reverse, _)| (index, reverse))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::operations::travel::{cut_length, ideal_travel_distance};

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn empty_input() {
        assert!(optimise(&[]).is_empty());
    }

    #[test]
    fn single_segment_unchanged() {
        let s = seg(0.0, 0.0, 4.0, 0.0);
        let out = optimise(&[s]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].start(), s.start());
    }

    #[test]
    fn single_segment_flipped_towards_corner() {
        let s = seg(4.0, 3.0, 0.0, 0.0);
        let out = optimise(&[s]);
        assert_eq!(out[0].start(), Point2::new(0.0, 0.0));
        assert_eq!(out[0].end(), Point2::new(4.0, 3.0));
    }

    #[test]
    fn scattered_dashes_are_chained() {
        // Dashes along the x axis, shuffled and with mixed directions.
        let input = vec![
            seg(6.0, 0.0, 7.0, 0.0),
            seg(1.0, 0.0, 0.0, 0.0),
            seg(9.0, 0.0, 8.0, 0.0),
            seg(2.0, 0.0, 3.0, 0.0),
            seg(5.0, 0.0, 4.0, 0.0),
        ];
        let out = optimise(&input);
        let starts: Vec<f64> = out.iter().map(|s| s.start().x).collect();
        assert_eq!(starts, vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert!(out.iter().all(|s| s.end().x > s.start().x));
        assert!(ideal_travel_distance(&out) < ideal_travel_distance(&input));
    }

    #[test]
    fn permutation_preserves_length() {
        let input = vec![
            seg(3.0, 7.0, 1.0, 1.0),
            seg(10.0, 2.0, 4.0, 4.0),
            seg(0.5, 9.0, 8.0, 8.0),
            seg(2.0, 2.0, 2.0, 6.0),
            seg(7.0, 1.0, 9.0, 5.0),
        ];
        let out = optimise(&input);
        assert_eq!(out.len(), input.len());
        for s in &input {
            assert_eq!(out.iter().filter(|o| *o == s).count(), 1);
        }
        assert_relative_eq!(cut_length(&out), cut_length(&input), epsilon = 1e-9);
    }

    #[test]
    fn ties_go_to_first_in_pool() {
        // Both segments start at distance 1 from the corner (0, 0).
        let input = vec![seg(1.0, 0.0, 1.0, 5.0), seg(0.0, 1.0, 5.0, 1.0)];
        let out = optimise(&input);
        assert_eq!(out[0], input[0]);
        assert_eq!(out[0].start(), Point2::new(1.0, 0.0));
    }
}
