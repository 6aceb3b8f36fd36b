use crate::config::LaserSpeeds;
use crate::geometry::Segment;
use crate::math::Point2;

/// Tool position before the first cut.
pub const HOME: Point2 = Point2::new(0.0, 0.0);

/// Idle travel of the tool moving between cuts, starting from `start`.
#[must_use]
pub fn travel_length(segments: &[Segment], start: &Point2) -> f64 {
    let mut cursor = *start;
    let mut total = 0.0;
    for segment in segments {
        total += nalgebra::distance(&cursor, &segment.start());
        cursor = segment.end();
    }
    total
}

/// Total length cut along the segments.
#[must_use]
pub fn cut_length(segments: &[Segment]) -> f64 {
    segments.iter().map(Segment::length).sum()
}

/// Idle travel plus cut length for the given order, starting from `start`.
#[must_use]
pub fn ideal_travel_distance_from(segments: &[Segment], start: &Point2) -> f64 {
    travel_length(segments, start) + cut_length(segments)
}

/// Idle travel plus cut length for the given order, starting from [`HOME`].
#[must_use]
pub fn ideal_travel_distance(segments: &[Segment]) -> f64 {
    ideal_travel_distance_from(segments, &HOME)
}

/// Estimated job time in seconds, starting from `start`.
///
/// Each segment contributes its approach travel divided by `speeds.idle()`
/// plus its length divided by `speeds.active()`.
#[must_use]
pub fn estimated_time_from(segments: &[Segment], speeds: &LaserSpeeds, start: &Point2) -> f64 {
    let mut cursor = *start;
    let mut time = 0.0;
    for segment in segments {
        time += nalgebra::distance(&cursor, &segment.start()) / speeds.idle();
        time += segment.length() / speeds.active();
        cursor = segment.end();
    }
    time
}

/// Estimated job time in seconds, starting from [`HOME`].
///
/// Invalid speeds fall back to [`LaserSpeeds::default`].
#[must_use]
pub fn estimated_time(segments: &[Segment], idle_speed: f64, active_speed: f64) -> f64 {
    let speeds = match LaserSpeeds::new(idle_speed, active_speed) {
        Ok(speeds) => speeds,
        Err(err) => {
            tracing::warn!(%err, "invalid laser speeds, using defaults");
            LaserSpeeds::default()
        }
    };
    estimated_time_from(segments, &speeds, &HOME)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn empty_is_zero() {
        assert_relative_eq!(ideal_travel_distance(&[]), 0.0);
        assert_relative_eq!(estimated_time(&[], 100.0, 35.0), 0.0);
    }

    #[test]
    fn travel_from_home() {
        // 5 to reach (3, 4), cut 2, jump 1, cut 3.
        let segs = vec![seg(3.0, 4.0, 5.0, 4.0), seg(5.0, 5.0, 5.0, 8.0)];
        assert_relative_eq!(travel_length(&segs, &HOME), 6.0);
        assert_relative_eq!(cut_length(&segs), 5.0);
        assert_relative_eq!(ideal_travel_distance(&segs), 11.0);
    }

    #[test]
    fn travel_from_explicit_start() {
        let segs = vec![seg(3.0, 4.0, 5.0, 4.0)];
        assert_relative_eq!(ideal_travel_distance_from(&segs, &Point2::new(3.0, 4.0)), 2.0);
    }

    #[test]
    fn order_changes_distance() {
        let forward = vec![seg(0.0, 0.0, 1.0, 0.0), seg(1.0, 0.0, 2.0, 0.0)];
        let backward = vec![seg(1.0, 0.0, 2.0, 0.0), seg(0.0, 0.0, 1.0, 0.0)];
        assert_relative_eq!(ideal_travel_distance(&forward), 2.0);
        assert_relative_eq!(ideal_travel_distance(&backward), 5.0);
    }

    #[test]
    fn time_splits_idle_and_active() {
        let segs = vec![seg(3.0, 4.0, 3.0, 11.0)];
        // 5 units idle at 10/s, 7 units cutting at 7/s.
        assert_relative_eq!(estimated_time(&segs, 10.0, 7.0), 1.5);
    }

    #[test]
    fn invalid_speeds_use_defaults() {
        let segs = vec![seg(0.0, 0.0, 35.0, 0.0)];
        assert_relative_eq!(estimated_time(&segs, 0.0, -1.0), 1.0);
    }
}
