use crate::config::EngraveParams;
use crate::geometry::{Path, Polygon, Segment};
use crate::math::Point2;

use super::collate::collate;
use super::travel::HOME;

/// Time spent filling closed shapes with a raster engraving head, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EngraveTime {
    /// Seconds spent with the laser on.
    pub active: f64,
    /// Seconds spent moving between engraved spans.
    pub idle: f64,
}

impl EngraveTime {
    /// Returns the total time in seconds.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.active + self.idle
    }
}

/// Estimates the time to engrave the area enclosed by closed paths.
///
/// The closed paths of the collated segments are filled together with the
/// even-odd rule, so a loop nested inside another is left blank. Horizontal
/// scanlines are swept bottom to top in alternating directions, starting
/// half a scanline above the lowest vertex. Only the spans inside the fill
/// are engraved; everything in between, including the move from `start` to
/// the first span, is idle travel.
///
/// Closed paths that are not a single simple cycle (for example two loops
/// sharing a vertex) are skipped.
#[derive(Debug)]
pub struct EstimateEngraving<'a> {
    segments: &'a [Segment],
    params: EngraveParams,
    start: Point2,
}

impl<'a> EstimateEngraving<'a> {
    /// Creates a new engraving estimate starting from `start`.
    #[must_use]
    pub fn new(segments: &'a [Segment], params: EngraveParams, start: Point2) -> Self {
        Self {
            segments,
            params,
            start,
        }
    }

    /// Executes the estimate.
    #[must_use]
    pub fn execute(&self) -> EngraveTime {
        let paths = collate(self.segments);
        let loops: Vec<&Path> = paths.iter().filter(|p| p.is_loop()).collect();
        let rings: Vec<Vec<Point2>> = loops.iter().filter_map(|p| ring(p)).collect();
        if rings.len() < loops.len() {
            tracing::debug!(
                skipped = loops.len() - rings.len(),
                "closed paths that are not simple cycles left unfilled"
            );
        }

        let mut rings = rings.into_iter();
        let Some(outer) = rings.next() else {
            return EngraveTime::default();
        };
        let polygon = match Polygon::new(outer, rings.collect()) {
            Ok(polygon) => polygon,
            Err(err) => {
                tracing::warn!(%err, "cannot build engraving fill");
                return EngraveTime::default();
            }
        };

        let (active, idle) = self.sweep(&polygon);
        let speeds = self.params.speeds();
        let time = EngraveTime {
            active: active / speeds.active(),
            idle: idle / speeds.idle(),
        };
        tracing::debug!(
            loops = loops.len(),
            active_distance = active,
            idle_distance = idle,
            seconds = time.total(),
            "estimated engraving"
        );
        time
    }

    /// Returns the `(active, idle)` distances of a boustrophedon sweep.
    fn sweep(&self, polygon: &Polygon) -> (f64, f64) {
        let bounds = polygon.bounding_box();
        let spacing = self.params.scanline();
        let mut cursor = self.start;
        let mut active = 0.0;
        let mut idle = 0.0;
        let mut rightwards = true;
        let mut row = 0.0_f64;

        loop {
            let y = bounds.min().y + (row + 0.5) * spacing;
            if y > bounds.max().y {
                break;
            }
            row += 1.0;

            let mut spans = fill_spans(polygon, y);
            if spans.is_empty() {
                continue;
            }
            if !rightwards {
                spans.reverse();
                for span in &mut spans {
                    *span = (span.1, span.0);
                }
            }
            for (from, to) in spans {
                idle += nalgebra::distance(&cursor, &Point2::new(from, y));
                active += (to - from).abs();
                cursor = Point2::new(to, y);
            }
            rightwards = !rightwards;
        }
        (active, idle)
    }
}

/// Estimates engraving time for closed paths, starting from [`HOME`].
#[must_use]
pub fn estimated_engrave_time(segments: &[Segment], params: &EngraveParams) -> EngraveTime {
    estimated_engrave_time_from(segments, params, &HOME)
}

/// Estimates engraving time for closed paths, starting from `start`.
#[must_use]
pub fn estimated_engrave_time_from(
    segments: &[Segment],
    params: &EngraveParams,
    start: &Point2,
) -> EngraveTime {
    EstimateEngraving::new(segments, *params, *start).execute()
}

/// Left-to-right spans of the line `y` that lie inside the fill.
fn fill_spans(polygon: &Polygon, y: f64) -> Vec<(f64, f64)> {
    polygon
        .crossings(y)
        .windows(2)
        .filter(|w| w[1] > w[0] && polygon.contains(&Point2::new((w[0] + w[1]) / 2.0, y)))
        .map(|w| (w[0], w[1]))
        .collect()
}

/// Walks a closed path as a single cycle of vertices.
fn ring(path: &Path) -> Option<Vec<Point2>> {
    let segments = path.segments();
    let first = segments.first()?;
    let origin = first.start();
    let mut used = vec![false; segments.len()];
    used[0] = true;
    let mut points = vec![origin];
    let mut cursor = first.end();

    while cursor != origin {
        if points.contains(&cursor) {
            return None;
        }
        points.push(cursor);
        let (index, next) = segments.iter().enumerate().find_map(|(i, s)| {
            if used[i] {
                None
            } else if s.start() == cursor {
                Some((i, s.end()))
            } else if s.end() == cursor {
                Some((i, s.start()))
            } else {
                None
            }
        })?;
        used[index] = true;
        cursor = next;
    }

    (points.len() >= 3 && used.iter().all(|&u| u)).then_some(points)
}
