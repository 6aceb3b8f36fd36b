use crate::config::TabParams;
use crate::geometry::Segment;
use crate::math::TOLERANCE;

/// Splits one segment into cut pieces separated by uncut bridges.
///
/// The first bridge of length `width` is centred `distance` from the start,
/// and each later one `distance` past the end of the previous bridge. The
/// result carries the remaining distance until the next bridge is due,
/// so a caller walking a path can continue the spacing on the next segment.
#[derive(Debug)]
pub struct InsertTabs {
    segment: Segment,
    params: TabParams,
}

impl InsertTabs {
    /// Creates a new tab insertion for a single segment.
    #[must_use]
    pub fn new(segment: Segment, params: TabParams) -> Self {
        Self { segment, params }
    }

    /// Executes the insertion, returning `(remaining, pieces)`.
    ///
    /// A segment shorter than `distance` or than `width` is returned
    /// unchanged with `remaining = distance - length`.
    #[must_use]
    pub fn execute(&self) -> (f64, Vec<Segment>) {
        place_tabs(
            self.segment,
            self.params.distance(),
            self.params.distance(),
            self.params.width(),
        )
    }
}

/// Inserts bridges along an ordered run of segments.
///
/// Spacing is measured along the whole run: the distance left over at the
/// end of one segment is where the first bridge of the next one goes.
#[derive(Debug)]
pub struct InsertTabsAlong<'a> {
    segments: &'a [Segment],
    params: TabParams,
}

impl<'a> InsertTabsAlong<'a> {
    /// Creates a new tab insertion over a run of segments.
    #[must_use]
    pub fn new(segments: &'a [Segment], params: TabParams) -> Self {
        Self { segments, params }
    }

    /// Executes the insertion, returning every cut piece in order.
    #[must_use]
    pub fn execute(&self) -> Vec<Segment> {
        let spacing = self.params.distance();
        let mut budget = spacing;
        let mut out = Vec::with_capacity(self.segments.len());
        for segment in self.segments {
            let (remaining, pieces) = place_tabs(*segment, budget, spacing, self.params.width());
            out.extend(pieces);
            budget = remaining;
        }
        tracing::debug!(
            input = self.segments.len(),
            output = out.len(),
            spacing,
            width = self.params.width(),
            "inserted tabs along run"
        );
        out
    }
}

/// Splits `segment` with bridges of `tab_width` every `distance`.
///
/// Returns the remaining distance until the next bridge and the cut pieces.
/// Non-positive or non-finite parameters, or a `distance` shorter than
/// `tab_width`, leave the segment uncut.
#[must_use]
pub fn insert_tabs(segment: Segment, distance: f64, tab_width: f64) -> (f64, Vec<Segment>) {
    match TabParams::new(distance, tab_width) {
        Ok(params) => InsertTabs::new(segment, params).execute(),
        Err(err) => {
            tracing::warn!(%err, "invalid tab parameters, segment left uncut");
            (distance - segment.length(), vec![segment])
        }
    }
}

/// Inserts bridges along an ordered run, carrying spacing across segments.
#[must_use]
pub fn insert_tabs_along(segments: &[Segment], params: &TabParams) -> Vec<Segment> {
    InsertTabsAlong::new(segments, *params).execute()
}

/// Places the first bridge at `first` and the rest every `spacing`.
///
/// A segment that would be consumed entirely by bridges is returned uncut,
/// so the output is never empty.
fn place_tabs(segment: Segment, first: f64, spacing: f64, width: f64) -> (f64, Vec<Segment>) {
    let (remaining, pieces) = split_at_tabs(segment, first, spacing, width);
    if pieces.is_empty() {
        return (first - segment.length(), vec![segment]);
    }
    (remaining, pieces)
}

fn split_at_tabs(segment: Segment, first: f64, spacing: f64, width: f64) -> (f64, Vec<Segment>) {
    let half = width / 2.0;
    let mut pieces = Vec::new();
    let mut current = segment;
    let mut offset = first;

    loop {
        let length = current.length();
        if length < offset || length < width {
            pieces.push(current);
            return (offset - length, pieces);
        }

        // A bridge may not start before the piece does.
        let offset_here = offset.max(half);
        let split = current.point_at(offset_here);
        let before = Segment::new(current.start(), split).shrink_end(half);
        let after = Segment::new(split, current.end()).shrink_start(half);

        if before.length() > TOLERANCE {
            pieces.push(before);
        }
        tracing::trace!(x = split.x, y = split.y, "tab");

        let rest = after.length();
        if rest <= spacing {
            if rest > TOLERANCE {
                pieces.push(after);
            }
            return (spacing - rest, pieces);
        }
        current = after;
        offset = spacing;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::Point2;
    use crate::operations::travel::cut_length;

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn ten_long_two_pieces() {
        let (remaining, pieces) = insert_tabs(seg(0.0, 0.0, 10.0, 0.0), 5.0, 1.0);
        assert_eq!(pieces.len(), 2);
        for piece in &pieces {
            assert_abs_diff_eq!(piece.length(), 4.5, epsilon = 1e-3);
        }
        assert_abs_diff_eq!(remaining, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(pieces[0].end().x, 4.5, epsilon = 1e-9);
        assert_abs_diff_eq!(pieces[1].start().x, 5.5, epsilon = 1e-9);
    }

    #[test]
    fn short_segment_unchanged() {
        let s = seg(1.0, 1.0, 4.0, 5.0);
        let (remaining, pieces) = insert_tabs(s, 8.0, 1.0);
        assert_eq!(pieces.len(), 1);
        assert_eq!(pieces[0].start(), s.start());
        assert_eq!(pieces[0].end(), s.end());
        assert_abs_diff_eq!(remaining, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn narrower_than_tab_unchanged() {
        let s = seg(0.0, 0.0, 0.8, 0.0);
        let (_, pieces) = insert_tabs(s, 0.5, 1.0);
        assert_eq!(pieces, vec![s]);
    }

    #[test]
    fn halving_always_gives_two_pieces() {
        for &(bx, by) in &[(3.0, 4.0), (-120.0, 35.0), (0.0, -2.5), (999.0, 999.0)] {
            let s = seg(0.0, 0.0, bx, by);
            let (_, pieces) = insert_tabs(s, s.length() / 2.0, 1.0);
            assert_eq!(pieces.len(), 2);
            for piece in &pieces {
                assert_abs_diff_eq!(piece.length(), s.length() / 2.0 - 0.5, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn length_is_conserved() {
        let cases = [
            (seg(0.0, 0.0, 37.0, 0.0), 5.0, 1.0),
            (seg(-3.0, 2.0, 40.0, -18.0), 7.5, 0.5),
            (seg(10.0, 10.0, 10.0, 300.0), 29.0, 2.0),
        ];
        for (s, distance, width) in cases {
            let (_, pieces) = insert_tabs(s, distance, width);
            assert!(pieces.len() > 1);
            let gaps = (pieces.len() - 1) as f64;
            assert_abs_diff_eq!(cut_length(&pieces) + gaps * width, s.length(), epsilon = 1e-3);
        }
    }

    #[test]
    fn long_segment_piece_count() {
        let (remaining, pieces) = insert_tabs(seg(0.0, 0.0, 37.0, 0.0), 5.0, 1.0);
        assert_eq!(pieces.len(), 7);
        assert_abs_diff_eq!(pieces[6].length(), 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(remaining, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn very_long_segment_does_not_recurse() {
        let (_, pieces) = insert_tabs(seg(0.0, 0.0, 1.0e6, 0.0), 1.0, 0.1);
        assert!(pieces.len() > 900_000);
    }

    #[test]
    fn invalid_parameters_leave_segment_uncut() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        let (remaining, pieces) = insert_tabs(s, 0.0, 1.0);
        assert_eq!(pieces, vec![s]);
        assert_abs_diff_eq!(remaining, -10.0);
        let (_, pieces) = insert_tabs(s, 3.0, f64::NAN);
        assert_eq!(pieces, vec![s]);
    }

    #[test]
    fn spacing_shorter_than_tab_leaves_segment_uncut() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        let (_, pieces) = insert_tabs(s, 0.3, 1.0);
        assert_eq!(pieces, vec![s]);
    }

    #[test]
    fn segment_filled_by_one_tab_is_kept() {
        // Exactly one tab wide with the bridge due at once: nothing would be
        // left to cut on either side.
        let s = seg(0.0, 0.0, 1.0, 0.0);
        let (remaining, pieces) = place_tabs(s, 0.01, 5.0, 1.0);
        assert_eq!(pieces, vec![s]);
        assert_abs_diff_eq!(remaining, -0.99, epsilon = 1e-12);
    }

    #[test]
    fn output_never_empty() {
        for &(length, distance, width) in &[(1.0, 1.0, 1.0), (2.0, 1.0, 1.0), (0.5, 3.0, 0.5)] {
            let (_, pieces) = insert_tabs(seg(0.0, 0.0, length, 0.0), distance, width);
            assert!(!pieces.is_empty());
        }
    }

    #[test]
    fn spacing_carries_across_segments() {
        // Two 6-long segments meeting at a corner: one bridge at 5 on the
        // first, the next one 4.5 units into the second.
        let run = vec![seg(0.0, 0.0, 6.0, 0.0), seg(6.0, 0.0, 6.0, 6.0)];
        let params = TabParams::new(5.0, 1.0).unwrap_or_default();
        let pieces = insert_tabs_along(&run, &params);

        assert_eq!(pieces.len(), 4);
        assert_abs_diff_eq!(pieces[0].end().x, 4.5, epsilon = 1e-9);
        assert_abs_diff_eq!(pieces[1].start().x, 5.5, epsilon = 1e-9);
        assert_abs_diff_eq!(pieces[2].end().y, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pieces[3].start().y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn short_run_accumulates_budget() {
        let run = vec![
            seg(0.0, 0.0, 2.0, 0.0),
            seg(2.0, 0.0, 4.0, 0.0),
            seg(4.0, 0.0, 10.0, 0.0),
        ];
        let params = TabParams::new(5.0, 1.0).unwrap_or_default();
        let pieces = insert_tabs_along(&run, &params);

        // Bridge centred at x = 5, one unit into the last segment.
        assert_eq!(pieces.len(), 4);
        assert_abs_diff_eq!(pieces[2].end().x, 4.5, epsilon = 1e-9);
        assert_abs_diff_eq!(pieces[3].start().x, 5.5, epsilon = 1e-9);
    }
}
