use crate::geometry::{Path, Segment};

/// Groups segments into maximal connected paths.
///
/// Segments are connected when they share an endpoint by exact value, so the
/// input should already be unified.
#[derive(Debug)]
pub struct CollatePaths<'a> {
    segments: &'a [Segment],
}

impl<'a> CollatePaths<'a> {
    /// Creates a new collation operation.
    #[must_use]
    pub fn new(segments: &'a [Segment]) -> Self {
        Self { segments }
    }

    /// Executes the collation.
    ///
    /// Each segment either starts a new path or is merged, together with every
    /// path it touches, into a fresh path seeded with it. Untouched paths keep
    /// their relative order and the merged path is appended after them.
    #[must_use]
    pub fn execute(&self) -> Vec<Path> {
        let mut paths: Vec<Path> = Vec::new();

        for segment in self.segments {
            if !paths.iter().any(|p| p.touches(segment)) {
                paths.push(Path::new(*segment));
                continue;
            }

            let (touched, untouched): (Vec<Path>, Vec<Path>) =
                paths.into_iter().partition(|p| p.touches(segment));
            tracing::trace!(merging = touched.len(), "segment joins existing paths");

            let mut merged = Path::new(*segment);
            for path in touched {
                merged.merge(path);
            }
            paths = untouched;
            paths.push(merged);
        }

        tracing::debug!(
            segments = self.segments.len(),
            paths = paths.len(),
            loops = paths.iter().filter(|p| p.is_loop()).count(),
            "collated segments"
        );
        paths
    }
}

/// Groups unified segments into maximal connected paths.
#[must_use]
pub fn collate(segments: &[Segment]) -> Vec<Path> {
    CollatePaths::new(segments).execute()
}
