use std::fmt;

/// A before/after pair for a quantity an operation tries to reduce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reduction {
    /// Value before the operation.
    pub before: f64,
    /// Value after the operation.
    pub after: f64,
}

impl Reduction {
    /// Creates a reduction from two measurements.
    #[must_use]
    pub fn new(before: f64, after: f64) -> Self {
        Self { before, after }
    }

    /// Creates a reduction from two counts.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_counts(before: usize, after: usize) -> Self {
        Self::new(before as f64, after as f64)
    }

    /// Absolute amount saved.
    #[must_use]
    pub fn saving(&self) -> f64 {
        self.before - self.after
    }

    /// Saving as a percentage of `before`, or `0.0` when `before` is not
    /// positive.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.before <= 0.0 {
            return 0.0;
        }
        (1.0 - self.after / self.before) * 100.0
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({}% saving)",
            round_to_tenth(self.before),
            round_to_tenth(self.after),
            self.percent().trunc()
        )
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Outcome of unifying a selection of layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixReport {
    /// Segment count across the selection.
    pub segments: Reduction,
}

/// Outcome of reordering a selection of layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimiseReport {
    /// Ideal travel distance across the selection.
    pub distance: Reduction,
}
