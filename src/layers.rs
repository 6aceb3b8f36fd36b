use indexmap::IndexMap;

use crate::config::{EngraveParams, LaserSpeeds, TabParams, UnifyParams};
use crate::error::{LayerError, Result};
use crate::geometry::{Path, Segment};
use crate::operations::{
    collate, estimated_engrave_time, estimated_time_from, ideal_travel_distance, optimise,
    EngraveTime, InsertTabs, UnifyVertices, HOME,
};
use crate::report::{FixReport, OptimiseReport, Reduction};

/// Segment lists keyed by layer name, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Layers {
    entries: IndexMap<String, Vec<Segment>>,
}

impl Layers {
    /// Creates an empty layer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a layer, replacing an existing one of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, segments: Vec<Segment>) {
        self.entries.insert(name.into(), segments);
    }

    /// Returns the segments of a layer.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[Segment]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Removes a layer, returning its segments. Later layers keep their order.
    pub fn remove(&mut self, name: &str) -> Option<Vec<Segment>> {
        self.entries.shift_remove(name)
    }

    /// Returns the layer names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(name, segments)` in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Segment])> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s.as_slice()))
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of segments across all layers.
    #[must_use]
    pub fn total_segments(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Unifies endpoints on every selected layer.
    ///
    /// # Errors
    ///
    /// Returns a [`LayerError`] if there are no layers, the selection is empty,
    /// or a selected name is unknown. Nothing is modified on error.
    pub fn autofix(&mut self, selection: &[&str], params: &UnifyParams) -> Result<FixReport> {
        let indices = self.select(selection)?;
        let before = self.count(&indices);
        for &i in &indices {
            let fixed = UnifyVertices::new(&self.entries[i], *params).execute();
            self.entries[i] = fixed;
        }
        let report = FixReport {
            segments: Reduction::from_counts(before, self.count(&indices)),
        };
        tracing::info!(layers = indices.len(), result = %report.segments, "fixed layers");
        Ok(report)
    }

    /// Reorders segments on every selected layer to reduce travel.
    ///
    /// # Errors
    ///
    /// Returns a [`LayerError`] if there are no layers, the selection is empty,
    /// or a selected name is unknown. Nothing is modified on error.
    pub fn optimise(&mut self, selection: &[&str]) -> Result<OptimiseReport> {
        let indices = self.select(selection)?;
        let before = self.distance(&indices);
        for &i in &indices {
            let ordered = optimise(&self.entries[i]);
            self.entries[i] = ordered;
        }
        let report = OptimiseReport {
            distance: Reduction::new(before, self.distance(&indices)),
        };
        tracing::info!(layers = indices.len(), result = %report.distance, "optimised layers");
        Ok(report)
    }

    /// Splits every selected layer into one layer per connected path.
    ///
    /// Each selected layer is taken out and its paths are appended at the
    /// end: a single path under the original name, several paths as
    /// `"<name> 1"`, `"<name> 2"` and so on. A layer with no segments is
    /// removed. Returns the names of the created layers in order.
    ///
    /// # Errors
    ///
    /// Returns a [`LayerError`] if there are no layers, the selection is empty,
    /// or a selected name is unknown. Nothing is modified on error.
    pub fn explode(&mut self, selection: &[&str]) -> Result<Vec<String>> {
        let names: Vec<String> = self
            .select(selection)?
            .into_iter()
            .filter_map(|i| self.entries.get_index(i).map(|(n, _)| n.clone()))
            .collect();

        let mut created = Vec::new();
        for name in names {
            let Some(segments) = self.entries.shift_remove(&name) else {
                continue;
            };
            let paths = collate(&segments);
            if paths.len() == 1 {
                let segments = paths.into_iter().flat_map(Path::into_segments).collect();
                self.entries.insert(name.clone(), segments);
                created.push(name);
                continue;
            }
            for (n, path) in paths.into_iter().enumerate() {
                let new_name = format!("{name} {}", n + 1);
                self.entries.insert(new_name.clone(), path.into_segments());
                created.push(new_name);
            }
        }
        tracing::info!(created = created.len(), "exploded layers");
        Ok(created)
    }

    /// Inserts tabs into every segment of the selected layers.
    ///
    /// Each segment starts with a fresh tab budget. Returns the number of
    /// segments across the selection afterwards.
    ///
    /// # Errors
    ///
    /// Returns a [`LayerError`] if there are no layers, the selection is empty,
    /// or a selected name is unknown. Nothing is modified on error.
    pub fn add_tabs(&mut self, selection: &[&str], params: &TabParams) -> Result<usize> {
        let indices = self.select(selection)?;
        for &i in &indices {
            let tabbed: Vec<Segment> = self.entries[i]
                .iter()
                .flat_map(|s| InsertTabs::new(*s, *params).execute().1)
                .collect();
            self.entries[i] = tabbed;
        }
        let total = self.count(&indices);
        tracing::info!(layers = indices.len(), segments = total, "added tabs");
        Ok(total)
    }

    /// Estimated cutting time in seconds for the selected layers.
    ///
    /// Each layer is timed from [`HOME`] and the results are summed.
    ///
    /// # Errors
    ///
    /// Returns a [`LayerError`] if there are no layers, the selection is empty,
    /// or a selected name is unknown.
    pub fn estimate(&self, selection: &[&str], speeds: &LaserSpeeds) -> Result<f64> {
        let indices = self.select(selection)?;
        Ok(indices
            .iter()
            .map(|&i| estimated_time_from(&self.entries[i], speeds, &HOME))
            .sum())
    }

    /// Estimated engraving time for the closed shapes of the selected layers.
    ///
    /// The selected layers are filled together as one drawing.
    ///
    /// # Errors
    ///
    /// Returns a [`LayerError`] if there are no layers, the selection is empty,
    /// or a selected name is unknown.
    pub fn estimate_engraving(
        &self,
        selection: &[&str],
        params: &EngraveParams,
    ) -> Result<EngraveTime> {
        let indices = self.select(selection)?;
        let segments: Vec<Segment> = indices
            .iter()
            .flat_map(|&i| self.entries[i].iter().copied())
            .collect();
        let time = estimated_engrave_time(&segments, params);
        tracing::info!(
            layers = indices.len(),
            seconds = time.total(),
            idle = time.idle,
            "estimated engraving"
        );
        Ok(time)
    }

    fn select(&self, selection: &[&str]) -> Result<Vec<usize>> {
        if self.entries.is_empty() {
            return Err(LayerError::Empty.into());
        }
        if selection.is_empty() {
            return Err(LayerError::NoSelection.into());
        }
        let mut indices = Vec::with_capacity(selection.len());
        for &name in selection {
            let index = self
                .entries
                .get_index_of(name)
                .ok_or_else(|| LayerError::NotFound(name.to_owned()))?;
            if !indices.contains(&index) {
                indices.push(index);
            }
        }
        Ok(indices)
    }

    fn count(&self, indices: &[usize]) -> usize {
        indices.iter().map(|&i| self.entries[i].len()).sum()
    }

    fn distance(&self, indices: &[usize]) -> f64 {
        indices
            .iter()
            .map(|&i| ideal_travel_distance(&self.entries[i]))
            .sum()
    }
}
