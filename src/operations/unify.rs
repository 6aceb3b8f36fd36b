use std::collections::HashSet;

use crate::config::{UnifyParams, VertexMerge};
use crate::geometry::Segment;
use crate::math::Point2;

/// Merges near-coincident segment endpoints into shared vertices and removes
/// duplicate and degenerate edges.
///
/// Endpoints are assigned to the first existing vertex cluster that has any
/// member closer than `epsilon`, scanning clusters in creation order. This is
/// not a nearest-cluster search, so results depend on input order.
///
/// Running the operation on its own output is a no-op only while every pair
/// of output vertices is at least `epsilon` apart. Midpoint folding can pull
/// a vertex to within `epsilon` of another it never absorbed, and a second
/// pass then merges the two.
#[derive(Debug)]
pub struct UnifyVertices<'a> {
    segments: &'a [Segment],
    params: UnifyParams,
}

impl<'a> UnifyVertices<'a> {
    /// Creates a new unification operation.
    #[must_use]
    pub fn new(segments: &'a [Segment], params: UnifyParams) -> Self {
        Self { segments, params }
    }

    /// Executes the unification.
    ///
    /// Each surviving edge keeps the direction of its first occurrence, and
    /// edges are emitted in first-occurrence order.
    #[must_use]
    pub fn execute(&self) -> Vec<Segment> {
        let epsilon = self.params.epsilon();
        let mut clusters: Vec<Cluster> = Vec::new();
        let mut seen: HashSet<(usize, usize)> = HashSet::new();
        let mut edges: Vec<(usize, usize)> = Vec::new();
        let mut degenerate = 0_usize;
        let mut duplicates = 0_usize;

        for segment in self.segments {
            // Both ends are resolved before either joins a cluster.
            let start_match = find_cluster(&clusters, &segment.start(), epsilon);
            let end_match = find_cluster(&clusters, &segment.end(), epsilon);
            let start = attach(&mut clusters, start_match, segment.start());
            let end = attach(&mut clusters, end_match, segment.end());

            if start == end {
                degenerate += 1;
                continue;
            }
            if seen.insert((start.min(end), start.max(end))) {
                edges.push((start, end));
            } else {
                duplicates += 1;
            }
        }

        let positions: Vec<Point2> = clusters
            .iter()
            .map(|c| c.representative(self.params.merge()))
            .collect();

        let mut collapsed = 0_usize;
        let mut out = Vec::with_capacity(edges.len());
        for (start, end) in edges {
            let a = positions[start];
            let b = positions[end];
            if nalgebra::distance(&a, &b) < epsilon {
                collapsed += 1;
                continue;
            }
            out.push(Segment::new(a, b));
        }

        tracing::debug!(
            input = self.segments.len(),
            vertices = clusters.len(),
            degenerate,
            duplicates,
            collapsed,
            output = out.len(),
            "unified segment endpoints"
        );
        out
    }
}

/// Unifies segment endpoints closer than `epsilon` using midpoint folding.
///
/// A non-positive or non-finite `epsilon` falls back to
/// [`DEFAULT_EPSILON`](crate::config::DEFAULT_EPSILON).
#[must_use]
pub fn unify(segments: &[Segment], epsilon: f64) -> Vec<Segment> {
    let params = match UnifyParams::new(epsilon, VertexMerge::MidpointFold) {
        Ok(params) => params,
        Err(err) => {
            tracing::warn!(%err, "invalid unify tolerance, using default");
            UnifyParams::default()
        }
    };
    UnifyVertices::new(segments, params).execute()
}

/// Raw points believed to be the same logical vertex, in insertion order.
#[derive(Debug)]
struct Cluster {
    members: Vec<Point2>,
}

impl Cluster {
    fn near(&self, point: &Point2, epsilon: f64) -> bool {
        self.members
            .iter()
            .any(|m| nalgebra::distance(m, point) < epsilon)
    }

    fn push(&mut self, point: Point2) {
        if !self.members.contains(&point) {
            self.members.push(point);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn representative(&self, merge: VertexMerge) -> Point2 {
        let Some((first, rest)) = self.members.split_first() else {
            return Point2::origin();
        };
        match merge {
            VertexMerge::MidpointFold => rest
                .iter()
                .fold(*first, |acc, p| nalgebra::center(&acc, p)),
            VertexMerge::Centroid => {
                let sum = rest.iter().fold(first.coords, |acc, p| acc + p.coords);
                Point2::from(sum / self.members.len() as f64)
            }
        }
    }
}

fn find_cluster(clusters: &[Cluster], point: &Point2, epsilon: f64) -> Option<usize> {
    clusters.iter().position(|c| c.near(point, epsilon))
}

fn attach(clusters: &mut Vec<Cluster>, found: Option<usize>, point: Point2) -> usize {
    if let Some(index) = found {
        clusters[index].push(point);
        index
    } else {
        clusters.push(Cluster {
            members: vec![point],
        });
        clusters.len() - 1
    }
}
