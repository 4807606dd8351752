//! OPTICS: Ordering Points To Identify the Clustering Structure.
//!
//! # The Algorithm (Ankerst et al., 1999)
//!
//! OPTICS generalizes DBSCAN: instead of committing to one density threshold it
//! produces an *ordering* of the points in which density-connected points sit
//! next to each other, annotated with the reachability distance at which each
//! point was reached. Flat clusterings for any radius up to `eps` can then be
//! read off the ordering (see [`extract_clusters`](super::extract_clusters)).
//!
//! ## Core Concepts
//!
//! - **Core distance** of `p`: distance to its `min_pts`-th nearest neighbor
//!   within `eps` (the point itself counts as its own nearest neighbor);
//!   `+inf` when fewer than `min_pts` neighbors exist.
//! - **Reachability distance** of `q` from core point `p`:
//!   `max(core_distance(p), dist(p, q))`. Each point keeps the smallest value
//!   seen from any processed core point.
//! - **Seed list**: unprocessed points reached so far, always consumed in
//!   ascending reachability order.
//!
//! ## Algorithm Steps
//!
//! 1. For each unprocessed point `p` in input order: query its neighbors, mark
//!    it processed, append it to the ordering.
//! 2. If `p` has at least `min_pts` neighbors, relax the reachability of its
//!    unprocessed neighbors into the seed list.
//! 3. Drain the seed list, smallest reachability first, treating each popped
//!    point like `p` in steps 1 and 2.
//!
//! ## Degenerate Parameters
//!
//! `min_pts == 0` leaves the core distance undefined; it is treated as `+inf`
//! so no reachability is ever lowered. `eps <= 0` shrinks neighborhoods to
//! exact duplicates. Neither is an error: every point becomes its own region.
//!
//! ## References
//!
//! Ankerst, Breunig, Kriegel, Sander (1999). "OPTICS: Ordering Points To
//! Identify the Clustering Structure." SIGMOD '99.

use std::collections::VecDeque;

use super::extract::{extract_clusters, Cluster};
use super::neighbors::{LinearScan, RadiusSearch, RegionQuery};
use super::traits::Clustering;
use crate::error::{Error, Result};
use crate::kdtree::KdTree;
use crate::point::{euclidean_distance, Point, DIM};

/// Which neighbor query the engine uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NeighborSearch {
    /// Brute-force scan over all points.
    #[default]
    Linear,
    /// k-d tree, expanding only below the exact-match node. Faster, but may
    /// miss neighbors in sibling and ancestor subtrees.
    KdTree,
    /// k-d tree, complete radius search. Same neighborhoods as `Linear`.
    KdTreeRadius,
}

/// One entry of an OPTICS ordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderedPoint {
    /// Position of the point in the input slice.
    pub index: usize,
    /// Reachability distance when the point was emitted (`+inf` for a point
    /// that starts a new region).
    pub reachability_distance: f64,
    /// Core distance of the point (`+inf` when it is not a core point).
    pub core_distance: f64,
}

/// OPTICS ordering configuration.
#[derive(Debug, Clone)]
pub struct Optics {
    /// Neighborhood radius.
    eps: f64,
    /// Minimum neighbor count (including the point itself) for a core point.
    min_pts: usize,
    search: NeighborSearch,
}

impl Optics {
    /// Create a new OPTICS configuration.
    ///
    /// # Arguments
    ///
    /// * `eps` - Neighborhood radius; also the default extraction threshold.
    /// * `min_pts` - Neighbors within `eps` (the point included) needed for a
    ///   point to be core.
    pub fn new(eps: f64, min_pts: usize) -> Self {
        Self {
            eps,
            min_pts,
            search: NeighborSearch::Linear,
        }
    }

    /// Set the neighborhood radius.
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Set the minimum neighbor count for core points.
    pub fn with_min_pts(mut self, min_pts: usize) -> Self {
        self.min_pts = min_pts;
        self
    }

    /// Select the neighbor query.
    pub fn with_neighbor_search(mut self, search: NeighborSearch) -> Self {
        self.search = search;
        self
    }

    /// Neighborhood radius.
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Minimum neighbor count for core points.
    pub fn min_pts(&self) -> usize {
        self.min_pts
    }

    /// Selected neighbor query.
    pub fn neighbor_search(&self) -> NeighborSearch {
        self.search
    }

    /// Compute the OPTICS ordering of `points`.
    ///
    /// Resets the run state of every point first, then leaves each point
    /// `processed` with its final reachability distance. The result holds
    /// every position exactly once.
    pub fn order(&self, points: &mut [Point]) -> Vec<OrderedPoint> {
        match self.search {
            NeighborSearch::Linear => self.order_with(points, &LinearScan),
            NeighborSearch::KdTree => {
                let tree = KdTree::build(points);
                self.order_with(points, &tree)
            }
            NeighborSearch::KdTreeRadius => {
                let tree = KdTree::build(points);
                self.order_with(points, &RadiusSearch(&tree))
            }
        }
    }

    /// Compute the OPTICS ordering with a caller-supplied neighbor query.
    pub fn order_with<Q>(&self, points: &mut [Point], query: &Q) -> Vec<OrderedPoint>
    where
        Q: RegionQuery + ?Sized,
    {
        for p in points.iter_mut() {
            p.reset();
        }

        let mut ordering = Vec::with_capacity(points.len());
        let mut seeds = SeedList::default();

        for idx in 0..points.len() {
            if points[idx].processed {
                continue;
            }
            self.expand(points, idx, query, &mut seeds, &mut ordering);

            while let Some(next) = seeds.pop_nearest() {
                if points[next].processed {
                    continue;
                }
                self.expand(points, next, query, &mut seeds, &mut ordering);
            }
        }

        log::debug!(
            "OPTICS ordering complete: {} points, {} core, eps={}, min_pts={}",
            ordering.len(),
            ordering.iter().filter(|o| o.core_distance.is_finite()).count(),
            self.eps,
            self.min_pts
        );

        ordering
    }

    /// Order `points`, then partition them with [`extract_clusters`] at `eps`.
    pub fn cluster(&self, points: &mut [Point]) -> Vec<Cluster> {
        let ordering = self.order(points);
        extract_clusters(points, &ordering, self.eps)
    }

    /// Reject configurations that cannot produce a meaningful ordering.
    pub fn validate(&self) -> Result<()> {
        if self.eps.is_nan() {
            return Err(Error::InvalidParameter {
                name: "eps",
                message: "must not be NaN",
            });
        }
        Ok(())
    }

    /// Process one point: emit it, and relax its neighbors if it is core.
    fn expand<Q>(
        &self,
        points: &mut [Point],
        idx: usize,
        query: &Q,
        seeds: &mut SeedList,
        ordering: &mut Vec<OrderedPoint>,
    ) where
        Q: RegionQuery + ?Sized,
    {
        let neighbors = query.region_query(points, idx, self.eps);
        points[idx].processed = true;

        let core_distance = if neighbors.len() >= self.min_pts {
            update(points, idx, &neighbors, self.min_pts, seeds)
        } else {
            f64::INFINITY
        };

        ordering.push(OrderedPoint {
            index: idx,
            reachability_distance: points[idx].reachability_distance,
            core_distance,
        });
    }
}

impl Default for Optics {
    fn default() -> Self {
        Self::new(0.2, 40)
    }
}

impl Clustering for Optics {
    fn fit_predict(&self, data: &[[f64; DIM]]) -> Result<Vec<usize>> {
        self.validate()?;

        let mut points: Vec<Point> = data.iter().copied().map(Point::new).collect();
        self.cluster(&mut points);

        points
            .iter()
            .map(|p| {
                usize::try_from(p.cluster_id)
                    .map_err(|_| Error::Other(format!("unassigned point (id {})", p.cluster_id)))
            })
            .collect()
    }

    /// OPTICS discovers clusters dynamically, so this returns 0.
    fn n_clusters(&self) -> usize {
        0
    }
}

/// Core distance from neighbors sorted by ascending distance.
fn core_distance(sorted: &[(usize, f64)], min_pts: usize) -> f64 {
    match min_pts.checked_sub(1).and_then(|k| sorted.get(k)) {
        Some(&(_, d)) => d,
        None => f64::INFINITY,
    }
}

/// Relax the reachability of `center`'s unprocessed neighbors.
///
/// Returns the core distance of `center`. A neighbor's reachability only ever
/// decreases; every decrease moves it to its sorted position in `seeds`.
fn update(
    points: &mut [Point],
    center: usize,
    neighbors: &[usize],
    min_pts: usize,
    seeds: &mut SeedList,
) -> f64 {
    let origin = points[center].coords;
    let mut by_distance: Vec<(usize, f64)> = neighbors
        .iter()
        .map(|&n| (n, euclidean_distance(&origin, &points[n].coords)))
        .collect();
    // Position breaks distance ties so the order is independent of the query.
    by_distance.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    let core = core_distance(&by_distance, min_pts);

    for (n, dist) in by_distance {
        let neighbor = &mut points[n];
        if neighbor.processed {
            continue;
        }
        let candidate = core.max(dist);
        if candidate < neighbor.reachability_distance {
            log::trace!(
                "reachability of {} lowered to {} from {}",
                n,
                candidate,
                center
            );
            neighbor.reachability_distance = candidate;
            seeds.upsert(n, candidate);
        }
    }

    core
}

#[derive(Debug, Clone, Copy)]
struct Seed {
    index: usize,
    reachability: f64,
}

/// Unprocessed candidates kept sorted by ascending reachability.
///
/// Equal reachabilities keep insertion order.
#[derive(Debug, Default)]
struct SeedList {
    entries: VecDeque<Seed>,
}

impl SeedList {
    /// Insert `index`, or move it if already present.
    fn upsert(&mut self, index: usize, reachability: f64) {
        if let Some(pos) = self.entries.iter().position(|s| s.index == index) {
            self.entries.remove(pos);
        }
        let at = self
            .entries
            .partition_point(|s| s.reachability <= reachability);
        self.entries.insert(at, Seed { index, reachability });
    }

    /// Remove and return the seed with the smallest reachability.
    fn pop_nearest(&mut self) -> Option<usize> {
        self.entries.pop_front().map(|s| s.index)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}
