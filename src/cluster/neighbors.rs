//! Neighborhood queries used by the OPTICS engine.
//!
//! A query answers "which points lie within `eps` of point `i`?" and returns
//! positions into the same slice. Three sources are provided:
//!
//! - [`LinearScan`]: brute force, O(n) per query, the reference behavior.
//! - [`KdTree`]: the tree's subtree-limited [`KdTree::neighbors_within`].
//! - [`RadiusSearch`]: the tree's complete [`KdTree::neighbors_within_radius`].

use crate::kdtree::KdTree;
use crate::point::{euclidean_distance, Point, DIM};

/// Source of eps-neighborhoods.
pub trait RegionQuery {
    /// Positions of the points within `eps` of `points[idx]`.
    ///
    /// Whether `idx` itself is part of the result is up to the source; all
    /// sources in this crate include it unless one of its coordinates is NaN.
    fn region_query(&self, points: &[Point], idx: usize, eps: f64) -> Vec<usize>;
}

/// Every point within `eps` of `coords`, by linear scan. Includes `coords`
/// itself when it is present in `points`.
pub fn neighbors_linear(points: &[Point], coords: &[f64; DIM], eps: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, other)| euclidean_distance(coords, &other.coords) <= eps)
        .map(|(idx, _)| idx)
        .collect()
}

/// Brute-force neighborhood query.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScan;

impl RegionQuery for LinearScan {
    fn region_query(&self, points: &[Point], idx: usize, eps: f64) -> Vec<usize> {
        neighbors_linear(points, &points[idx].coords, eps)
    }
}

/// Subtree-limited query. The tree must have been built from `points`.
impl RegionQuery for KdTree {
    fn region_query(&self, points: &[Point], idx: usize, eps: f64) -> Vec<usize> {
        self.neighbors_within(&points[idx].coords, eps)
    }
}

/// Complete radius query over a [`KdTree`] built from the same points.
#[derive(Debug, Clone, Copy)]
pub struct RadiusSearch<'a>(pub &'a KdTree);

impl RegionQuery for RadiusSearch<'_> {
    fn region_query(&self, points: &[Point], idx: usize, eps: f64) -> Vec<usize> {
        self.0.neighbors_within_radius(&points[idx].coords, eps)
    }
}
