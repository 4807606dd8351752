//! Points in the fixed 7-dimensional feature space.

/// Number of coordinates per point.
pub const DIM: usize = 7;

/// `cluster_id` of a point no extraction pass has assigned yet.
pub const UNASSIGNED: i64 = -1;

/// A point: immutable coordinates plus the state one OPTICS run mutates.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Coordinates, axes `0..DIM`.
    pub coords: [f64; DIM],
    /// Smallest reachability distance found so far; `+inf` until reached.
    pub reachability_distance: f64,
    /// Set once the point has been emitted into an ordering.
    pub processed: bool,
    /// Cluster label, [`UNASSIGNED`] until an extractor sets it.
    pub cluster_id: i64,
}

impl Point {
    /// Create an unprocessed, unassigned point.
    pub fn new(coords: [f64; DIM]) -> Self {
        Self {
            coords,
            reachability_distance: f64::INFINITY,
            processed: false,
            cluster_id: UNASSIGNED,
        }
    }

    /// Return the run state to its initial values.
    pub fn reset(&mut self) {
        self.reachability_distance = f64::INFINITY;
        self.processed = false;
        self.cluster_id = UNASSIGNED;
    }

    /// Whether an extractor has placed this point in a cluster.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.cluster_id != UNASSIGNED
    }
}

impl From<[f64; DIM]> for Point {
    fn from(coords: [f64; DIM]) -> Self {
        Self::new(coords)
    }
}

/// Euclidean distance over all seven coordinates.
#[inline]
pub fn euclidean_distance(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}
