use crate::error::Result;
use crate::point::DIM;

/// Common interface for hard clustering algorithms (one label per point).
pub trait Clustering {
    /// Fit the model (if needed) and return one cluster label per input point.
    fn fit_predict(&self, data: &[[f64; DIM]]) -> Result<Vec<usize>>;

    /// The configured number of clusters (if applicable).
    ///
    /// For algorithms that discover the number of clusters dynamically (e.g. OPTICS),
    /// this returns 0.
    fn n_clusters(&self) -> usize;
}
