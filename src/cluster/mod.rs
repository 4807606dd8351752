//! Density-based ordering and clustering of 7-dimensional points.
//!
//! ## OPTICS
//!
//! OPTICS walks the points in an order driven by density: starting from an
//! unprocessed point, it always continues with the closest reachable point
//! that has not been emitted yet. The output is an ordering in which every
//! point carries a *reachability distance*; valleys in the reachability plot
//! are clusters.
//!
//! ```text
//! reach
//!   ∞ |#           #
//!     |#           #
//!     |#           #
//!   1 |####        ##
//!     +-----------------> ordering
//!       cluster A   cluster B
//! ```
//!
//! ## Neighbor queries
//!
//! The engine asks a [`RegionQuery`] for eps-neighborhoods. [`LinearScan`] is
//! exact and O(n) per query. The k-d tree paths trade that for index lookups:
//! [`RadiusSearch`] is exact, while the tree's own subtree query only looks
//! below the node holding the query point and can miss neighbors.
//!
//! ## Extraction
//!
//! [`extract_clusters`] and [`extract_contiguous_clusters`] turn an ordering
//! into a flat partition at a reachability threshold.
//!
//! ## Usage
//!
//! ```rust
//! use optics_kd::cluster::{extract_contiguous_clusters, NeighborSearch, Optics};
//! use optics_kd::Point;
//!
//! let mut points: Vec<Point> = [0.0, 1.0, 2.0, 10.0, 11.0]
//!     .iter()
//!     .map(|&x| Point::new([x, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]))
//!     .collect();
//!
//! let optics = Optics::new(1.5, 2).with_neighbor_search(NeighborSearch::KdTreeRadius);
//! let ordering = optics.order(&mut points);
//! assert_eq!(ordering.len(), points.len());
//!
//! let clusters = extract_contiguous_clusters(&mut points, &ordering, optics.eps());
//! assert_eq!(clusters.len(), 2);
//! assert_eq!(points[0].cluster_id, points[2].cluster_id);
//! assert_ne!(points[0].cluster_id, points[3].cluster_id);
//! ```

mod extract;
mod neighbors;
mod optics;
mod traits;

pub use extract::{extract_clusters, extract_contiguous_clusters, Cluster};
pub use neighbors::{neighbors_linear, LinearScan, RadiusSearch, RegionQuery};
pub use optics::{NeighborSearch, Optics, OrderedPoint};
pub use traits::Clustering;
