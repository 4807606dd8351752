//! Density ordering of 7-dimensional points.
//!
//! `optics-kd` computes the OPTICS ordering of a point collection in a fixed
//! 7-dimensional feature space and cuts it into flat clusters. Neighborhoods
//! come from a linear scan or from a static k-d tree built once per run.
//!
//! The public API:
//! - [`Point`], [`euclidean_distance`]: the data model
//! - [`KdTree`]: static index with exact-match and radius queries
//! - [`cluster`]: the OPTICS engine, neighbor queries and extractors
//! - [`data`]: loading points from comma-separated text

#![forbid(unsafe_code)]

pub mod cluster;
pub mod data;
pub mod error;
pub mod kdtree;
pub mod point;

pub use cluster::{
    extract_clusters, extract_contiguous_clusters, Cluster, Clustering, LinearScan,
    NeighborSearch, Optics, OrderedPoint, RadiusSearch, RegionQuery,
};
pub use error::{Error, Result};
pub use kdtree::KdTree;
pub use point::{euclidean_distance, Point, DIM, UNASSIGNED};
