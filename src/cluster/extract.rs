//! Flat cluster extraction from an OPTICS ordering.
//!
//! Two cuts of the reachability plot at a threshold `eps` are provided:
//!
//! - [`extract_clusters`]: each still-unassigned point in the ordering opens a
//!   cluster that absorbs *every* unassigned point of the whole ordering with
//!   reachability `<= eps`. Low-reachability points far apart in the ordering
//!   end up together, all in the first cluster opened.
//! - [`extract_contiguous_clusters`]: a point with reachability `> eps` opens a
//!   cluster and the run that follows it joins. This is the valley cut of the
//!   reachability plot.
//!
//! Neither performs hierarchical (xi) extraction and neither labels noise:
//! every point of the ordering ends in exactly one cluster.

use super::optics::OrderedPoint;
use crate::point::{Point, UNASSIGNED};

/// A cluster: its id and the positions of its members.
///
/// Membership is also recorded on each member's `cluster_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Cluster id, `0, 1, 2, ...` in the order clusters are opened.
    pub id: i64,
    /// Member positions, in assignment order.
    pub members: Vec<usize>,
}

impl Cluster {
    fn open(id: i64, first: usize) -> Self {
        Self {
            id,
            members: vec![first],
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

fn clear_assignments(points: &mut [Point], ordering: &[OrderedPoint]) {
    for o in ordering {
        points[o.index].cluster_id = UNASSIGNED;
    }
}

/// Partition the ordering by whole-sequence thresholding at `eps`.
///
/// Scans the ordering; for each unassigned point, opens a new cluster,
/// assigns the point, then scans the entire ordering and assigns every other
/// unassigned point whose reachability is `<= eps`.
pub fn extract_clusters(points: &mut [Point], ordering: &[OrderedPoint], eps: f64) -> Vec<Cluster> {
    clear_assignments(points, ordering);

    let mut clusters: Vec<Cluster> = Vec::new();
    let mut next_id: i64 = 0;
    for o in ordering {
        if points[o.index].is_assigned() {
            continue;
        }

        let id = next_id;
        next_id += 1;
        points[o.index].cluster_id = id;
        let mut cluster = Cluster::open(id, o.index);

        for q in ordering {
            let candidate = &mut points[q.index];
            if !candidate.is_assigned() && candidate.reachability_distance <= eps {
                candidate.cluster_id = id;
                cluster.members.push(q.index);
            }
        }

        clusters.push(cluster);
    }

    log::debug!(
        "extracted {} clusters from {} ordered points (eps={})",
        clusters.len(),
        ordering.len(),
        eps
    );

    clusters
}

/// Partition the ordering into contiguous runs cut at reachability `> eps`.
pub fn extract_contiguous_clusters(
    points: &mut [Point],
    ordering: &[OrderedPoint],
    eps: f64,
) -> Vec<Cluster> {
    clear_assignments(points, ordering);

    let mut clusters: Vec<Cluster> = Vec::new();
    let mut next_id: i64 = 0;
    for o in ordering {
        let point = &mut points[o.index];
        if point.is_assigned() {
            continue;
        }

        match clusters.last_mut() {
            Some(current) if point.reachability_distance <= eps => {
                point.cluster_id = current.id;
                current.members.push(o.index);
            }
            _ => {
                let id = next_id;
                next_id += 1;
                point.cluster_id = id;
                clusters.push(Cluster::open(id, o.index));
            }
        }
    }

    log::debug!(
        "extracted {} contiguous clusters from {} ordered points (eps={})",
        clusters.len(),
        ordering.len(),
        eps
    );

    clusters
}
