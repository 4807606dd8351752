//! OPTICS ordering and both extraction cuts on a small 7D dataset.

use optics_kd::cluster::{extract_clusters, extract_contiguous_clusters};
use optics_kd::{NeighborSearch, Optics, Point};

fn main() {
    // Three groups, separated on the first two axes.
    let mut points: Vec<Point> = [
        // Group A (near origin)
        [0.0, 0.0],
        [0.1, 0.2],
        [0.2, 0.1],
        [-0.1, 0.1],
        // Group B (near (5, 5))
        [5.0, 5.0],
        [5.1, 4.9],
        [4.9, 5.1],
        [5.2, 5.2],
        // Group C (near (10, 0))
        [10.0, 0.0],
        [10.1, 0.1],
        [9.9, -0.1],
        [10.2, 0.2],
    ]
    .iter()
    .map(|&[x, y]| Point::new([x, y, 0.0, 0.0, 0.0, 0.0, 0.0]))
    .collect();

    let optics = Optics::new(1.0, 2).with_neighbor_search(NeighborSearch::KdTreeRadius);
    let ordering = optics.order(&mut points);

    println!("=== OPTICS ordering (eps=1.0, min_pts=2) ===");
    for o in &ordering {
        let p = &points[o.index];
        println!(
            "  point {:2} ({:5.1}, {:5.1})  reach {:>6.3}  core {:>6.3}",
            o.index, p.coords[0], p.coords[1], o.reachability_distance, o.core_distance
        );
    }

    let clusters = extract_contiguous_clusters(&mut points, &ordering, optics.eps());
    println!("\n=== Contiguous extraction ===");
    for c in &clusters {
        println!("  cluster {} => {:?}", c.id, c.members);
    }

    let clusters = extract_clusters(&mut points, &ordering, optics.eps());
    println!("\n=== Whole-sequence extraction ===");
    for c in &clusters {
        println!("  cluster {} => {:?}", c.id, c.members);
    }
}
