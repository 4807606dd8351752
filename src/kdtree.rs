//! Static 7-dimensional k-d tree.
//!
//! The tree is built once from a snapshot of a point collection and never
//! mutated afterwards. Nodes live in a flat arena and refer to their point by
//! its position in the snapshot, which is also its position in the caller's
//! slice, so query results can be used directly as handles into that slice.
//!
//! # Construction
//!
//! Depth `d` splits on axis `d % 7`. Each level sorts the current subset on
//! that axis and takes the element at `len / 2` as the node; the prefix before
//! it becomes the left subtree and the suffix after it the right subtree.
//! Construction uses an explicit work stack, so degenerate inputs cannot
//! exhaust the call stack.
//!
//! # Queries
//!
//! - [`KdTree::search`]: exact coordinate match.
//! - [`KdTree::neighbors_within`]: breadth-first expansion below the exact-match
//!   node only. This is *not* a complete radius query: points within `eps` that
//!   live in sibling or ancestor subtrees are never visited.
//! - [`KdTree::neighbors_within_radius`]: complete radius query over the whole
//!   tree, returning the same set as a linear scan.

use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};

use crate::point::{euclidean_distance, Point, DIM};

#[derive(Debug, Clone)]
struct Node {
    /// Position of the point in the snapshot.
    point: usize,
    left: Option<usize>,
    right: Option<usize>,
}

/// Where a freshly built node has to be linked in.
#[derive(Debug, Clone, Copy)]
enum Link {
    Root,
    Left(usize),
    Right(usize),
}

struct Frame {
    subset: Vec<usize>,
    link: Link,
    depth: usize,
}

/// A static k-d tree over 7-dimensional points.
#[derive(Debug, Clone, Default)]
pub struct KdTree {
    points: Vec<[f64; DIM]>,
    nodes: Vec<Node>,
    root: Option<usize>,
    depth: usize,
}

impl KdTree {
    /// Build a tree from the coordinates of `points`.
    ///
    /// Only the coordinates are captured; the run state of each point stays
    /// with the caller.
    pub fn build(points: &[Point]) -> Self {
        Self::from_coords(points.iter().map(|p| p.coords).collect())
    }

    /// Build a tree from raw coordinates. An empty input yields an empty tree.
    pub fn from_coords(points: Vec<[f64; DIM]>) -> Self {
        let n = points.len();
        let mut tree = Self {
            points,
            nodes: Vec::with_capacity(n),
            root: None,
            depth: 0,
        };
        if n == 0 {
            return tree;
        }

        let mut stack = vec![Frame {
            subset: (0..n).collect(),
            link: Link::Root,
            depth: 0,
        }];

        while let Some(Frame {
            mut subset,
            link,
            depth,
        }) = stack.pop()
        {
            let axis = depth % DIM;
            {
                let coords = &tree.points;
                subset.sort_by(|&a, &b| coords[a][axis].total_cmp(&coords[b][axis]));
            }

            // After `split_off`, `subset` holds the prefix plus the median.
            let median = subset.len() / 2;
            let right = subset.split_off(median + 1);
            let Some(point) = subset.pop() else {
                continue;
            };
            let left = subset;

            let id = tree.nodes.len();
            tree.nodes.push(Node {
                point,
                left: None,
                right: None,
            });
            match link {
                Link::Root => tree.root = Some(id),
                Link::Left(parent) => tree.nodes[parent].left = Some(id),
                Link::Right(parent) => tree.nodes[parent].right = Some(id),
            }
            tree.depth = tree.depth.max(depth + 1);

            // Push right first so the left subtree is built first.
            if !right.is_empty() {
                stack.push(Frame {
                    subset: right,
                    link: Link::Right(id),
                    depth: depth + 1,
                });
            }
            if !left.is_empty() {
                stack.push(Frame {
                    subset: left,
                    link: Link::Left(id),
                    depth: depth + 1,
                });
            }
        }

        log::debug!(
            "k-d tree built: {} nodes, depth {}",
            tree.nodes.len(),
            tree.depth
        );

        tree
    }

    /// Number of indexed points.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree indexes no points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels (0 for an empty tree, 1 for a single node).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The snapshot the tree was built from, in input order.
    pub fn points(&self) -> &[[f64; DIM]] {
        &self.points
    }

    /// Exact-match lookup.
    ///
    /// Returns the snapshot position of a point whose seven coordinates all
    /// equal `coords`, or `None`. This is not a nearest-neighbor search.
    pub fn search(&self, coords: &[f64; DIM]) -> Option<usize> {
        self.locate(coords).map(|id| self.nodes[id].point)
    }

    /// Arena id of the exact-match node.
    fn locate(&self, coords: &[f64; DIM]) -> Option<usize> {
        let mut stack: Vec<(usize, usize)> = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 0));
        }

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            let stored = &self.points[node.point];
            if stored == coords {
                return Some(id);
            }

            let axis = depth % DIM;
            let (query, split) = (coords[axis], stored[axis]);
            // Equal discriminants can sit on either side of a median split.
            let (go_left, go_right) = if query < split {
                (true, false)
            } else if query > split {
                (false, true)
            } else {
                (true, true)
            };
            if go_right {
                if let Some(child) = node.right {
                    stack.push((child, depth + 1));
                }
            }
            if go_left {
                if let Some(child) = node.left {
                    stack.push((child, depth + 1));
                }
            }
        }

        None
    }

    /// Points within `eps` of `coords`, found below the exact-match node.
    ///
    /// The traversal starts at the node returned by [`search`](Self::search),
    /// accepts a node when its distance to `coords` is `<= eps`, and only
    /// expands the children of accepted nodes. Returns an empty vector when
    /// `coords` is not indexed.
    pub fn neighbors_within(&self, coords: &[f64; DIM], eps: f64) -> Vec<usize> {
        let Some(start) = self.locate(coords) else {
            return Vec::new();
        };

        let mut neighbors = Vec::new();
        let mut visited: HashSet<usize> = HashSet::new();
        let mut frontier: VecDeque<usize> = VecDeque::new();
        frontier.push_back(start);

        while let Some(id) = frontier.pop_front() {
            let node = &self.nodes[id];
            if !visited.insert(node.point) {
                continue;
            }
            if euclidean_distance(&self.points[node.point], coords) <= eps {
                neighbors.push(node.point);
                frontier.extend(node.left);
                frontier.extend(node.right);
            }
        }

        neighbors
    }

    /// All points within `eps` of `coords`, searched over the whole tree.
    ///
    /// `coords` does not have to be indexed. The result holds the same
    /// positions a linear scan would return, in traversal order.
    pub fn neighbors_within_radius(&self, coords: &[f64; DIM], eps: f64) -> Vec<usize> {
        let mut neighbors = Vec::new();
        let mut stack: Vec<(usize, usize)> = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 0));
        }

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            let stored = &self.points[node.point];
            if euclidean_distance(stored, coords) <= eps {
                neighbors.push(node.point);
            }

            // Left holds values <= split, right holds values >= split. A NaN
            // split orders nothing, so only a definite comparison prunes.
            let axis = depth % DIM;
            let (query, split) = (coords[axis], stored[axis]);
            if (query + eps).partial_cmp(&split) != Some(Ordering::Less) {
                if let Some(child) = node.right {
                    stack.push((child, depth + 1));
                }
            }
            if (query - eps).partial_cmp(&split) != Some(Ordering::Greater) {
                if let Some(child) = node.left {
                    stack.push((child, depth + 1));
                }
            }
        }

        neighbors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_axis(x: f64) -> [f64; DIM] {
        let mut c = [0.0; DIM];
        c[0] = x;
        c
    }

    fn line() -> Vec<[f64; DIM]> {
        [0.0, 1.0, 2.0, 10.0, 11.0].iter().map(|&x| on_axis(x)).collect()
    }

    fn sorted(mut v: Vec<usize>) -> Vec<usize> {
        v.sort_unstable();
        v
    }

    #[test]
    fn test_empty_tree() {
        let tree = KdTree::from_coords(Vec::new());
        assert!(tree.is_empty());
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.search(&[0.0; DIM]), None);
        assert!(tree.neighbors_within(&[0.0; DIM], 1.0).is_empty());
        assert!(tree.neighbors_within_radius(&[0.0; DIM], 1.0).is_empty());
    }

    #[test]
    fn test_median_split_layout() {
        let tree = KdTree::from_coords(line());
        assert_eq!(tree.len(), 5);
        assert_eq!(tree.depth(), 3);

        // Root is the median on axis 0.
        let root = tree.root.unwrap();
        assert_eq!(tree.nodes[root].point, 2);
        let left = tree.nodes[root].left.unwrap();
        let right = tree.nodes[root].right.unwrap();
        assert_eq!(tree.nodes[left].point, 1);
        assert_eq!(tree.nodes[right].point, 4);
        assert_eq!(tree.nodes[tree.nodes[left].left.unwrap()].point, 0);
        assert_eq!(tree.nodes[tree.nodes[right].left.unwrap()].point, 3);
    }

    #[test]
    fn test_points_snapshot_keeps_input_order() {
        let coords = line();
        let tree = KdTree::from_coords(coords.clone());
        assert_eq!(tree.points(), coords.as_slice());
    }

    #[test]
    fn test_search_finds_every_point_with_tied_axes() {
        // Axes 1..7 are all zero, so every level past the root ties.
        let tree = KdTree::from_coords(line());
        for (i, c) in line().iter().enumerate() {
            assert_eq!(tree.search(c), Some(i));
        }
    }

    #[test]
    fn test_search_absent() {
        let tree = KdTree::from_coords(line());
        assert_eq!(tree.search(&on_axis(5.0)), None);

        let mut off = on_axis(1.0);
        off[6] = 1e-9;
        assert_eq!(tree.search(&off), None);
    }

    #[test]
    fn test_neighbors_within_is_limited_to_subtree() {
        let tree = KdTree::from_coords(line());

        // Point 0 is a leaf: its neighbor at x = 1 is its parent, never visited.
        assert_eq!(tree.neighbors_within(&on_axis(0.0), 1.5), vec![0]);

        // Point 1 sees its child but not the root at x = 2.
        assert_eq!(sorted(tree.neighbors_within(&on_axis(1.0), 1.5)), vec![0, 1]);

        // The root sees into both subtrees, stopping at rejected nodes.
        assert_eq!(sorted(tree.neighbors_within(&on_axis(2.0), 1.5)), vec![1, 2]);
    }

    #[test]
    fn test_neighbors_within_unknown_point_is_empty() {
        let tree = KdTree::from_coords(line());
        assert!(tree.neighbors_within(&on_axis(0.5), 100.0).is_empty());
    }

    #[test]
    fn test_neighbors_within_radius_is_complete() {
        let tree = KdTree::from_coords(line());
        assert_eq!(
            sorted(tree.neighbors_within_radius(&on_axis(0.0), 1.5)),
            vec![0, 1]
        );
        assert_eq!(
            sorted(tree.neighbors_within_radius(&on_axis(1.0), 1.5)),
            vec![0, 1, 2]
        );
        // Query points need not be indexed.
        assert_eq!(
            sorted(tree.neighbors_within_radius(&on_axis(10.5), 0.5)),
            vec![3, 4]
        );
        assert!(tree.neighbors_within_radius(&on_axis(5.0), 1.0).is_empty());
    }

    #[test]
    fn test_duplicates_are_all_indexed() {
        let coords = vec![[1.0; DIM]; 4];
        let tree = KdTree::from_coords(coords);
        assert_eq!(tree.len(), 4);
        assert!(tree.search(&[1.0; DIM]).is_some());
        assert_eq!(
            sorted(tree.neighbors_within_radius(&[1.0; DIM], 0.0)),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_nan_split_does_not_hide_neighbors() {
        let mut nan = [0.0; DIM];
        nan[0] = f64::NAN;
        // NaN sorts last, so it becomes the root with the origin on its left.
        let tree = KdTree::from_coords(vec![[0.0; DIM], nan]);
        assert_eq!(tree.nodes[tree.root.unwrap()].point, 1);

        assert_eq!(tree.neighbors_within_radius(&[0.0; DIM], 1.0), vec![0]);
        assert_eq!(tree.search(&[0.0; DIM]), Some(0));
        // A NaN coordinate never matches exactly and is never within eps.
        assert_eq!(tree.search(&nan), None);
        assert!(tree.neighbors_within_radius(&nan, 1.0).is_empty());
    }

    #[test]
    fn test_negative_nan_split_does_not_hide_neighbors() {
        let mut nan = [0.0; DIM];
        nan[0] = -f64::NAN;
        // -NaN sorts first, so the second one is the median with the origin
        // alone on its right.
        let tree = KdTree::from_coords(vec![nan, nan, [0.0; DIM]]);
        let root = tree.nodes[tree.root.unwrap()].point;
        assert!(tree.points()[root][0].is_nan());

        assert_eq!(tree.neighbors_within_radius(&[0.0; DIM], 1.0), vec![2]);
        assert_eq!(tree.search(&[0.0; DIM]), Some(2));
    }

    #[test]
    fn test_large_degenerate_input_builds_iteratively() {
        let coords: Vec<[f64; DIM]> = (0..20_000).map(|i| on_axis(i as f64)).collect();
        let tree = KdTree::from_coords(coords);
        assert_eq!(tree.len(), 20_000);
        // Balanced: ceil(log2(20_001)) levels.
        assert_eq!(tree.depth(), 15);
        assert_eq!(tree.search(&on_axis(12_345.0)), Some(12_345));
    }

    #[test]
    fn test_build_from_points_ignores_run_state() {
        let mut points: Vec<Point> = line().into_iter().map(Point::new).collect();
        points[3].processed = true;
        points[3].reachability_distance = 0.1;
        let tree = KdTree::build(&points);
        assert_eq!(tree.search(&points[3].coords), Some(3));
    }
}
