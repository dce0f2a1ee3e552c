use crate::heap::{BoundedMaxHeap, HeapEntry};
use crate::node::Point;

struct KdNode {
    point: Point,
    left: Option<Box<KdNode>>,
    right: Option<Box<KdNode>>,
}

/// Static 2-d tree over the input points, split axis alternating with
/// depth. Built once per run and only queried afterwards.
///
/// Median splits keep the depth logarithmic for spread-out inputs;
/// heavy coordinate duplication can still skew it.
pub struct KdTree {
    root: Option<Box<KdNode>>,
    len: usize,
}

impl KdTree {
    pub fn build(points: &[Point]) -> Self {
        let mut scratch = points.to_vec();
        let len = scratch.len();
        let root = build_node(&mut scratch, 0);
        Self { root, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Ids of up to `k` points nearest to `target`, unordered. The
    /// target itself is returned too when it is part of the indexed
    /// set; callers wanting proper neighbors ask for one extra and
    /// drop it.
    pub fn k_nearest(&self, target: &Point, k: usize) -> Vec<usize> {
        let mut nearest = BoundedMaxHeap::new(k);
        search(self.root.as_deref(), target, 0, &mut nearest);
        nearest.into_entries().into_iter().map(|e| e.id).collect()
    }
}

fn axis_coord(point: &Point, axis: usize) -> f64 {
    if axis == 0 { point.x } else { point.y }
}

fn build_node(points: &mut [Point], depth: usize) -> Option<Box<KdNode>> {
    if points.is_empty() {
        return None;
    }
    let axis = depth % 2;
    points.sort_unstable_by(|a, b| axis_coord(a, axis).total_cmp(&axis_coord(b, axis)));

    let median = points.len() / 2;
    let (lower, rest) = points.split_at_mut(median);
    let (mid, upper) = rest.split_at_mut(1);

    Some(Box::new(KdNode {
        point: mid[0],
        left: build_node(lower, depth + 1),
        right: build_node(upper, depth + 1),
    }))
}

fn search(node: Option<&KdNode>, target: &Point, depth: usize, nearest: &mut BoundedMaxHeap) {
    let Some(node) = node else {
        return;
    };
    nearest.insert(HeapEntry::new(target.dist(&node.point), node.point.id));

    let axis = depth % 2;
    let target_axis = axis_coord(target, axis);
    let node_axis = axis_coord(&node.point, axis);

    let (near, far) = if target_axis < node_axis {
        (node.left.as_deref(), node.right.as_deref())
    } else {
        (node.right.as_deref(), node.left.as_deref())
    };

    search(near, target, depth + 1, nearest);

    // The far side can only matter while the heap is short of k or the
    // splitting plane is closer than the worst retained neighbor.
    let explore_far = !nearest.is_full()
        || nearest
            .max_key()
            .is_some_and(|worst| (target_axis - node_axis).abs() < worst);
    if explore_far {
        search(far, target, depth + 1, nearest);
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use super::KdTree;
    use crate::node::Point;

    fn sorted(mut ids: Vec<usize>) -> Vec<usize> {
        ids.sort_unstable();
        ids
    }

    fn brute_force_k_nearest(points: &[Point], target: &Point, k: usize) -> Vec<usize> {
        let mut by_dist: Vec<(f64, usize)> =
            points.iter().map(|p| (target.dist(p), p.id)).collect();
        by_dist.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        by_dist.truncate(k);
        by_dist.into_iter().map(|(_, id)| id).collect()
    }

    #[test]
    fn unit_square_corners_report_their_adjacent_corners() {
        let points =
            Point::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let tree = KdTree::build(&points);
        assert_eq!(tree.len(), 4);

        // k = 3 keeps the corner itself plus its two edge-adjacent
        // corners; the diagonal is strictly farther.
        assert_eq!(sorted(tree.k_nearest(&points[0], 3)), vec![0, 1, 3]);
        assert_eq!(sorted(tree.k_nearest(&points[1], 3)), vec![0, 1, 2]);
        assert_eq!(sorted(tree.k_nearest(&points[2], 3)), vec![1, 2, 3]);
        assert_eq!(sorted(tree.k_nearest(&points[3], 3)), vec![0, 2, 3]);
    }

    #[test]
    fn matches_brute_force_on_random_points() {
        let mut rng = StdRng::seed_from_u64(42);
        let coords: Vec<(f64, f64)> = (0..60)
            .map(|_| (rng.random_range(0.0..100.0), rng.random_range(0.0..100.0)))
            .collect();
        let points = Point::from_coords(&coords);
        let tree = KdTree::build(&points);

        for target in &points {
            for k in [1, 4, 9] {
                let got = sorted(tree.k_nearest(target, k));
                let want = sorted(brute_force_k_nearest(&points, target, k));
                assert_eq!(got, want, "target={} k={k}", target.id);
            }
        }
    }

    #[test]
    fn k_larger_than_point_count_returns_everything() {
        let points = Point::from_coords(&[(0.0, 0.0), (5.0, 5.0)]);
        let tree = KdTree::build(&points);
        assert_eq!(sorted(tree.k_nearest(&points[0], 10)), vec![0, 1]);
    }

    #[test]
    fn empty_tree_returns_no_neighbors() {
        let tree = KdTree::build(&[]);
        assert!(tree.is_empty());
        let probe = Point::new(1.0, 2.0, 0);
        assert!(tree.k_nearest(&probe, 3).is_empty());
    }
}
