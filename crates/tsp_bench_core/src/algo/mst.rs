use crate::graph::CostMatrix;
use crate::heap::{HeapEntry, HeapKey, MinHeap};
use crate::node::Point;
use crate::spatial::CandidateGraph;

/// Prim's algorithm over candidate edges only, linearized by a
/// preorder walk from node 0 and closed back at the root.
///
/// Nodes the candidate graph never connects to the root keep an
/// unreachable key and are left out of the walk, so the result can be
/// shorter than a full cycle. Callers check completeness with
/// `tour::is_closed_cycle` before trusting the length; the fix is a
/// larger candidate `k`, not a repaired walk.
pub fn candidate_mst_tour(points: &[Point], candidates: &CandidateGraph) -> Vec<usize> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }
    let root = 0;

    let mut in_tree = vec![false; n];
    let mut key = vec![f64::UNREACHABLE; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];

    let mut entries: Vec<HeapEntry<f64>> = (0..n)
        .map(|id| HeapEntry::new(f64::UNREACHABLE, id))
        .collect();
    entries[root].key = 0.0;
    key[root] = 0.0;
    let mut heap = MinHeap::from_entries(entries);

    while let Some(min) = heap.extract_min() {
        if min.key.is_unreachable() {
            break;
        }
        let u = min.id;
        in_tree[u] = true;

        for &v in candidates.neighbors(u) {
            if in_tree[v] {
                continue;
            }
            let weight = points[u].dist(&points[v]);
            if weight < key[v] {
                key[v] = weight;
                parent[v] = Some(u);
                heap.decrease_key(v, weight);
            }
        }
    }

    let mut adjacency: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n];
    for v in 0..n {
        if let Some(u) = parent[v] {
            adjacency[u].push((v, key[v]));
            adjacency[v].push((u, key[v]));
        }
    }

    let unreached = key.iter().filter(|k| k.is_unreachable()).count();
    if unreached > 0 {
        log::debug!("mst: candidate graph left unreached={unreached} n={n}");
    }

    preorder_tour(&adjacency, root)
}

/// Full-matrix Prim under integer costs followed by the same preorder
/// walk: the classic MST 2-approximation. Zero-cost edges never become
/// tree candidates, so points that collide under integer rounding only
/// attach through a positive-cost edge.
pub fn two_approx_tour(matrix: &CostMatrix) -> Vec<usize> {
    let n = matrix.node_count();
    if n == 0 {
        return Vec::new();
    }
    let root = 0;

    let mut in_tree = vec![false; n];
    let mut key = vec![i64::UNREACHABLE; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];

    let mut entries: Vec<HeapEntry<i64>> = (0..n)
        .map(|id| HeapEntry::new(i64::UNREACHABLE, id))
        .collect();
    entries[root].key = 0;
    key[root] = 0;
    let mut heap = MinHeap::from_entries(entries);

    while let Some(min) = heap.extract_min() {
        if min.key.is_unreachable() {
            break;
        }
        let u = min.id;
        in_tree[u] = true;

        for v in 0..n {
            if in_tree[v] {
                continue;
            }
            let cost = matrix.cost(u, v);
            if cost > 0 && cost < key[v] {
                key[v] = cost;
                parent[v] = Some(u);
                heap.decrease_key(v, cost);
            }
        }
    }

    let mut adjacency: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
    for v in 0..n {
        if let Some(u) = parent[v] {
            adjacency[u].push((v, key[v]));
            adjacency[v].push((u, key[v]));
        }
    }

    preorder_tour(&adjacency, root)
}

/// Depth-first preorder over an undirected tree adjacency, children in
/// list order, the root appended again to close the cycle. Iterative
/// to keep deep degenerate trees off the call stack.
fn preorder_tour<W: Copy>(adjacency: &[Vec<(usize, W)>], root: usize) -> Vec<usize> {
    let n = adjacency.len();
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n + 1);
    let mut stack = vec![root];

    while let Some(u) = stack.pop() {
        if visited[u] {
            continue;
        }
        visited[u] = true;
        tour.push(u);
        // Push order reversed so children pop in adjacency order.
        for &(v, _) in adjacency[u].iter().rev() {
            if !visited[v] {
                stack.push(v);
            }
        }
    }

    tour.push(root);
    tour
}

#[cfg(test)]
mod tests {
    use super::{candidate_mst_tour, two_approx_tour};
    use crate::graph::CostMatrix;
    use crate::node::Point;
    use crate::spatial::CandidateGraph;
    use crate::tour::is_closed_cycle;

    #[test]
    fn connected_candidate_graph_yields_a_full_cycle() {
        let points =
            Point::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let candidates =
            CandidateGraph::from_lists(vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![0, 2]]);

        let tour = candidate_mst_tour(&points, &candidates);
        assert!(is_closed_cycle(4, &tour), "tour {tour:?} is not a cycle");
        assert_eq!(tour[0], 0);
        assert_eq!(tour[4], 0);
    }

    #[test]
    fn disconnected_candidate_graph_yields_a_partial_walk() {
        // Two isolated pairs; nothing links the clusters.
        let points =
            Point::from_coords(&[(0.0, 0.0), (0.0, 1.0), (100.0, 0.0), (100.0, 1.0)]);
        let candidates =
            CandidateGraph::from_lists(vec![vec![1], vec![0], vec![3], vec![2]]);

        let tour = candidate_mst_tour(&points, &candidates);
        assert_eq!(tour, vec![0, 1, 0]);
        assert!(!is_closed_cycle(4, &tour));
    }

    #[test]
    fn chain_of_points_walks_in_tree_order() {
        // MST of a line is the line itself.
        let points =
            Point::from_coords(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]);
        let candidates = CandidateGraph::from_lists(vec![
            vec![1, 2],
            vec![0, 2],
            vec![1, 3],
            vec![2, 1],
        ]);

        let tour = candidate_mst_tour(&points, &candidates);
        assert_eq!(tour, vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn two_approx_square_stays_within_twice_the_optimum() {
        let matrix =
            CostMatrix::from_coordinates(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        let tour = two_approx_tour(&matrix);
        assert!(is_closed_cycle(4, &tour), "tour {tour:?} is not a cycle");
        // Optimal perimeter is 40; the approximation bound is 80.
        assert!(matrix.tour_cost(&tour) <= 80);
    }

    #[test]
    fn two_approx_handles_tiny_instances() {
        assert!(two_approx_tour(&CostMatrix::new(0)).is_empty());
        assert_eq!(
            two_approx_tour(&CostMatrix::from_coordinates(&[(1.0, 1.0)])),
            vec![0, 0]
        );
        assert_eq!(
            two_approx_tour(&CostMatrix::from_coordinates(&[(0.0, 0.0), (3.0, 4.0)])),
            vec![0, 1, 0]
        );
    }
}
