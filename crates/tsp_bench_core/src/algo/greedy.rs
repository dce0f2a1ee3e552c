use crate::graph::CostMatrix;
use crate::node::Point;
use crate::spatial::CandidateGraph;

/// Greedy construction over the candidate graph, always starting at
/// node 0. Each step takes the nearest unvisited candidate of the
/// current node; when every candidate is already visited it falls back
/// to a full scan of the unvisited set, so sparse candidate lists
/// still yield a complete tour.
pub fn candidate_tour(points: &[Point], candidates: &CandidateGraph) -> Vec<usize> {
    let n = points.len();
    if n == 0 {
        return Vec::new();
    }

    let start = 0;
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n + 1);
    tour.push(start);
    visited[start] = true;

    let mut fallback_scans = 0_usize;

    for _ in 1..n {
        let current = tour[tour.len() - 1];
        let mut next = None;
        let mut best = f64::INFINITY;

        for &cand in candidates.neighbors(current) {
            if !visited[cand] {
                let d = points[current].dist(&points[cand]);
                if d < best {
                    best = d;
                    next = Some(cand);
                }
            }
        }

        if next.is_none() {
            fallback_scans += 1;
            for (id, seen) in visited.iter().enumerate() {
                if !seen {
                    let d = points[current].dist(&points[id]);
                    if d < best {
                        best = d;
                        next = Some(id);
                    }
                }
            }
        }

        let Some(next) = next else { break };
        tour.push(next);
        visited[next] = true;
    }

    tour.push(start);

    if fallback_scans > 0 {
        log::debug!("greedy: fallback_scans={fallback_scans} n={n}");
    }
    tour
}

/// Plain nearest-neighbor over the full cost matrix from node 0, the
/// unindexed baseline.
pub fn nearest_neighbor_tour(matrix: &CostMatrix) -> Vec<usize> {
    let n = matrix.node_count();
    if n == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n + 1);
    let mut current = 0;
    tour.push(current);
    visited[current] = true;

    for _ in 1..n {
        let mut next = None;
        let mut best = i64::MAX;
        for id in 0..n {
            if !visited[id] && matrix.cost(current, id) < best {
                best = matrix.cost(current, id);
                next = Some(id);
            }
        }
        let Some(next) = next else { break };
        tour.push(next);
        visited[next] = true;
        current = next;
    }

    tour.push(0);
    tour
}

#[cfg(test)]
mod tests {
    use super::{candidate_tour, nearest_neighbor_tour};
    use crate::graph::CostMatrix;
    use crate::node::Point;
    use crate::spatial::CandidateGraph;
    use crate::tour::{is_closed_cycle, tour_length};

    #[test]
    fn unit_square_with_edge_candidates_walks_the_perimeter() {
        let points =
            Point::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let candidates =
            CandidateGraph::from_lists(vec![vec![1, 3], vec![0, 2], vec![1, 3], vec![0, 2]]);

        let tour = candidate_tour(&points, &candidates);
        assert_eq!(tour, vec![0, 1, 2, 3, 0]);
        assert!((tour_length(&points, &tour) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn exhausted_candidates_fall_back_to_a_full_scan() {
        // Two far-apart pairs, each node knowing only its pair partner.
        let points =
            Point::from_coords(&[(0.0, 0.0), (0.0, 1.0), (100.0, 0.0), (100.0, 1.0)]);
        let candidates =
            CandidateGraph::from_lists(vec![vec![1], vec![0], vec![3], vec![2]]);

        let tour = candidate_tour(&points, &candidates);
        assert!(is_closed_cycle(4, &tour), "tour {tour:?} is not a cycle");
        // The jump across the gap goes to the closer member of the far pair.
        assert_eq!(tour, vec![0, 1, 3, 2, 0]);
    }

    #[test]
    fn empty_and_singleton_inputs_yield_trivial_tours() {
        let no_points: Vec<Point> = Vec::new();
        let empty = CandidateGraph::from_lists(Vec::new());
        assert!(candidate_tour(&no_points, &empty).is_empty());

        let one = Point::from_coords(&[(2.0, 2.0)]);
        let lone = CandidateGraph::from_lists(vec![Vec::new()]);
        assert_eq!(candidate_tour(&one, &lone), vec![0, 0]);
    }

    #[test]
    fn matrix_nearest_neighbor_visits_every_node() {
        let matrix = CostMatrix::from_coordinates(&[
            (0.0, 0.0),
            (0.0, 10.0),
            (10.0, 10.0),
            (10.0, 0.0),
            (5.0, 5.0),
        ]);
        let tour = nearest_neighbor_tour(&matrix);
        assert!(is_closed_cycle(5, &tour), "tour {tour:?} is not a cycle");
        assert_eq!(tour[0], 0);
    }

    #[test]
    fn matrix_nearest_neighbor_follows_the_cheapest_edge() {
        // Line of points: 0 at x=0, 1 at x=1, 2 at x=3, 3 at x=6.
        let matrix =
            CostMatrix::from_coordinates(&[(0.0, 0.0), (1.0, 0.0), (3.0, 0.0), (6.0, 0.0)]);
        assert_eq!(nearest_neighbor_tour(&matrix), vec![0, 1, 2, 3, 0]);
    }
}
