use crate::node::Point;

/// Euclidean length of a tour given as consecutive node ids. Closed
/// tours repeat their first id at the end, so the closing edge is
/// counted like any other.
pub fn tour_length(points: &[Point], tour: &[usize]) -> f64 {
    tour.windows(2)
        .map(|pair| points[pair[0]].dist(&points[pair[1]]))
        .sum()
}

/// True when `tour` is a closed Hamiltonian cycle over `n` nodes:
/// `n + 1` entries, first equals last, and every id in `0..n` appears
/// exactly once before the closing repeat.
pub fn is_closed_cycle(n: usize, tour: &[usize]) -> bool {
    if tour.len() != n + 1 || tour.first() != tour.last() {
        return false;
    }
    let mut seen = vec![false; n];
    for &id in &tour[..n] {
        if id >= n || seen[id] {
            return false;
        }
        seen[id] = true;
    }
    true
}

/// Short id preview for log lines, `0 -> 5 -> 2 ...`.
pub fn preview(tour: &[usize], limit: usize) -> String {
    let shown = tour.len().min(limit);
    let mut out = tour[..shown]
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ");
    if tour.len() > shown {
        out.push_str(" ...");
    }
    out
}
