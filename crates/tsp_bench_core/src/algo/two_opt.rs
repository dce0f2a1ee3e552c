use crate::node::Point;
use crate::tour::tour_length;

/// Share of tour edges examined per iteration: the longest fifth.
const LONGEST_EDGE_DIVISOR: usize = 5;

/// What a refinement run did to its tour.
#[derive(Clone, Copy, Debug)]
pub struct RefineOutcome {
    pub length_before: f64,
    pub length_after: f64,
    pub iterations_run: usize,
    pub improved: bool,
}

/// Longest-edge-targeted 2-opt over a closed tour, in place.
///
/// Per iteration: rank edges by length, scan the longest 20% (at least
/// one) against every later non-adjacent edge, apply the first strictly
/// improving reversal, and start the next iteration. An iteration that
/// finds nothing ends the run before `iterations` is used up. First
/// improvement, one reversal per iteration.
pub fn selective_two_opt(points: &[Point], tour: &mut [usize], iterations: usize) -> RefineOutcome {
    let length_before = tour_length(points, tour);
    let mut outcome = RefineOutcome {
        length_before,
        length_after: length_before,
        iterations_run: 0,
        improved: false,
    };
    if tour.len() < 2 {
        return outcome;
    }
    let n = tour.len() - 1;

    for iter in 0..iterations {
        outcome.iterations_run = iter + 1;

        // Longest first; equal lengths break toward the later edge.
        let mut edges: Vec<(f64, usize)> = (0..n)
            .map(|i| (points[tour[i]].dist(&points[tour[i + 1]]), i))
            .collect();
        edges.sort_unstable_by(|a, b| b.0.total_cmp(&a.0).then(b.1.cmp(&a.1)));

        let check = (n / LONGEST_EDGE_DIVISOR).max(1);
        let mut improved = false;

        'scan: for &(_, i) in edges.iter().take(check) {
            for j in (i + 2)..n {
                if i == 0 && j == n - 1 {
                    // Those two edges share the tour's closing node.
                    continue;
                }

                let current = points[tour[i]].dist(&points[tour[i + 1]])
                    + points[tour[j]].dist(&points[tour[j + 1]]);
                let swapped = points[tour[i]].dist(&points[tour[j]])
                    + points[tour[i + 1]].dist(&points[tour[j + 1]]);

                if swapped < current {
                    tour[i + 1..=j].reverse();
                    improved = true;
                    break 'scan;
                }
            }
        }

        log::trace!("refine: iter={} improved={improved}", iter + 1);

        if improved {
            outcome.improved = true;
        } else {
            break;
        }
    }

    outcome.length_after = tour_length(points, tour);
    outcome
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

    use super::selective_two_opt;
    use crate::node::Point;
    use crate::tour::{is_closed_cycle, tour_length};

    fn circle(n: usize, radius: f64) -> Vec<Point> {
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|i| {
                let angle = i as f64 / n as f64 * std::f64::consts::TAU;
                (radius * angle.cos(), radius * angle.sin())
            })
            .collect();
        Point::from_coords(&coords)
    }

    #[test]
    fn uncrosses_a_swapped_pair_on_a_circle() {
        let points = circle(10, 10.0);
        // Positions 1 and 2 swapped relative to the perimeter order.
        let mut tour = vec![0, 2, 1, 3, 4, 5, 6, 7, 8, 9, 0];
        let crossed_length = tour_length(&points, &tour);

        let outcome = selective_two_opt(&points, &mut tour, 2);

        assert!(outcome.improved);
        assert_eq!(tour, vec![0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 0]);
        assert!(outcome.length_after < crossed_length);
        assert!((outcome.length_before - crossed_length).abs() < 1e-9);
    }

    #[test]
    fn perimeter_tour_reports_no_improvement() {
        let points = circle(10, 10.0);
        let mut tour: Vec<usize> = (0..10).chain([0]).collect();
        let before = tour_length(&points, &tour);

        let outcome = selective_two_opt(&points, &mut tour, 5);

        assert!(!outcome.improved);
        assert_eq!(outcome.iterations_run, 1);
        assert!((outcome.length_after - before).abs() < 1e-9);
        assert_eq!(tour, (0..10).chain([0]).collect::<Vec<_>>());
    }

    #[test]
    fn optimal_unit_square_is_left_alone() {
        let points =
            Point::from_coords(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let mut tour = vec![0, 1, 2, 3, 0];

        let outcome = selective_two_opt(&points, &mut tour, 3);

        assert!(!outcome.improved);
        assert_eq!(tour, vec![0, 1, 2, 3, 0]);
        assert!((outcome.length_after - 4.0).abs() < 1e-9);
    }

    #[test]
    fn refinement_never_lengthens_or_breaks_a_random_tour() {
        let mut rng = StdRng::seed_from_u64(11);
        let points = circle(40, 25.0);

        let mut interior: Vec<usize> = (1..40).collect();
        interior.shuffle(&mut rng);
        let mut tour = Vec::with_capacity(41);
        tour.push(0);
        tour.extend(interior);
        tour.push(0);
        let before = tour_length(&points, &tour);

        let outcome = selective_two_opt(&points, &mut tour, 25);

        assert!(is_closed_cycle(40, &tour), "refined tour is not a cycle");
        assert!(outcome.length_after <= before + 1e-9);
        assert!((tour_length(&points, &tour) - outcome.length_after).abs() < 1e-9);
    }

    #[test]
    fn rerunning_on_a_settled_tour_changes_nothing() {
        let points = circle(12, 5.0);
        let mut tour = vec![0, 2, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 0];
        selective_two_opt(&points, &mut tour, 30);

        let settled = tour.clone();
        let outcome = selective_two_opt(&points, &mut tour, 30);

        assert!(!outcome.improved);
        assert_eq!(outcome.iterations_run, 1);
        assert_eq!(tour, settled);
    }

    #[test]
    fn degenerate_tours_pass_through_untouched() {
        let points = circle(3, 1.0);
        let mut empty: Vec<usize> = Vec::new();
        let outcome = selective_two_opt(&points, &mut empty, 2);
        assert!(!outcome.improved);
        assert_eq!(outcome.iterations_run, 0);

        let mut single = vec![0];
        let outcome = selective_two_opt(&points, &mut single, 2);
        assert_eq!(outcome.length_after, 0.0);
    }
}
