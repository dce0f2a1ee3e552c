use std::fmt;
use std::time::Instant;

use crate::algo::{greedy, mst, two_opt};
use crate::error::{Error, Result};
use crate::node::Point;
use crate::spatial::{CandidateGraph, KdTree, candidate_k};
use crate::tour;
use crate::utils;

pub const DEFAULT_REFINE_ITERATIONS: usize = 2;

const ERR_NO_POINTS: &str = "instance has no points";

/// Which construction the best-of-two selection kept.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Winner {
    Greedy,
    Mst,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greedy => f.write_str("Greedy"),
            Self::Mst => f.write_str("MST"),
        }
    }
}

/// Per-phase wall-clock times and tour qualities of one spatial run.
/// Phase 1 is candidate generation, 2 greedy, 3 MST walk, 4 refinement.
#[derive(Clone, Debug)]
pub struct SpatialStats {
    pub dataset: String,
    pub nodes: usize,
    pub greedy_length: f64,
    pub mst_length: f64,
    pub winner: Winner,
    pub improvement_ratio: f64,
    pub phase1_ms: f64,
    pub phase2_ms: f64,
    pub phase3_ms: f64,
    pub phase4_ms: f64,
    pub total_ms: f64,
    pub final_length: f64,
}

/// Greedy and MST constructions over one candidate graph plus the
/// selection between them. Shared by the pipeline and the ablation
/// harness so both measure identical construction code.
pub(crate) struct BuiltTours {
    pub(crate) tour: Vec<usize>,
    pub(crate) winner: Winner,
    pub(crate) greedy_length: f64,
    pub(crate) mst_length: f64,
    pub(crate) improvement_ratio: f64,
    pub(crate) greedy_ms: f64,
    pub(crate) mst_ms: f64,
}

pub(crate) fn construct_best_tour(points: &[Point], candidates: &CandidateGraph) -> BuiltTours {
    let n = points.len();

    let now = Instant::now();
    let greedy_tour = greedy::candidate_tour(points, candidates);
    let greedy_ms = utils::millis(now.elapsed());
    let greedy_length = tour::tour_length(points, &greedy_tour);
    log::info!("pipeline: greedy len={greedy_length:.1} ms={greedy_ms:.2}");

    let now = Instant::now();
    let mst_tour = mst::candidate_mst_tour(points, candidates);
    let mst_ms = utils::millis(now.elapsed());
    let mst_length = tour::tour_length(points, &mst_tour);
    let mst_complete = tour::is_closed_cycle(n, &mst_tour);
    log::info!("pipeline: mst walk len={mst_length:.1} complete={mst_complete} ms={mst_ms:.2}");

    // An incomplete walk skips nodes, so its shorter length is not
    // comparable; it is excluded from the selection outright.
    let (winner, tour, improvement_ratio) = if !mst_complete {
        log::warn!(
            "pipeline: mst walk visited {} of {n} nodes, selecting greedy",
            mst_tour.len().saturating_sub(1)
        );
        (Winner::Greedy, greedy_tour, 0.0)
    } else if greedy_length < mst_length {
        (Winner::Greedy, greedy_tour, ratio(mst_length, greedy_length))
    } else {
        (Winner::Mst, mst_tour, ratio(greedy_length, mst_length))
    };
    log::info!("pipeline: selected winner={winner}");

    BuiltTours {
        tour,
        winner,
        greedy_length,
        mst_length,
        improvement_ratio,
        greedy_ms,
        mst_ms,
    }
}

fn ratio(worse: f64, better: f64) -> f64 {
    if worse > 0.0 { (worse - better) / worse } else { 0.0 }
}

pub(crate) fn validate_points(points: &[Point]) -> Result<()> {
    if points.is_empty() {
        return Err(Error::invalid_input(ERR_NO_POINTS));
    }
    if let Some(bad) = points.iter().find(|p| !p.is_valid()) {
        return Err(Error::invalid_input(format!(
            "non-finite coordinates at node {}",
            bad.id
        )));
    }
    Ok(())
}

/// The four-phase spatial heuristic: KD-tree candidate generation,
/// greedy and MST construction, best-of-two selection, selective 2-opt.
/// Returns the refined tour and the per-phase measurements.
pub fn solve_spatial(dataset: &str, points: &[Point]) -> Result<(Vec<usize>, SpatialStats)> {
    validate_points(points)?;
    let n = points.len();
    log::info!("pipeline: start dataset={dataset} n={n}");

    let now = Instant::now();
    let k = candidate_k(n);
    let tree = KdTree::build(points);
    let candidates = CandidateGraph::build(points, &tree, k);
    let phase1_ms = utils::millis(now.elapsed());
    log::info!(
        "pipeline: candidates built k={k} edges={:.0} ms={phase1_ms:.2}",
        candidates.edge_count()
    );

    let built = construct_best_tour(points, &candidates);
    let mut tour_ids = built.tour;

    let now = Instant::now();
    let refined = two_opt::selective_two_opt(points, &mut tour_ids, DEFAULT_REFINE_ITERATIONS);
    let phase4_ms = utils::millis(now.elapsed());
    log::info!(
        "pipeline: refined len={:.1} iterations={} ms={phase4_ms:.2}",
        refined.length_after,
        refined.iterations_run
    );
    utils::log_edge_metrics(points, &tour_ids, "refined");

    let total_ms = phase1_ms + built.greedy_ms + built.mst_ms + phase4_ms;
    log::info!(
        "pipeline: complete dataset={dataset} final_len={:.1} total_ms={total_ms:.2}",
        refined.length_after
    );

    let stats = SpatialStats {
        dataset: dataset.to_owned(),
        nodes: n,
        greedy_length: built.greedy_length,
        mst_length: built.mst_length,
        winner: built.winner,
        improvement_ratio: built.improvement_ratio,
        phase1_ms,
        phase2_ms: built.greedy_ms,
        phase3_ms: built.mst_ms,
        phase4_ms,
        total_ms,
        final_length: refined.length_after,
    };
    Ok((tour_ids, stats))
}
