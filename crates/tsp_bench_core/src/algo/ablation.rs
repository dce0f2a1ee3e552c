use std::time::Instant;

use crate::algo::pipeline::{DEFAULT_REFINE_ITERATIONS, construct_best_tour, validate_points};
use crate::algo::two_opt;
use crate::error::Result;
use crate::node::Point;
use crate::spatial::{BruteForceNeighbors, CandidateGraph, KdTree, candidate_k};
use crate::utils;

/// Side-by-side measurements of the tree-backed and brute-force
/// candidate phases feeding otherwise identical pipelines. The 2-opt
/// columns describe the tree-backed run, the primary configuration.
#[derive(Clone, Debug)]
pub struct AblationStats {
    pub dataset: String,
    pub nodes: usize,
    pub kdtree_phase1_ms: f64,
    pub bruteforce_phase1_ms: f64,
    pub kdtree_candidate_edges: f64,
    pub bruteforce_candidate_edges: f64,
    pub length_before_refine: f64,
    pub length_after_refine: f64,
    pub refine_ms: f64,
    pub refine_improvement_ratio: f64,
    pub kdtree_total_ms: f64,
    pub bruteforce_total_ms: f64,
    pub kdtree_final_length: f64,
    pub bruteforce_final_length: f64,
    /// Brute-force phase-1 time over tree phase-1 time.
    pub speed_ratio: f64,
    /// Relative gap between the two final lengths.
    pub quality_gap: f64,
}

/// Runs the full pipeline twice, once per candidate source, timing
/// each phase separately. Returns the tree-backed tour; the brute
/// force run only exists for the comparison.
pub fn run_ablation(dataset: &str, points: &[Point]) -> Result<(Vec<usize>, AblationStats)> {
    validate_points(points)?;
    let n = points.len();
    let k = candidate_k(n);
    log::info!("ablation: start dataset={dataset} n={n} k={k}");

    let now = Instant::now();
    let tree = KdTree::build(points);
    let kd_candidates = CandidateGraph::build(points, &tree, k);
    let kdtree_phase1_ms = utils::millis(now.elapsed());

    let now = Instant::now();
    let brute = BruteForceNeighbors::new(points);
    let bf_candidates = CandidateGraph::build(points, &brute, k);
    let bruteforce_phase1_ms = utils::millis(now.elapsed());

    log::info!(
        "ablation: candidates kd_ms={kdtree_phase1_ms:.2} bf_ms={bruteforce_phase1_ms:.2} kd_edges={:.0} bf_edges={:.0}",
        kd_candidates.edge_count(),
        bf_candidates.edge_count()
    );

    let kd_built = construct_best_tour(points, &kd_candidates);
    let mut kd_tour = kd_built.tour;
    let now = Instant::now();
    let kd_refined = two_opt::selective_two_opt(points, &mut kd_tour, DEFAULT_REFINE_ITERATIONS);
    let kd_refine_ms = utils::millis(now.elapsed());

    let bf_built = construct_best_tour(points, &bf_candidates);
    let mut bf_tour = bf_built.tour;
    let now = Instant::now();
    let bf_refined = two_opt::selective_two_opt(points, &mut bf_tour, DEFAULT_REFINE_ITERATIONS);
    let bf_refine_ms = utils::millis(now.elapsed());

    let kdtree_total_ms = kdtree_phase1_ms + kd_built.greedy_ms + kd_built.mst_ms + kd_refine_ms;
    let bruteforce_total_ms =
        bruteforce_phase1_ms + bf_built.greedy_ms + bf_built.mst_ms + bf_refine_ms;

    let stats = AblationStats {
        dataset: dataset.to_owned(),
        nodes: n,
        kdtree_phase1_ms,
        bruteforce_phase1_ms,
        kdtree_candidate_edges: kd_candidates.edge_count(),
        bruteforce_candidate_edges: bf_candidates.edge_count(),
        length_before_refine: kd_refined.length_before,
        length_after_refine: kd_refined.length_after,
        refine_ms: kd_refine_ms,
        refine_improvement_ratio: improvement_ratio(&kd_refined),
        kdtree_total_ms,
        bruteforce_total_ms,
        kdtree_final_length: kd_refined.length_after,
        bruteforce_final_length: bf_refined.length_after,
        speed_ratio: bruteforce_phase1_ms / kdtree_phase1_ms,
        quality_gap: relative_gap(kd_refined.length_after, bf_refined.length_after),
    };

    log::info!(
        "ablation: complete dataset={dataset} speed_ratio={:.2} quality_gap={:.4}",
        stats.speed_ratio,
        stats.quality_gap
    );
    Ok((kd_tour, stats))
}

fn improvement_ratio(outcome: &two_opt::RefineOutcome) -> f64 {
    if outcome.length_before > 0.0 {
        (outcome.length_before - outcome.length_after) / outcome.length_before
    } else {
        0.0
    }
}

fn relative_gap(a: f64, b: f64) -> f64 {
    let floor = a.min(b);
    if floor > 0.0 { (a - b).abs() / floor } else { 0.0 }
}
