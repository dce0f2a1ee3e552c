//! Tour construction and refinement: the candidate-restricted spatial
//! pipeline, its ablation harness, and the standalone matrix baselines.

mod ablation;
mod greedy;
mod held_karp;
mod mst;
mod pipeline;
mod two_opt;

pub use ablation::{AblationStats, run_ablation};
pub use greedy::{candidate_tour, nearest_neighbor_tour};
pub use held_karp::{MAX_EXACT_NODES, held_karp_tour};
pub use mst::{candidate_mst_tour, two_approx_tour};
pub use pipeline::{DEFAULT_REFINE_ITERATIONS, SpatialStats, Winner, solve_spatial};
pub use two_opt::{RefineOutcome, selective_two_opt};
