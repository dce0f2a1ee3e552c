//! Spatial index and candidate-edge generation: the KD-tree, the
//! brute-force baseline it is measured against, and the k-nearest
//! candidate lists both feed into.

mod candidates;
mod kdtree;

pub use candidates::{
    BruteForceNeighbors, CandidateGraph, NearestNeighbors, candidate_k,
};
pub use kdtree::KdTree;
