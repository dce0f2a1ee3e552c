use crate::node::Point;
use crate::spatial::kdtree::KdTree;

const CANDIDATE_K_DIVISOR: usize = 10;
const CANDIDATE_K_FLOOR: usize = 10;
const CANDIDATE_K_CEIL: usize = 30;

/// Neighbor-list size for an `n`-point instance: n/10 kept inside
/// [10, 30]. Below ~20 the lists degrade tour quality, above ~30 the
/// construction phases stop gaining anything.
pub fn candidate_k(n: usize) -> usize {
    (n / CANDIDATE_K_DIVISOR).clamp(CANDIDATE_K_FLOOR, CANDIDATE_K_CEIL)
}

/// k-nearest-neighbor lookup over a fixed point set. The pipeline is
/// generic over this so the tree-backed and exhaustive versions run
/// through identical construction code.
pub trait NearestNeighbors {
    /// Up to `k` neighbors of `target`, target itself excluded.
    fn neighbors_of(&self, target: &Point, k: usize) -> Vec<usize>;
}

impl NearestNeighbors for KdTree {
    fn neighbors_of(&self, target: &Point, k: usize) -> Vec<usize> {
        // The tree indexes the target too: ask for one extra, drop self.
        self.k_nearest(target, k + 1)
            .into_iter()
            .filter(|&id| id != target.id)
            .take(k)
            .collect()
    }
}

/// Exhaustive scan-and-sort neighbor source, the ablation baseline.
/// O(n log n) per query against the tree's O(log n) expected.
pub struct BruteForceNeighbors<'a> {
    points: &'a [Point],
}

impl<'a> BruteForceNeighbors<'a> {
    pub fn new(points: &'a [Point]) -> Self {
        Self { points }
    }
}

impl NearestNeighbors for BruteForceNeighbors<'_> {
    fn neighbors_of(&self, target: &Point, k: usize) -> Vec<usize> {
        let mut by_dist: Vec<(f64, usize)> = self
            .points
            .iter()
            .filter(|p| p.id != target.id)
            .map(|p| (target.dist(p), p.id))
            .collect();
        by_dist.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        by_dist.truncate(k);
        by_dist.into_iter().map(|(_, id)| id).collect()
    }
}

/// Per-node candidate lists restricting which edges the construction
/// phases may use. Indexed by node id.
#[derive(Clone, Debug)]
pub struct CandidateGraph {
    lists: Vec<Vec<usize>>,
}

impl CandidateGraph {
    /// Queries `source` once per point.
    pub fn build(points: &[Point], source: &dyn NearestNeighbors, k: usize) -> Self {
        let lists = points.iter().map(|p| source.neighbors_of(p, k)).collect();
        Self { lists }
    }

    /// Wraps pre-computed lists; used where a test or caller wants an
    /// exact graph rather than whatever the neighbor source produces.
    pub fn from_lists(lists: Vec<Vec<usize>>) -> Self {
        Self { lists }
    }

    pub fn neighbors(&self, id: usize) -> &[usize] {
        &self.lists[id]
    }

    pub fn node_count(&self) -> usize {
        self.lists.len()
    }

    /// Undirected edge estimate: half the sum of list lengths. Kept
    /// fractional since lists are not perfectly mutual.
    pub fn edge_count(&self) -> f64 {
        let directed: usize = self.lists.iter().map(Vec::len).sum();
        directed as f64 / 2.0
    }
}
