/// Symmetric complete-graph costs under TSPLIB integer semantics.
/// Stored row-major; `set` mirrors both triangles so lookups never
/// have to order their arguments.
#[derive(Clone, Debug)]
pub struct CostMatrix {
    n: usize,
    costs: Vec<i64>,
}

impl CostMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            costs: vec![0; n * n],
        }
    }

    /// Rounded-Euclidean matrix over a coordinate list.
    pub fn from_coordinates(coords: &[(f64, f64)]) -> Self {
        let n = coords.len();
        let mut matrix = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                matrix.set(i, j, euclidean_cost(coords[i], coords[j]));
            }
        }
        matrix
    }

    pub fn set(&mut self, u: usize, v: usize, cost: i64) {
        self.costs[u * self.n + v] = cost;
        self.costs[v * self.n + u] = cost;
    }

    pub fn cost(&self, u: usize, v: usize) -> i64 {
        self.costs[u * self.n + v]
    }

    pub fn node_count(&self) -> usize {
        self.n
    }

    /// Cost of a tour given as consecutive node ids; callers pass the
    /// closing edge by repeating the first node at the end.
    pub fn tour_cost(&self, tour: &[usize]) -> i64 {
        tour.windows(2).map(|pair| self.cost(pair[0], pair[1])).sum()
    }
}

/// TSPLIB EUC_2D: Euclidean distance rounded to the nearest integer.
pub fn euclidean_cost(a: (f64, f64), b: (f64, f64)) -> i64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    ((dx * dx + dy * dy).sqrt() + 0.5) as i64
}
