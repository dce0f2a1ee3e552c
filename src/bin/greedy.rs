use tsp_bench_core::{Result, algo::nearest_neighbor_tour, runner::run_matrix_solver};

fn main() -> Result<()> {
    run_matrix_solver("Greedy-TSP", |matrix| Ok(nearest_neighbor_tour(matrix)))
}
