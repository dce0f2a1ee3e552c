use tsp_bench_core::{Result, algo::two_approx_tour, runner::run_matrix_solver};

fn main() -> Result<()> {
    run_matrix_solver("MST-2-Approximation", |matrix| Ok(two_approx_tour(matrix)))
}
