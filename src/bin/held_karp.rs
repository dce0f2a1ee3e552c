use tsp_bench_core::{Result, algo::held_karp_tour, runner::run_matrix_solver};

fn main() -> Result<()> {
    run_matrix_solver("Held-Karp", held_karp_tour)
}
