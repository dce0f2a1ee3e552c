//! Instance parsing, result files and the shared solver command line.

mod args;
mod report;
mod tsplib;

pub use args::{LogLevel, RunArgs};
pub use report::{
    append_ablation_stats, append_benchmark_row, append_spatial_stats, write_tour_files,
};
pub use tsplib::{load_coordinates, load_cost_matrix, parse_coordinates, parse_cost_matrix};
