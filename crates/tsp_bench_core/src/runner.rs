use std::time::Instant;

use log::info;

use crate::{
    CostMatrix, Result,
    io::{RunArgs, append_benchmark_row, load_coordinates, load_cost_matrix, write_tour_files},
    logging::init_logger,
    tour::preview,
    utils::{dataset_name, millis},
};

pub const TOUR_PREVIEW_LIMIT: usize = 10;

/// Shared main flow of the matrix-based solver binaries: parse the command
/// line, load the instance, time a single solve and write the result files.
pub fn run_matrix_solver<F>(algorithm: &str, solve: F) -> Result<()>
where
    F: FnOnce(&CostMatrix) -> Result<Vec<usize>>,
{
    let args = RunArgs::from_env()?;
    init_logger(
        args.log_level.to_filter(),
        args.log_timestamp,
        args.log_output.as_deref(),
    )?;

    let dataset = dataset_name(&args.tsp_path);
    let coords = load_coordinates(&args.tsp_path)?;
    let matrix = load_cost_matrix(&args.tsp_path)?;
    info!(
        "runner: algorithm={algorithm} dataset={dataset} nodes={}",
        matrix.node_count()
    );

    let started = Instant::now();
    let tour = solve(&matrix)?;
    let time_ms = millis(started.elapsed());
    let distance = matrix.tour_cost(&tour);
    info!("runner: solved distance={distance} time_ms={time_ms:.3}");
    info!("runner: tour {}", preview(&tour, TOUR_PREVIEW_LIMIT));

    write_tour_files(&args.output_path, &tour, &coords, distance)?;
    if let Some(csv_path) = args.csv_path.as_deref() {
        append_benchmark_row(
            csv_path,
            algorithm,
            &dataset,
            matrix.node_count(),
            time_ms,
            distance,
        )?;
    }
    Ok(())
}
