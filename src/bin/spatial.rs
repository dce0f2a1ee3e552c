use std::time::Instant;

use log::info;

use tsp_bench_core::{
    Point, Result,
    algo::solve_spatial,
    io::{
        RunArgs, append_benchmark_row, append_spatial_stats, load_coordinates, load_cost_matrix,
        write_tour_files,
    },
    logging::init_logger,
    utils::{dataset_name, millis},
};

const ALGORITHM: &str = "Spatial-Algorithm";

fn main() -> Result<()> {
    let args = RunArgs::from_env()?;
    init_logger(
        args.log_level.to_filter(),
        args.log_timestamp,
        args.log_output.as_deref(),
    )?;

    let dataset = dataset_name(&args.tsp_path);
    let coords = load_coordinates(&args.tsp_path)?;
    let matrix = load_cost_matrix(&args.tsp_path)?;
    let points = Point::from_coords(&coords);

    let started = Instant::now();
    let (tour, stats) = solve_spatial(&dataset, &points)?;
    let time_ms = millis(started.elapsed());

    let distance = matrix.tour_cost(&tour);
    info!(
        "{ALGORITHM}: dataset={dataset} winner={} distance={distance} time_ms={time_ms:.3}",
        stats.winner
    );

    write_tour_files(&args.output_path, &tour, &coords, distance)?;
    if let Some(csv_path) = args.csv_path.as_deref() {
        append_benchmark_row(csv_path, ALGORITHM, &dataset, points.len(), time_ms, distance)?;
    }
    if let Some(analysis_path) = args.analysis_csv_path.as_deref() {
        append_spatial_stats(analysis_path, &stats)?;
    }
    Ok(())
}
