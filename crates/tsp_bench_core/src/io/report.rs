use std::{
    ffi::OsStr,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use crate::algo::{AblationStats, SpatialStats};
use crate::error::Result;

const BENCHMARK_HEADER: &str = "Algorithm,Dataset,Nodes,TimeMs,Distance";

const SPATIAL_HEADER: &str = "Dataset,Nodes,GreedyDistance,MSTDistance,Winner,\
ImprovementRatio,Phase1TimeMs,Phase2TimeMs,Phase3TimeMs,Phase4TimeMs,TotalTimeMs,FinalDistance";

const ABLATION_HEADER: &str = "Dataset,Nodes,KDTreePhase1TimeMs,BruteForcePhase1TimeMs,\
KDTreeCandidateEdges,BruteForceCandidateEdges,DistanceBefore2Opt,DistanceAfter2Opt,\
Phase4_2OptTimeMs,ImprovementRatio2Opt,TotalTimeKDTreeMs,TotalTimeBruteForceMs,\
FinalDistanceKDTree,FinalDistanceBruteForce,TimeComplexityRatio,QualityDifference";

/// Writes the tour result file plus its `<stem>_coordinates.txt`
/// sibling, the pair the plotting scripts consume together.
pub fn write_tour_files(
    path: &Path,
    tour: &[usize],
    coords: &[(f64, f64)],
    total_cost: i64,
) -> Result<()> {
    let mut body = String::from("# TSP Tour Result\n");
    body.push_str(&format!("# Total Distance: {total_cost}\n"));
    body.push_str("# Tour Order:\n");
    let ids: Vec<String> = tour.iter().map(ToString::to_string).collect();
    body.push_str(&ids.join(" "));
    body.push('\n');
    fs::write(path, body)?;

    let coord_path = coordinates_path(path);
    let mut coord_body = String::from("# Node Coordinates (node_id x y)\n");
    for (id, (x, y)) in coords.iter().enumerate() {
        coord_body.push_str(&format!("{id} {x:.4} {y:.4}\n"));
    }
    fs::write(&coord_path, coord_body)?;

    log::info!(
        "report: wrote tour={} coordinates={}",
        path.display(),
        coord_path.display()
    );
    Ok(())
}

/// One `Algorithm,Dataset,Nodes,TimeMs,Distance` row, header written
/// on first touch so runs over many instances can share a file.
pub fn append_benchmark_row(
    path: &Path,
    algorithm: &str,
    dataset: &str,
    nodes: usize,
    time_ms: f64,
    distance: i64,
) -> Result<()> {
    let mut time = ryu::Buffer::new();
    let row = format!("{algorithm},{dataset},{nodes},{},{distance}", time.format(time_ms));
    append_csv_row(path, BENCHMARK_HEADER, &row)
}

pub fn append_spatial_stats(path: &Path, stats: &SpatialStats) -> Result<()> {
    let fields = float_fields(&[
        stats.greedy_length,
        stats.mst_length,
        stats.improvement_ratio,
        stats.phase1_ms,
        stats.phase2_ms,
        stats.phase3_ms,
        stats.phase4_ms,
        stats.total_ms,
        stats.final_length,
    ]);
    let row = format!(
        "{},{},{},{},{},{},{},{},{},{},{},{}",
        stats.dataset,
        stats.nodes,
        fields[0],
        fields[1],
        stats.winner,
        fields[2],
        fields[3],
        fields[4],
        fields[5],
        fields[6],
        fields[7],
        fields[8],
    );
    append_csv_row(path, SPATIAL_HEADER, &row)
}

pub fn append_ablation_stats(path: &Path, stats: &AblationStats) -> Result<()> {
    let fields = float_fields(&[
        stats.kdtree_phase1_ms,
        stats.bruteforce_phase1_ms,
        stats.kdtree_candidate_edges,
        stats.bruteforce_candidate_edges,
        stats.length_before_refine,
        stats.length_after_refine,
        stats.refine_ms,
        stats.refine_improvement_ratio,
        stats.kdtree_total_ms,
        stats.bruteforce_total_ms,
        stats.kdtree_final_length,
        stats.bruteforce_final_length,
        stats.speed_ratio,
        stats.quality_gap,
    ]);
    let row = format!("{},{},{}", stats.dataset, stats.nodes, fields.join(","));
    append_csv_row(path, ABLATION_HEADER, &row)
}

fn float_fields(values: &[f64]) -> Vec<String> {
    let mut buf = ryu::Buffer::new();
    values.iter().map(|v| buf.format(*v).to_owned()).collect()
}

fn append_csv_row(path: &Path, header: &str, row: &str) -> Result<()> {
    let write_header = !path.exists();
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if write_header {
        writeln!(file, "{header}")?;
    }
    writeln!(file, "{row}")?;
    Ok(())
}

fn coordinates_path(tour_path: &Path) -> PathBuf {
    let stem = tour_path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("tour");
    tour_path.with_file_name(format!("{stem}_coordinates.txt"))
}
