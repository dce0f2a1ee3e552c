use std::{path::Path, time::Duration};

use crate::node::Point;

/// Milliseconds as a float, the unit every phase timing is reported in.
pub fn millis(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1_000.0
}

/// Dataset label for CSV rows: instance file name without extension.
pub fn dataset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_owned)
        .unwrap_or_else(|| "unknown".to_owned())
}

/// Logs edge metrics of a closed tour: total, longest and mean edge
/// length. The longest/mean gap is what the selective refiner feeds on.
pub fn log_edge_metrics(points: &[Point], tour: &[usize], label: &str) {
    if tour.len() < 2 {
        log::debug!("metrics: {label} edges=0 total=0 longest=0 avg=0");
        return;
    }

    let mut total = 0.0;
    let mut longest = 0.0_f64;
    for pair in tour.windows(2) {
        let d = points[pair[0]].dist(&points[pair[1]]);
        total += d;
        longest = longest.max(d);
    }
    let edges = tour.len() - 1;
    let avg = total / edges as f64;

    log::debug!("metrics: {label} edges={edges} total={total:.1} longest={longest:.1} avg={avg:.1}");
}
