use crate::error::{Error, Result};
use crate::graph::CostMatrix;

/// Largest instance the exact solver accepts. The DP tables hold
/// `2^n * n` entries, about 100 MB of f32 at this bound.
pub const MAX_EXACT_NODES: usize = 20;

const NO_PARENT: u8 = u8::MAX;

/// Held-Karp subset dynamic program, exact up to [`MAX_EXACT_NODES`].
/// Returns the optimal closed tour anchored at node 0.
pub fn held_karp_tour(matrix: &CostMatrix) -> Result<Vec<usize>> {
    let n = matrix.node_count();
    if n == 0 {
        return Ok(Vec::new());
    }
    if n > MAX_EXACT_NODES {
        return Err(Error::invalid_input(format!(
            "exact solver handles at most {MAX_EXACT_NODES} nodes, got {n}"
        )));
    }
    if n == 1 {
        return Ok(vec![0, 0]);
    }

    let costs: Vec<f32> = (0..n)
        .flat_map(|u| (0..n).map(move |v| matrix.cost(u, v) as f32))
        .collect();
    let subsets = 1_usize << n;

    // best[S * n + k]: cheapest path 0 -> .. -> k visiting exactly the
    // set S of non-zero nodes, ending at k.
    let mut best = vec![f32::INFINITY; subsets * n];
    let mut parent = vec![NO_PARENT; subsets * n];

    for k in 1..n {
        best[(1 << k) * n + k] = costs[k];
    }

    for size in 2..n {
        for set in 1..subsets {
            if set & 1 != 0 || (set as u32).count_ones() as usize != size {
                continue;
            }
            for k in 1..n {
                if set & (1 << k) == 0 {
                    continue;
                }
                let without_k = set ^ (1 << k);
                for m in 1..n {
                    if m == k || without_k & (1 << m) == 0 {
                        continue;
                    }
                    let via_m = best[without_k * n + m] + costs[m * n + k];
                    if via_m < best[set * n + k] {
                        best[set * n + k] = via_m;
                        parent[set * n + k] = m as u8;
                    }
                }
            }
        }
    }

    // All nodes except 0 visited; close the cycle through the cheapest
    // final hop back to the start.
    let full = subsets - 2;
    let mut last = None;
    let mut best_cost = f32::INFINITY;
    for k in 1..n {
        let closed = best[full * n + k] + costs[k * n];
        if closed < best_cost {
            best_cost = closed;
            last = Some(k);
        }
    }
    let Some(last) = last else {
        return Err(Error::other("exact solver found no closed tour"));
    };

    let mut tour = Vec::with_capacity(n + 1);
    let mut set = full;
    let mut node = Some(last);
    while let Some(u) = node {
        if set == 0 {
            break;
        }
        tour.push(u);
        let prev = parent[set * n + u];
        set ^= 1 << u;
        node = (prev != NO_PARENT).then_some(prev as usize);
    }
    tour.push(0);
    tour.reverse();
    tour.push(0);

    log::debug!("held_karp: n={n} optimal={best_cost}");
    Ok(tour)
}
