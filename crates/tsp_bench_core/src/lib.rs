//! TSP construction heuristics over planar TSPLIB instances, with a
//! KD-tree candidate pipeline and selective 2-opt refinement.

pub mod algo;
mod error;
mod graph;
mod heap;
pub mod io;
pub mod logging;
mod node;
pub mod runner;
mod spatial;
mod tour;
pub mod utils;

pub use error::{Error, Result};
pub use graph::{CostMatrix, euclidean_cost};
pub use node::Point;
pub use tour::{is_closed_cycle, tour_length};
