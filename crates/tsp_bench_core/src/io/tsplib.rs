use std::{fs, path::Path, str::FromStr};

use crate::error::{Error, Result};
use crate::graph::CostMatrix;

const DIMENSION_KEY: &str = "DIMENSION";
const EDGE_WEIGHT_TYPE_KEY: &str = "EDGE_WEIGHT_TYPE";
const EDGE_WEIGHT_FORMAT_KEY: &str = "EDGE_WEIGHT_FORMAT";
const EXPLICIT_TYPE: &str = "EXPLICIT";
const UPPER_ROW_FORMAT: &str = "UPPER_ROW";
const NODE_COORD_SECTION: &str = "NODE_COORD_SECTION";
const DISPLAY_DATA_SECTION: &str = "DISPLAY_DATA_SECTION";
const EDGE_WEIGHT_SECTION: &str = "EDGE_WEIGHT_SECTION";

/// Coordinate list of a TSPLIB instance file, zero-based in parse
/// order. `DISPLAY_DATA_SECTION` wins over `NODE_COORD_SECTION` so
/// explicit-matrix instances with display coordinates still plot.
pub fn load_coordinates(path: &Path) -> Result<Vec<(f64, f64)>> {
    let text = fs::read_to_string(path)?;
    parse_coordinates(&text)
}

/// Integer cost matrix of a TSPLIB instance file: either the explicit
/// `UPPER_ROW` triangle or rounded Euclidean costs over the node
/// coordinates.
pub fn load_cost_matrix(path: &Path) -> Result<CostMatrix> {
    let text = fs::read_to_string(path)?;
    parse_cost_matrix(&text)
}

pub fn parse_coordinates(text: &str) -> Result<Vec<(f64, f64)>> {
    let mut dimension = None;
    let mut lines = text.lines();
    let mut in_section = false;

    for line in lines.by_ref() {
        if line.contains(DIMENSION_KEY) {
            dimension = Some(parse_dimension(line)?);
        }
        if line.contains(DISPLAY_DATA_SECTION) || line.contains(NODE_COORD_SECTION) {
            in_section = true;
            break;
        }
    }

    let Some(dimension) = dimension else {
        return Err(Error::invalid_data("DIMENSION header missing"));
    };
    if !in_section {
        return Err(Error::invalid_data("no coordinate section found"));
    }

    let mut tokens = lines.flat_map(str::split_whitespace);
    read_indexed_coords(&mut tokens, dimension)
}

pub fn parse_cost_matrix(text: &str) -> Result<CostMatrix> {
    let mut dimension = None;
    let mut explicit = false;
    let mut upper_row = false;
    let mut lines = text.lines();
    let mut section = None;

    for line in lines.by_ref() {
        if line.contains(DIMENSION_KEY) {
            dimension = Some(parse_dimension(line)?);
        }
        if line.contains(EDGE_WEIGHT_TYPE_KEY) && line.contains(EXPLICIT_TYPE) {
            explicit = true;
        }
        if line.contains(EDGE_WEIGHT_FORMAT_KEY) && line.contains(UPPER_ROW_FORMAT) {
            upper_row = true;
        }
        if line.contains(EDGE_WEIGHT_SECTION) {
            section = Some(EDGE_WEIGHT_SECTION);
            break;
        }
        // Explicit instances keep scanning for the weight section even
        // when coordinates come first.
        if line.contains(NODE_COORD_SECTION) && !explicit {
            section = Some(NODE_COORD_SECTION);
            break;
        }
    }

    let Some(dimension) = dimension else {
        return Err(Error::invalid_data("DIMENSION header missing"));
    };

    match section {
        Some(EDGE_WEIGHT_SECTION) => {
            if !explicit {
                return Err(Error::invalid_data(
                    "EDGE_WEIGHT_SECTION without EDGE_WEIGHT_TYPE EXPLICIT",
                ));
            }
            if !upper_row {
                return Err(Error::invalid_data(
                    "only EDGE_WEIGHT_FORMAT UPPER_ROW is supported",
                ));
            }
            let mut tokens = lines.flat_map(str::split_whitespace);
            let mut matrix = CostMatrix::new(dimension);
            for i in 0..dimension {
                for j in (i + 1)..dimension {
                    let token = next_token(&mut tokens, "edge weight")?;
                    matrix.set(i, j, parse_number(token, "edge weight")?);
                }
            }
            Ok(matrix)
        }
        Some(_) => {
            let mut tokens = lines.flat_map(str::split_whitespace);
            let coords = read_indexed_coords(&mut tokens, dimension)?;
            Ok(CostMatrix::from_coordinates(&coords))
        }
        None => Err(Error::invalid_data(
            "no coordinate or edge weight section found",
        )),
    }
}

/// `index x y` triples, one per node, 1-based indices as TSPLIB writes
/// them. Tolerates line breaks anywhere since the reader is token
/// oriented.
fn read_indexed_coords<'a, I>(tokens: &mut I, dimension: usize) -> Result<Vec<(f64, f64)>>
where
    I: Iterator<Item = &'a str>,
{
    let mut coords = vec![(0.0, 0.0); dimension];
    for _ in 0..dimension {
        let index: usize = parse_number(next_token(tokens, "node index")?, "node index")?;
        let x: f64 = parse_number(next_token(tokens, "x coordinate")?, "x coordinate")?;
        let y: f64 = parse_number(next_token(tokens, "y coordinate")?, "y coordinate")?;
        if index == 0 || index > dimension {
            return Err(Error::invalid_data(format!(
                "node index {index} outside 1..={dimension}"
            )));
        }
        coords[index - 1] = (x, y);
    }
    Ok(coords)
}

fn parse_dimension(line: &str) -> Result<usize> {
    let value = match line.split_once(':') {
        Some((_, rest)) => rest,
        None => line
            .split_once(char::is_whitespace)
            .map(|(_, rest)| rest)
            .unwrap_or(""),
    };
    let token = value.split_whitespace().next().unwrap_or("");
    parse_number(token, "DIMENSION")
}

fn next_token<'a, I>(tokens: &mut I, what: &str) -> Result<&'a str>
where
    I: Iterator<Item = &'a str>,
{
    tokens
        .next()
        .ok_or_else(|| Error::invalid_data(format!("unexpected end of file reading {what}")))
}

fn parse_number<T: FromStr>(token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| Error::invalid_data(format!("bad {what}: {token}")))
}

#[cfg(test)]
mod tests {
    use super::{parse_coordinates, parse_cost_matrix};
    use crate::error::Error;

    const EUCLIDEAN: &str = "\
NAME: toy
TYPE: TSP
DIMENSION: 4
EDGE_WEIGHT_TYPE: EUC_2D
NODE_COORD_SECTION
1 0.0 0.0
2 0.0 3.0
3 4.0 3.0
4 4.0 0.0
EOF
";

    const EXPLICIT_UPPER_ROW: &str = "\
NAME: tiny
TYPE: TSP
DIMENSION: 3
EDGE_WEIGHT_TYPE: EXPLICIT
EDGE_WEIGHT_FORMAT: UPPER_ROW
EDGE_WEIGHT_SECTION
10 20
30
EOF
";

    const EXPLICIT_WITH_DISPLAY: &str = "\
NAME: shown
TYPE: TSP
DIMENSION: 2
EDGE_WEIGHT_TYPE: EXPLICIT
EDGE_WEIGHT_FORMAT: UPPER_ROW
EDGE_WEIGHT_SECTION
7
DISPLAY_DATA_SECTION
1 1.5 2.5
2 3.5 4.5
EOF
";

    #[test]
    fn coordinates_read_from_node_coord_section() {
        let coords = parse_coordinates(EUCLIDEAN).unwrap();
        assert_eq!(coords, vec![(0.0, 0.0), (0.0, 3.0), (4.0, 3.0), (4.0, 0.0)]);
    }

    #[test]
    fn euclidean_matrix_rounds_node_distances() {
        let matrix = parse_cost_matrix(EUCLIDEAN).unwrap();
        assert_eq!(matrix.node_count(), 4);
        assert_eq!(matrix.cost(0, 1), 3);
        assert_eq!(matrix.cost(1, 2), 4);
        assert_eq!(matrix.cost(0, 2), 5);
    }

    #[test]
    fn explicit_upper_row_fills_both_triangles() {
        let matrix = parse_cost_matrix(EXPLICIT_UPPER_ROW).unwrap();
        assert_eq!(matrix.node_count(), 3);
        assert_eq!(matrix.cost(0, 1), 10);
        assert_eq!(matrix.cost(0, 2), 20);
        assert_eq!(matrix.cost(1, 2), 30);
        assert_eq!(matrix.cost(2, 1), 30);
        assert_eq!(matrix.cost(1, 1), 0);
    }

    #[test]
    fn display_data_supplies_coordinates_for_explicit_instances() {
        let coords = parse_coordinates(EXPLICIT_WITH_DISPLAY).unwrap();
        assert_eq!(coords, vec![(1.5, 2.5), (3.5, 4.5)]);

        let matrix = parse_cost_matrix(EXPLICIT_WITH_DISPLAY).unwrap();
        assert_eq!(matrix.cost(0, 1), 7);
    }

    #[test]
    fn out_of_order_node_indices_land_in_their_slots() {
        let text = "\
DIMENSION: 3
NODE_COORD_SECTION
2 1.0 1.0
1 0.0 0.0
3 2.0 2.0
";
        let coords = parse_coordinates(text).unwrap();
        assert_eq!(coords, vec![(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]);
    }

    #[test]
    fn missing_dimension_is_an_error() {
        let text = "NODE_COORD_SECTION\n1 0.0 0.0\n";
        match parse_coordinates(text) {
            Err(Error::InvalidData(message)) => assert!(message.contains("DIMENSION")),
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn missing_section_is_an_error() {
        let text = "DIMENSION: 2\nEOF\n";
        assert!(parse_coordinates(text).is_err());
        assert!(parse_cost_matrix(text).is_err());
    }

    #[test]
    fn truncated_coordinates_are_an_error() {
        let text = "DIMENSION: 3\nNODE_COORD_SECTION\n1 0.0 0.0\n2 1.0\n";
        match parse_coordinates(text) {
            Err(Error::InvalidData(message)) => {
                assert!(message.contains("unexpected end") || message.contains("bad"))
            }
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_node_index_is_an_error() {
        let text = "DIMENSION: 2\nNODE_COORD_SECTION\n1 0.0 0.0\n5 1.0 1.0\n";
        assert!(parse_coordinates(text).is_err());
    }

    #[test]
    fn unsupported_explicit_format_is_an_error() {
        let text = "\
DIMENSION: 3
EDGE_WEIGHT_TYPE: EXPLICIT
EDGE_WEIGHT_FORMAT: FULL_MATRIX
EDGE_WEIGHT_SECTION
0 1 2
1 0 3
2 3 0
";
        match parse_cost_matrix(text) {
            Err(Error::InvalidData(message)) => assert!(message.contains("UPPER_ROW")),
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }
}
