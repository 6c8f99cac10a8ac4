//! Graph, weight, and coloring files.
//!
//! Graphs use the DIMACS `.col` format:
//!
//! ```text
//! c optional comment lines
//! p edge <vertices> <edges>
//! e <u> <v>
//! ```
//!
//! with 1-based endpoints. Weight files hold one non-negative integer per
//! vertex, separated by any whitespace.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::coloring::Coloring;
use crate::error::{ColoringError, Result};
use crate::graph::Graph;

/// Parses a DIMACS `.col` graph.
///
/// Self-loops and repeated edges are ignored. Node descriptor lines (`n`)
/// and other unknown line types are skipped.
///
/// # Errors
/// [`ColoringError::Parse`] for a missing or malformed problem line, an edge
/// before the problem line, or an endpoint outside `1..=vertices`.
///
/// # Examples
///
/// ```
/// use u_bitea::io::read_dimacs;
///
/// let text = "c triangle\np edge 3 3\ne 1 2\ne 2 3\ne 3 1\n";
/// let graph = read_dimacs(text.as_bytes()).unwrap();
/// assert_eq!(graph.size(), 3);
/// assert_eq!(graph.edge_count(), 3);
/// ```
pub fn read_dimacs<R: BufRead>(reader: R) -> Result<Graph> {
    let mut size: Option<usize> = None;
    let mut declared_edges = 0usize;
    let mut edges: Vec<(usize, usize)> = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            None | Some("c") => {}
            Some("p") => {
                if size.is_some() {
                    return Err(ColoringError::parse(lineno, "duplicate problem line"));
                }
                let _format = tokens
                    .next()
                    .ok_or_else(|| ColoringError::parse(lineno, "missing problem format"))?;
                let n = parse_number(tokens.next(), lineno, "vertex count")?;
                declared_edges = parse_number(tokens.next(), lineno, "edge count")?;
                if n == 0 {
                    return Err(ColoringError::parse(lineno, "vertex count must be positive"));
                }
                size = Some(n);
            }
            Some("e") => {
                let n = size.ok_or_else(|| {
                    ColoringError::parse(lineno, "edge line before problem line")
                })?;
                let u: usize = parse_number(tokens.next(), lineno, "edge endpoint")?;
                let v: usize = parse_number(tokens.next(), lineno, "edge endpoint")?;
                if u == 0 || v == 0 || u > n || v > n {
                    return Err(ColoringError::parse(
                        lineno,
                        format!("edge ({u}, {v}) outside 1..={n}"),
                    ));
                }
                edges.push((u - 1, v - 1));
            }
            Some(_) => {}
        }
    }

    let size = size.ok_or_else(|| ColoringError::parse(0, "missing problem line"))?;
    if edges.len() != declared_edges {
        log::warn!(
            "problem line declares {declared_edges} edges, file lists {}",
            edges.len()
        );
    }
    Graph::from_edges(size, &edges)
}

/// Parses exactly `size` whitespace-separated vertex weights.
///
/// # Errors
/// [`ColoringError::Parse`] for a token that is not a non-negative integer,
/// [`ColoringError::InvalidGraph`] if the count differs from `size`.
pub fn read_weights<R: BufRead>(reader: R, size: usize) -> Result<Vec<u64>> {
    let mut weights = Vec::with_capacity(size);
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        for token in line.split_whitespace() {
            let w = token.parse::<u64>().map_err(|e| {
                ColoringError::parse(idx + 1, format!("invalid weight {token:?}: {e}"))
            })?;
            weights.push(w);
        }
    }
    if weights.len() != size {
        return Err(ColoringError::graph(format!(
            "expected {size} weights, got {}",
            weights.len()
        )));
    }
    Ok(weights)
}

/// Writes `header` followed by one line per vertex holding its color index,
/// or `-1` for an uncolored vertex.
pub fn write_coloring<W: Write>(mut writer: W, header: &str, coloring: &Coloring) -> Result<()> {
    if !header.is_empty() {
        writeln!(writer, "{}", header.trim_end())?;
    }
    for color in coloring.assignment() {
        match color {
            Some(c) => writeln!(writer, "{c}")?,
            None => writeln!(writer, "-1")?,
        }
    }
    writer.flush()?;
    Ok(())
}

/// Loads a DIMACS graph from `graph_path`, with weights from `weights_path`
/// or vertex degrees when `None`.
pub fn load_instance(graph_path: &Path, weights_path: Option<&Path>) -> Result<Graph> {
    let graph = read_dimacs(BufReader::new(File::open(graph_path)?))?;
    match weights_path {
        Some(path) => {
            let weights = read_weights(BufReader::new(File::open(path)?), graph.size())?;
            graph.with_weights(weights)
        }
        None => Ok(graph),
    }
}

fn parse_number<T: std::str::FromStr>(token: Option<&str>, line: usize, what: &str) -> Result<T> {
    let token = token.ok_or_else(|| ColoringError::parse(line, format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| ColoringError::parse(line, format!("invalid {what} {token:?}")))
}
