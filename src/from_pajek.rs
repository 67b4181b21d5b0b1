//! Readers for the Pajek network format, the whitespace attribute tables,
//! the period file of the citation variant and the fixed-node list.
//!
//! All errors carry the offending filename and line number.

use crate::attributes::AttributeColumn;
use crate::graph::Graph;
use crate::types::*;
use log::info;
use std::fs::File;
use std::io::{BufRead, BufReader};

/// The parsed content of a Pajek file: the header and the raw pair list,
/// before any insertion into a graph.
#[derive(Clone, Debug)]
pub struct PajekFile {
    pub nodes_number: NodeT,
    /// Mode-A node count when the vertices header carries a second figure.
    pub mode_a_number: Option<NodeT>,
    /// Whether the pairs came from an `*arcs` section.
    pub directed: bool,
    /// Zero-based pairs, in file order, self-loops already dropped.
    pub edges: Vec<(NodeT, NodeT)>,
}

/// Read a Pajek edge list.
///
/// # Arguments
/// * `path`: &str - Path of the network file.
///
/// The header is `*vertices N` (bipartite: `*vertices N N_A`); per-vertex
/// lines up to the `*edges` / `*arcs` marker are ignored; pairs are
/// whitespace separated 1-based IDs. Self-loops are silently dropped here;
/// duplicates survive to the insertion pass, which skips them.
pub fn read_pajek(path: &str) -> Result<PajekFile> {
    let file = File::open(path).map_err(|e| format!("Cannot open {}: {}.", path, e))?;
    let mut lines = BufReader::new(file).lines().enumerate();
    let (nodes_number, mode_a_number) = loop {
        let (number, line) = match lines.next() {
            Some((number, line)) => (
                number,
                line.map_err(|e| format!("Cannot read {}: {}.", path, e))?,
            ),
            None => return Err(format!("{}: missing *vertices header.", path)),
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let marker = tokens.next().unwrap_or("").to_lowercase();
        if marker != "*vertices" {
            return Err(format!(
                "{}:{}: expected *vertices header, found {}.",
                path,
                number + 1,
                trimmed
            ));
        }
        let nodes_number: NodeT = tokens
            .next()
            .ok_or_else(|| format!("{}:{}: *vertices without a node count.", path, number + 1))?
            .parse()
            .map_err(|e| format!("{}:{}: invalid node count: {}.", path, number + 1, e))?;
        let mode_a_number = match tokens.next() {
            Some(token) => Some(token.parse::<NodeT>().map_err(|e| {
                format!("{}:{}: invalid mode-A count: {}.", path, number + 1, e)
            })?),
            None => None,
        };
        break (nodes_number, mode_a_number);
    };
    let mut directed = None;
    let mut edges = Vec::new();
    let mut self_loops = 0u64;
    for (number, line) in lines {
        let line = line.map_err(|e| format!("Cannot read {}: {}.", path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let lowered = trimmed.to_lowercase();
        if lowered.starts_with('*') {
            directed = match lowered.split_whitespace().next() {
                Some("*edges") => Some(false),
                Some("*arcs") => Some(true),
                // A further *vertices block or an unknown marker.
                _ => {
                    return Err(format!(
                        "{}:{}: unexpected section marker {}.",
                        path,
                        number + 1,
                        trimmed
                    ))
                }
            };
            continue;
        }
        if directed.is_none() {
            // Vertex label line; the core has no use for labels.
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let src: NodeT = tokens
            .next()
            .ok_or_else(|| format!("{}:{}: empty edge line.", path, number + 1))?
            .parse()
            .map_err(|e| format!("{}:{}: invalid node ID: {}.", path, number + 1, e))?;
        let dst: NodeT = tokens
            .next()
            .ok_or_else(|| format!("{}:{}: edge line with one endpoint.", path, number + 1))?
            .parse()
            .map_err(|e| format!("{}:{}: invalid node ID: {}.", path, number + 1, e))?;
        if src == 0 || dst == 0 || src > nodes_number || dst > nodes_number {
            return Err(format!(
                "{}:{}: node ID out of range 1..{}.",
                path,
                number + 1,
                nodes_number
            ));
        }
        if src == dst {
            self_loops += 1;
            continue;
        }
        edges.push((src - 1, dst - 1));
    }
    let directed = directed
        .ok_or_else(|| format!("{}: missing *edges or *arcs section.", path))?;
    if self_loops > 0 {
        info!("Dropped {} self-loops while reading {}.", self_loops, path);
    }
    Ok(PajekFile {
        nodes_number,
        mode_a_number,
        directed,
        edges,
    })
}

/// Insert the pairs of a parsed Pajek file into the graph, invoking the
/// callback on the pre-insertion graph for every edge that is actually
/// inserted. Duplicates are silently skipped. This is the bootstrap hook
/// the estimator uses to accumulate observed statistics.
pub fn insert_edge_list<F>(graph: &mut Graph, edges: &[(NodeT, NodeT)], mut on_edge: F) -> Result<()>
where
    F: FnMut(&Graph, NodeT, NodeT),
{
    let mut duplicates = 0u64;
    for &(src, dst) in edges {
        if graph.has_edge(src, dst) {
            duplicates += 1;
            continue;
        }
        if graph.is_bipartite() && graph.is_mode_a(src) == graph.is_mode_a(dst) {
            return Err(format!(
                "The bipartite edge ({}, {}) joins two nodes of the same mode.",
                src + 1,
                dst + 1
            ));
        }
        if graph.has_periods() && graph.get_node_period(src) < graph.get_node_period(dst) {
            return Err(format!(
                "The arc ({}, {}) runs toward a later period.",
                src + 1,
                dst + 1
            ));
        }
        on_edge(graph, src, dst);
        graph.insert_edge(src, dst);
    }
    if duplicates > 0 {
        info!("Skipped {} duplicate edges.", duplicates);
    }
    Ok(())
}

fn read_attribute_table<T, P>(
    path: &str,
    nodes_number: NodeT,
    mut parse: P,
) -> Result<Vec<AttributeColumn<T>>>
where
    P: FnMut(&str) -> Result<Option<T>>,
{
    let file = File::open(path).map_err(|e| format!("Cannot open {}: {}.", path, e))?;
    let mut lines = BufReader::new(file).lines().enumerate();
    let names: Vec<String> = match lines.next() {
        Some((_, line)) => line
            .map_err(|e| format!("Cannot read {}: {}.", path, e))?
            .split_whitespace()
            .map(|name| name.to_string())
            .collect(),
        None => return Err(format!("{}: empty attribute file.", path)),
    };
    if names.is_empty() {
        return Err(format!("{}:1: header without attribute names.", path));
    }
    let mut columns: Vec<Vec<Option<T>>> = names.iter().map(|_| Vec::new()).collect();
    for (number, line) in lines {
        let line = line.map_err(|e| format!("Cannot read {}: {}.", path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let row: Vec<&str> = line.split_whitespace().collect();
        if row.len() != names.len() {
            return Err(format!(
                "{}:{}: row of {} values under a header of {} names.",
                path,
                number + 1,
                row.len(),
                names.len()
            ));
        }
        for (column, token) in columns.iter_mut().zip(row.into_iter()) {
            column.push(
                parse(token).map_err(|e| format!("{}:{}: {}", path, number + 1, e))?,
            );
        }
    }
    if columns[0].len() != nodes_number as usize {
        return Err(format!(
            "{}: {} attribute rows for a graph of {} nodes.",
            path,
            columns[0].len(),
            nodes_number
        ));
    }
    Ok(names
        .into_iter()
        .zip(columns.into_iter())
        .map(|(name, values)| AttributeColumn::new(name, values))
        .collect())
}

/// Read a binary attribute table: values 0, 1 or NA.
pub fn read_binary_attributes(path: &str, nodes_number: NodeT) -> Result<Vec<AttributeColumn<bool>>> {
    read_attribute_table(path, nodes_number, |token| match token {
        "NA" => Ok(None),
        "0" => Ok(Some(false)),
        "1" => Ok(Some(true)),
        _ => Err(format!("invalid binary value {}.", token)),
    })
}

/// Read a categorical attribute table: non-negative integer codes or NA.
pub fn read_categorical_attributes(
    path: &str,
    nodes_number: NodeT,
) -> Result<Vec<AttributeColumn<CategoryT>>> {
    read_attribute_table(path, nodes_number, |token| match token {
        "NA" => Ok(None),
        _ => token
            .parse::<CategoryT>()
            .map(Some)
            .map_err(|e| format!("invalid categorical value {}: {}.", token, e)),
    })
}

/// Read a continuous attribute table: real values or NA.
pub fn read_continuous_attributes(
    path: &str,
    nodes_number: NodeT,
) -> Result<Vec<AttributeColumn<f64>>> {
    read_attribute_table(path, nodes_number, |token| match token {
        "NA" => Ok(None),
        _ => token
            .parse::<f64>()
            .map(Some)
            .map_err(|e| format!("invalid continuous value {}: {}.", token, e)),
    })
}

/// Read the period file of the citation variant: a single integer column
/// with a header line, no missing values allowed.
pub fn read_periods(path: &str, nodes_number: NodeT) -> Result<Vec<PeriodT>> {
    let columns = read_attribute_table(path, nodes_number, |token| match token {
        "NA" => Err("periods do not admit NA.".to_string()),
        _ => token
            .parse::<PeriodT>()
            .map(Some)
            .map_err(|e| format!("invalid period {}: {}.", token, e)),
    })?;
    Ok(columns
        .into_iter()
        .next()
        .map(|column| column.values.into_iter().map(|v| v.unwrap_or(0)).collect())
        .unwrap_or_default())
}

/// Read the fixed-node list: one 1-based node ID per line, no header.
pub fn read_fixed_nodes(path: &str, nodes_number: NodeT) -> Result<Vec<NodeT>> {
    let file = File::open(path).map_err(|e| format!("Cannot open {}: {}.", path, e))?;
    let mut nodes = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| format!("Cannot read {}: {}.", path, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let node: NodeT = trimmed
            .parse()
            .map_err(|e| format!("{}:{}: invalid node ID: {}.", path, number + 1, e))?;
        if node == 0 || node > nodes_number {
            return Err(format!(
                "{}:{}: node ID out of range 1..{}.",
                path,
                number + 1,
                nodes_number
            ));
        }
        nodes.push(node - 1);
    }
    Ok(nodes)
}
