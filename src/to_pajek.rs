//! Pajek writer used by the simulator.

use crate::graph::Graph;
use crate::types::*;
use std::fs::File;
use std::io::{BufWriter, Write};

/// Write the graph as a Pajek file: `*vertices` header (with the mode-A
/// count for bipartite graphs) followed by an `*arcs` or `*edges` section
/// of 1-based pairs.
pub fn write_pajek(graph: &Graph, path: &str) -> Result<()> {
    let file = File::create(path).map_err(|e| format!("Cannot create {}: {}.", path, e))?;
    let mut writer = BufWriter::new(file);
    let fail = |e: std::io::Error| format!("Cannot write {}: {}.", path, e);
    match graph.is_bipartite() {
        true => writeln!(
            writer,
            "*vertices {} {}",
            graph.get_nodes_number(),
            graph.get_mode_a_number()
        )
        .map_err(fail)?,
        false => writeln!(writer, "*vertices {}", graph.get_nodes_number()).map_err(fail)?,
    }
    writeln!(
        writer,
        "{}",
        if graph.is_directed() { "*arcs" } else { "*edges" }
    )
    .map_err(fail)?;
    for (src, dst) in graph.iter_edges() {
        writeln!(writer, "{} {}", src + 1, dst + 1).map_err(fail)?;
    }
    writer.flush().map_err(fail)
}
