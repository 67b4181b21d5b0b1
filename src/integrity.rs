//! Full re-derivation of the graph invariants, used by tests and debug
//! tooling. The estimator never calls this on the hot path.

use crate::graph::Graph;
use crate::types::*;
use hashbrown::HashMap;
use rayon::prelude::*;

impl Graph {
    /// Re-derive every maintained invariant from the edge list and compare
    /// it with the incremental state: neighbour-list symmetry, mode and
    /// period constraints, edge-index consistency and all active two-path
    /// tables.
    pub fn check_integrity(&self) -> Result<()> {
        self.check_edge_index()?;
        self.check_neighbour_lists()?;
        self.check_mode_and_period_constraints()?;
        self.check_two_path_tables()
    }

    fn check_edge_index(&self) -> Result<()> {
        if self.edge_index.len() != self.edge_list.len() {
            return Err(format!(
                "The edge index holds {} keys for {} edges.",
                self.edge_index.len(),
                self.edge_list.len()
            ));
        }
        for (position, &(src, dst)) in self.edge_list.iter().enumerate() {
            if self.edge_key(src, dst) != (src, dst) {
                return Err(format!(
                    "The edge list entry ({}, {}) is not in canonical orientation.",
                    src, dst
                ));
            }
            match self.edge_index.get(&(src, dst)) {
                Some(&indexed) if indexed == position => {}
                Some(&indexed) => {
                    return Err(format!(
                        "The edge ({}, {}) sits at position {} but is indexed at {}.",
                        src, dst, position, indexed
                    ))
                }
                None => {
                    return Err(format!("The edge ({}, {}) is missing from the index.", src, dst))
                }
            }
        }
        Ok(())
    }

    fn check_neighbour_lists(&self) -> Result<()> {
        let n = self.nodes_number as usize;
        if self.directed {
            let mut out_degrees = vec![0 as NodeT; n];
            let mut in_degrees = vec![0 as NodeT; n];
            for &(src, dst) in self.edge_list.iter() {
                out_degrees[src as usize] += 1;
                in_degrees[dst as usize] += 1;
            }
            for node in 0..self.nodes_number {
                if self.get_out_degree(node) != out_degrees[node as usize]
                    || self.get_in_degree(node) != in_degrees[node as usize]
                {
                    return Err(format!(
                        "Node {} has degree lists of lengths ({}, {}) but the edge list gives ({}, {}).",
                        node,
                        self.get_in_degree(node),
                        self.get_out_degree(node),
                        in_degrees[node as usize],
                        out_degrees[node as usize]
                    ));
                }
            }
            for node in 0..self.nodes_number {
                for k in self.iter_out_neighbours(node) {
                    if !self.has_edge(node, k) {
                        return Err(format!(
                            "Node {} lists {} as out-neighbour without the arc.",
                            node, k
                        ));
                    }
                }
                for k in self.iter_in_neighbours(node) {
                    if !self.has_edge(k, node) {
                        return Err(format!(
                            "Node {} lists {} as in-neighbour without the arc.",
                            node, k
                        ));
                    }
                }
            }
        } else {
            let mut degrees = vec![0 as NodeT; n];
            for &(src, dst) in self.edge_list.iter() {
                degrees[src as usize] += 1;
                degrees[dst as usize] += 1;
            }
            for node in 0..self.nodes_number {
                if self.get_node_degree(node) != degrees[node as usize] {
                    return Err(format!(
                        "Node {} has a neighbour list of length {} but the edge list gives degree {}.",
                        node,
                        self.get_node_degree(node),
                        degrees[node as usize]
                    ));
                }
                for k in self.iter_neighbours(node) {
                    if !self.has_edge(node, k) || !self.has_edge(k, node) {
                        return Err(format!(
                            "The undirected edge ({}, {}) is not symmetric.",
                            node, k
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn check_mode_and_period_constraints(&self) -> Result<()> {
        for &(src, dst) in self.edge_list.iter() {
            if src == dst {
                return Err(format!("Self-loop on node {}.", src));
            }
            if self.is_bipartite() && self.is_mode_a(src) == self.is_mode_a(dst) {
                return Err(format!(
                    "The bipartite edge ({}, {}) joins two nodes of the same mode.",
                    src, dst
                ));
            }
            if self.has_periods() && self.get_node_period(src) < self.get_node_period(dst) {
                return Err(format!(
                    "The arc ({}, {}) runs toward a later period.",
                    src, dst
                ));
            }
        }
        Ok(())
    }

    fn check_two_path_tables(&self) -> Result<()> {
        if self.directed {
            if let Some(table) = &self.two_paths_mixed {
                let expected = self.derive_two_paths(|g, i, j| {
                    g.iter_out_neighbours(i)
                        .filter(|&k| k != j && g.has_edge(k, j))
                        .count() as u32
                }, true);
                table.matches(&expected, "mixed")?;
            }
            if let Some(table) = &self.two_paths_in {
                let expected = self.derive_two_paths(|g, i, j| {
                    g.iter_in_neighbours(i)
                        .filter(|&k| k != j && g.has_edge(k, j))
                        .count() as u32
                }, false);
                table.matches(&expected, "shared-in")?;
            }
            if let Some(table) = &self.two_paths_out {
                let expected = self.derive_two_paths(|g, i, j| {
                    g.iter_out_neighbours(i)
                        .filter(|&k| k != j && g.has_edge(j, k))
                        .count() as u32
                }, false);
                table.matches(&expected, "shared-out")?;
            }
            return Ok(());
        }
        if let Some(table) = &self.two_paths {
            let expected =
                self.derive_two_paths(|g, i, j| g.count_common_neighbours(i, j), false);
            table.matches(&expected, "one-mode")?;
        }
        if let Some(table) = &self.two_paths_a {
            let expected = self.derive_mode_two_paths(true);
            table.matches(&expected, "mode-A")?;
        }
        if let Some(table) = &self.two_paths_b {
            let expected = self.derive_mode_two_paths(false);
            table.matches(&expected, "mode-B")?;
        }
        Ok(())
    }

    /// Exhaustive per-pair recount, parallel over source nodes.
    fn derive_two_paths<F>(&self, count: F, ordered: bool) -> HashMap<(NodeT, NodeT), u32>
    where
        F: Fn(&Graph, NodeT, NodeT) -> u32 + Sync,
    {
        (0..self.nodes_number)
            .into_par_iter()
            .map(|i| {
                let mut local = HashMap::new();
                for j in 0..self.nodes_number {
                    if i == j || (!ordered && j < i) {
                        continue;
                    }
                    let paths = count(self, i, j);
                    if paths > 0 {
                        local.insert((i, j), paths);
                    }
                }
                local
            })
            .reduce(HashMap::new, |mut merged, local| {
                merged.extend(local);
                merged
            })
    }

    fn derive_mode_two_paths(&self, mode_a: bool) -> HashMap<(NodeT, NodeT), u32> {
        let (start, end) = if mode_a {
            (0, self.get_mode_a_number())
        } else {
            (self.get_mode_a_number(), self.nodes_number)
        };
        (start..end)
            .into_par_iter()
            .map(|i| {
                let mut local = HashMap::new();
                for j in (i + 1)..end {
                    let paths = self.count_common_neighbours(i, j);
                    if paths > 0 {
                        local.insert((i, j), paths);
                    }
                }
                local
            })
            .reduce(HashMap::new, |mut merged, local| {
                merged.extend(local);
                merged
            })
    }
}
