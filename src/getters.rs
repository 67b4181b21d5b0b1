//! Read-only accessors of the graph.

use crate::graph::Graph;
use crate::types::*;

/// # Basic queries
impl Graph {
    #[inline]
    pub fn get_nodes_number(&self) -> NodeT {
        self.nodes_number
    }

    #[inline]
    pub fn get_edges_number(&self) -> EdgeT {
        self.edge_list.len() as EdgeT
    }

    #[inline]
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    #[inline]
    pub fn is_bipartite(&self) -> bool {
        self.mode_a_number.is_some()
    }

    /// Number of mode-A nodes; the full node count when one-mode.
    #[inline]
    pub fn get_mode_a_number(&self) -> NodeT {
        self.mode_a_number.unwrap_or(self.nodes_number)
    }

    /// Number of mode-B nodes; zero when one-mode.
    #[inline]
    pub fn get_mode_b_number(&self) -> NodeT {
        self.nodes_number - self.get_mode_a_number()
    }

    /// Whether the node belongs to mode A. Always true on one-mode graphs.
    #[inline]
    pub fn is_mode_a(&self, node: NodeT) -> bool {
        node < self.get_mode_a_number()
    }

    /// Whether the edge (arc, for directed graphs) is present.
    #[inline]
    pub fn has_edge(&self, src: NodeT, dst: NodeT) -> bool {
        self.edge_index.contains_key(&self.edge_key(src, dst))
    }

    #[inline]
    pub fn iter_edges(&self) -> impl Iterator<Item = (NodeT, NodeT)> + '_ {
        self.edge_list.iter().copied()
    }
}

/// # Degrees and neighbour lists
impl Graph {
    /// Degree of a node of an undirected graph.
    #[inline]
    pub fn get_node_degree(&self, node: NodeT) -> NodeT {
        debug_assert!(!self.directed);
        self.neighbours[node as usize].len() as NodeT
    }

    #[inline]
    pub fn get_in_degree(&self, node: NodeT) -> NodeT {
        debug_assert!(self.directed);
        self.in_neighbours[node as usize].len() as NodeT
    }

    #[inline]
    pub fn get_out_degree(&self, node: NodeT) -> NodeT {
        debug_assert!(self.directed);
        self.out_neighbours[node as usize].len() as NodeT
    }

    /// Total degree: plain degree for undirected graphs, in plus out for
    /// directed ones.
    #[inline]
    pub fn get_total_degree(&self, node: NodeT) -> NodeT {
        if self.directed {
            self.get_in_degree(node) + self.get_out_degree(node)
        } else {
            self.get_node_degree(node)
        }
    }

    #[inline]
    pub fn iter_neighbours(&self, node: NodeT) -> impl Iterator<Item = NodeT> + '_ {
        debug_assert!(!self.directed);
        self.neighbours[node as usize].iter().copied()
    }

    #[inline]
    pub fn iter_in_neighbours(&self, node: NodeT) -> impl Iterator<Item = NodeT> + '_ {
        debug_assert!(self.directed);
        self.in_neighbours[node as usize].iter().copied()
    }

    #[inline]
    pub fn iter_out_neighbours(&self, node: NodeT) -> impl Iterator<Item = NodeT> + '_ {
        debug_assert!(self.directed);
        self.out_neighbours[node as usize].iter().copied()
    }
}

/// # Two-path counts
///
/// Each count falls back to a scan of the neighbour lists when the graph
/// was built without a cache.
impl Graph {
    /// Number of length-two paths between two nodes of the same mode:
    /// common neighbours for undirected one-mode graphs, common
    /// opposite-mode neighbours for bipartite ones.
    pub fn two_path(&self, first: NodeT, second: NodeT) -> u32 {
        debug_assert!(!self.directed);
        debug_assert!(first != second);
        debug_assert!(self.is_mode_a(first) == self.is_mode_a(second));
        let table = if self.mode_a_number.is_none() {
            &self.two_paths
        } else if self.is_mode_a(first) {
            &self.two_paths_a
        } else {
            &self.two_paths_b
        };
        match table {
            Some(table) => table.get(first, second),
            None => self.count_common_neighbours(first, second),
        }
    }

    /// Number of directed paths `first -> k -> second`.
    pub fn two_path_mixed(&self, first: NodeT, second: NodeT) -> u32 {
        debug_assert!(self.directed);
        debug_assert!(first != second);
        match &self.two_paths_mixed {
            Some(table) => table.get(first, second),
            None => self
                .iter_out_neighbours(first)
                .filter(|&k| k != second && self.has_edge(k, second))
                .count() as u32,
        }
    }

    /// Number of common in-neighbours `k -> first, k -> second`.
    pub fn two_path_in(&self, first: NodeT, second: NodeT) -> u32 {
        debug_assert!(self.directed);
        debug_assert!(first != second);
        match &self.two_paths_in {
            Some(table) => table.get(first, second),
            None => self
                .iter_in_neighbours(first)
                .filter(|&k| k != second && self.has_edge(k, second))
                .count() as u32,
        }
    }

    /// Number of common out-neighbours `first -> k, second -> k`.
    pub fn two_path_out(&self, first: NodeT, second: NodeT) -> u32 {
        debug_assert!(self.directed);
        debug_assert!(first != second);
        match &self.two_paths_out {
            Some(table) => table.get(first, second),
            None => self
                .iter_out_neighbours(first)
                .filter(|&k| k != second && self.has_edge(second, k))
                .count() as u32,
        }
    }

    pub(crate) fn count_common_neighbours(&self, first: NodeT, second: NodeT) -> u32 {
        let (smaller, other) =
            if self.neighbours[first as usize].len() <= self.neighbours[second as usize].len() {
                (first, second)
            } else {
                (second, first)
            };
        self.iter_neighbours(smaller)
            .filter(|&k| k != first && k != second && self.has_edge(k, other))
            .count() as u32
    }
}

/// # Attribute accessors
impl Graph {
    #[inline]
    pub fn binary_attribute(&self, attribute: usize, node: NodeT) -> Option<bool> {
        self.attributes.binary[attribute].values[node as usize]
    }

    #[inline]
    pub fn categorical_attribute(&self, attribute: usize, node: NodeT) -> Option<CategoryT> {
        self.attributes.categorical[attribute].values[node as usize]
    }

    #[inline]
    pub fn continuous_attribute(&self, attribute: usize, node: NodeT) -> Option<f64> {
        self.attributes.continuous[attribute].values[node as usize]
    }
}

/// # Citation periods and conditional estimation
impl Graph {
    #[inline]
    pub fn has_periods(&self) -> bool {
        self.periods.is_some()
    }

    #[inline]
    pub fn get_node_period(&self, node: NodeT) -> PeriodT {
        self.periods.as_ref().map(|p| p[node as usize]).unwrap_or(0)
    }

    /// Nodes of the latest period, the only admissible toggle sources of
    /// the citation variant.
    #[inline]
    pub fn get_latest_period_nodes(&self) -> &[NodeT] {
        &self.latest_period_nodes
    }

    #[inline]
    pub fn is_fixed(&self, node: NodeT) -> bool {
        self.fixed_nodes
            .as_ref()
            .map(|flags| flags[node as usize])
            .unwrap_or(false)
    }

    /// Number of dyads a sampler may propose, net of the citation and
    /// fixed-node restrictions.
    pub fn toggleable_dyads(&self) -> u64 {
        let n = self.nodes_number as u64;
        if self.has_periods() {
            // Latest-period sources reach every other node: the latest
            // period is maximal, so the period constraint never excludes a
            // target.
            return self.latest_period_nodes.len() as u64 * (n - 1);
        }
        let (fixed_a, fixed_b) = self.fixed_number;
        match (self.directed, self.mode_a_number) {
            (true, _) => n * (n - 1) - fixed_a as u64 * (fixed_a as u64).saturating_sub(1),
            (false, None) => {
                n * (n - 1) / 2 - fixed_a as u64 * (fixed_a as u64).saturating_sub(1) / 2
            }
            (false, Some(mode_a)) => {
                mode_a as u64 * (n - mode_a as u64) - fixed_a as u64 * fixed_b as u64
            }
        }
    }

    /// Number of current edges a sampler may propose to remove.
    pub fn toggleable_edges(&self) -> EdgeT {
        if self.has_periods() {
            self.edges_from_latest
        } else {
            self.get_edges_number() - self.edges_both_fixed
        }
    }

    /// Whether a single toggle of this pair is admissible under the mode,
    /// period and fixed-node restrictions.
    pub fn is_toggleable(&self, src: NodeT, dst: NodeT) -> bool {
        if src == dst || src >= self.nodes_number || dst >= self.nodes_number {
            return false;
        }
        if self.is_bipartite() && self.is_mode_a(src) == self.is_mode_a(dst) {
            return false;
        }
        if let Some(periods) = &self.periods {
            let latest = self
                .latest_period_nodes
                .first()
                .map(|&node| periods[node as usize])
                .unwrap_or(0);
            if periods[src as usize] != latest {
                return false;
            }
        }
        !(self.is_fixed(src) && self.is_fixed(dst))
    }
}
