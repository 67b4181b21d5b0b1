//! A mutable graph representation optimized for Markov chains of single
//! edge toggles on huge networks.

use crate::attributes::Attributes;
use crate::two_paths::{TwoPathCacheKind, TwoPathTable};
use crate::types::*;
use bitvec::prelude::*;
use hashbrown::HashMap;

/// A graph whose auxiliary indices (degrees, edge index, two-path tables)
/// are maintained incrementally across edge toggles.
///
/// Node IDs are dense integers in `[0, N)`. For bipartite graphs the nodes
/// `[0, N_A)` form mode A and `[N_A, N)` mode B, and the graph is
/// undirected. All mutation goes through `insert_edge` / `remove_edge`.
#[derive(Clone, Debug)]
pub struct Graph {
    /// Number of nodes.
    pub(crate) nodes_number: NodeT,
    /// Whether the edges are arcs.
    pub(crate) directed: bool,
    /// Number of mode-A nodes when the graph is bipartite.
    pub(crate) mode_a_number: Option<NodeT>,
    /// Neighbour lists of the undirected representation; empty when directed.
    pub(crate) neighbours: Vec<Vec<NodeT>>,
    /// Out-neighbour lists; empty when undirected.
    pub(crate) out_neighbours: Vec<Vec<NodeT>>,
    /// In-neighbour lists; empty when undirected.
    pub(crate) in_neighbours: Vec<Vec<NodeT>>,
    /// Dense list of the current edges, in canonical key orientation.
    /// Supports O(1) uniform edge draws; deletion swap-removes.
    pub(crate) edge_list: Vec<(NodeT, NodeT)>,
    /// Canonical edge key to position in `edge_list`.
    pub(crate) edge_index: HashMap<(NodeT, NodeT), usize>,
    /// Two-path table of the undirected one-mode representation.
    pub(crate) two_paths: Option<TwoPathTable>,
    /// Two-path table over mode-A pairs (bipartite only).
    pub(crate) two_paths_a: Option<TwoPathTable>,
    /// Two-path table over mode-B pairs (bipartite only).
    pub(crate) two_paths_b: Option<TwoPathTable>,
    /// Directed mixed two-paths `i -> k -> j`, ordered pairs.
    pub(crate) two_paths_mixed: Option<TwoPathTable>,
    /// Common in-neighbour counts `k -> i, k -> j`, unordered pairs.
    pub(crate) two_paths_in: Option<TwoPathTable>,
    /// Common out-neighbour counts `i -> k, j -> k`, unordered pairs.
    pub(crate) two_paths_out: Option<TwoPathTable>,
    /// Node attribute tables.
    pub attributes: Attributes,
    /// Time period per node for the citation variant.
    pub(crate) periods: Option<Vec<PeriodT>>,
    /// Nodes belonging to the latest period; toggle sources in the
    /// citation variant are drawn from this list.
    pub(crate) latest_period_nodes: Vec<NodeT>,
    /// Nodes whose ties are held fixed under conditional estimation.
    pub(crate) fixed_nodes: Option<BitVec>,
    /// Number of fixed nodes, split by mode for bipartite graphs.
    pub(crate) fixed_number: (NodeT, NodeT),
    /// Edges whose endpoints are both fixed; not toggleable.
    pub(crate) edges_both_fixed: EdgeT,
    /// Arcs whose source lies in the latest period; the only toggleable
    /// arcs of the citation variant.
    pub(crate) edges_from_latest: EdgeT,
    /// Which two-path representation this graph was built with.
    pub(crate) cache_kind: TwoPathCacheKind,
}

impl Graph {
    /// Return a new empty graph.
    ///
    /// # Arguments
    /// * `nodes_number`: NodeT - Number of nodes.
    /// * `directed`: bool - Whether edges are arcs.
    /// * `mode_a_number`: Option<NodeT> - Number of mode-A nodes, making
    ///   the graph bipartite.
    /// * `cache_kind`: TwoPathCacheKind - Two-path representation to build.
    pub fn new(
        nodes_number: NodeT,
        directed: bool,
        mode_a_number: Option<NodeT>,
        cache_kind: TwoPathCacheKind,
    ) -> Result<Graph> {
        if nodes_number == 0 {
            return Err("Cannot build a graph without nodes.".to_string());
        }
        if let Some(mode_a) = mode_a_number {
            if directed {
                return Err("Bipartite graphs must be undirected.".to_string());
            }
            if mode_a == 0 || mode_a >= nodes_number {
                return Err(format!(
                    "The bipartite mode split must leave both modes non-empty: got {} mode-A nodes out of {}.",
                    mode_a, nodes_number
                ));
            }
        }
        let n = nodes_number as usize;
        let (two_paths, two_paths_a, two_paths_b) = match mode_a_number {
            None if !directed => (
                TwoPathTable::new(cache_kind, nodes_number, 0, false),
                None,
                None,
            ),
            Some(mode_a) => (
                None,
                TwoPathTable::new(cache_kind, mode_a, 0, false),
                TwoPathTable::new(cache_kind, nodes_number - mode_a, mode_a, false),
            ),
            None => (None, None, None),
        };
        let (two_paths_mixed, two_paths_in, two_paths_out) = if directed {
            (
                TwoPathTable::new(cache_kind, nodes_number, 0, true),
                TwoPathTable::new(cache_kind, nodes_number, 0, false),
                TwoPathTable::new(cache_kind, nodes_number, 0, false),
            )
        } else {
            (None, None, None)
        };
        Ok(Graph {
            nodes_number,
            directed,
            mode_a_number,
            neighbours: if directed { Vec::new() } else { vec![Vec::new(); n] },
            out_neighbours: if directed { vec![Vec::new(); n] } else { Vec::new() },
            in_neighbours: if directed { vec![Vec::new(); n] } else { Vec::new() },
            edge_list: Vec::new(),
            edge_index: HashMap::new(),
            two_paths,
            two_paths_a,
            two_paths_b,
            two_paths_mixed,
            two_paths_in,
            two_paths_out,
            attributes: Attributes::new(),
            periods: None,
            latest_period_nodes: Vec::new(),
            fixed_nodes: None,
            fixed_number: (0, 0),
            edges_both_fixed: 0,
            edges_from_latest: 0,
            cache_kind,
        })
    }

    /// Canonical key of the pair: as given for directed graphs, sorted
    /// otherwise.
    #[inline]
    pub(crate) fn edge_key(&self, src: NodeT, dst: NodeT) -> (NodeT, NodeT) {
        if self.directed || src <= dst {
            (src, dst)
        } else {
            (dst, src)
        }
    }

    /// Attach node attributes. The column lengths must match the node count.
    pub fn set_attributes(&mut self, attributes: Attributes) -> Result<()> {
        attributes.validate(self.nodes_number)?;
        self.attributes = attributes;
        Ok(())
    }

    /// Attach the time periods of the citation variant and re-derive the
    /// latest-period node list and the toggleable-arc counter.
    pub fn set_periods(&mut self, periods: Vec<PeriodT>) -> Result<()> {
        if !self.directed {
            return Err("Time periods only apply to directed graphs.".to_string());
        }
        if periods.len() != self.nodes_number as usize {
            return Err(format!(
                "Got {} period values for a graph of {} nodes.",
                periods.len(),
                self.nodes_number
            ));
        }
        let latest = periods.iter().copied().max().unwrap_or(0);
        self.latest_period_nodes = (0..self.nodes_number)
            .filter(|&node| periods[node as usize] == latest)
            .collect();
        for &(src, dst) in self.edge_list.iter() {
            if periods[src as usize] < periods[dst as usize] {
                return Err(format!(
                    "The arc {} -> {} runs from period {} to the later period {}.",
                    src, dst, periods[src as usize], periods[dst as usize]
                ));
            }
        }
        self.edges_from_latest = self
            .edge_list
            .iter()
            .filter(|&&(src, _)| periods[src as usize] == latest)
            .count() as EdgeT;
        self.periods = Some(periods);
        Ok(())
    }

    /// Flag the given nodes as fixed for conditional estimation and
    /// re-derive the mode-wise counts and the frozen-edge counter.
    pub fn set_fixed_nodes(&mut self, nodes: &[NodeT]) -> Result<()> {
        let mut flags: BitVec = bitvec![0; self.nodes_number as usize];
        for &node in nodes {
            if node >= self.nodes_number {
                return Err(format!(
                    "The fixed node {} does not exist in a graph of {} nodes.",
                    node, self.nodes_number
                ));
            }
            flags.set(node as usize, true);
        }
        let split = self.mode_a_number.unwrap_or(self.nodes_number);
        self.fixed_number = (
            flags[..split as usize].count_ones() as NodeT,
            flags[split as usize..].count_ones() as NodeT,
        );
        self.edges_both_fixed = self
            .edge_list
            .iter()
            .filter(|&&(src, dst)| flags[src as usize] && flags[dst as usize])
            .count() as EdgeT;
        self.fixed_nodes = Some(flags);
        Ok(())
    }
}
