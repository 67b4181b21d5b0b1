//! The two mutating operations of the graph: single edge insertion and
//! removal, each updating every auxiliary index in one indivisible step.

use crate::graph::Graph;
use crate::types::*;

impl Graph {
    /// Insert the edge (arc) `(src, dst)`.
    ///
    /// The edge must not be present; self-loops, same-mode bipartite pairs
    /// and period-violating arcs are defects of the caller and only checked
    /// in debug builds.
    pub fn insert_edge(&mut self, src: NodeT, dst: NodeT) {
        debug_assert!(src != dst, "self-loop toggle ({}, {})", src, dst);
        debug_assert!(src < self.nodes_number && dst < self.nodes_number);
        debug_assert!(!self.has_edge(src, dst), "duplicate edge ({}, {})", src, dst);
        debug_assert!(
            !self.is_bipartite() || self.is_mode_a(src) != self.is_mode_a(dst),
            "bipartite edge ({}, {}) inside one mode",
            src,
            dst
        );
        debug_assert!(
            self.periods.is_none()
                || self.get_node_period(src) >= self.get_node_period(dst),
            "arc ({}, {}) toward a later period",
            src,
            dst
        );
        self.update_two_paths_on_toggle(src, dst, true);
        let key = self.edge_key(src, dst);
        self.edge_index.insert(key, self.edge_list.len());
        self.edge_list.push(key);
        if self.directed {
            self.out_neighbours[src as usize].push(dst);
            self.in_neighbours[dst as usize].push(src);
        } else {
            self.neighbours[src as usize].push(dst);
            self.neighbours[dst as usize].push(src);
        }
        if self.is_fixed(src) && self.is_fixed(dst) {
            self.edges_both_fixed += 1;
        }
        if let Some(periods) = &self.periods {
            let latest = periods[self.latest_period_nodes[0] as usize];
            if periods[src as usize] == latest {
                self.edges_from_latest += 1;
            }
        }
    }

    /// Remove the edge (arc) `(src, dst)`. The edge must be present.
    pub fn remove_edge(&mut self, src: NodeT, dst: NodeT) {
        debug_assert!(self.has_edge(src, dst), "missing edge ({}, {})", src, dst);
        let key = self.edge_key(src, dst);
        let position = match self.edge_index.remove(&key) {
            Some(position) => position,
            None => return,
        };
        self.edge_list.swap_remove(position);
        if position < self.edge_list.len() {
            self.edge_index.insert(self.edge_list[position], position);
        }
        if self.directed {
            drop_from_list(&mut self.out_neighbours[src as usize], dst);
            drop_from_list(&mut self.in_neighbours[dst as usize], src);
        } else {
            drop_from_list(&mut self.neighbours[src as usize], dst);
            drop_from_list(&mut self.neighbours[dst as usize], src);
        }
        self.update_two_paths_on_toggle(src, dst, false);
        if self.is_fixed(src) && self.is_fixed(dst) {
            self.edges_both_fixed -= 1;
        }
        if let Some(periods) = &self.periods {
            let latest = periods[self.latest_period_nodes[0] as usize];
            if periods[src as usize] == latest {
                self.edges_from_latest -= 1;
            }
        }
    }

    /// Incremental two-path maintenance. Called with the neighbour lists
    /// *excluding* the toggled edge: before insertion into the lists, after
    /// removal from them.
    fn update_two_paths_on_toggle(&mut self, src: NodeT, dst: NodeT, inserting: bool) {
        if self.directed {
            self.update_directed_two_paths(src, dst, inserting);
        } else if self.is_bipartite() {
            self.update_bipartite_two_paths(src, dst, inserting);
        } else {
            self.update_one_mode_two_paths(src, dst, inserting);
        }
    }

    fn update_one_mode_two_paths(&mut self, src: NodeT, dst: NodeT, inserting: bool) {
        if let Some(table) = self.two_paths.as_mut() {
            // The edge (src, dst) opens or closes a path src-dst-k for
            // every other neighbour k of dst, and symmetrically through src.
            for &(this, other) in [(src, dst), (dst, src)].iter() {
                for &k in self.neighbours[other as usize].iter() {
                    if k == this {
                        continue;
                    }
                    if inserting {
                        table.increment(this, k);
                    } else {
                        table.decrement(this, k);
                    }
                }
            }
        }
    }

    fn update_bipartite_two_paths(&mut self, src: NodeT, dst: NodeT, inserting: bool) {
        let (a, b) = if self.is_mode_a(src) {
            (src, dst)
        } else {
            (dst, src)
        };
        if let Some(table) = self.two_paths_a.as_mut() {
            for &k in self.neighbours[b as usize].iter() {
                if k == a {
                    continue;
                }
                if inserting {
                    table.increment(a, k);
                } else {
                    table.decrement(a, k);
                }
            }
        }
        if let Some(table) = self.two_paths_b.as_mut() {
            for &k in self.neighbours[a as usize].iter() {
                if k == b {
                    continue;
                }
                if inserting {
                    table.increment(b, k);
                } else {
                    table.decrement(b, k);
                }
            }
        }
    }

    fn update_directed_two_paths(&mut self, src: NodeT, dst: NodeT, inserting: bool) {
        if let Some(table) = self.two_paths_mixed.as_mut() {
            // src -> dst -> k extends to a mixed path from src.
            for &k in self.out_neighbours[dst as usize].iter() {
                if k == src {
                    continue;
                }
                if inserting {
                    table.increment(src, k);
                } else {
                    table.decrement(src, k);
                }
            }
            // k -> src -> dst extends to a mixed path toward dst.
            for &k in self.in_neighbours[src as usize].iter() {
                if k == dst {
                    continue;
                }
                if inserting {
                    table.increment(k, dst);
                } else {
                    table.decrement(k, dst);
                }
            }
        }
        if let Some(table) = self.two_paths_in.as_mut() {
            // dst gains (loses) the in-neighbour src, shared with every
            // other target of src.
            for &k in self.out_neighbours[src as usize].iter() {
                if k == dst {
                    continue;
                }
                if inserting {
                    table.increment(dst, k);
                } else {
                    table.decrement(dst, k);
                }
            }
        }
        if let Some(table) = self.two_paths_out.as_mut() {
            // src gains (loses) the out-neighbour dst, shared with every
            // other source of dst.
            for &k in self.in_neighbours[dst as usize].iter() {
                if k == src {
                    continue;
                }
                if inserting {
                    table.increment(src, k);
                } else {
                    table.decrement(src, k);
                }
            }
        }
    }
}

#[inline]
fn drop_from_list(list: &mut Vec<NodeT>, node: NodeT) {
    if let Some(position) = list.iter().position(|&k| k == node) {
        list.swap_remove(position);
    } else {
        debug_assert!(false, "node {} absent from neighbour list", node);
    }
}
