//! Incrementally maintained two-path count tables.
//!
//! A table maps a pair of nodes to the number of length-two paths of one
//! flavour between them. The representation is chosen at graph construction
//! time: a dense matrix trades memory for constant-time access on small
//! graphs, the hash table stores only non-zero entries, and `None` disables
//! the cache entirely so counts are re-derived from the neighbour lists on
//! every query.

use crate::types::*;
use hashbrown::HashMap;

/// Which two-path representation to build, selected at graph construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TwoPathCacheKind {
    /// No cache: counts are computed from the neighbour lists on demand.
    None,
    /// Dense matrix of counts.
    Dense,
    /// Hash table keyed by node pair, zero entries absent.
    Hash,
}

impl TwoPathCacheKind {
    pub fn from_name(name: &str) -> Result<TwoPathCacheKind> {
        match name.to_lowercase().as_str() {
            "none" => Ok(TwoPathCacheKind::None),
            "dense" => Ok(TwoPathCacheKind::Dense),
            "hash" => Ok(TwoPathCacheKind::Hash),
            _ => Err(format!(
                "Unknown two-path cache representation {}: expected one of none, dense, hash.",
                name
            )),
        }
    }
}

/// One two-path count table over a contiguous range of node IDs.
///
/// `offset` shifts the dense indexing so that the bipartite mode-B table
/// does not allocate rows for mode-A nodes. Unordered tables canonicalise
/// the key to the sorted pair.
#[derive(Clone, Debug)]
pub enum TwoPathTable {
    Dense {
        counts: Vec<u32>,
        width: usize,
        offset: NodeT,
        ordered: bool,
    },
    Hash {
        counts: HashMap<(NodeT, NodeT), u32>,
        ordered: bool,
    },
}

impl TwoPathTable {
    pub fn new(
        kind: TwoPathCacheKind,
        nodes_number: NodeT,
        offset: NodeT,
        ordered: bool,
    ) -> Option<TwoPathTable> {
        match kind {
            TwoPathCacheKind::None => None,
            TwoPathCacheKind::Dense => {
                let width = nodes_number as usize;
                Some(TwoPathTable::Dense {
                    counts: vec![0; width * width],
                    width,
                    offset,
                    ordered,
                })
            }
            TwoPathCacheKind::Hash => Some(TwoPathTable::Hash {
                counts: HashMap::new(),
                ordered,
            }),
        }
    }

    #[inline]
    fn key(ordered: bool, first: NodeT, second: NodeT) -> (NodeT, NodeT) {
        if ordered || first <= second {
            (first, second)
        } else {
            (second, first)
        }
    }

    /// Current count for the pair; zero when no path of this flavour exists.
    #[inline]
    pub fn get(&self, first: NodeT, second: NodeT) -> u32 {
        match self {
            TwoPathTable::Dense {
                counts,
                width,
                offset,
                ordered,
            } => {
                let (a, b) = Self::key(*ordered, first, second);
                counts[(a - offset) as usize * width + (b - offset) as usize]
            }
            TwoPathTable::Hash { counts, ordered } => counts
                .get(&Self::key(*ordered, first, second))
                .copied()
                .unwrap_or(0),
        }
    }

    #[inline]
    pub fn increment(&mut self, first: NodeT, second: NodeT) {
        match self {
            TwoPathTable::Dense {
                counts,
                width,
                offset,
                ordered,
            } => {
                let (a, b) = Self::key(*ordered, first, second);
                counts[(a - *offset) as usize * *width + (b - *offset) as usize] += 1;
            }
            TwoPathTable::Hash { counts, ordered } => {
                *counts
                    .entry(Self::key(*ordered, first, second))
                    .or_insert(0) += 1;
            }
        }
    }

    /// Decrement the count, removing the entry when it reaches zero so the
    /// hash representation never stores zeros.
    #[inline]
    pub fn decrement(&mut self, first: NodeT, second: NodeT) {
        match self {
            TwoPathTable::Dense {
                counts,
                width,
                offset,
                ordered,
            } => {
                let (a, b) = Self::key(*ordered, first, second);
                let cell = &mut counts[(a - *offset) as usize * *width + (b - *offset) as usize];
                debug_assert!(*cell > 0, "two-path count underflow at ({}, {})", a, b);
                *cell -= 1;
            }
            TwoPathTable::Hash { counts, ordered } => {
                let key = Self::key(*ordered, first, second);
                let count = counts.get_mut(&key);
                debug_assert!(
                    count.is_some(),
                    "two-path count underflow at ({}, {})",
                    key.0,
                    key.1
                );
                if let Some(count) = count {
                    *count -= 1;
                    if *count == 0 {
                        counts.remove(&key);
                    }
                }
            }
        }
    }

    /// Iterate the non-zero entries as `((first, second), count)` with the
    /// canonical key orientation.
    pub fn iter_non_zero(&self) -> Box<dyn Iterator<Item = ((NodeT, NodeT), u32)> + '_> {
        match self {
            TwoPathTable::Dense {
                counts,
                width,
                offset,
                ..
            } => {
                let width = *width;
                let offset = *offset;
                Box::new(counts.iter().enumerate().filter(|(_, &c)| c != 0).map(
                    move |(cell, &count)| {
                        let first = (cell / width) as NodeT + offset;
                        let second = (cell % width) as NodeT + offset;
                        ((first, second), count)
                    },
                ))
            }
            TwoPathTable::Hash { counts, .. } => {
                Box::new(counts.iter().map(|(&key, &count)| (key, count)))
            }
        }
    }

    /// Compare against an exhaustively recomputed table; the expected map
    /// must use the same canonical key orientation.
    pub fn matches(&self, expected: &HashMap<(NodeT, NodeT), u32>, flavour: &str) -> Result<()> {
        let mut non_zero = 0usize;
        for ((first, second), count) in self.iter_non_zero() {
            non_zero += 1;
            let expected_count = expected.get(&(first, second)).copied().unwrap_or(0);
            if count != expected_count {
                return Err(format!(
                    "The {} two-path table stores {} for the pair ({}, {}) but the graph contains {} such paths.",
                    flavour, count, first, second, expected_count
                ));
            }
        }
        let expected_non_zero = expected.values().filter(|&&count| count != 0).count();
        if non_zero != expected_non_zero {
            return Err(format!(
                "The {} two-path table has {} non-zero entries but the graph contains {} pairs with paths.",
                flavour, non_zero, expected_non_zero
            ));
        }
        Ok(())
    }
}
