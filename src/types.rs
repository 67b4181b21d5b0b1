//! Types used to represent nodes, edges and model parameters.

/// Type used to index the nodes.
pub type NodeT = u32;
/// Type used to count the edges.
pub type EdgeT = u64;
/// Type used for the codes of categorical attributes.
pub type CategoryT = u32;
/// Type used for the time periods of the citation variant.
pub type PeriodT = u32;

pub type Result<T> = std::result::Result<T, String>;
