//! Word lattice: a weighted DAG over timestamped nodes with a single
//! source (`start`) and sink (`end`).
//!
//! The lattice is immutable after construction. Its topological order is
//! computed once in [`Lattice::from_parts`] and shared by every traversal.

mod dot;
mod edge;
mod io;
mod query;
mod topo;

#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::ParseError;

pub use edge::Edge;
pub use io::TIME_DECIMALS;
pub use query::format_times;
use topo::topological_sort;

pub struct Lattice {
    utterance_id: String,
    start: usize,
    end: usize,
    /// node_times[i] = timestamp (seconds) of node i
    node_times: Vec<f64>,
    /// successors[i] = outgoing edges of node i, keyed by destination
    successors: Vec<BTreeMap<usize, Edge>>,
    num_edges: usize,
    topo_order: Vec<usize>,
}

impl Lattice {
    /// Build a lattice from already-parsed parts.
    ///
    /// `node_times.len()` is the node count. Every edge endpoint and both
    /// boundary nodes must lie inside it, and each ordered node pair may
    /// carry at most one edge.
    pub fn from_parts(
        utterance_id: impl Into<String>,
        start: usize,
        end: usize,
        node_times: Vec<f64>,
        edges: impl IntoIterator<Item = (usize, usize, Edge)>,
    ) -> Result<Self, ParseError> {
        let num_nodes = node_times.len();
        for index in [start, end] {
            if index >= num_nodes {
                return Err(ParseError::NodeOutOfRange { index, num_nodes });
            }
        }

        let mut successors: Vec<BTreeMap<usize, Edge>> = vec![BTreeMap::new(); num_nodes];
        let mut num_edges = 0;
        for (src, dst, edge) in edges {
            for index in [src, dst] {
                if index >= num_nodes {
                    return Err(ParseError::NodeOutOfRange { index, num_nodes });
                }
            }
            if successors[src].insert(dst, edge).is_some() {
                return Err(ParseError::DuplicateEdge { src, dst });
            }
            num_edges += 1;
        }

        let topo_order = topological_sort(&successors, start, end);
        let utterance_id = utterance_id.into();
        debug!(
            utterance_id = %utterance_id,
            num_nodes,
            num_edges,
            "lattice built"
        );

        Ok(Self {
            utterance_id,
            start,
            end,
            node_times,
            successors,
            num_edges,
            topo_order,
        })
    }

    pub fn utterance_id(&self) -> &str {
        &self.utterance_id
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn num_nodes(&self) -> usize {
        self.node_times.len()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn node_time(&self, node: usize) -> f64 {
        self.node_times[node]
    }

    pub fn node_times(&self) -> &[f64] {
        &self.node_times
    }

    /// The edge from `src` to `dst`, if any.
    pub fn edge(&self, src: usize, dst: usize) -> Option<&Edge> {
        self.successors.get(src)?.get(&dst)
    }

    /// Whether `node` lies in `[start, end]`, the range every algorithm works on.
    pub fn in_range(&self, node: usize) -> bool {
        self.start <= node && node <= self.end
    }

    /// Outgoing edges of `node` in ascending destination order, restricted
    /// to `[start, end]`.
    pub fn successors(&self, node: usize) -> impl Iterator<Item = (usize, &Edge)> + '_ {
        self.successors[node]
            .iter()
            .map(|(&dst, edge)| (dst, edge))
            .filter(move |&(dst, _)| self.in_range(dst))
    }

    /// All edges inside `[start, end]`, ordered by source then destination.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &Edge)> + '_ {
        (self.start..=self.end)
            .flat_map(move |src| self.successors(src).map(move |(dst, e)| (src, dst, e)))
    }

    /// Topological order of `[start, end]`: for every edge (i, j), i precedes j.
    pub fn topological_order(&self) -> &[usize] {
        &self.topo_order
    }
}

impl std::fmt::Debug for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lattice")
            .field("utterance_id", &self.utterance_id)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("num_nodes", &self.num_nodes())
            .field("num_edges", &self.num_edges)
            .finish()
    }
}
