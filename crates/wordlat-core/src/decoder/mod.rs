//! Best-path decoding and path counting over a lattice's topological order.

mod paths;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::error::{LatticeError, Result};
use crate::hypothesis::Hypothesis;
use crate::lattice::Lattice;

/// One edge on a decoded path, with its scores at the decoding scale.
#[derive(Debug, Clone, Serialize)]
pub struct PathEdge {
    pub src: usize,
    pub dst: usize,
    pub label: String,
    pub am_score: i32,
    pub lm_score: i32,
    pub combined_score: i64,
}

/// The minimum-cost path from `start` to `end`.
#[derive(Debug, Clone, Serialize)]
pub struct BestPath {
    /// Node indices from `start` to `end` inclusive.
    pub nodes: Vec<usize>,
    pub edges: Vec<PathEdge>,
    /// Sum of `combined_score` over `edges`.
    pub cost: i64,
}

impl Lattice {
    /// Single-source shortest path over the DAG, relaxing edges in
    /// topological order with `combined_score(lm_scale)` as the weight.
    ///
    /// A node's predecessor only changes on a strictly smaller distance, so
    /// among equal-cost routes the first one relaxed wins. Path costs
    /// saturate at the `i64` bounds instead of wrapping.
    pub fn shortest_path(&self, lm_scale: f64) -> Result<BestPath> {
        let _span = debug_span!("shortest_path", utterance_id = %self.utterance_id(), lm_scale)
            .entered();
        let n = self.num_nodes();
        // None = unreached (infinite distance)
        let mut dist: Vec<Option<i64>> = vec![None; n];
        let mut prev: Vec<Option<usize>> = vec![None; n];
        dist[self.start()] = Some(0);

        for &node in self.topological_order() {
            let Some(base) = dist[node] else {
                continue;
            };
            for (next, edge) in self.successors(node) {
                let candidate = base.saturating_add(edge.combined_score(lm_scale));
                if dist[next].map_or(true, |d| candidate < d) {
                    dist[next] = Some(candidate);
                    prev[next] = Some(node);
                }
            }
        }

        let Some(cost) = dist[self.end()] else {
            return Err(LatticeError::NoPath {
                start: self.start(),
                end: self.end(),
            });
        };

        let mut nodes = vec![self.end()];
        let mut cur = self.end();
        while cur != self.start() {
            // Every reached node other than the source has a predecessor.
            let Some(p) = prev[cur] else {
                return Err(LatticeError::NoPath {
                    start: self.start(),
                    end: self.end(),
                });
            };
            nodes.push(p);
            cur = p;
        }
        nodes.reverse();

        let edges = nodes
            .windows(2)
            .filter_map(|pair| {
                let (src, dst) = (pair[0], pair[1]);
                self.edge(src, dst).map(|e| PathEdge {
                    src,
                    dst,
                    label: e.label().to_string(),
                    am_score: e.am_score(),
                    lm_score: e.lm_score(),
                    combined_score: e.combined_score(lm_scale),
                })
            })
            .collect();

        debug!(cost, path_len = nodes.len(), "best path");
        Ok(BestPath { nodes, edges, cost })
    }

    /// Decode the best path into a [`Hypothesis`], replaying its edges
    /// from `start` to `end`.
    pub fn decode(&self, lm_scale: f64) -> Result<Hypothesis> {
        let best = self.shortest_path(lm_scale)?;
        Ok(Hypothesis::from_path(&best))
    }
}
