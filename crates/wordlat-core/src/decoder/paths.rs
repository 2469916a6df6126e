use num_bigint::BigUint;
use tracing::debug;

use crate::lattice::Lattice;

impl Lattice {
    /// Number of distinct directed paths from `start` to `end`.
    ///
    /// Same traversal as [`Lattice::shortest_path`] with (+, x) in place of
    /// (min, +). Dense lattices overflow any fixed-width counter, hence
    /// `BigUint`.
    pub fn count_all_paths(&self) -> BigUint {
        let mut counts = vec![BigUint::ZERO; self.num_nodes()];
        counts[self.start()] = BigUint::from(1u32);

        for &node in self.topological_order() {
            if counts[node] == BigUint::ZERO {
                continue;
            }
            let here = counts[node].clone();
            for (next, _) in self.successors(node) {
                counts[next] += &here;
            }
        }

        let total = std::mem::take(&mut counts[self.end()]);
        debug!(utterance_id = %self.utterance_id(), paths = %total, "counted paths");
        total
    }
}
