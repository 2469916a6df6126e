use std::collections::BTreeSet;

use super::Lattice;
use crate::settings::settings;

impl Lattice {
    /// Non-silence edges per second: `count / node_time(end)`.
    ///
    /// A multi-word label counts once. The denominator is the sink time
    /// alone (the source is assumed to sit at time zero); a zero sink time
    /// yields an infinite or NaN density rather than a finite guess.
    pub fn density(&self) -> f64 {
        let silence = settings().tokens.silence.as_str();
        let words = self
            .edges()
            .filter(|(_, _, edge)| edge.label() != silence)
            .count();
        words as f64 / self.node_time(self.end)
    }

    /// Distinct labels on edges `(i, j)` with `time(i) <= t <= time(j)`.
    ///
    /// Empty when `t` falls outside `[time(start), time(end)]`.
    pub fn unique_words_at_time(&self, t: f64) -> BTreeSet<String> {
        let mut words = BTreeSet::new();
        if t < self.node_time(self.start) || t > self.node_time(self.end) {
            return words;
        }
        for (src, dst, edge) in self.edges() {
            if self.node_time(src) <= t && t <= self.node_time(dst) {
                words.insert(edge.label().to_string());
            }
        }
        words
    }

    /// Midpoint times of every edge labelled exactly `label`, ascending.
    pub fn occurrence_times(&self, label: &str) -> Vec<f64> {
        let mut times: Vec<f64> = self
            .edges()
            .filter(|(_, _, edge)| edge.label() == label)
            .map(|(src, dst, _)| (self.node_time(src) + self.node_time(dst)) / 2.0)
            .collect();
        times.sort_by(f64::total_cmp);
        times
    }
}

/// Render times with `precision` decimals, separated by single spaces.
pub fn format_times(times: &[f64], precision: usize) -> String {
    times
        .iter()
        .map(|t| format!("{t:.precision$}"))
        .collect::<Vec<_>>()
        .join(" ")
}
