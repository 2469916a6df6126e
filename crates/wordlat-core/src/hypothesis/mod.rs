//! Decoded word sequences and their scoring against reference transcripts.

mod wer;

use serde::Serialize;

use crate::decoder::BestPath;
use crate::settings::settings;

pub use wer::{edit_distance, word_error_rate, Reference};

/// Words contributed by one edge label.
///
/// The silence token contributes nothing; a label joined by the word
/// delimiter (`going_to`) contributes each part in order; anything else
/// is a single word.
pub fn edge_to_words(label: &str) -> Vec<&str> {
    let tokens = &settings().tokens;
    if label == tokens.silence {
        return Vec::new();
    }
    label
        .split(tokens.word_delimiter.as_str())
        .filter(|w| !w.is_empty())
        .collect()
}

/// A decoded candidate word sequence with its cumulative path score.
///
/// Grown only by [`Hypothesis::add_edge`], in path order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Hypothesis {
    words: Vec<String>,
    path_score: f64,
}

impl Hypothesis {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay a decoded path from `start` to `end`.
    pub fn from_path(path: &BestPath) -> Self {
        let mut hyp = Self::new();
        for edge in &path.edges {
            hyp.add_edge(&edge.label, edge.combined_score as f64);
        }
        hyp
    }

    /// Account for one traversed edge: its score always counts, its label
    /// contributes the words given by [`edge_to_words`].
    pub fn add_edge(&mut self, label: &str, combined_score: f64) {
        self.path_score += combined_score;
        self.words
            .extend(edge_to_words(label).into_iter().map(str::to_string));
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn path_score(&self) -> f64 {
        self.path_score
    }

    /// Each word followed by a single space (`"hello world "`).
    pub fn hypothesis_string(&self) -> String {
        self.words.iter().map(|w| format!("{w} ")).collect()
    }

    /// Word error rate of this hypothesis against `reference`.
    pub fn compute_wer(&self, reference: &Reference) -> crate::error::Result<f64> {
        reference.word_error_rate(&self.words)
    }
}
