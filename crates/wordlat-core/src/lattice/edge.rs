/// A weighted arc in the lattice: a candidate word (or the silence marker)
/// with its acoustic-model and language-model scores.
///
/// Edges are identified by their (source, destination) position in the
/// lattice; `Edge` itself has no `PartialEq`.
#[derive(Debug, Clone)]
pub struct Edge {
    label: String,
    am_score: i32,
    lm_score: i32,
}

impl Edge {
    pub fn new(label: impl Into<String>, am_score: i32, lm_score: i32) -> Self {
        Self {
            label: label.into(),
            am_score,
            lm_score,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn am_score(&self) -> i32 {
        self.am_score
    }

    pub fn lm_score(&self) -> i32 {
        self.lm_score
    }

    /// `am_score + trunc(lm_scale * lm_score)`.
    ///
    /// The scaled LM term is truncated toward zero, not rounded. Scores
    /// beyond the `i64` range saturate at its bounds.
    pub fn combined_score(&self, lm_scale: f64) -> i64 {
        (self.am_score as i64).saturating_add((lm_scale * self.lm_score as f64) as i64)
    }
}
