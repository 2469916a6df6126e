use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{LatticeError, Result};

/// Minimum number of single-word insertions, deletions and substitutions
/// turning `hyp` into `reference`.
pub fn edit_distance<A, B>(hyp: &[A], reference: &[B]) -> usize
where
    A: PartialEq<B>,
{
    // d[i][j] = distance between hyp[..i] and reference[..j], one row at a time
    let mut prev: Vec<usize> = (0..=reference.len()).collect();
    let mut cur = vec![0; reference.len() + 1];
    for i in 1..=hyp.len() {
        cur[0] = i;
        for j in 1..=reference.len() {
            cur[j] = if hyp[i - 1] == reference[j - 1] {
                prev[j - 1]
            } else {
                1 + prev[j].min(cur[j - 1]).min(prev[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[reference.len()]
}

/// `edit_distance / |reference|`, or `None` for an empty reference.
pub fn word_error_rate<A, B>(hyp: &[A], reference: &[B]) -> Option<f64>
where
    A: PartialEq<B>,
{
    if reference.is_empty() {
        return None;
    }
    Some(edit_distance(hyp, reference) as f64 / reference.len() as f64)
}

/// A reference transcript: the first line of a text file.
#[derive(Debug, Clone)]
pub struct Reference {
    path: PathBuf,
    text: String,
    words: Vec<String>,
}

impl Reference {
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => LatticeError::MalformedReference {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
            _ => LatticeError::file_access(path, e),
        })?;
        Ok(Self::from_text(path, &content))
    }

    /// Build from file contents; only the first line is consulted.
    pub fn from_text(path: &Path, content: &str) -> Self {
        let text = content.lines().next().unwrap_or("").trim_end().to_string();
        let words = text.split_whitespace().map(str::to_string).collect();
        Self {
            path: path.to_path_buf(),
            text,
            words,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The first line as written.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// WER of `hyp` against this reference.
    ///
    /// A reference with no words is reported as
    /// [`LatticeError::EmptyReference`] instead of a division by zero.
    pub fn word_error_rate(&self, hyp: &[String]) -> Result<f64> {
        word_error_rate(hyp, &self.words).ok_or_else(|| LatticeError::EmptyReference {
            path: self.path.clone(),
        })
    }
}
