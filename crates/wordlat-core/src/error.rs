use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// What went wrong inside a lattice token stream.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid {expected}: {token:?}")]
    InvalidNumber { expected: &'static str, token: String },

    #[error("expected keyword {expected:?}, found {found:?}")]
    UnexpectedKeyword { expected: &'static str, found: String },

    #[error("node index {index} out of range (numNodes = {num_nodes})")]
    NodeOutOfRange { index: usize, num_nodes: usize },

    #[error("duplicate edge ({src}, {dst})")]
    DuplicateEdge { src: usize, dst: usize },

    #[error("input is not valid UTF-8")]
    InvalidUtf8,
}

/// Fatal outcomes of processing one lattice.
///
/// Each kind maps to its own process exit code via [`LatticeError::exit_code`].
#[derive(Debug, Error)]
pub enum LatticeError {
    #[error("unable to access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("not able to parse {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("not able to parse reference {}: {reason}", path.display())]
    MalformedReference { path: PathBuf, reason: String },

    #[error("output path {} collides with an input path", path.display())]
    OutputPathConflict { path: PathBuf },

    #[error("no path from node {start} to node {end}")]
    NoPath { start: usize, end: usize },

    #[error("reference {} contains no words", path.display())]
    EmptyReference { path: PathBuf },
}

impl LatticeError {
    pub(crate) fn file_access(path: &Path, source: io::Error) -> Self {
        Self::FileAccess {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn malformed(path: &Path, source: ParseError) -> Self {
        Self::Malformed {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileAccess { .. } => 1,
            Self::Malformed { .. } | Self::MalformedReference { .. } => 2,
            Self::EmptyReference { .. } => 3,
            Self::NoPath { .. } => 4,
            Self::OutputPathConflict { .. } => 5,
        }
    }
}

pub type Result<T> = std::result::Result<T, LatticeError>;
