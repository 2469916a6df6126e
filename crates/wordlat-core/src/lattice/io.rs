use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};

use tracing::{debug, debug_span};

use super::{Edge, Lattice};
use crate::error::{LatticeError, ParseError};

/// Decimal digits used for timestamps in the lattice text format.
pub const TIME_DECIMALS: usize = 2;

/// Whitespace-delimited token reader over the lattice text format.
struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            inner: text.split_whitespace(),
        }
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a str, ParseError> {
        self.inner
            .next()
            .ok_or(ParseError::UnexpectedEof { expected })
    }

    fn keyword(&mut self, expected: &'static str) -> Result<(), ParseError> {
        let found = self.next(expected)?;
        if found != expected {
            return Err(ParseError::UnexpectedKeyword {
                expected,
                found: found.to_string(),
            });
        }
        Ok(())
    }

    fn parse<T: FromStr>(&mut self, expected: &'static str) -> Result<T, ParseError> {
        let token = self.next(expected)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            expected,
            token: token.to_string(),
        })
    }

    /// `<keyword> <value>` header line.
    fn field<T: FromStr>(&mut self, keyword: &'static str) -> Result<T, ParseError> {
        self.keyword(keyword)?;
        self.parse(keyword)
    }
}

impl Lattice {
    /// Parse the lattice text format.
    ///
    /// ```text
    /// id <string>
    /// start <int>
    /// end <int>
    /// numNodes <int>
    /// numEdges <int>
    /// node <index> <time>                         (numNodes times)
    /// edge <src> <dst> <label> <amScore> <lmScore> (numEdges times)
    /// ```
    ///
    /// Anything after the last declared edge is ignored.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        let mut tokens = Tokens::new(text);

        tokens.keyword("id")?;
        let utterance_id = tokens.next("utterance id")?.to_string();
        let _span = debug_span!("parse_lattice", utterance_id = %utterance_id).entered();
        let start: usize = tokens.field("start")?;
        let end: usize = tokens.field("end")?;
        let num_nodes: usize = tokens.field("numNodes")?;
        let num_edges: usize = tokens.field("numEdges")?;
        debug!(start, end, num_nodes, num_edges, "header");

        // Header counts are untrusted: grow with the records actually read.
        let mut nodes = Vec::new();
        for _ in 0..num_nodes {
            tokens.keyword("node")?;
            let index: usize = tokens.parse("node index")?;
            let time: f64 = tokens.parse("node time")?;
            if index >= num_nodes {
                return Err(ParseError::NodeOutOfRange { index, num_nodes });
            }
            nodes.push((index, time));
        }
        let mut node_times = vec![0.0; num_nodes];
        for (index, time) in nodes {
            node_times[index] = time;
        }

        let mut edges = Vec::new();
        for _ in 0..num_edges {
            tokens.keyword("edge")?;
            let src: usize = tokens.parse("edge source")?;
            let dst: usize = tokens.parse("edge destination")?;
            let label = tokens.next("edge label")?;
            let am_score: i32 = tokens.parse("amScore")?;
            let lm_score: i32 = tokens.parse("lmScore")?;
            edges.push((src, dst, Edge::new(label, am_score, lm_score)));
        }

        Lattice::from_parts(utterance_id, start, end, node_times, edges)
    }

    /// Read and parse a lattice file.
    ///
    /// Returns [`LatticeError::FileAccess`] if the file cannot be read and
    /// [`LatticeError::Malformed`] if its contents do not parse.
    pub fn open(path: &Path) -> Result<Self, LatticeError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::InvalidData => LatticeError::malformed(path, ParseError::InvalidUtf8),
            _ => LatticeError::file_access(path, e),
        })?;
        Lattice::from_text(&text).map_err(|e| LatticeError::malformed(path, e))
    }

    /// Canonical text form, rebuilt from the in-memory fields.
    ///
    /// The header always declares `start 0` and `end numNodes-1`; nodes are
    /// written in ascending index order and edges by source, then
    /// destination, over that full range.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut impl fmt::Write) -> fmt::Result {
        writeln!(out, "id {}", self.utterance_id)?;
        writeln!(out, "start 0")?;
        writeln!(out, "end {}", self.num_nodes().saturating_sub(1))?;
        writeln!(out, "numNodes {}", self.num_nodes())?;
        writeln!(out, "numEdges {}", self.num_edges)?;
        for (index, time) in self.node_times.iter().enumerate() {
            writeln!(out, "node {index} {time:.prec$}", prec = TIME_DECIMALS)?;
        }
        for (src, dsts) in self.successors.iter().enumerate() {
            for (dst, edge) in dsts {
                writeln!(
                    out,
                    "edge {src} {dst} {} {} {}",
                    edge.label(),
                    edge.am_score(),
                    edge.lm_score()
                )?;
            }
        }
        Ok(())
    }

    /// Write [`Lattice::to_text`] to `path`.
    pub fn save(&self, path: &Path) -> Result<(), LatticeError> {
        fs::write(path, self.to_text()).map_err(|e| LatticeError::file_access(path, e))
    }
}

impl fmt::Display for Lattice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f)
    }
}
