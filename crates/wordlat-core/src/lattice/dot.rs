use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::Lattice;
use crate::error::LatticeError;

impl Lattice {
    /// Graphviz description of the lattice, laid out left to right with one
    /// labelled statement per edge.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph g {\n\trankdir=\"LR\"\n");
        for (src, dst, edge) in self.edges() {
            let label = edge.label().replace('\\', "\\\\").replace('"', "\\\"");
            let _ = writeln!(out, "\t{src} -> {dst} [label = \"{label}\"]");
        }
        out.push_str("}\n");
        out
    }

    /// Write [`Lattice::to_dot`] to `path`.
    pub fn write_dot(&self, path: &Path) -> Result<(), LatticeError> {
        fs::write(path, self.to_dot()).map_err(|e| LatticeError::file_access(path, e))
    }
}

#[cfg(test)]
mod tests {
    use crate::testutil::hello_world;

    #[test]
    fn test_dot_layout() {
        let dot = hello_world().to_dot();
        assert_eq!(
            dot,
            "digraph g {\n\trankdir=\"LR\"\n\
             \t0 -> 1 [label = \"hello\"]\n\
             \t1 -> 2 [label = \"world\"]\n\
             }\n"
        );
    }

    #[test]
    fn test_dot_escapes_quotes() {
        let lat = crate::lattice::Lattice::from_text(
            "id q start 0 end 1 numNodes 2 numEdges 1 node 0 0 node 1 1 edge 0 1 say\"hi 0 0",
        )
        .unwrap();
        assert!(lat.to_dot().contains("[label = \"say\\\"hi\"]"));
    }

    #[test]
    fn test_write_dot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("utt1.dot");
        hello_world().write_dot(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("digraph g {"));
        assert!(written.trim_end().ends_with('}'));
    }
}
