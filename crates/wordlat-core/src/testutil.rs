#![cfg(test)]

use crate::lattice::{Edge, Lattice};

/// Shared fixture: `0 -hello(2,3)-> 1 -world(1,1)-> 2`, times 0.00 / 0.50 / 1.25.
pub fn hello_world() -> Lattice {
    Lattice::from_text(
        "id utt1\nstart 0\nend 2\nnumNodes 3\nnumEdges 2\n\
         node 0 0.00\nnode 1 0.50\nnode 2 1.25\n\
         edge 0 1 hello 2 3\nedge 1 2 world 1 1\n",
    )
    .unwrap()
}

/// A linear lattice `0 -> 1 -> ... -> n` with zero scores.
///
/// `times` must have one more entry than `labels`.
pub fn chain(labels: &[&str], times: &[f64]) -> Lattice {
    assert_eq!(times.len(), labels.len() + 1);
    let edges = labels
        .iter()
        .enumerate()
        .map(|(i, label)| (i, i + 1, Edge::new(*label, 0, 0)));
    Lattice::from_parts("chain", 0, labels.len(), times.to_vec(), edges).unwrap()
}

/// Two parallel routes from 0 to 3: `0 -a-> 1 -b-> 3` and `0 -c-> 2 -d-> 3`.
pub fn diamond(a: (i32, i32), b: (i32, i32), c: (i32, i32), d: (i32, i32)) -> Lattice {
    let edges = vec![
        (0, 1, Edge::new("a", a.0, a.1)),
        (1, 3, Edge::new("b", b.0, b.1)),
        (0, 2, Edge::new("c", c.0, c.1)),
        (2, 3, Edge::new("d", d.0, d.1)),
    ];
    Lattice::from_parts("diamond", 0, 3, vec![0.0, 1.0, 1.0, 2.0], edges).unwrap()
}
