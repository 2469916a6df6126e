
use super::*;
use crate::testutil::hello_world;

#[test]
fn test_edges_in_source_then_destination_order() {
    let text = "id o start 0 end 3 numNodes 4 numEdges 4 \
                node 0 0 node 1 1 node 2 1 node 3 2 \
                edge 2 3 d 0 0 edge 0 2 c 0 0 edge 1 3 b 0 0 edge 0 1 a 0 0";
    let lat = Lattice::from_text(text).unwrap();
    let order: Vec<(usize, usize)> = lat.edges().map(|(i, j, _)| (i, j)).collect();
    assert_eq!(order, vec![(0, 1), (0, 2), (1, 3), (2, 3)]);
}

#[test]
fn test_algorithms_ignore_nodes_outside_range() {
    // Node 3 hangs off the sink's range; start..end is 0..2.
    let edges = vec![
        (0, 1, Edge::new("a", 1, 0)),
        (1, 2, Edge::new("b", 1, 0)),
        (1, 3, Edge::new("c", 0, 0)),
        (3, 2, Edge::new("d", 0, 0)),
    ];
    let lat = Lattice::from_parts("r", 0, 2, vec![0.0, 1.0, 2.0, 1.5], edges).unwrap();
    assert_eq!(lat.topological_order(), &[0, 1, 2]);
    assert_eq!(lat.edges().count(), 2);
    assert_eq!(lat.count_all_paths(), num_bigint::BigUint::from(1u32));
    assert_eq!(lat.decode(1.0).unwrap().words(), &["a", "b"]);
    // The stored edge count still covers every parsed edge.
    assert_eq!(lat.num_edges(), 4);
}

#[test]
fn test_boundary_out_of_range() {
    let err = Lattice::from_parts("b", 0, 5, vec![0.0, 1.0], Vec::new()).unwrap_err();
    assert_eq!(
        err,
        crate::error::ParseError::NodeOutOfRange {
            index: 5,
            num_nodes: 2
        }
    );
}

#[test]
fn test_edge_lookup_out_of_range_is_none() {
    let lat = hello_world();
    assert!(lat.edge(7, 0).is_none());
    assert!(lat.in_range(2));
    assert!(!lat.in_range(3));
}

#[test]
fn test_debug_is_compact() {
    let dbg = format!("{:?}", hello_world());
    assert!(dbg.contains("utt1"));
    assert!(dbg.contains("num_edges: 2"));
}
