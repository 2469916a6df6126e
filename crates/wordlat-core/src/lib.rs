//! Speech-recognition word lattices: parsing, canonical serialization,
//! best-path decoding, path counting, time queries and word error rate.

pub mod decoder;
pub mod error;
pub mod hypothesis;
pub mod lattice;
pub mod settings;
pub(crate) mod testutil;

pub use decoder::{BestPath, PathEdge};
pub use error::{LatticeError, ParseError};
pub use hypothesis::{Hypothesis, Reference};
pub use lattice::{Edge, Lattice};
