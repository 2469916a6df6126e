//! Command-line driver for `wordlat-core`: batch decoding of lattice lists
//! and single-lattice inspection.

pub mod commands;
pub mod trace_init;
