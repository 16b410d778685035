//! Parsing, aggregation and plotting state for LOBSTER COHPCAR/COOPCAR
//! bond-analysis files.

pub mod color;
pub mod config;
pub mod data;
pub mod state;
