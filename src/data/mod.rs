/// Data layer: LOBSTER parsing, pair aggregation and axis fitting.
///
/// Architecture:
/// ```text
///  .zip / COHPCAR.lobster / COOPCAR.lobster
///        │
///        ▼
///   ┌──────────┐
///   │ archive  │  pick COHPCAR / COOPCAR members → text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  parser  │  header + numeric table + `No.` pair lines → ParsedFile
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  sum interactions per AtomPair → PairCurves
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  visible pairs → curves for the range fitter
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  range   │  energy window → symmetric DisplayRange
///   └──────────┘
/// ```
/// `loader` wires the first three stages into a [`model::Dataset`].

pub mod aggregate;
pub mod archive;
pub mod demo;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parser;
pub mod range;
