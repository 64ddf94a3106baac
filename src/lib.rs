//! # santa23-solver
//! Beam-search solver suite for the N-cube, wreath and globe twisty
//! puzzles (§1 OVERVIEW): state kernels, formula search/algebra, slice
//! remapping, and the beam search that ties them together.

pub mod error;
/// Deterministic xorshift PRNG used only for beam-search collision
/// resolution (§5, §9 PRNG discipline).
pub mod rng;
/// Generator sequences and the facelet-change-map algebra shared by every
/// puzzle family (§4.2).
pub mod formula;
/// N×N×N cube state, views (rainbow/edge/face), and its formula searchers
/// (§3, §4).
pub mod cube;
/// Two-ring wreath state and formula search (§4.6).
pub mod wreath;
/// Cylindrical globe state and formula search (§4.7).
pub mod globe;
/// Generic beam-search solver driving any `beam::SearchState` (§4.5).
pub mod beam;
/// Typed puzzle shape and the `SearchState` goal wrappers wiring each
/// puzzle family into the beam solver (§0.1 SPEC_FULL).
pub mod puzzle;
/// Random scramble generation for each puzzle family, used to build test
/// fixtures and benchmark inputs (§9 ambient test-tooling section).
pub mod scramble;

pub use error::Error;
