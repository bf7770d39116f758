//! Simplified wave function collapse over a fixed pipe tile set
//!
//! A square grid starts with every cell able to hold any tile. Each step
//! collapses one of the least ambiguous cells at random, then recomputes the
//! candidates of every open cell from its four neighbours. A scheduler drives
//! steps on a tick and starts a fresh grid after each full collapse.

#![forbid(unsafe_code)]

/// Collapse engine, propagation, selection and scheduling
pub mod algorithm;
/// Command line, configuration, rendering and error handling
pub mod io;
/// Grid state and tile rule data
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
