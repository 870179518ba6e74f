//! Mathematical utilities for audit sampling.
//!
//! - `statistics`: Confidence-level constants (z-scores, Poisson factors) and
//!   rounding helpers shared by the sizing formulas and the result assembler.

pub mod statistics;
