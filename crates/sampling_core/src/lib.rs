//! # sampling_core: Foundation Layer for Audit Sampling
//!
//! ## Layer 1 (Foundation) Role
//!
//! sampling_core is the bottom layer of the Auditrix workspace, providing:
//! - The data model: `Transaction`, `SamplingParams`, `SampleItem`,
//!   `Stratum`, `SamplingResult` (`types`)
//! - Statistical constants: `z_score`, `poisson_factor` (`math::statistics`)
//! - Seeded, reproducible random number generation: `AuditRng` (`rng`)
//! - Error types: `SamplingError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other Auditrix crates, with minimal external
//! dependencies:
//! - chrono: Transaction dates and generation timestamps
//! - rand: Seeded pseudo-random stream
//! - serde: Serialisation of parameters and plans
//! - thiserror: Error derivation
//!
//! ## Usage Examples
//!
//! ```rust
//! use sampling_core::math::statistics::{poisson_factor, z_score};
//! use sampling_core::rng::AuditRng;
//!
//! assert_eq!(z_score(95), Some(1.96));
//! assert!((poisson_factor(95.0) - 2.9957).abs() < 1e-3);
//!
//! let mut rng = AuditRng::from_seed(12345);
//! let u = rng.gen_uniform();
//! assert!((0.0..1.0).contains(&u));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod rng;
pub mod types;
