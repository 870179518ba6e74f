//! # sampling_engine: Statistical Audit Sampling
//!
//! ## Layer 2 (Engine) Role
//!
//! Given a population of transactions and a [`SamplingParams`], the engine
//! computes a defensible sample size, selects concrete items and reports
//! coverage and calculation metadata for audit documentation.
//!
//! ## Control Flow
//!
//! ```text
//! validate ─► threshold split ─► sample size ─► × risk factor ─► strategy ─► assemble
//!                                                                   │
//!                                                     STRATIFIED ───┴─► allocator ─► SRS per stratum
//! ```
//!
//! - [`validation`]: business-rule checks and advisory warnings (returned, never logged only)
//! - [`risk`]: risk level → multiplier lookup
//! - [`threshold`]: high-value split into targeted and residual sets
//! - [`sizing`]: monetary-unit (Poisson) and attribute (Cochran) formulas
//! - [`selection`]: SRS, systematic, monetary-unit and stratified strategies
//! - [`stratification`]: amount strata and proportional allocation
//! - [`assembler`]: coverage, parameter fingerprint, result assembly
//! - [`engine`]: [`generate_sample`] entry point and reproducibility check
//!
//! ## Usage Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use sampling_engine::{generate_sample, validate};
//! use sampling_engine::types::{SamplingMethod, SamplingParams, Transaction};
//!
//! let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
//! let population: Vec<Transaction> = (1..=100)
//!     .map(|i| Transaction::new(format!("T{:03}", i), date, 1_000.0 * i as f64))
//!     .collect();
//!
//! let params = SamplingParams {
//!     method: SamplingMethod::Mus,
//!     population_size: 100,
//!     population_sum: 5_050_000.0,
//!     materiality: Some(100_000.0),
//!     expected_misstatement: Some(10_000.0),
//!     seed: 12345,
//!     ..SamplingParams::default()
//! };
//! assert!(validate(&params).is_empty());
//!
//! let first = generate_sample(&population, &params).unwrap();
//! let second = generate_sample(&population, &params).unwrap();
//! assert_eq!(first.total_ids(), second.total_ids());
//! ```
//!
//! ## Concurrency
//!
//! The engine is a synchronous pure function of `(population, params)`.
//! Each call owns its RNG; there is no shared state, so independent requests
//! may run on separate threads without coordination.

pub mod assembler;
pub mod engine;
pub mod risk;
pub mod selection;
pub mod sizing;
pub mod stratification;
pub mod threshold;
pub mod validation;

pub use sampling_core::types;
pub use sampling_core::types::{SamplingError, SamplingParams, SamplingResult, Transaction};

pub use engine::{generate_sample, verify_reproducibility, ReproducibilityReport};
pub use validation::{advisory_warnings, population_warnings, validate};

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, SamplingError>;
