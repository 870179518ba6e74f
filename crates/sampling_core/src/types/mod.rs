//! Audit sampling data model.
//!
//! This module provides:
//! - `transaction`: Ledger lines making up the sampled population
//! - `params`: Audit configuration (`SamplingParams`) and its enumerations
//! - `sample`: Selected items, strata, and the engine's `SamplingResult`
//! - `error`: Structured error type for configuration and numerical failures
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Transaction`] from `transaction`
//! - [`SamplingParams`], [`SamplingMethod`], [`TestType`], [`RiskLevel`],
//!   [`ThresholdMode`], [`RiskWeighting`], [`RiskMatrix`] from `params`
//! - [`SampleItem`], [`SampleClassification`], [`Stratum`], [`SamplingResult`],
//!   [`PlanSummary`], [`SamplePartition`], [`SampleSummary`], [`ResultMetadata`],
//!   [`CalculationTrace`] from `sample`
//! - [`SamplingError`] from `error`

pub mod error;
pub mod params;
pub mod sample;
pub mod transaction;

pub use error::SamplingError;
pub use params::{
    RiskLevel, RiskMatrix, RiskWeighting, SamplingMethod, SamplingParams, TestType, ThresholdMode,
};
pub use sample::{
    CalculationTrace, PlanSummary, ResultMetadata, SampleClassification, SampleItem,
    SamplePartition, SampleSummary, SamplingResult, Stratum,
};
pub use transaction::Transaction;
