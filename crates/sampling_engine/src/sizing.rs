//! Sample-size calculation.
//!
//! Two formulas, selected by test type, operate on the **residual**
//! population only:
//!
//! ## Monetary-unit sizing (substantive tests)
//!
//! ```text
//! n = ceil((Σ|amount| / materiality) · (poissonFactor(c) + expected / materiality))
//! ```
//!
//! ## Attribute sizing (control tests)
//!
//! Cochran's formula with finite-population correction:
//!
//! ```text
//! p = expectedRate / 100, q = 1 - p, e = (tolerableRate - expectedRate) / 100
//! n0 = z² p q / e²
//! n  = n0 / (1 + (n0 - 1) / N)
//! ```
//!
//! Both results are clamped to `[30, N]`. When the inputs a formula needs
//! are absent, the heuristic `max(30, ceil(0.05 · N))` capped at 100 applies.
//! The base size is then scaled by the risk factor and rounded up.

use sampling_core::math::statistics::{ceil_count, poisson_factor, z_score};
use sampling_core::types::{SamplingError, SamplingParams, TestType, Transaction};

use crate::Result;

/// Lower clamp applied to formula results.
pub const MIN_SAMPLE_SIZE: usize = 30;

/// Share of the population used by the fallback heuristic.
pub const FALLBACK_RATE: f64 = 0.05;

/// Upper cap of the fallback heuristic.
pub const FALLBACK_CAP: usize = 100;

/// Base sample size and how it was obtained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BaseSampleSize {
    /// Base size before the risk factor.
    pub n: usize,
    /// `true` when the fallback heuristic replaced the formula.
    pub used_fallback: bool,
}

impl BaseSampleSize {
    fn formula(n: usize) -> Self {
        Self {
            n,
            used_fallback: false,
        }
    }

    fn fallback(population_len: usize) -> Self {
        Self {
            n: fallback_sample_size(population_len),
            used_fallback: true,
        }
    }
}

/// Heuristic size `max(30, ceil(0.05 · N))` capped at 100.
///
/// # Examples
///
/// ```
/// use sampling_engine::sizing::fallback_sample_size;
///
/// assert_eq!(fallback_sample_size(10), 30);
/// assert_eq!(fallback_sample_size(1_000), 50);
/// assert_eq!(fallback_sample_size(1_000_000), 100);
/// ```
pub fn fallback_sample_size(population_len: usize) -> usize {
    let heuristic = (FALLBACK_RATE * population_len as f64).ceil() as usize;
    heuristic.max(MIN_SAMPLE_SIZE).min(FALLBACK_CAP)
}

/// Clamps a formula result to `[30, population_len]`.
///
/// The population bound wins when the population is smaller than 30.
#[inline]
pub fn clamp_to_population(n: usize, population_len: usize) -> usize {
    n.max(MIN_SAMPLE_SIZE).min(population_len)
}

/// Raw monetary-unit sample size before rounding and clamping.
///
/// # Examples
///
/// ```
/// use sampling_engine::sizing::mus_sample_size;
///
/// let n = mus_sample_size(5_050_000.0, 100_000.0, 10_000.0, 95);
/// assert!((n - 156.33).abs() < 0.01);
/// ```
pub fn mus_sample_size(
    population_sum: f64,
    materiality: f64,
    expected_misstatement: f64,
    confidence: u32,
) -> f64 {
    (population_sum / materiality)
        * (poisson_factor(confidence as f64) + expected_misstatement / materiality)
}

/// Raw attribute sample size (Cochran with finite-population correction).
///
/// Rates are in percent. Returns `None` when the confidence level has no
/// tabulated z-score, the tolerable rate does not exceed the expected rate,
/// or the population is empty. A zero expected rate gives `n0 = 0`, which
/// returns 0 so that the minimum clamp decides the size.
///
/// # Examples
///
/// ```
/// use sampling_engine::sizing::attribute_sample_size;
///
/// // z = 1.96, p = 0.01, e = 0.04 → n0 ≈ 23.77, corrected for N = 1000
/// let n = attribute_sample_size(5.0, 1.0, 95, 1_000).unwrap();
/// assert!((n - 23.24).abs() < 0.01);
/// ```
pub fn attribute_sample_size(
    tolerable_rate: f64,
    expected_rate: f64,
    confidence: u32,
    population_len: usize,
) -> Option<f64> {
    let z = z_score(confidence)?;
    let p = expected_rate / 100.0;
    let q = 1.0 - p;
    let e = (tolerable_rate - expected_rate) / 100.0;
    if !(e > 0.0) || population_len == 0 {
        return None;
    }

    let n0 = z * z * p * q / (e * e);
    let correction = 1.0 + (n0 - 1.0) / population_len as f64;
    if !(n0 > 0.0) || !(correction > 0.0) {
        return Some(0.0);
    }
    Some(n0 / correction)
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn to_count(raw: f64, what: &str) -> Result<usize> {
    ceil_count(raw).ok_or_else(|| {
        SamplingError::NumericalInstability(format!("{} sample size is not finite: {}", what, raw))
    })
}

/// Computes the base sample size over the residual population.
///
/// An empty residual population yields 0.
///
/// # Errors
///
/// Returns [`SamplingError::NumericalInstability`] when a formula produces a
/// non-finite value (for example a confidence level of 100%).
pub fn base_sample_size(params: &SamplingParams, residual: &[Transaction]) -> Result<BaseSampleSize> {
    let population_len = residual.len();
    if population_len == 0 {
        return Ok(BaseSampleSize::formula(0));
    }

    match params.test_type {
        TestType::Substantive => {
            let (Some(materiality), Some(expected)) =
                (positive(params.materiality), params.expected_misstatement)
            else {
                return Ok(BaseSampleSize::fallback(population_len));
            };
            let residual_sum: f64 = residual.iter().map(Transaction::absolute_amount).sum();
            let raw = mus_sample_size(residual_sum, materiality, expected, params.confidence_level);
            let n = to_count(raw, "Monetary-unit")?;
            Ok(BaseSampleSize::formula(clamp_to_population(n, population_len)))
        }
        TestType::Control => {
            let (Some(tolerable), Some(expected)) = (
                positive(params.tolerable_deviation_rate),
                params.expected_deviation_rate,
            ) else {
                return Ok(BaseSampleSize::fallback(population_len));
            };
            match attribute_sample_size(tolerable, expected, params.confidence_level, population_len)
            {
                Some(raw) => {
                    let n = to_count(raw, "Attribute")?;
                    Ok(BaseSampleSize::formula(clamp_to_population(n, population_len)))
                }
                None => Ok(BaseSampleSize::fallback(population_len)),
            }
        }
    }
}

/// Scales `base_n` by `risk_factor` and rounds up.
///
/// # Errors
///
/// Returns [`SamplingError::NumericalInstability`] for a non-finite product.
pub fn apply_risk_factor(base_n: usize, risk_factor: f64) -> Result<usize> {
    to_count(base_n as f64 * risk_factor, "Risk-adjusted")
}
