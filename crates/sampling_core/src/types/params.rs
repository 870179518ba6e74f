//! Audit sampling parameters.
//!
//! [`SamplingParams`] is the caller-supplied audit configuration. Enumerated
//! fields parse case-insensitively from their domain spellings; unknown
//! values are rejected with a [`SamplingError`] configuration error, both
//! through [`FromStr`] and through serde deserialisation.
//!
//! # Examples
//!
//! ```
//! use sampling_core::types::{RiskLevel, SamplingMethod, ThresholdMode};
//!
//! assert_eq!("mus".parse::<SamplingMethod>().unwrap(), SamplingMethod::Mus);
//! assert_eq!("High".parse::<RiskLevel>().unwrap(), RiskLevel::High);
//! assert_eq!(
//!     "performance-materiality".parse::<ThresholdMode>().unwrap(),
//!     ThresholdMode::PerformanceMateriality
//! );
//! assert!("CLUSTER".parse::<SamplingMethod>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::SamplingError;

/// Kind of audit test the sample supports.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum TestType {
    /// Substantive test of details; sized with monetary-unit (Poisson) formula.
    Substantive,
    /// Test of controls; sized with the attribute (Cochran) formula.
    Control,
}

impl TestType {
    /// Returns the canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestType::Substantive => "SUBSTANTIVE",
            TestType::Control => "CONTROL",
        }
    }
}

impl FromStr for TestType {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, SamplingError> {
        match s.trim().to_uppercase().as_str() {
            "SUBSTANTIVE" => Ok(TestType::Substantive),
            "CONTROL" => Ok(TestType::Control),
            _ => Err(SamplingError::UnsupportedTestType(s.to_string())),
        }
    }
}

/// Selection method used for the residual population.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", try_from = "String")]
pub enum SamplingMethod {
    /// Simple random sampling.
    Srs,
    /// Systematic sampling with a random start.
    Systematic,
    /// Monetary-unit sampling (probability proportional to size).
    Mus,
    /// Amount-stratified sampling with SRS inside each stratum.
    Stratified,
}

impl SamplingMethod {
    /// Returns the canonical spelling, also used as the selection label.
    pub fn as_str(&self) -> &'static str {
        match self {
            SamplingMethod::Srs => "SRS",
            SamplingMethod::Systematic => "SYSTEMATIC",
            SamplingMethod::Mus => "MUS",
            SamplingMethod::Stratified => "STRATIFIED",
        }
    }

    /// All supported methods.
    pub fn all() -> [SamplingMethod; 4] {
        [
            SamplingMethod::Srs,
            SamplingMethod::Systematic,
            SamplingMethod::Mus,
            SamplingMethod::Stratified,
        ]
    }
}

impl FromStr for SamplingMethod {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, SamplingError> {
        match s.trim().to_uppercase().as_str() {
            "SRS" => Ok(SamplingMethod::Srs),
            "SYSTEMATIC" => Ok(SamplingMethod::Systematic),
            "MUS" | "PPS" => Ok(SamplingMethod::Mus),
            "STRATIFIED" => Ok(SamplingMethod::Stratified),
            _ => Err(SamplingError::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Qualitative assessed risk of material misstatement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RiskLevel {
    /// Low assessed risk.
    Low,
    /// Moderate assessed risk.
    Moderate,
    /// High assessed risk.
    High,
}

impl RiskLevel {
    /// Returns the canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, SamplingError> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "moderate" => Ok(RiskLevel::Moderate),
            "high" => Ok(RiskLevel::High),
            _ => Err(SamplingError::UnknownRiskLevel(s.to_string())),
        }
    }
}

/// Basis for the high-value threshold that splits off targeted items.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum ThresholdMode {
    /// No threshold; the whole population is residual.
    #[default]
    Disabled,
    /// Threshold equals performance materiality.
    PerformanceMateriality,
    /// Threshold equals total materiality.
    TotalMateriality,
    /// Threshold is an explicit amount.
    Custom,
}

impl ThresholdMode {
    /// Returns the canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdMode::Disabled => "disabled",
            ThresholdMode::PerformanceMateriality => "performance-materiality",
            ThresholdMode::TotalMateriality => "total-materiality",
            ThresholdMode::Custom => "custom",
        }
    }
}

impl FromStr for ThresholdMode {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, SamplingError> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "disabled" | "none" => Ok(ThresholdMode::Disabled),
            "performance-materiality" => Ok(ThresholdMode::PerformanceMateriality),
            "total-materiality" => Ok(ThresholdMode::TotalMateriality),
            "custom" => Ok(ThresholdMode::Custom),
            _ => Err(SamplingError::UnknownThresholdMode(s.to_string())),
        }
    }
}

/// Risk weighting applied to monetary-unit selection.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RiskWeighting {
    /// Weight equals the absolute amount.
    #[default]
    Disabled,
    /// Weight is `|amount| * (1 + 0.6 * riskScore)`.
    Moderate,
    /// Weight is `|amount| * (1 + 1.0 * riskScore)`.
    High,
}

impl RiskWeighting {
    /// Returns the canonical spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskWeighting::Disabled => "disabled",
            RiskWeighting::Moderate => "moderate",
            RiskWeighting::High => "high",
        }
    }

    /// Multiplier applied to the risk score, or `None` when disabled.
    pub fn score_multiplier(&self) -> Option<f64> {
        match self {
            RiskWeighting::Disabled => None,
            RiskWeighting::Moderate => Some(0.6),
            RiskWeighting::High => Some(1.0),
        }
    }
}

impl FromStr for RiskWeighting {
    type Err = SamplingError;

    fn from_str(s: &str) -> Result<Self, SamplingError> {
        match s.trim().to_lowercase().as_str() {
            "disabled" | "none" => Ok(RiskWeighting::Disabled),
            "moderate" => Ok(RiskWeighting::Moderate),
            "high" => Ok(RiskWeighting::High),
            _ => Err(SamplingError::UnknownRiskWeighting(s.to_string())),
        }
    }
}

macro_rules! impl_display_and_try_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.as_str())
                }
            }

            impl TryFrom<String> for $ty {
                type Error = SamplingError;

                fn try_from(value: String) -> Result<Self, SamplingError> {
                    value.parse()
                }
            }
        )*
    };
}

impl_display_and_try_from!(TestType, SamplingMethod, RiskLevel, ThresholdMode, RiskWeighting);

/// Multipliers applied to the base sample size per risk level.
///
/// Deserialisation requires all three keys; there is no defaulting of a
/// missing level.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskMatrix {
    /// Multiplier for [`RiskLevel::Low`].
    pub low: f64,
    /// Multiplier for [`RiskLevel::Moderate`].
    pub moderate: f64,
    /// Multiplier for [`RiskLevel::High`].
    pub high: f64,
}

impl RiskMatrix {
    /// Creates a matrix from the three multipliers.
    pub fn new(low: f64, moderate: f64, high: f64) -> Self {
        Self {
            low,
            moderate,
            high,
        }
    }

    /// Direct lookup of the multiplier for `level`.
    #[inline]
    pub fn get(&self, level: RiskLevel) -> f64 {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Moderate => self.moderate,
            RiskLevel::High => self.high,
        }
    }
}

impl Default for RiskMatrix {
    fn default() -> Self {
        Self::new(0.8, 1.0, 1.2)
    }
}

/// Audit sampling configuration.
///
/// Monetary fields that only apply to one test type are optional. Business
/// rules (positive materiality, expected below tolerable, supported
/// confidence level, positive seed, ...) are checked by the engine's
/// validator, not at construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SamplingParams {
    /// Fiscal year under audit.
    pub fiscal_year: i32,
    /// Substantive or control test.
    pub test_type: TestType,
    /// Selection method.
    pub method: SamplingMethod,
    /// Declared number of population items.
    pub population_size: usize,
    /// Declared total monetary value of the population.
    pub population_sum: f64,
    /// Overall materiality.
    #[serde(default)]
    pub materiality: Option<f64>,
    /// Performance materiality (at most `materiality`).
    #[serde(default)]
    pub performance_materiality: Option<f64>,
    /// Expected misstatement (below `materiality`).
    #[serde(default)]
    pub expected_misstatement: Option<f64>,
    /// Confidence level in percent: 90, 95 or 99.
    pub confidence_level: u32,
    /// Assessed risk level.
    pub risk_level: RiskLevel,
    /// Tolerable deviation rate in percent (control tests).
    #[serde(default)]
    pub tolerable_deviation_rate: Option<f64>,
    /// Expected deviation rate in percent (control tests).
    #[serde(default)]
    pub expected_deviation_rate: Option<f64>,
    /// Basis for the high-value threshold.
    #[serde(default)]
    pub threshold_mode: ThresholdMode,
    /// Explicit threshold when `threshold_mode` is custom.
    #[serde(default)]
    pub custom_threshold: Option<f64>,
    /// Upper amount bounds of the strata (exclusive), ascending.
    #[serde(default)]
    pub strata_bounds: Vec<f64>,
    /// Minimum sample size per stratum.
    #[serde(default)]
    pub min_per_stratum: usize,
    /// Risk weighting for monetary-unit selection.
    #[serde(default)]
    pub risk_weighting: RiskWeighting,
    /// Multipliers per risk level.
    pub risk_matrix: RiskMatrix,
    /// Seed for the deterministic RNG; must be positive.
    pub seed: u64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            fiscal_year: 2024,
            test_type: TestType::Substantive,
            method: SamplingMethod::Mus,
            population_size: 0,
            population_sum: 0.0,
            materiality: None,
            performance_materiality: None,
            expected_misstatement: None,
            confidence_level: 95,
            risk_level: RiskLevel::Moderate,
            tolerable_deviation_rate: None,
            expected_deviation_rate: None,
            threshold_mode: ThresholdMode::Disabled,
            custom_threshold: None,
            strata_bounds: Vec::new(),
            min_per_stratum: 0,
            risk_weighting: RiskWeighting::Disabled,
            risk_matrix: RiskMatrix::default(),
            seed: 1,
        }
    }
}

impl SamplingParams {
    /// Risk multiplier for the configured risk level.
    #[inline]
    pub fn risk_factor(&self) -> f64 {
        self.risk_matrix.get(self.risk_level)
    }
}
