//! Result assembly: coverage, parameter fingerprint and the final result.

use chrono::Utc;
use serde_json::Value;
use sha2::{Digest, Sha256};

use sampling_core::math::statistics::round_to;
use sampling_core::types::{
    PlanSummary, ResultMetadata, SampleItem, SamplePartition, SamplingParams, SamplingResult,
    Stratum,
};

/// Selected absolute amount as a percentage of `population_sum`, two decimals.
///
/// Returns 0 when the population sum is zero, negative or not finite.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use sampling_engine::assembler::coverage_percentage;
/// use sampling_engine::types::{SampleItem, Transaction};
///
/// let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
/// let items = vec![SampleItem::targeted(Transaction::new("A", date, -250.0))];
/// assert_eq!(coverage_percentage(&items, 750.0), 33.33);
/// assert_eq!(coverage_percentage(&items, 0.0), 0.0);
/// ```
pub fn coverage_percentage(items: &[SampleItem], population_sum: f64) -> f64 {
    if !population_sum.is_finite() || population_sum <= 0.0 {
        return 0.0;
    }
    let covered: f64 = items.iter().map(|item| item.transaction.absolute_amount()).sum();
    round_to(100.0 * covered / population_sum, 2)
}

/// Stable fingerprint of the parameters.
///
/// Parameters are converted to JSON, encoded with object keys sorted at every
/// level, and hashed with SHA-256. Key order in the source never changes the
/// fingerprint.
pub fn param_hash(params: &SamplingParams) -> String {
    // SamplingParams has only string keys, so the conversion cannot fail.
    let value = serde_json::to_value(params).unwrap_or(Value::Null);
    let mut encoded = String::new();
    write_canonical(&value, &mut encoded);
    hex::encode(Sha256::digest(encoded.as_bytes()))
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(values) => {
            out.push('[');
            for (i, v) in values.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(v, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Builds the [`SamplingResult`] with `total = targeted ++ residual`.
pub fn assemble(
    params: &SamplingParams,
    targeted: Vec<SampleItem>,
    residual: Vec<SampleItem>,
    strata: Option<Vec<Stratum>>,
    metadata: ResultMetadata,
    warnings: Vec<String>,
) -> SamplingResult {
    let total: Vec<SampleItem> = targeted.iter().chain(residual.iter()).cloned().collect();

    let plan = PlanSummary {
        recommended_sample_size: metadata.calculation.final_n,
        actual_sample_size: total.len(),
        coverage_percentage: coverage_percentage(&total, params.population_sum),
        method: params.method,
        test_type: params.test_type,
        generated_at: Utc::now(),
        param_hash: param_hash(params),
        seed: params.seed,
    };

    SamplingResult {
        plan,
        samples: SamplePartition {
            targeted,
            residual,
            total,
        },
        strata,
        metadata,
        warnings,
    }
}
